use ssz_primitives::Chunk;

use crate::{default_pool, Error, Hasher};

/// Types that can drive a [`Hasher`] to produce their merkle root
///
/// Implementors append their fields between an [`index`][Hasher::index]
/// snapshot and a terminating [`merkleize`][Hasher::merkleize] (or
/// [`merkleize_with_mixin`][Hasher::merkleize_with_mixin] for
/// variable-length collections). Container types compose by invoking their
/// children's [`hash_tree_root_with`][HashTreeRoot::hash_tree_root_with]
/// inside their own group.
///
/// ```rust
/// # use sszroot::*;
/// struct Checkpoint {
///     epoch: u64,
///     root: [u8; 32],
/// }
///
/// impl HashTreeRoot for Checkpoint {
///     fn hash_tree_root_with(&self, hasher: &mut Hasher) -> Result<(), Error> {
///         let index = hasher.index();
///         hasher.put_uint64(self.epoch);
///         hasher.put_bytes(&self.root);
///         hasher.merkleize(index);
///         Ok(())
///     }
/// }
///
/// let checkpoint = Checkpoint { epoch: 3, root: [0; 32] };
/// let root = checkpoint.hash_tree_root()?;
///
/// assert_eq!(
///     root,
///     hash_pair(&Chunk::from_u64_le(3), &Chunk::ZERO),
/// );
/// # Ok::<(), Error>(())
/// ```
pub trait HashTreeRoot {
    /// Drive `hasher` with this value's leaves and collapse them
    ///
    /// On success the value's whole subtree has been reduced to a single
    /// chunk at the group boundary that was current on entry.
    ///
    /// # Errors
    ///
    /// Propagates any validation failure; the root computation is
    /// abandoned and no partial root is produced.
    fn hash_tree_root_with(&self, hasher: &mut Hasher) -> Result<(), Error>;

    /// Compute this value's 32-byte merkle root using the
    /// [`default_pool`]
    fn hash_tree_root(&self) -> Result<Chunk, Error> {
        let mut hasher = default_pool().get();
        self.hash_tree_root_with(&mut hasher)?;
        hasher.hash_root()
    }
}

impl HashTreeRoot for bool {
    #[inline]
    fn hash_tree_root_with(&self, hasher: &mut Hasher) -> Result<(), Error> {
        hasher.put_bool(*self);
        Ok(())
    }
}

macro_rules! uint_impl {
    ($t:ty, $put:ident) => {
        impl HashTreeRoot for $t {
            #[inline]
            fn hash_tree_root_with(&self, hasher: &mut Hasher) -> Result<(), Error> {
                hasher.$put(*self);
                Ok(())
            }
        }
    };
}

uint_impl!(u8, put_uint8);
uint_impl!(u16, put_uint16);
uint_impl!(u32, put_uint32);
uint_impl!(u64, put_uint64);

impl HashTreeRoot for Chunk {
    #[inline]
    fn hash_tree_root_with(&self, hasher: &mut Hasher) -> Result<(), Error> {
        hasher.append_chunk(self.as_bytes());
        Ok(())
    }
}

impl HashTreeRoot for [u8; 32] {
    #[inline]
    fn hash_tree_root_with(&self, hasher: &mut Hasher) -> Result<(), Error> {
        hasher.append_chunk(self);
        Ok(())
    }
}
