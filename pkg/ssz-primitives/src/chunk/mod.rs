mod convert;
mod fmt;

#[cfg(feature = "borsh")]
mod borsh_impls;

#[cfg(feature = "rand")]
mod rand_impls;

#[cfg(feature = "serde")]
mod serde;

/// A 32-byte chunk, the unit of merkleization
///
/// A [`Chunk`] is either a leaf of the virtual merkle tree (a packed
/// primitive value, a padded byte slice, a child root) or an interior node
/// produced by [`hash_pair`][crate::hash_pair]. The bytes are opaque; any
/// endianness is applied by whoever writes them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Chunk(#[cfg_attr(feature = "serde", serde(with = "serde"))] pub(crate) [u8; 32]);

impl Chunk {
    /// The size of a chunk in bytes
    pub const SIZE: usize = 32;

    /// The all-zero chunk
    ///
    /// This doubles as the empty leaf: a subtree whose leaves are all
    /// [`Chunk::ZERO`] has a precomputable root at every height.
    pub const ZERO: Self = Self([0; 32]);

    /// The leaf encoding of `true`: a single `01` byte, zero-padded
    pub const TRUE: Self = {
        let mut bytes = [0; 32];
        bytes[0] = 1;
        Self(bytes)
    };

    /// The leaf encoding of `false` (identical to [`Chunk::ZERO`])
    pub const FALSE: Self = Self::ZERO;

    /// Create a new [`Chunk`] from its raw bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The leaf encoding of a `uint64`: little-endian in the first 8 bytes,
    /// zero-padded
    ///
    /// This is also the encoding of the length leaf mixed into
    /// variable-length collections.
    ///
    /// ```rust
    /// # use ssz_primitives::Chunk;
    /// let chunk = Chunk::from_u64_le(1);
    /// assert_eq!(chunk.as_bytes()[0], 1);
    /// assert_eq!(&chunk.as_bytes()[1..], [0; 31]);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_u64_le(value: u64) -> Self {
        let mut bytes = [0; 32];
        bytes[..8].copy_from_slice(&value.to_le_bytes());
        Self(bytes)
    }

    /// A view of the chunk's bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The chunk's bytes by value
    #[inline]
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Mutable access to the chunk's bytes
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8; 32] {
        &mut self.0
    }

    /// Whether every byte of this chunk is zero
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Convert this [`Chunk`] to a hex string
    #[inline]
    #[must_use]
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

#[cfg(any(test, feature = "proptest"))]
mod proptest_impls {
    use super::Chunk;
    use ::proptest::{arbitrary::StrategyFor, prelude::*, strategy::Map};

    impl Arbitrary for Chunk {
        type Parameters = ();
        type Strategy = Map<StrategyFor<[u8; 32]>, fn([u8; 32]) -> Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            any::<[u8; 32]>().prop_map(|bytes| Self(bytes))
        }
    }
}
