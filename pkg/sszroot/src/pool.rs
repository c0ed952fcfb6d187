use std::{
    collections::VecDeque,
    ops::{Deref, DerefMut},
    sync::{Arc, OnceLock},
};

use parking_lot::Mutex;

use crate::Hasher;

/// A thread-safe free-list of [`Hasher`]s
///
/// Hashing thousands of objects per second through fresh hashers pays
/// allocator cost on every root; a pool recycles the hashers' internal
/// buffers instead. [`get`][HasherPool::get] hands out a reset hasher
/// (constructing one only when the free-list is empty, never blocking),
/// and dropping the returned [`HasherGuard`] resets it and puts it back.
///
/// ```rust
/// # use sszroot::*;
/// let pool = HasherPool::new();
///
/// let mut hasher = pool.get();
/// hasher.put_uint64(3);
/// let root = hasher.hash_root()?;
/// drop(hasher); // back to the pool, reset
///
/// assert_eq!(root, Chunk::from_u64_le(3));
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, Default)]
pub struct HasherPool {
    state: Arc<Mutex<VecDeque<Hasher>>>,
}

impl Clone for HasherPool {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl HasherPool {
    /// Create a new, empty pool
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a hasher from the pool
    ///
    /// Returns a recycled hasher when one is available, otherwise a fresh
    /// one. The hasher is always clean: empty leaf sequence, zero packing
    /// cursor.
    #[must_use]
    pub fn get(&self) -> HasherGuard {
        let hasher = self.state.lock().pop_front().unwrap_or_default();

        HasherGuard {
            return_state: Arc::clone(&self.state),
            hasher: Some(hasher),
        }
    }
}

/// A pooled [`Hasher`], returned to its pool on drop
///
/// Dereferences to [`Hasher`]; the drop impl resets the hasher before
/// handing it back, so a hasher abandoned halfway through a failed
/// traversal is still safe to reuse.
#[derive(Debug)]
pub struct HasherGuard {
    // The pool this hasher should be returned to
    return_state: Arc<Mutex<VecDeque<Hasher>>>,
    // This is only an Option so that we can take it out at Drop
    hasher: Option<Hasher>,
}

impl Deref for HasherGuard {
    type Target = Hasher;

    fn deref(&self) -> &Self::Target {
        self.hasher.as_ref().expect("guard holds a hasher until drop")
    }
}

impl DerefMut for HasherGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.hasher.as_mut().expect("guard holds a hasher until drop")
    }
}

impl Drop for HasherGuard {
    fn drop(&mut self) {
        let mut hasher = self.hasher.take().expect("guard holds a hasher until drop");
        hasher.reset();
        self.return_state.lock().push_back(hasher);
    }
}

/// The process-wide pool used by
/// [`HashTreeRoot::hash_tree_root`][crate::HashTreeRoot::hash_tree_root]
#[must_use]
pub fn default_pool() -> &'static HasherPool {
    static POOL: OnceLock<HasherPool> = OnceLock::new();
    POOL.get_or_init(HasherPool::new)
}
