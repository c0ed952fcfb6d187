use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use dashmap::DashMap;
use ssz_primitives::{hash_pair, Chunk};

/// A pair-hashing backend for the merkleizer
///
/// The streaming merkleizer only ever calls [`hash_pair`][Self::hash_pair];
/// the layered merkleizer reduces whole levels through
/// [`hash_layer`][Self::hash_layer], which a backend with a multi-buffer
/// SHA-256 implementation can override to hash many pairs at once.
///
/// Take special care when implementing this trait: the result of
/// [`hash_pair`][Self::hash_pair] must *always* match the scalar
/// [`hash_pair`][ssz_primitives::hash_pair], and
/// [`hash_layer`][Self::hash_layer] must behave exactly like hashing each
/// adjacent input pair in order. An implementation that disagrees produces
/// roots that nothing else will ever reproduce.
pub trait HashEngine: Send + Sync + 'static {
    /// Hash two chunks into their parent node
    fn hash_pair(&self, left: &Chunk, right: &Chunk) -> Chunk {
        hash_pair(left, right)
    }

    /// Hash `output.len()` adjacent pairs of `input` into `output`
    ///
    /// `input.len()` must be exactly `2 * output.len()`.
    fn hash_layer(&self, input: &[Chunk], output: &mut [Chunk]) {
        debug_assert_eq!(input.len(), 2 * output.len());

        for (i, parent) in output.iter_mut().enumerate() {
            *parent = self.hash_pair(&input[2 * i], &input[2 * i + 1]);
        }
    }
}

// A shared engine behaves like the engine it wraps; this is how one
// MemoizedEngine serves several hashers.
impl<E> HashEngine for Arc<E>
where
    E: HashEngine,
{
    #[inline]
    fn hash_pair(&self, left: &Chunk, right: &Chunk) -> Chunk {
        (**self).hash_pair(left, right)
    }

    #[inline]
    fn hash_layer(&self, input: &[Chunk], output: &mut [Chunk]) {
        (**self).hash_layer(input, output);
    }
}

/// A ZST backend that hashes with scalar SHA-256 - the default engine for
/// [`Hasher`]
///
/// [`Hasher`]: crate::Hasher
#[derive(Debug, Clone, Default)]
pub struct Sha256Engine;

impl HashEngine for Sha256Engine {}

/// The number of memoized parents a [`MemoizedEngine`] holds before it
/// stops remembering new ones (64 bytes of key plus 32 of value each).
const DEFAULT_MEMO_CAPACITY: usize = 1 << 20;

/// An engine that remembers parent nodes it has already computed
///
/// The memo is keyed by the full 64-byte hash input, so any subtree that
/// recurs across objects (a default-valued container, an unchanged list
/// prefix, a repeated child root) costs one SHA-256 the first time and a
/// lookup afterwards. Since a merkleization workload has no natural bound,
/// the memo has a capacity: once full it keeps serving what it has and
/// computes the rest scalar, until [`clear`][MemoizedEngine::clear] makes
/// room (for example between epochs of mostly-unchanged state).
///
/// Share one memo across hashers by wrapping it in an [`Arc`]:
///
/// ```rust
/// # use std::sync::Arc;
/// # use sszroot::{engine::MemoizedEngine, Hasher};
/// let engine = Arc::new(MemoizedEngine::new());
///
/// let mut hasher = Hasher::new_with_engine(Arc::clone(&engine));
/// hasher.put_uint64(1);
/// # let _ = hasher.hash_root();
/// ```
#[derive(Debug)]
pub struct MemoizedEngine {
    memo: DashMap<[u8; 64], Chunk>,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for MemoizedEngine {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MEMO_CAPACITY)
    }
}

impl HashEngine for MemoizedEngine {
    fn hash_pair(&self, left: &Chunk, right: &Chunk) -> Chunk {
        let mut key = [0u8; 64];
        key[..32].copy_from_slice(left.as_bytes());
        key[32..].copy_from_slice(right.as_bytes());

        if let Some(parent) = self.memo.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return *parent;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let parent = hash_pair(left, right);
        if self.memo.len() < self.max_entries {
            self.memo.insert(key, parent);
        }
        parent
    }
}

impl MemoizedEngine {
    /// Create an empty engine with the default memo capacity
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty engine that memoizes at most `max_entries` parents
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            memo: DashMap::new(),
            max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The number of memoized parent nodes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    /// Whether the engine has memoized nothing yet
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    /// Forget every memoized parent, making room for new ones
    ///
    /// The hit and miss counts are unaffected.
    #[inline]
    pub fn clear(&self) {
        self.memo.clear();
    }

    /// How many `hash_pair` calls were answered from the memo
    #[inline]
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// How many `hash_pair` calls had to run SHA-256
    #[inline]
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use crate::Hasher;

    use super::*;

    fn uint64_vector_root(hasher: &mut Hasher<Arc<MemoizedEngine>>) -> Chunk {
        let index = hasher.index();
        for value in 0..8 {
            hasher.put_uint64(value);
        }
        hasher.merkleize(index);
        hasher.hash_root().unwrap()
    }

    #[test]
    fn repeated_subtrees_are_answered_from_the_memo() {
        let engine = Arc::new(MemoizedEngine::new());
        let mut hasher = Hasher::new_with_engine(Arc::clone(&engine));

        let root = uint64_vector_root(&mut hasher);
        let first_pass_misses = engine.misses();

        assert_eq!(engine.hits(), 0);
        assert_eq!(engine.len() as u64, first_pass_misses);

        // the same eight leaves again: every parent is already known
        hasher.reset();
        assert_eq!(uint64_vector_root(&mut hasher), root);

        assert_eq!(engine.hits(), first_pass_misses);
        assert_eq!(engine.misses(), first_pass_misses);
    }

    #[test]
    fn memoized_results_match_the_scalar_hash() {
        let engine = MemoizedEngine::new();

        let left = Chunk::new([9; 32]);
        let right = Chunk::new([7; 32]);

        // miss, then hit
        assert_eq!(engine.hash_pair(&left, &right), hash_pair(&left, &right));
        assert_eq!(engine.hash_pair(&left, &right), hash_pair(&left, &right));

        // left/right order is part of the key
        assert_eq!(engine.hash_pair(&right, &left), hash_pair(&right, &left));
    }

    #[test]
    fn full_memos_stop_growing_but_stay_correct() {
        let engine = MemoizedEngine::with_capacity(1);

        let a = Chunk::from_u64_le(1);
        let b = Chunk::from_u64_le(2);
        let c = Chunk::from_u64_le(3);

        engine.hash_pair(&a, &b);
        engine.hash_pair(&b, &c);
        assert_eq!(engine.len(), 1);

        assert_eq!(engine.hash_pair(&b, &c), hash_pair(&b, &c));
    }

    #[test]
    fn clearing_empties_the_memo() {
        let engine = MemoizedEngine::new();

        engine.hash_pair(&Chunk::TRUE, &Chunk::ZERO);
        assert!(!engine.is_empty());

        engine.clear();
        assert!(engine.is_empty());
        assert_eq!(engine.misses(), 1);
    }

    #[test]
    fn default_hash_layer_hashes_adjacent_pairs() {
        let engine = Sha256Engine;

        let input: Vec<Chunk> = (0..8).map(Chunk::from_u64_le).collect();
        let mut output = vec![Chunk::ZERO; 4];
        engine.hash_layer(&input, &mut output);

        for i in 0..4 {
            assert_eq!(output[i], hash_pair(&input[2 * i], &input[2 * i + 1]));
        }
    }
}
