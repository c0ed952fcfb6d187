use std::sync::OnceLock;

use ssz_primitives::{hash_pair, Chunk};

// Covers every reachable height: depth(u64::MAX) is 64.
const TABLE_HEIGHT: usize = 65;

/// The root of an all-zero subtree of a given height
///
/// This function can be defined recursively:
///  - `zero_subtree_root(0) = Chunk::ZERO`
///  - `zero_subtree_root(h) = hash_pair(zero_subtree_root(h - 1), zero_subtree_root(h - 1))`
///
/// The merkleizer uses these values to pad a leaf sequence up to its
/// virtual power-of-two width without hashing any actual zero subtree.
/// All 65 reachable heights are computed once and cached, so calls are
/// essentially free after the initial setup.
///
/// # Panics
///
/// Panics if `height > 64`; no tree addressable by a `u64` leaf count is
/// that tall.
///
/// ```rust
/// # use sszroot::*;
/// assert_eq!(zero_subtree_root(0), Chunk::ZERO);
/// assert_eq!(
///     zero_subtree_root(1),
///     hash_pair(&Chunk::ZERO, &Chunk::ZERO),
/// );
/// ```
#[inline]
#[must_use]
pub fn zero_subtree_root(height: usize) -> Chunk {
    get_cache()[height]
}

fn get_cache() -> &'static [Chunk] {
    static CACHE: OnceLock<Vec<Chunk>> = OnceLock::new();

    CACHE.get_or_init(|| {
        let mut vec = Vec::with_capacity(TABLE_HEIGHT);
        vec.push(Chunk::ZERO);

        for _ in 1..TABLE_HEIGHT {
            let hash = *vec.last().unwrap();
            vec.push(hash_pair(&hash, &hash));
        }

        vec
    })
}
