use ssz_primitives::{tree_math::depth, Chunk};

use crate::{engine::HashEngine, zero_subtree_root, Hasher};

impl<E> Hasher<E>
where
    E: HashEngine,
{
    /// Collapse the group opened at `index` into a single chunk, under its
    /// natural width
    ///
    /// Every leaf appended since the matching [`index`][Hasher::index]
    /// snapshot is folded into one root, which replaces the whole group at
    /// position `index`. The virtual tree width is the next power of two
    /// above the actual leaf count; use
    /// [`merkleize_with_limit`][Hasher::merkleize_with_limit] when the
    /// type's capacity is wider.
    ///
    /// ```rust
    /// # use sszroot::*;
    /// let mut hasher: Hasher = Hasher::new();
    ///
    /// let index = hasher.index();
    /// hasher.put_uint64(1);
    /// hasher.put_uint64(2);
    /// hasher.merkleize(index);
    ///
    /// assert_eq!(
    ///     hasher.hash_root()?,
    ///     hash_pair(&Chunk::from_u64_le(1), &Chunk::from_u64_le(2)),
    /// );
    /// # Ok::<(), Error>(())
    /// ```
    #[inline]
    pub fn merkleize(&mut self, index: usize) {
        let limit = (self.chunks.len() - index) as u64;
        self.merkleize_with_limit(index, limit);
    }

    /// Collapse the group opened at `index` into a single chunk, padded to
    /// `limit` chunks worth of tree width
    ///
    /// `limit` is the type-level upper bound on the group's leaf count;
    /// the tree is virtually padded with all-zero subtrees up to width
    /// `next_pow2(limit)`. A group holding more than `limit` leaves is a
    /// bug in the caller.
    pub fn merkleize_with_limit(&mut self, index: usize, limit: u64) {
        let root = streaming_root(&self.engine, &self.chunks[index..], &mut self.stack, limit);
        self.collapse(index, root);
    }

    /// Collapse the group opened at `index` and mix in its element count
    ///
    /// This is the terminating call for variable-length collections: the
    /// group is merkleized under `limit`, then pair-hashed with a length
    /// leaf holding `count` as a little-endian `uint64`. Two lists with
    /// identical content but different lengths (trailing empty elements)
    /// therefore produce different roots.
    pub fn merkleize_with_mixin(&mut self, index: usize, count: u64, limit: u64) {
        let root = streaming_root(&self.engine, &self.chunks[index..], &mut self.stack, limit);
        let root = self.engine.hash_pair(&root, &Chunk::from_u64_le(count));
        self.collapse(index, root);
    }

    fn collapse(&mut self, index: usize, root: Chunk) {
        self.chunks.truncate(index);
        self.chunks.push(root);
        self.fill = 0;
    }
}

/// Fold a leaf sequence into a root one leaf at a time.
///
/// The stack holds, per level, the root of a completed left subtree that is
/// still waiting for its right sibling. Leaf `i` merges upward once for
/// every trailing 1-bit of `i`; afterwards, if the count is not a power of
/// two, a single virtual all-zero leaf at position `count` is folded up the
/// same way, reading zero-subtree roots wherever the stack has no entry.
/// Finally the root climbs from the tree's actual height to the limit's.
fn streaming_root<E>(engine: &E, leaves: &[Chunk], stack: &mut Vec<Chunk>, limit: u64) -> Chunk
where
    E: HashEngine,
{
    if limit == 0 {
        return zero_subtree_root(0);
    }

    let count = leaves.len() as u64;
    debug_assert!(count <= limit, "leaf count exceeds the type-level limit");

    if limit == 1 {
        return match leaves {
            [leaf] => *leaf,
            _ => zero_subtree_root(0),
        };
    }

    let target_height = depth(limit) as usize;
    if count == 0 {
        return zero_subtree_root(target_height);
    }

    let height = depth(count) as usize;
    stack.clear();
    stack.resize(height + 1, Chunk::ZERO);

    for (i, leaf) in leaves.iter().enumerate() {
        let mut node = *leaf;
        let mut level = 0;
        while (i >> level) & 1 == 1 {
            node = engine.hash_pair(&stack[level], &node);
            level += 1;
        }
        stack[level] = node;
    }

    let mut root = if count.is_power_of_two() {
        stack[height]
    } else {
        // fold one virtual zero leaf at position `count` up to the top
        let mut node = zero_subtree_root(0);
        for level in 0..height {
            node = match (count >> level) & 1 {
                1 => engine.hash_pair(&stack[level], &node),
                _ => engine.hash_pair(&node, &zero_subtree_root(level)),
            };
        }
        node
    };

    for level in height..target_height {
        root = engine.hash_pair(&root, &zero_subtree_root(level));
    }

    root
}

/// Compute the root of `leaves` under `limit` by levelled reduction
///
/// This is the batch-friendly alternative to the hasher's internal
/// streaming merkleizer: each level is padded to an even width with the
/// appropriate zero-subtree root, then every adjacent pair is hashed
/// through [`HashEngine::hash_layer`], halving the level until a single
/// root remains at the limit's height. An engine with a multi-buffer
/// SHA-256 gets its parallelism here.
///
/// For any leaf sequence and limit this produces bit-for-bit the same root
/// as the streaming implementation.
///
/// ```rust
/// # use sszroot::*;
/// # use sszroot::engine::Sha256Engine;
/// let leaves = [Chunk::from_u64_le(1), Chunk::from_u64_le(2)];
///
/// let mut hasher: Hasher = Hasher::new();
/// let index = hasher.index();
/// hasher.put_uint64(1);
/// hasher.put_uint64(2);
/// hasher.merkleize_with_limit(index, 4);
///
/// assert_eq!(
///     layered_root(&Sha256Engine, &leaves, 4),
///     hasher.hash_root()?,
/// );
/// # Ok::<(), Error>(())
/// ```
#[must_use]
pub fn layered_root<E>(engine: &E, leaves: &[Chunk], limit: u64) -> Chunk
where
    E: HashEngine,
{
    if limit == 0 {
        return zero_subtree_root(0);
    }

    let count = leaves.len() as u64;
    debug_assert!(count <= limit, "leaf count exceeds the type-level limit");

    if limit == 1 {
        return match leaves {
            [leaf] => *leaf,
            _ => zero_subtree_root(0),
        };
    }

    let target_height = depth(limit) as usize;
    if count == 0 {
        return zero_subtree_root(target_height);
    }

    let mut level = leaves.to_vec();
    for height in 0..target_height {
        if level.len() % 2 == 1 {
            level.push(zero_subtree_root(height));
        }

        let mut next = vec![Chunk::ZERO; level.len() / 2];
        engine.hash_layer(&level, &mut next);
        level = next;
    }

    level[0]
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rand::Rng;
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};
    use ssz_primitives::hash_pair;
    use test_strategy::proptest;

    use crate::engine::Sha256Engine;

    use super::*;

    fn merkleized(leaves: &[Chunk], limit: u64) -> Chunk {
        let mut hasher: Hasher = Hasher::new();
        let index = hasher.index();
        for leaf in leaves {
            hasher.append_chunk(leaf.as_bytes());
        }
        hasher.merkleize_with_limit(index, limit);
        hasher.hash_root().unwrap()
    }

    fn known(hex: &str) -> Chunk {
        Chunk::from_str(hex).unwrap()
    }

    #[test]
    fn published_ssz_roots() {
        let ones = Chunk::new([1; 32]);

        assert_eq!(
            merkleized(&[ones], 4),
            known("29797eded0e83376b70f2bf034cc0811ae7f1414653b1d720dfd18f74cf13309"),
        );
        assert_eq!(
            merkleized(&[ones; 3], 4),
            known("65aa94f2b59e517abd400cab655f42821374e433e41b8fe599f6bb15484adcec"),
        );
        assert_eq!(
            merkleized(&[ones; 5], 8),
            known("0ae67e34cba4ad2bbfea5dc39e6679b444021522d861fab00f05063c54341289"),
        );
        assert_eq!(
            merkleized(&[ones; 6], 8),
            known("0ef7df63c204ef203d76145627b8083c49aa7c55ebdee2967556f55a4f65a238"),
        );
        assert_eq!(
            merkleized(&[Chunk::new([2; 32])], 8),
            known("fa4cf775712aa8a2fe5dcb5a517d19b2e9effcf58ff311b9fd8e4a7d308e6d00"),
        );
    }

    #[test]
    fn published_ssz_roots_with_wide_limits() {
        let ones = Chunk::new([1; 32]);

        assert_eq!(
            merkleized(&[ones; 5], 1 << 10),
            known("2647cb9e26bd83eeb0982814b2ac4d6cc4a65d0d98637f1a73a4c06d3db0e6ce"),
        );
        assert_eq!(
            merkleized(&[ones; 70], 1 << 63),
            known("9317695d95b5a3b46e976b5a9cbfcfccb600accaddeda9ac867cc9669b862979"),
        );
    }

    #[test]
    fn natural_widths() {
        let a = Chunk::from_u64_le(1);
        let b = Chunk::from_u64_le(2);
        let c = Chunk::from_u64_le(3);

        // a single chunk is its own root
        assert_eq!(merkleized(&[a], 1), a);

        assert_eq!(merkleized(&[a, b], 2), hash_pair(&a, &b));

        // three chunks pad to width four
        assert_eq!(
            merkleized(&[a, b, c], 3),
            hash_pair(
                &hash_pair(&a, &b),
                &hash_pair(&c, &zero_subtree_root(0)),
            ),
        );
    }

    #[test]
    fn empty_groups_are_zero_subtrees() {
        assert_eq!(merkleized(&[], 0), zero_subtree_root(0));
        assert_eq!(merkleized(&[], 1), zero_subtree_root(0));
        assert_eq!(merkleized(&[], 4), zero_subtree_root(2));
        assert_eq!(merkleized(&[], 1 << 40), zero_subtree_root(40));
    }

    #[test]
    fn zero_leaves_merkleize_to_the_limit_zero_subtree() {
        for count in 0..=8u64 {
            for limit in count.max(1)..=16 {
                let leaves = vec![Chunk::ZERO; count as usize];
                assert_eq!(
                    merkleized(&leaves, limit),
                    zero_subtree_root(depth(limit) as usize),
                    "count {count}, limit {limit}",
                );
            }
        }
    }

    #[test]
    fn single_chunk_unfolds_against_zero_subtrees() {
        let chunk = Chunk::new([7; 32]);

        for limit in [2u64, 3, 4, 7, 8, 1 << 20] {
            let mut expected = chunk;
            for level in 0..depth(limit) as usize {
                expected = hash_pair(&expected, &zero_subtree_root(level));
            }
            assert_eq!(merkleized(&[chunk], limit), expected, "limit {limit}");
        }
    }

    #[test]
    fn merkleize_collapses_only_its_own_group() {
        let mut hasher: Hasher = Hasher::new();

        hasher.put_uint64(99);

        let index = hasher.index();
        hasher.put_uint64(1);
        hasher.put_uint64(2);
        hasher.merkleize(index);

        // the collapsed group sits after the untouched first leaf
        assert_eq!(hasher.index(), 2);
        hasher.merkleize(0);

        assert_eq!(
            hasher.hash_root().unwrap(),
            hash_pair(
                &Chunk::from_u64_le(99),
                &hash_pair(&Chunk::from_u64_le(1), &Chunk::from_u64_le(2)),
            ),
        );
    }

    #[test]
    fn mixin_appends_a_length_leaf() {
        let a = Chunk::new([5; 32]);

        let mut hasher: Hasher = Hasher::new();
        let index = hasher.index();
        hasher.append_chunk(a.as_bytes());
        hasher.merkleize_with_mixin(index, 1, 4);

        let inner = merkleized(&[a], 4);
        assert_eq!(
            hasher.hash_root().unwrap(),
            hash_pair(&inner, &Chunk::from_u64_le(1)),
        );
    }

    #[test]
    fn mixin_distinguishes_lengths() {
        // an empty list and a list of one zero element share their content
        // root but not their length leaf
        let empty = {
            let mut hasher: Hasher = Hasher::new();
            hasher.merkleize_with_mixin(0, 0, 4);
            hasher.hash_root().unwrap()
        };

        let one_zero = {
            let mut hasher: Hasher = Hasher::new();
            hasher.append_chunk(&[]);
            hasher.merkleize_with_mixin(0, 1, 4);
            hasher.hash_root().unwrap()
        };

        assert_ne!(empty, one_zero);
        assert_eq!(
            empty,
            hash_pair(&zero_subtree_root(2), &Chunk::ZERO),
        );
    }

    #[test]
    fn streaming_matches_layered_on_seeded_inputs() {
        let mut rng = ChaChaRng::from_seed([0; 32]);

        for count in 0..48usize {
            let leaves: Vec<Chunk> = (0..count).map(|_| Chunk::random(&mut rng)).collect();
            let extra = rng.gen_range(0..64u64);
            let limit = count as u64 + extra;

            if limit == 0 {
                continue;
            }

            assert_eq!(
                merkleized(&leaves, limit),
                layered_root(&Sha256Engine, &leaves, limit),
                "count {count}, limit {limit}",
            );
        }
    }

    #[proptest]
    fn streaming_matches_layered(
        #[strategy(::proptest::collection::vec(::proptest::prelude::any::<Chunk>(), 0..33))]
        leaves: Vec<Chunk>,
        #[strategy(0u64..256)] extra: u64,
    ) {
        let limit = leaves.len() as u64 + extra;

        if limit > 0 {
            assert_eq!(
                merkleized(&leaves, limit),
                layered_root(&Sha256Engine, &leaves, limit),
            );
        }
    }

    #[proptest]
    fn merkleize_is_deterministic(
        #[strategy(::proptest::collection::vec(::proptest::prelude::any::<Chunk>(), 0..17))]
        leaves: Vec<Chunk>,
    ) {
        let limit = leaves.len().max(1) as u64;

        assert_eq!(merkleized(&leaves, limit), merkleized(&leaves, limit));
    }
}
