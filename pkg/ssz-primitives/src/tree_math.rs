//! Width, depth and chunk-capacity math for balanced binary trees
//!
//! Merkleization pads a leaf sequence up to a virtual power-of-two width
//! determined by a *limit*: the type-level upper bound on the leaf count,
//! not the number of leaves actually present. These functions translate
//! between element counts, chunk counts and tree heights.

/// The smallest power of two greater than or equal to `v`
///
/// `next_pow2(0)` is defined as 1: the empty tree still has one (virtual)
/// leaf slot.
///
/// ```rust
/// # use ssz_primitives::tree_math::next_pow2;
/// assert_eq!(next_pow2(0), 1);
/// assert_eq!(next_pow2(1), 1);
/// assert_eq!(next_pow2(3), 4);
/// assert_eq!(next_pow2(4), 4);
/// assert_eq!(next_pow2(5), 8);
/// ```
#[inline]
#[must_use]
pub fn next_pow2(v: u64) -> u64 {
    v.max(1).next_power_of_two()
}

/// The number of levels in a balanced binary tree holding `v` leaves
///
/// Equivalent to `ceil(log2(max(v, 1)))`:
///
/// ```rust
/// # use ssz_primitives::tree_math::depth;
/// assert_eq!(depth(0), 0);
/// assert_eq!(depth(1), 0);
/// assert_eq!(depth(2), 1);
/// assert_eq!(depth(3), 2);
/// assert_eq!(depth(4), 2);
/// assert_eq!(depth(5), 3);
/// assert_eq!(depth(8), 3);
/// assert_eq!(depth(9), 4);
/// ```
#[inline]
#[must_use]
pub fn depth(v: u64) -> u32 {
    if v <= 1 {
        return 0;
    }
    u64::BITS - (v - 1).leading_zeros()
}

/// The chunk capacity of a list with `max_capacity` elements of
/// `elem_size` bytes each
///
/// Packing places `32 / elem_size` elements in each chunk, so the chunk
/// capacity is `ceil(max_capacity * elem_size / 32)`. When the type-level
/// capacity works out to zero chunks, the actual item count is used, and
/// failing that a single chunk.
///
/// ```rust
/// # use ssz_primitives::tree_math::chunk_limit;
/// // a list of up to 1024 uint16 values packs into up to 64 chunks
/// assert_eq!(chunk_limit(1024, 316, 2), 64);
///
/// // a list of up to 4 roots occupies up to 4 chunks
/// assert_eq!(chunk_limit(4, 0, 32), 4);
/// ```
#[inline]
#[must_use]
pub fn chunk_limit(max_capacity: u64, num_items: u64, elem_size: u64) -> u64 {
    let limit = max_capacity.saturating_mul(elem_size).saturating_add(31) / 32;
    if limit != 0 {
        return limit;
    }
    if num_items == 0 {
        return 1;
    }
    num_items
}
