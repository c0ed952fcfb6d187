use sha2::{Digest, Sha256};

use crate::Chunk;

#[cfg(feature = "test-api")]
static HASH_COUNTER: core::sync::atomic::AtomicUsize = core::sync::atomic::AtomicUsize::new(0);

/// The number of times [`hash_pair`] has been called
#[cfg(feature = "test-api")]
pub fn hash_count() -> usize {
    HASH_COUNTER.load(core::sync::atomic::Ordering::Relaxed)
}

/// Reset the count returned by [`hash_count`] to 0
#[cfg(feature = "test-api")]
pub fn reset_hash_count() {
    HASH_COUNTER.store(0, core::sync::atomic::Ordering::Relaxed);
}

/// Hash two chunks together
///
/// This function is used to calculate every interior node of the virtual
/// merkle tree from its two children, i.e.:
/// `parent = hash_pair(&left, &right)`. It is SHA-256 over the 64-byte
/// concatenation `left || right`.
///
/// ```rust
/// # use ssz_primitives::*;
/// let a = hash_pair(&Chunk::from_u64_le(1), &Chunk::from_u64_le(2));
/// let b = hash_pair(&Chunk::from_u64_le(1), &Chunk::from_u64_le(3));
///
/// assert_ne!(a, b);
/// ```
/// This operation is not symmetric:
/// ```rust
/// # use ssz_primitives::*;
/// let a = Chunk::from_u64_le(1);
/// let b = Chunk::from_u64_le(2);
///
/// assert_ne!(hash_pair(&a, &b), hash_pair(&b, &a));
/// ```
#[inline]
#[must_use]
pub fn hash_pair(left: &Chunk, right: &Chunk) -> Chunk {
    #[cfg(feature = "test-api")]
    HASH_COUNTER.fetch_add(1, core::sync::atomic::Ordering::Relaxed);

    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    Chunk::new(hasher.finalize().into())
}

/// Hash a slice of bytes
///
/// ```rust
/// # use ssz_primitives::*;
/// let hash_1 = hash_bytes(&[1, 2, 3, 4]);
/// let hash_2 = hash_bytes(&[1, 2, 3, 5]);
///
/// assert_ne!(hash_1, hash_2);
/// ```
#[inline]
#[must_use]
pub fn hash_bytes(bytes: &[u8]) -> Chunk {
    Chunk::new(Sha256::digest(bytes).into())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn hash_pair_of_zero_chunks() {
        // SHA-256 of 64 zero bytes
        let expected =
            Chunk::from_str("f5a5fd42d16a20302798ef6ed309979b43003d2320d9f0e8ea9831a92759fb4b")
                .unwrap();

        assert_eq!(hash_pair(&Chunk::ZERO, &Chunk::ZERO), expected);
    }

    #[test]
    fn hash_pair_of_one_chunks() {
        let ones = Chunk::new([1; 32]);
        let expected =
            Chunk::from_str("7c8975e1e60a5c8337f28edf8c33c3b180360b7279644a9bc1af3c51e6220bf5")
                .unwrap();

        assert_eq!(hash_pair(&ones, &ones), expected);
    }

    #[test]
    fn hash_bytes_known_vector() {
        let expected =
            Chunk::from_str("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
                .unwrap();

        assert_eq!(hash_bytes(b"abc"), expected);
    }

    #[cfg(feature = "test-api")]
    #[test]
    fn hash_counter_is_monotonic() {
        let before = hash_count();
        hash_pair(&Chunk::ZERO, &Chunk::ZERO);
        assert!(hash_count() > before);
    }

    #[test]
    fn hash_pair_matches_hash_bytes_of_concatenation() {
        let left = Chunk::new([3; 32]);
        let right = Chunk::new([4; 32]);

        let mut concat = [0; 64];
        concat[..32].copy_from_slice(left.as_bytes());
        concat[32..].copy_from_slice(right.as_bytes());

        assert_eq!(hash_pair(&left, &right), hash_bytes(&concat));
    }
}
