#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! Leaf-level primitives for SSZ merkleization
//!
//! Everything in the hashing pipeline bottoms out in three things:
//!
//! - [`Chunk`], the 32-byte unit of merkleization
//! - [`hash_pair`], SHA-256 over the concatenation of two chunks
//! - the tree math in [`tree_math`] that maps leaf counts and type
//!   capacities to virtual tree widths
//!
//! ```rust
//! use ssz_primitives::{hash_pair, Chunk};
//!
//! let left = Chunk::from_u64_le(1);
//! let right = Chunk::from_u64_le(2);
//!
//! // parent nodes are always hash_pair(left, right)
//! let parent = hash_pair(&left, &right);
//! assert_ne!(parent, hash_pair(&right, &left));
//! ```

mod chunk;
mod hash;
pub mod tree_math;

#[cfg(feature = "test-api")]
pub use hash::{hash_count, reset_hash_count};

pub use chunk::Chunk;
pub use hash::{hash_bytes, hash_pair};
