#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::explicit_deref_methods)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! # sszroot
//!
//! A buffered, pooled SSZ merkleization engine. [`Hasher`] accumulates
//! 32-byte leaf chunks through typed appenders and collapses them, on
//! demand, into SHA-256 merkle roots; [`HasherPool`] recycles hashers so
//! that a high-throughput caller pays no allocator cost per root.
//!
//! Types describe their own tree shape by implementing [`HashTreeRoot`]:
//!
//! ```rust
//! use sszroot::{Chunk, Error, Hasher, HashTreeRoot};
//!
//! struct Validator {
//!     pubkey_root: [u8; 32],
//!     effective_balance: u64,
//!     slashed: bool,
//! }
//!
//! impl HashTreeRoot for Validator {
//!     fn hash_tree_root_with(&self, hasher: &mut Hasher) -> Result<(), Error> {
//!         let index = hasher.index();
//!         hasher.put_bytes(&self.pubkey_root);
//!         hasher.put_uint64(self.effective_balance);
//!         hasher.put_bool(self.slashed);
//!         hasher.merkleize(index);
//!         Ok(())
//!     }
//! }
//!
//! let validator = Validator {
//!     pubkey_root: [0; 32],
//!     effective_balance: 32_000_000_000,
//!     slashed: false,
//! };
//!
//! let root: Chunk = validator.hash_tree_root()?;
//! # let _ = root;
//! # Ok::<(), Error>(())
//! ```
//!
//! ## Groups and limits
//!
//! A container opens a group by snapshotting [`Hasher::index`], appends
//! its fields, and terminates the group with [`Hasher::merkleize`]. The
//! tree width of a group is set by a *limit*: the type-level capacity in
//! chunks, not the number of leaves actually present. Missing leaves are
//! virtual all-zero subtrees, padded in via precomputed
//! [`zero_subtree_root`] values rather than hashed. Variable-length
//! collections finish with [`Hasher::merkleize_with_mixin`], which folds
//! the element count into the root so that two lists with the same
//! content but different lengths hash differently.
//!
//! ## Engines
//!
//! All hashing goes through an [`engine`](crate::engine): scalar SHA-256
//! by default, with a memoizing variant and a seam
//! ([`engine::HashEngine::hash_layer`]) for multi-buffer SHA-256
//! backends used by [`layered_root`].

mod error;
/// Pluggable pair-hashing backends
pub mod engine;
mod hasher;
mod macros;
mod pool;
mod root;
mod zero_hash;

pub use error::Error;
pub use hasher::{layered_root, Hasher};
pub use pool::{default_pool, HasherGuard, HasherPool};
pub use root::HashTreeRoot;
pub use zero_hash::zero_subtree_root;
pub use ssz_primitives::*;
