use ssz_primitives::Chunk;

use crate::{engine::Sha256Engine, Error};

mod append;
mod merkleize;

pub use merkleize::layered_root;

/// A buffered merkleization hasher
///
/// A [`Hasher`] accumulates 32-byte [`Chunk`] leaves through its typed
/// appenders and collapses them, on demand, into merkle roots. Container
/// types snapshot a group boundary with [`index`][Hasher::index], append
/// their fields, and terminate the group with
/// [`merkleize`][Hasher::merkleize] (or
/// [`merkleize_with_mixin`][Hasher::merkleize_with_mixin] for
/// variable-length collections); groups nest in strict LIFO order. Once
/// everything has collapsed to a single chunk,
/// [`hash_root`][Hasher::hash_root] reads it.
///
/// ```rust
/// # use sszroot::*;
/// let mut hasher: Hasher = Hasher::new();
///
/// // a two-field container
/// let index = hasher.index();
/// hasher.put_uint64(7);
/// hasher.put_bool(true);
/// hasher.merkleize(index);
///
/// let root = hasher.hash_root()?;
/// assert_eq!(root, hash_pair(&Chunk::from_u64_le(7), &Chunk::TRUE));
/// # Ok::<(), Error>(())
/// ```
///
/// A hasher is cheap to reuse: its leaf buffer, bitlist scratch space and
/// merkleize stack regrow monotonically, so after warm-up no call
/// allocates. High-throughput callers should recycle hashers through a
/// [`HasherPool`][crate::HasherPool] rather than constructing them per
/// object.
#[derive(Debug, Clone)]
pub struct Hasher<E = Sha256Engine> {
    /// The leaf sequence: one entry per 32-byte chunk appended so far
    chunks: Vec<Chunk>,
    /// Packing cursor: how many bytes of the tail chunk have been written
    /// by sub-32-byte packing appends. Zero means the next packed write
    /// opens a fresh chunk.
    fill: usize,
    /// Scratch space for bitlist parsing
    scratch: Vec<u8>,
    /// Working stack for the streaming merkleizer
    stack: Vec<Chunk>,
    engine: E,
}

impl<E> Default for Hasher<E>
where
    E: Default,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Hasher<E> {
    /// Creates a new, empty hasher
    #[inline]
    #[must_use]
    pub fn new() -> Self
    where
        E: Default,
    {
        Self::new_with_engine(E::default())
    }

    /// Creates a new, empty hasher backed by the given engine
    ///
    /// ```rust
    /// # use sszroot::*;
    /// # use sszroot::engine::MemoizedEngine;
    /// let hasher = Hasher::new_with_engine(MemoizedEngine::new());
    /// assert_eq!(hasher.index(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub fn new_with_engine(engine: E) -> Self {
        Self {
            chunks: Vec::new(),
            fill: 0,
            scratch: Vec::new(),
            stack: Vec::new(),
            engine,
        }
    }

    /// Get access to the inner engine of this hasher
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The current leaf count
    ///
    /// Callers snapshot this before appending a group of fields; the
    /// snapshot is the left boundary handed to the matching
    /// [`merkleize`][Hasher::merkleize] call.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.chunks.len()
    }

    /// Truncate the leaf sequence and reset the packing cursor
    ///
    /// Buffer capacity is retained, so a reset hasher hashes its next
    /// object without reallocating.
    #[inline]
    pub fn reset(&mut self) {
        self.chunks.clear();
        self.scratch.clear();
        self.fill = 0;
    }

    /// Read the final root
    ///
    /// # Errors
    ///
    /// Returns [`Error::RootSizeInvalid`] unless the buffer holds exactly
    /// one chunk, i.e. every opened group has been merkleized.
    #[inline]
    pub fn hash_root(&self) -> Result<Chunk, Error> {
        match self.chunks.as_slice() {
            [root] => Ok(*root),
            _ => Err(Error::RootSizeInvalid),
        }
    }

    /// Append up to 32 bytes as a fresh chunk, right-padded with zeroes
    ///
    /// This resets the packing cursor: a partially packed tail chunk is
    /// left as-is (its unwritten bytes are already zero) and the new chunk
    /// starts after it.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is longer than 32 bytes. Splitting longer input
    /// into chunks is the typed appenders' job, never this one's.
    #[inline]
    pub fn append_chunk(&mut self, bytes: &[u8]) {
        assert!(
            bytes.len() <= Chunk::SIZE,
            "appended chunks must be at most 32 bytes"
        );

        let mut chunk = Chunk::ZERO;
        chunk.as_bytes_mut()[..bytes.len()].copy_from_slice(bytes);
        self.push_leaf(chunk);
    }

    /// Pack a single byte at the packing cursor
    ///
    /// Opens a fresh chunk when the cursor is at zero.
    #[inline]
    pub fn pack_uint8(&mut self, value: u8) {
        if self.fill == 0 {
            self.chunks.push(Chunk::ZERO);
        }

        let tail = self.chunks.len() - 1;
        self.chunks[tail].as_bytes_mut()[self.fill] = value;
        self.fill = (self.fill + 1) % Chunk::SIZE;
    }

    /// Pack a `uint64` in little-endian at the packing cursor
    ///
    /// Opens a fresh chunk when the cursor is at zero; a value that would
    /// cross the 32-byte boundary writes its remainder into a new chunk.
    pub fn pack_uint64(&mut self, value: u64) {
        let bytes = value.to_le_bytes();

        if self.fill == 0 {
            self.chunks.push(Chunk::ZERO);
        }

        let tail = self.chunks.len() - 1;
        let take = bytes.len().min(Chunk::SIZE - self.fill);
        self.chunks[tail].as_bytes_mut()[self.fill..self.fill + take]
            .copy_from_slice(&bytes[..take]);

        if take < bytes.len() {
            let mut chunk = Chunk::ZERO;
            chunk.as_bytes_mut()[..bytes.len() - take].copy_from_slice(&bytes[take..]);
            self.chunks.push(chunk);
            self.fill = bytes.len() - take;
        } else {
            self.fill = (self.fill + bytes.len()) % Chunk::SIZE;
        }
    }

    /// Terminate a packed run: the next packed write opens a fresh chunk
    ///
    /// The unwritten tail bytes are already zero, so this only resets the
    /// cursor. It must be called between two packed runs that belong to
    /// different groups; the non-packed appenders reset the cursor
    /// themselves.
    #[inline]
    pub fn fill_up_to_32(&mut self) {
        self.fill = 0;
    }

    #[inline]
    fn push_leaf(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
        self.fill = 0;
    }
}
