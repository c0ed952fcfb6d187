use ssz_primitives::{tree_math::chunk_limit, Chunk};

use crate::{engine::HashEngine, Error, Hasher};

impl<E> Hasher<E>
where
    E: HashEngine,
{
    /// Append a boolean leaf
    ///
    /// `true` is a single `01` byte and `false` all zeroes, both
    /// right-padded to 32 bytes.
    #[inline]
    pub fn put_bool(&mut self, value: bool) {
        self.push_leaf(Chunk::from(value));
    }

    /// Append a `uint8` leaf
    #[inline]
    pub fn put_uint8(&mut self, value: u8) {
        self.append_chunk(&value.to_le_bytes());
    }

    /// Append a `uint16` leaf
    #[inline]
    pub fn put_uint16(&mut self, value: u16) {
        self.append_chunk(&value.to_le_bytes());
    }

    /// Append a `uint32` leaf
    #[inline]
    pub fn put_uint32(&mut self, value: u32) {
        self.append_chunk(&value.to_le_bytes());
    }

    /// Append a `uint64` leaf
    ///
    /// This is the top-level form: one whole chunk with the value in
    /// little-endian. Inside a packed array, use
    /// [`pack_uint64`][Hasher::pack_uint64] instead.
    ///
    /// ```rust
    /// # use sszroot::*;
    /// let mut hasher: Hasher = Hasher::new();
    /// hasher.put_uint64(1);
    ///
    /// assert_eq!(hasher.hash_root()?, Chunk::from_u64_le(1));
    /// # Ok::<(), Error>(())
    /// ```
    #[inline]
    pub fn put_uint64(&mut self, value: u64) {
        self.append_chunk(&value.to_le_bytes());
    }

    /// Append a byte string
    ///
    /// Up to 32 bytes become a single zero-padded chunk. Longer input is
    /// split into `ceil(len / 32)` chunks and merkleized in place at its
    /// natural chunk count, which is the right width for a fixed-size
    /// bytes vector whose type chunk count equals its natural count.
    /// Variable-length byte lists must instead append their chunks and
    /// terminate with
    /// [`merkleize_with_mixin`][Hasher::merkleize_with_mixin] under the
    /// type's chunk capacity.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        if bytes.len() <= Chunk::SIZE {
            self.append_chunk(bytes);
            return;
        }

        let index = self.index();
        for part in bytes.chunks(Chunk::SIZE) {
            self.append_chunk(part);
        }
        self.merkleize(index);
    }

    /// Append a vector of 32-byte roots and collapse it
    ///
    /// With no capacity the group is merkleized at its natural width (a
    /// fixed-size vector); with `Some(max_capacity)` it is merkleized
    /// under the type's chunk capacity and the element count is mixed in
    /// (a variable-length list).
    ///
    /// ```rust
    /// # use sszroot::*;
    /// let mut hasher: Hasher = Hasher::new();
    /// hasher.put_root_vector(&[[1u8; 32], [2u8; 32]], None)?;
    ///
    /// let expected = hash_pair(&Chunk::new([1; 32]), &Chunk::new([2; 32]));
    /// assert_eq!(hasher.hash_root()?, expected);
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::BadRoot`] if any element is not exactly 32 bytes;
    /// [`Error::IncorrectListSize`] if a capacity is given and exceeded.
    pub fn put_root_vector<R>(&mut self, roots: &[R], max_capacity: Option<u64>) -> Result<(), Error>
    where
        R: AsRef<[u8]>,
    {
        let num_items = roots.len() as u64;

        if matches!(max_capacity, Some(cap) if num_items > cap) {
            return Err(Error::IncorrectListSize);
        }

        let index = self.index();
        for root in roots {
            let chunk = Chunk::try_from(root.as_ref()).map_err(|_| Error::BadRoot)?;
            self.push_leaf(chunk);
        }

        match max_capacity {
            None => self.merkleize(index),
            Some(cap) => {
                let limit = chunk_limit(cap, num_items, 32);
                self.merkleize_with_mixin(index, num_items, limit);
            }
        }

        Ok(())
    }

    /// Append an array of `uint64` values, packed four to a chunk, and
    /// collapse it
    ///
    /// With no capacity the group is merkleized at its natural width (a
    /// fixed-size vector); with `Some(max_capacity)` it is merkleized
    /// under `chunk_limit(max_capacity, n, 8)` and the element count is
    /// mixed in.
    ///
    /// # Errors
    ///
    /// [`Error::IncorrectListSize`] if a capacity is given and exceeded.
    pub fn put_uint64_array(
        &mut self,
        values: &[u64],
        max_capacity: Option<u64>,
    ) -> Result<(), Error> {
        let num_items = values.len() as u64;

        if matches!(max_capacity, Some(cap) if num_items > cap) {
            return Err(Error::IncorrectListSize);
        }

        let index = self.index();
        for value in values {
            self.pack_uint64(*value);
        }
        self.fill_up_to_32();

        match max_capacity {
            None => self.merkleize(index),
            Some(cap) => {
                let limit = chunk_limit(cap, num_items, 8);
                self.merkleize_with_mixin(index, num_items, limit);
            }
        }

        Ok(())
    }

    /// Append an SSZ bitlist and collapse it
    ///
    /// The bit length is implicit in the encoding: the highest set bit of
    /// the final byte is a delimiter, not content. The delimiter is
    /// cleared, trailing zero bytes are stripped, the remaining content is
    /// chunked, and the group is merkleized under `ceil(max_bits / 256)`
    /// chunks with the bit count mixed in.
    ///
    /// # Errors
    ///
    /// [`Error::BadBitlist`] if `bytes` is empty or its final byte is
    /// zero (no delimiter); [`Error::IncorrectListSize`] if the encoded
    /// bit count exceeds `max_bits`.
    pub fn put_bitlist(&mut self, bytes: &[u8], max_bits: u64) -> Result<(), Error> {
        let size = self.parse_bitlist(bytes)?;

        if size > max_bits {
            return Err(Error::IncorrectListSize);
        }

        let index = self.index();
        let content = std::mem::take(&mut self.scratch);
        for part in content.chunks(Chunk::SIZE) {
            self.append_chunk(part);
        }
        self.scratch = content;

        self.merkleize_with_mixin(index, size, max_bits.saturating_add(255) / 256);
        Ok(())
    }

    /// Strip the delimiter from a bitlist into the scratch buffer,
    /// returning the encoded bit count.
    fn parse_bitlist(&mut self, bytes: &[u8]) -> Result<u64, Error> {
        let Some((&last, _)) = bytes.split_last() else {
            return Err(Error::BadBitlist);
        };
        if last == 0 {
            return Err(Error::BadBitlist);
        }

        let msb = 7 - last.leading_zeros();
        let size = 8 * (bytes.len() as u64 - 1) + u64::from(msb);

        self.scratch.clear();
        self.scratch.extend_from_slice(bytes);
        if let Some(tail) = self.scratch.last_mut() {
            *tail &= !(1 << msb);
        }
        while self.scratch.last() == Some(&0) {
            self.scratch.pop();
        }

        Ok(size)
    }
}
