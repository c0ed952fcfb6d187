use core::array::TryFromSliceError;
use std::str::FromStr;

use crate::Chunk;

impl From<[u8; 32]> for Chunk {
    #[inline]
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<&[u8; 32]> for Chunk {
    #[inline]
    fn from(bytes: &[u8; 32]) -> Self {
        Self(*bytes)
    }
}

impl From<Chunk> for [u8; 32] {
    #[inline]
    fn from(chunk: Chunk) -> Self {
        chunk.0
    }
}

impl From<bool> for Chunk {
    #[inline]
    fn from(value: bool) -> Self {
        match value {
            false => Self::FALSE,
            true => Self::TRUE,
        }
    }
}

impl TryFrom<&[u8]> for Chunk {
    type Error = TryFromSliceError;

    /// Convert a slice of exactly 32 bytes into a [`Chunk`]
    ///
    /// Anything shorter or longer is rejected; padding is the hasher's
    /// business, not the chunk's.
    #[inline]
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 32]>::try_from(bytes).map(Self)
    }
}

impl AsRef<[u8]> for Chunk {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Chunk {
    type Err = hex::FromHexError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_conversion_requires_exactly_32_bytes() {
        assert!(Chunk::try_from([0u8; 31].as_slice()).is_err());
        assert!(Chunk::try_from([0u8; 33].as_slice()).is_err());

        let chunk = Chunk::try_from([7u8; 32].as_slice()).unwrap();
        assert_eq!(chunk, Chunk::new([7; 32]));
    }

    #[test]
    fn from_str_accepts_optional_prefix() {
        let plain: Chunk = Chunk::TRUE.to_hex().parse().unwrap();
        let prefixed: Chunk = format!("0x{}", Chunk::TRUE.to_hex()).parse().unwrap();

        assert_eq!(plain, Chunk::TRUE);
        assert_eq!(prefixed, Chunk::TRUE);

        assert!("01".parse::<Chunk>().is_err());
    }
}
