/// Helper macro to create a [`Chunk`]
///
/// ```rust
/// # use sszroot::*;
/// // integer literals become little-endian uint64 leaves
/// assert_eq!(chunk!(7), Chunk::from_u64_le(7));
///
/// // expressions are converted using Chunk::from
/// assert_eq!(chunk!([1u8; 32]), Chunk::new([1; 32]));
/// assert_eq!(chunk!(true), Chunk::TRUE);
/// ```
///
/// [`Chunk`]: ssz_primitives::Chunk
#[macro_export]
macro_rules! chunk {
    (true) => {{
        $crate::Chunk::TRUE
    }};
    (false) => {{
        $crate::Chunk::FALSE
    }};
    ($e:literal) => {{
        $crate::Chunk::from_u64_le($e)
    }};
    ($e:expr) => {{
        $crate::Chunk::from($e)
    }};
}
