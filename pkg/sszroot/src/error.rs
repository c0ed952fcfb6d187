/// An error that can occur while hashing an object
///
/// Appenders and the merkleizer are infallible once their inputs are
/// validated; everything here is a validation failure at the typed
/// boundary. No partial root is ever produced: an error aborts the
/// whole `hash_tree_root` computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An element of a root vector was not exactly 32 bytes
    #[error("bad root")]
    BadRoot,

    /// A list held more elements than its type capacity allows
    #[error("incorrect list size")]
    IncorrectListSize,

    /// The top-level root was read while the buffer held anything other
    /// than a single chunk
    #[error("root must be 32 bytes")]
    RootSizeInvalid,

    /// A bitlist was empty, or its final byte carried no delimiter bit
    #[error("bitlist has no delimiter bit")]
    BadBitlist,
}
