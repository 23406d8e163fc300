use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure an envelope operation can produce.
///
/// Integrity failures are deliberately collapsed into the single
/// [`Error::Authentication`] variant: a caller (or an attacker driving one)
/// must not be able to tell a bad MAC from a bad AEAD tag.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Ephemeral key generation or key agreement failed while encrypting.
    #[error("key generation failed")]
    KeyGeneration,

    /// Key material did not decode to a valid curve point or scalar, or
    /// agreement produced the point at infinity.
    #[error("invalid public key point")]
    InvalidPoint,

    /// The envelope is structurally too short, or its declared ephemeral
    /// key length overruns the buffer.
    #[error("malformed envelope")]
    MalformedInput,

    /// MAC or AEAD verification failed. Carries no further detail.
    #[error("authentication failed")]
    Authentication,

    /// The trailing padding count byte is zero or exceeds the block size.
    #[error("invalid padding")]
    Padding,

    /// The ephemeral public key could not be framed into the envelope.
    #[error("public key encoding failed")]
    Encoding,
}
