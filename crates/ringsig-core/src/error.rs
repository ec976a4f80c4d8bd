//! Error types for ring signature operations

use thiserror::Error;

/// Result type alias for ring signature operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating keys, signing, or decoding.
///
/// A signature that fails to verify is not an error: [`crate::verify`]
/// returns `false` for it.
#[derive(Debug, Error)]
pub enum Error {
    /// The randomness source could not produce output
    #[error("Randomness source failed: {0}")]
    Randomness(String),

    /// Ring has fewer members than a ring signature needs
    #[error("Ring too small: need at least {min} members, got {size}", min = crate::MIN_RING_SIZE)]
    RingTooSmall { size: usize },

    /// Signer index does not address a ring member
    #[error("Signer index {index} out of range for ring of size {size}")]
    SignerIndexOutOfRange { index: usize, size: usize },

    /// The private key does not match the public key at the signer index
    #[error("Private key does not match ring member {index}")]
    KeyMismatch { index: usize },

    /// Response sequence length differs from ring length
    #[error("Length mismatch: ring has {ring} members, got {responses} responses")]
    LengthMismatch { ring: usize, responses: usize },

    /// Invalid point or scalar encoding
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl Error {
    /// Whether this error is a violated caller precondition
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::RingTooSmall { .. }
                | Error::SignerIndexOutOfRange { .. }
                | Error::KeyMismatch { .. }
                | Error::LengthMismatch { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() || e.is_syntax() || e.is_eof() {
            Error::Deserialization(e.to_string())
        } else {
            Error::Serialization(e.to_string())
        }
    }
}
