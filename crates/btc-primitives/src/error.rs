/// Unified error type for all primitives operations.
///
/// Covers errors from EC operations, encodings, and mnemonic handling.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid scalar: {0}")]
    InvalidScalar(String),

    #[error("invalid point: {0}")]
    InvalidPoint(String),

    #[error("invalid WIF format: {0}")]
    InvalidWif(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid bech32: {0}")]
    InvalidBech32(String),

    #[error("invalid mnemonic: {0}")]
    Mnemonic(#[from] MnemonicError),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}

/// Reasons a BIP-39 word sequence or entropy buffer is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MnemonicError {
    /// Word count is not one of 12, 15, 18, 21 or 24.
    #[error("invalid word count: {0}")]
    InvalidWordCount(usize),

    /// A word is not in the English word list.
    #[error("unknown word: {0}")]
    UnknownWord(String),

    /// Trailing checksum bits do not match SHA-256 of the entropy.
    #[error("checksum mismatch")]
    InvalidChecksum,

    /// Entropy is not 16, 20, 24, 28 or 32 bytes.
    #[error("invalid entropy length: {0} bytes")]
    InvalidEntropyLength(usize),
}
