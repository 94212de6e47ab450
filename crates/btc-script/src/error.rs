use crate::Network;

/// Error types for address encoding and decoding.
///
/// Covers wrong-sized key material, malformed or unsupported address
/// strings, and witness program violations.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Key material has the wrong length for the requested encoder.
    #[error("unsupported key length: expected {expected} bytes, got {got}")]
    UnsupportedKeyLength { expected: usize, got: usize },

    /// Address string failed to decode or verify.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Address is well formed but of a kind this crate does not produce.
    #[error("address not supported: {0}")]
    UnsupportedAddress(String),

    /// Witness version, program length or checksum variant is invalid.
    #[error("invalid witness program: {0}")]
    InvalidWitnessProgram(String),

    /// Address belongs to a different network than required.
    #[error("network mismatch: expected {expected}, got {got}")]
    NetworkMismatch { expected: Network, got: Network },

    /// Network name did not match any known network.
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] btc_primitives::PrimitivesError),
}
