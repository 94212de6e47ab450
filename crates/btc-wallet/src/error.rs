/// Error types for HD derivation and address orchestration.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("hardened derivation requires a private key")]
    HardenedDerivationRequiresPrivateKey,
    #[error("invalid child index: {0:#010x}")]
    InvalidChildIndex(u32),
    #[error("invalid derivation path: {0}")]
    InvalidPath(String),
    #[error("invalid seed length: {0} (expected 16..=64 bytes)")]
    InvalidSeedLength(usize),
    #[error("seed produced an invalid master key")]
    InvalidMasterKey,
    #[error("maximum derivation depth exceeded")]
    DepthOverflow,
    #[error("invalid extended key: {0}")]
    InvalidExtendedKey(String),
    #[error("primitives error: {0}")]
    Primitives(#[from] btc_primitives::PrimitivesError),
    #[error("script error: {0}")]
    Script(#[from] btc_script::ScriptError),
}
