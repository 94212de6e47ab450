//! BIP-32 hierarchical deterministic keys.

pub mod extended_key;
pub mod path;

pub use extended_key::{ExtendedKey, KeyMaterial};
pub use path::{ChildNumber, DerivationPath, HARDENED_OFFSET};
