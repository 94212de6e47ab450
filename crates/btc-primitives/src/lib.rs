/// Bitcoin HD SDK - Cryptographic primitives, hashing, and encodings.
///
/// This crate provides the foundational building blocks for the SDK:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160, HMAC-SHA512, tagged hashes)
/// - Base58 / Base58Check encoding
/// - Bech32 / Bech32m encoding (BIP-173 / BIP-350)
/// - secp256k1 keys and curve arithmetic (scalar addition, point tweaking, x-only keys)
/// - BIP-39 mnemonic codec and seed derivation

pub mod hash;
pub mod base58;
pub mod bech32;
pub mod ec;
pub mod bip39;

mod error;
pub use error::{MnemonicError, PrimitivesError};
