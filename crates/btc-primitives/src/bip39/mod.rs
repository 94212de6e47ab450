//! BIP-39 mnemonic codec and seed derivation.
//!
//! A mnemonic packs entropy plus a SHA-256 checksum into 11-bit word
//! indices over the English word list. The seed is PBKDF2-HMAC-SHA512 of the
//! normalized phrase and is the input to BIP-32 master key generation.

pub mod mnemonic;
pub mod seed;

pub use mnemonic::{Entropy, Mnemonic, WordCount};
pub use seed::{derive_seed, Seed, PBKDF2_ROUNDS};
