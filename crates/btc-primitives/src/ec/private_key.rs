//! secp256k1 private key with Bitcoin-specific functionality.
//!
//! Wraps the k256 signing key and adds WIF encoding plus the scalar tweak
//! used by BIP-32 private child derivation.

use std::fmt;

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

use crate::base58;
use crate::ec::curve::add_scalars;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// Mainnet WIF prefix byte.
pub const MAINNET_WIF_PREFIX: u8 = 0x80;

/// Testnet WIF prefix byte.
pub const TESTNET_WIF_PREFIX: u8 = 0xef;

/// Compression flag byte appended to WIF for compressed public keys.
const COMPRESS_MAGIC: u8 = 0x01;

/// A secp256k1 private key: a scalar in `[1, n-1]`.
///
/// The underlying k256 key zeroizes its scalar on drop.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    pub fn new() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a private key from a raw 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` for a scalar in `[1, n-1]`, `InvalidKeyLength` for a
    /// slice that is not 32 bytes, or `InvalidScalar` for zero or `>= n`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: PRIVATE_KEY_BYTES_LEN,
                got: bytes.len(),
            });
        }
        let signing_key = SigningKey::from_bytes(bytes.into())
            .map_err(|_| PrimitivesError::InvalidScalar("not in [1, n-1]".to_string()))?;
        Ok(PrivateKey { inner: signing_key })
    }

    /// Create a private key from a 64-character hexadecimal string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Decode a WIF (Wallet Import Format) string.
    ///
    /// Accepts the mainnet (`0x80`) and testnet (`0xef`) prefixes, with or
    /// without the compressed-pubkey flag.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, `ChecksumMismatch` for a corrupted string,
    /// or `InvalidWif` for an unknown prefix, length or compression flag.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let payload = base58::check_decode(wif)
            .map_err(|e| match e {
                PrimitivesError::ChecksumMismatch => PrimitivesError::ChecksumMismatch,
                other => PrimitivesError::InvalidWif(other.to_string()),
            })?;

        match payload.len() {
            // prefix + key + compression flag
            34 => {
                if payload[33] != COMPRESS_MAGIC {
                    return Err(PrimitivesError::InvalidWif(
                        "invalid compression flag".to_string(),
                    ));
                }
            }
            // prefix + key
            33 => {}
            n => {
                return Err(PrimitivesError::InvalidWif(format!(
                    "invalid payload length {}",
                    n
                )));
            }
        }

        if payload[0] != MAINNET_WIF_PREFIX && payload[0] != TESTNET_WIF_PREFIX {
            return Err(PrimitivesError::InvalidWif(format!(
                "unknown prefix 0x{:02x}",
                payload[0]
            )));
        }

        Self::from_bytes(&payload[1..1 + PRIVATE_KEY_BYTES_LEN])
    }

    /// Encode as a compressed-key WIF string with the mainnet prefix.
    pub fn to_wif(&self) -> String {
        self.to_wif_prefix(MAINNET_WIF_PREFIX)
    }

    /// Encode as a compressed-key WIF string with the given network prefix.
    ///
    /// # Arguments
    /// * `prefix` - `0x80` for mainnet, `0xef` for testnet.
    pub fn to_wif_prefix(&self, prefix: u8) -> String {
        let mut payload = Vec::with_capacity(1 + PRIVATE_KEY_BYTES_LEN + 1);
        payload.push(prefix);
        payload.extend_from_slice(&self.to_bytes());
        payload.push(COMPRESS_MAGIC);
        base58::check_encode(&payload)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// The public key `k * G` for this private key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key())
    }

    /// Compute `(self + tweak) mod n` as a new private key.
    ///
    /// This is the private half of BIP-32 child derivation, where `tweak` is
    /// the left 32 bytes of the HMAC output.
    ///
    /// # Returns
    /// The tweaked key, `InvalidScalar` if `tweak >= n` or the sum is zero.
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<PrivateKey, PrimitivesError> {
        let sum = add_scalars(&self.to_bytes(), tweak)?;
        PrivateKey::from_bytes(&sum)
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("pub_key", &self.pub_key().to_hex())
            .finish_non_exhaustive()
    }
}
