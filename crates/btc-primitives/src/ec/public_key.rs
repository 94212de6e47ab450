//! secp256k1 public key with Bitcoin-specific functionality.
//!
//! Supports compressed, uncompressed and x-only (BIP-340) serialization and
//! the Hash160 digest used by legacy and SegWit v0 addresses.

use k256::ecdsa::VerifyingKey;
use k256::ProjectivePoint;
use std::fmt;

use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
pub const UNCOMPRESSED_LEN: usize = 65;

/// Length of an x-only public key in bytes.
pub const X_ONLY_LEN: usize = 32;

/// A point on secp256k1 other than the point at infinity.
#[derive(Clone, Debug)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a PublicKey from SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or `InvalidPoint` if the bytes don't
    /// describe a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPoint("empty encoding".to_string()));
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|_| PrimitivesError::InvalidPoint("not a point on secp256k1".to_string()))?;
        Ok(PublicKey { inner: vk })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize in compressed SEC1 format: `0x02`/`0x03` by Y parity, then X.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize in uncompressed SEC1 format: `0x04`, X, Y.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// The 32-byte X coordinate (BIP-340 x-only key).
    pub fn to_x_only(&self) -> [u8; X_ONLY_LEN] {
        let mut out = [0u8; X_ONLY_LEN];
        out.copy_from_slice(&self.to_compressed()[1..]);
        out
    }

    /// Whether the Y coordinate is even.
    pub fn has_even_y(&self) -> bool {
        self.to_compressed()[0] == 0x02
    }

    /// Serialize as a lowercase hex string of the compressed encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Hash160 of the compressed encoding.
    ///
    /// This is the P2PKH/P2WPKH payload and the source of BIP-32 fingerprints.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_compressed())
    }

    /// Add `tweak * G` to this point. See [`crate::ec::tweak_add`].
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<PublicKey, PrimitivesError> {
        crate::ec::curve::tweak_add(self, tweak)
    }

    pub(crate) fn from_k256_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey { inner: *vk }
    }

    /// Wrap a projective point, rejecting the point at infinity.
    pub(crate) fn from_projective_point(point: &ProjectivePoint) -> Result<Self, PrimitivesError> {
        if *point == ProjectivePoint::IDENTITY {
            return Err(PrimitivesError::InvalidPoint(
                "point at infinity".to_string(),
            ));
        }
        let vk = VerifyingKey::from_affine(point.to_affine())
            .map_err(|_| PrimitivesError::InvalidPoint("point at infinity".to_string()))?;
        Ok(PublicKey { inner: vk })
    }

    pub(crate) fn to_projective_point(&self) -> ProjectivePoint {
        ProjectivePoint::from(*self.inner.as_affine())
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPRESSED_EVEN: &str =
        "02ce0b14fb842b1ba549fdd675c98075f12e9c510f8ef52bd021a9a1f4809d3b4d";
    const COMPRESSED_ODD: &str =
        "032689c7c2dab13309fb143e0e8fe396342521887e976690b6b47f5b2a4b7d448e";

    /// Parse valid and invalid SEC1 encodings.
    #[test]
    fn test_pub_keys() {
        let tests: &[(&str, &str, bool)] = &[
            (
                "uncompressed ok",
                "0411db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5cb2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3",
                true,
            ),
            (
                "uncompressed x changed",
                "0415db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5cb2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3",
                false,
            ),
            ("compressed ok (ybit = 0)", COMPRESSED_EVEN, true),
            ("compressed ok (ybit = 1)", COMPRESSED_ODD, true),
            (
                "compressed x not on curve",
                "020000000000000000000000000000000000000000000000000000000000000005",
                false,
            ),
            ("wrong length", "05", false),
        ];

        for (name, key_hex, is_valid) in tests {
            let result = PublicKey::from_hex(key_hex);
            if *is_valid {
                assert!(result.is_ok(), "{} should be valid: {:?}", name, result.err());
            } else {
                assert!(
                    matches!(result, Err(PrimitivesError::InvalidPoint(_))),
                    "{} should be rejected",
                    name
                );
            }
        }
    }

    #[test]
    fn test_public_key_is_equal() {
        let pk1 = PublicKey::from_hex(COMPRESSED_ODD).unwrap();
        let pk2 = PublicKey::from_hex(COMPRESSED_EVEN).unwrap();
        assert_eq!(pk1, pk1.clone());
        assert_ne!(pk1, pk2);
    }

    #[test]
    fn test_compressed_round_trip() {
        let pk = PublicKey::from_hex(COMPRESSED_EVEN).unwrap();
        assert_eq!(hex::encode(pk.to_compressed()), COMPRESSED_EVEN);
        assert_eq!(format!("{}", pk), COMPRESSED_EVEN);
    }

    #[test]
    fn test_x_only_and_parity() {
        let even = PublicKey::from_hex(COMPRESSED_EVEN).unwrap();
        let odd = PublicKey::from_hex(COMPRESSED_ODD).unwrap();
        assert!(even.has_even_y());
        assert!(!odd.has_even_y());
        assert_eq!(hex::encode(even.to_x_only()), &COMPRESSED_EVEN[2..]);
        assert_eq!(hex::encode(odd.to_x_only()), &COMPRESSED_ODD[2..]);
    }

    /// Uncompressed and compressed encodings of the generator are the same key.
    #[test]
    fn test_uncompressed_generator() {
        let g = PublicKey::from_hex(
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        )
        .unwrap();
        assert_eq!(
            g.to_hex(),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(
            hex::encode(g.hash160()),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn test_identity_rejected() {
        assert!(PublicKey::from_projective_point(&ProjectivePoint::IDENTITY).is_err());
        assert!(PublicKey::from_hex("00").is_err());
    }
}
