//! Scalar and point arithmetic over secp256k1.
//!
//! These are the only curve operations the rest of the SDK needs. Every
//! function validates its inputs: scalars must be below the group order `n`
//! and points must lie on the curve.

use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, ProjectivePoint, Scalar};

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Parse a 32-byte big-endian integer as a scalar without reducing it.
///
/// Values `>= n` are rejected rather than wrapped; BIP-32 and BIP-341 both
/// treat such values as invalid.
pub(crate) fn scalar_from_bytes(bytes: &[u8; 32]) -> Result<Scalar, PrimitivesError> {
    Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(*bytes))).ok_or_else(
        || PrimitivesError::InvalidScalar("value is not below the curve order".to_string()),
    )
}

/// Serialize a scalar as 32 big-endian bytes.
pub(crate) fn scalar_to_bytes(scalar: &Scalar) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&scalar.to_repr());
    out
}

/// Compute the public key `scalar * G` for a raw 32-byte private scalar.
///
/// # Returns
/// The public point, or `InvalidScalar` if the scalar is zero or `>= n`.
pub fn private_to_public(scalar: &[u8; 32]) -> Result<PublicKey, PrimitivesError> {
    Ok(PrivateKey::from_bytes(scalar)?.pub_key())
}

/// Add two scalars modulo the curve order.
///
/// # Returns
/// `(a + b) mod n`, or `InvalidScalar` if either input is `>= n` or the
/// sum is zero (not a usable private key).
pub fn add_scalars(a: &[u8; 32], b: &[u8; 32]) -> Result<[u8; 32], PrimitivesError> {
    let sum = scalar_from_bytes(a)? + scalar_from_bytes(b)?;
    if bool::from(sum.is_zero()) {
        return Err(PrimitivesError::InvalidScalar(
            "scalar sum is zero".to_string(),
        ));
    }
    Ok(scalar_to_bytes(&sum))
}

/// Add `tweak * G` to a public point.
///
/// # Returns
/// `point + tweak * G`, `InvalidScalar` if the tweak is `>= n`, or
/// `InvalidPoint` if the result is the point at infinity.
pub fn tweak_add(point: &PublicKey, tweak: &[u8; 32]) -> Result<PublicKey, PrimitivesError> {
    let t = scalar_from_bytes(tweak)?;
    let result = point.to_projective_point() + ProjectivePoint::GENERATOR * t;
    PublicKey::from_projective_point(&result)
}

/// Recover the point with the given x-coordinate and an even Y (BIP-340 `lift_x`).
///
/// # Returns
/// The even-Y point, or `InvalidPoint` if `x` is not the x-coordinate of a
/// curve point.
pub fn lift_x(x: &[u8; 32]) -> Result<PublicKey, PrimitivesError> {
    let mut compressed = [0u8; 33];
    compressed[0] = 0x02;
    compressed[1..].copy_from_slice(x);
    PublicKey::from_bytes(&compressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
    const ORDER_MINUS_ONE: &str =
        "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140";
    const G: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    fn bytes32(hex_str: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&hex::decode(hex_str).unwrap());
        out
    }

    fn small(n: u8) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[31] = n;
        out
    }

    // ---- private_to_public ----

    #[test]
    fn test_private_to_public_one_is_generator() {
        let pk = private_to_public(&small(1)).unwrap();
        assert_eq!(pk.to_hex(), G);
    }

    #[test]
    fn test_private_to_public_order_minus_one_is_negated_generator() {
        let pk = private_to_public(&bytes32(ORDER_MINUS_ONE)).unwrap();
        assert_eq!(
            pk.to_hex(),
            "0379be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_private_to_public_rejects_zero_and_order() {
        assert!(matches!(
            private_to_public(&[0u8; 32]),
            Err(PrimitivesError::InvalidScalar(_))
        ));
        assert!(matches!(
            private_to_public(&bytes32(ORDER)),
            Err(PrimitivesError::InvalidScalar(_))
        ));
    }

    // ---- add_scalars ----

    #[test]
    fn test_add_scalars_small_values() {
        assert_eq!(add_scalars(&small(1), &small(2)).unwrap(), small(3));
    }

    #[test]
    fn test_add_scalars_wraps_modulo_order() {
        assert_eq!(
            add_scalars(&bytes32(ORDER_MINUS_ONE), &small(2)).unwrap(),
            small(1)
        );
    }

    #[test]
    fn test_add_scalars_zero_sum_rejected() {
        assert!(matches!(
            add_scalars(&bytes32(ORDER_MINUS_ONE), &small(1)),
            Err(PrimitivesError::InvalidScalar(_))
        ));
    }

    #[test]
    fn test_add_scalars_rejects_unreduced_input() {
        assert!(add_scalars(&bytes32(ORDER), &small(1)).is_err());
    }

    // ---- tweak_add ----

    #[test]
    fn test_tweak_add_generator() {
        let g = PublicKey::from_hex(G).unwrap();
        assert_eq!(
            tweak_add(&g, &small(1)).unwrap().to_hex(),
            "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"
        );
        assert_eq!(
            tweak_add(&g, &small(2)).unwrap().to_hex(),
            "02f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9"
        );
    }

    #[test]
    fn test_tweak_add_matches_private_addition() {
        let a = bytes32("e284129cc0922579a535bbf4d1a3b25773090d28c909bc0fed73b5e0222cc372");
        let b = bytes32("4604b4b710fe91f584fff084e1a9159fe4f8408fff380596a604948474ce4fa3");
        let via_points = tweak_add(&private_to_public(&a).unwrap(), &b).unwrap();
        let via_scalars = private_to_public(&add_scalars(&a, &b).unwrap()).unwrap();
        assert_eq!(via_points, via_scalars);
    }

    /// G + (n - 1)G = nG is the point at infinity.
    #[test]
    fn test_tweak_add_to_infinity_rejected() {
        let g = PublicKey::from_hex(G).unwrap();
        assert!(matches!(
            tweak_add(&g, &bytes32(ORDER_MINUS_ONE)),
            Err(PrimitivesError::InvalidPoint(_))
        ));
    }

    #[test]
    fn test_tweak_add_rejects_unreduced_tweak() {
        let g = PublicKey::from_hex(G).unwrap();
        assert!(matches!(
            tweak_add(&g, &bytes32(ORDER)),
            Err(PrimitivesError::InvalidScalar(_))
        ));
    }

    // ---- lift_x ----

    #[test]
    fn test_lift_x_generator() {
        let g = PublicKey::from_hex(G).unwrap();
        assert_eq!(lift_x(&g.to_x_only()).unwrap(), g);
    }

    /// The negated generator shares G's x-coordinate; lift_x picks the even-Y one.
    #[test]
    fn test_lift_x_chooses_even_y() {
        let neg_g = private_to_public(&bytes32(ORDER_MINUS_ONE)).unwrap();
        let lifted = lift_x(&neg_g.to_x_only()).unwrap();
        assert!(lifted.has_even_y());
        assert_eq!(lifted.to_hex(), G);
    }

    /// x = 5 has no square root for x^3 + 7.
    #[test]
    fn test_lift_x_rejects_off_curve() {
        assert!(matches!(
            lift_x(&small(5)),
            Err(PrimitivesError::InvalidPoint(_))
        ));
    }
}
