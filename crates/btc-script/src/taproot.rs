//! Pay-to-taproot key-path addresses (BIP-341 / BIP-86).

use btc_primitives::ec::public_key::X_ONLY_LEN;
use btc_primitives::ec::{lift_x, PublicKey};
use btc_primitives::hash::tagged_hash;

use crate::segwit::encode_witness_address;
use crate::{Network, ScriptError};

/// Tag for the key-path output-key tweak.
pub const TAP_TWEAK_TAG: &str = "TapTweak";

/// Taproot witness version.
const TAPROOT_VERSION: u8 = 1;

/// Tweak an x-only internal key with no script tree.
///
/// `Q = lift_x(P) + TaggedHash("TapTweak", x(P)) * G`.
///
/// # Returns
/// The output key `Q`, or a primitives error if `P` is not on the curve or
/// the tweak is out of range.
pub fn tweak_internal_key(internal_key: &[u8; X_ONLY_LEN]) -> Result<PublicKey, ScriptError> {
    let p = lift_x(internal_key)?;
    let t = tagged_hash(TAP_TWEAK_TAG, internal_key);
    Ok(p.tweak_add(&t)?)
}

/// The x-only output key for a key-path-only taproot output.
pub fn output_key(internal_key: &[u8; X_ONLY_LEN]) -> Result<[u8; X_ONLY_LEN], ScriptError> {
    Ok(tweak_internal_key(internal_key)?.to_x_only())
}

/// P2TR address of an x-only internal key.
///
/// # Returns
/// The Bech32m address of the tweaked output key, or `UnsupportedKeyLength`
/// unless the key is 32 bytes.
pub fn p2tr_address(internal_key: &[u8], network: Network) -> Result<String, ScriptError> {
    let x: &[u8; X_ONLY_LEN] = internal_key
        .try_into()
        .map_err(|_| ScriptError::UnsupportedKeyLength {
            expected: X_ONLY_LEN,
            got: internal_key.len(),
        })?;
    let q = output_key(x)?;
    encode_witness_address(network.bech32_hrp(), TAPROOT_VERSION, &q)
}
