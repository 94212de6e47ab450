//! SegWit witness-program addresses (BIP-173 / BIP-350).
//!
//! Version 0 programs use the Bech32 checksum, versions 1 through 16 use
//! Bech32m. P2WPKH is the version 0, 20-byte case.

use btc_primitives::bech32::{self, Variant};
use btc_primitives::ec::public_key::COMPRESSED_LEN;
use btc_primitives::ec::PublicKey;

use crate::{Network, ScriptError};

/// Highest witness version.
const MAX_WITNESS_VERSION: u8 = 16;

/// A decoded witness program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WitnessProgram {
    pub hrp: String,
    pub version: u8,
    pub program: Vec<u8>,
}

/// Checksum variant required for a witness version.
fn variant_for(version: u8) -> Variant {
    if version == 0 {
        Variant::Bech32
    } else {
        Variant::Bech32m
    }
}

fn check_program(version: u8, program: &[u8]) -> Result<(), ScriptError> {
    if version > MAX_WITNESS_VERSION {
        return Err(ScriptError::InvalidWitnessProgram(format!(
            "witness version {} above {}",
            version, MAX_WITNESS_VERSION
        )));
    }
    if !(2..=40).contains(&program.len()) {
        return Err(ScriptError::InvalidWitnessProgram(format!(
            "program length {} outside 2..=40",
            program.len()
        )));
    }
    if version == 0 && program.len() != 20 && program.len() != 32 {
        return Err(ScriptError::InvalidWitnessProgram(format!(
            "v0 program length {} is neither 20 nor 32",
            program.len()
        )));
    }
    Ok(())
}

/// Encode a witness program as a SegWit address.
///
/// # Returns
/// The lowercase address, or `InvalidWitnessProgram` for a version above 16
/// or a program length the version does not allow.
pub fn encode_witness_address(
    hrp: &str,
    version: u8,
    program: &[u8],
) -> Result<String, ScriptError> {
    check_program(version, program)?;
    let mut data = vec![version];
    data.extend(bech32::convert_bits(program, 8, 5, true)?);
    Ok(bech32::encode(hrp, &data, variant_for(version))?)
}

/// Decode and validate a SegWit address.
///
/// Enforces the checksum variant for the witness version and the program
/// length rules. The returned HRP is lowercase.
pub fn decode_witness_address(addr: &str) -> Result<WitnessProgram, ScriptError> {
    let (hrp, data, variant) = bech32::decode(addr)
        .map_err(|e| ScriptError::InvalidAddress(format!("'{}': {}", addr, e)))?;

    let (&version, rest) = data.split_first().ok_or_else(|| {
        ScriptError::InvalidWitnessProgram("missing witness version".to_string())
    })?;
    if version > MAX_WITNESS_VERSION {
        return Err(ScriptError::InvalidWitnessProgram(format!(
            "witness version {} above {}",
            version, MAX_WITNESS_VERSION
        )));
    }
    if variant != variant_for(version) {
        return Err(ScriptError::InvalidWitnessProgram(format!(
            "witness v{} encoded with {:?}",
            version, variant
        )));
    }

    let program = bech32::convert_bits(rest, 5, 8, false)
        .map_err(|e| ScriptError::InvalidWitnessProgram(e.to_string()))?;
    check_program(version, &program)?;

    Ok(WitnessProgram {
        hrp,
        version,
        program,
    })
}

/// P2WPKH address of a compressed public key: witness v0 over its Hash160.
///
/// # Returns
/// The Bech32 address, `UnsupportedKeyLength` unless the key is 33 bytes,
/// or a primitives error if the bytes are not a curve point.
pub fn p2wpkh_address(public_key: &[u8], network: Network) -> Result<String, ScriptError> {
    if public_key.len() != COMPRESSED_LEN {
        return Err(ScriptError::UnsupportedKeyLength {
            expected: COMPRESSED_LEN,
            got: public_key.len(),
        });
    }
    let key = PublicKey::from_bytes(public_key)?;
    encode_witness_address(network.bech32_hrp(), 0, &key.hash160())
}
