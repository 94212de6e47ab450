//! Bech32 and Bech32m checksummed base-32 encoding.
//!
//! The string format from BIP-173 and the modified checksum constant from
//! BIP-350. The encoder works on 5-bit values; callers regroup 8-bit payloads
//! with [`convert_bits`]. Segwit-specific rules (witness version, program
//! length, variant per version) live in the address layer.

use ::bech32::u5;

use crate::PrimitivesError;

/// Maximum total string length.
const MAX_LENGTH: usize = 90;

/// Number of checksum characters.
const CHECKSUM_LENGTH: usize = 6;

/// Checksum flavour of a Bech32 string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// BIP-173 checksum, residue constant 1. Used by witness version 0.
    Bech32,
    /// BIP-350 checksum, residue constant 0x2bc830a3. Used by witness version 1+.
    Bech32m,
}

impl From<Variant> for ::bech32::Variant {
    fn from(v: Variant) -> Self {
        match v {
            Variant::Bech32 => ::bech32::Variant::Bech32,
            Variant::Bech32m => ::bech32::Variant::Bech32m,
        }
    }
}

impl From<::bech32::Variant> for Variant {
    fn from(v: ::bech32::Variant) -> Self {
        match v {
            ::bech32::Variant::Bech32 => Variant::Bech32,
            ::bech32::Variant::Bech32m => Variant::Bech32m,
        }
    }
}

fn map_err(e: ::bech32::Error) -> PrimitivesError {
    PrimitivesError::InvalidBech32(e.to_string())
}

/// Encode a human-readable part and 5-bit data values as a Bech32/Bech32m string.
///
/// The output is lowercase.
///
/// # Arguments
/// * `hrp` - Human-readable prefix (e.g. `"bc"`).
/// * `data` - 5-bit values (each < 32).
/// * `variant` - Checksum constant to use.
///
/// # Returns
/// The encoded string, or `InvalidBech32` for a bad HRP, an out-of-range
/// value, or a result longer than 90 characters.
pub fn encode(hrp: &str, data: &[u8], variant: Variant) -> Result<String, PrimitivesError> {
    let total = hrp.len() + 1 + data.len() + CHECKSUM_LENGTH;
    if total > MAX_LENGTH {
        return Err(PrimitivesError::InvalidBech32(format!(
            "encoded length {} exceeds {}",
            total, MAX_LENGTH
        )));
    }
    let values = data
        .iter()
        .map(|&d| u5::try_from_u8(d).map_err(map_err))
        .collect::<Result<Vec<u5>, _>>()?;
    ::bech32::encode(hrp, values, variant.into()).map_err(map_err)
}

/// Decode a Bech32 or Bech32m string.
///
/// Accepts all-lowercase or all-uppercase input. The checksum residue decides
/// which variant the string uses.
///
/// # Returns
/// `(hrp, data, variant)` with the HRP lowercased and the checksum stripped
/// from `data`, or `InvalidBech32`.
pub fn decode(s: &str) -> Result<(String, Vec<u8>, Variant), PrimitivesError> {
    if s.len() > MAX_LENGTH {
        return Err(PrimitivesError::InvalidBech32(format!(
            "string length {} exceeds {}",
            s.len(),
            MAX_LENGTH
        )));
    }
    let (hrp, values, variant) = ::bech32::decode(s).map_err(map_err)?;
    let data = values.iter().map(|v| v.to_u8()).collect();
    Ok((hrp, data, variant.into()))
}

/// Regroup a sequence of `from`-bit values into `to`-bit values.
///
/// With `pad` the trailing partial group is zero-padded; without it any
/// leftover group must be shorter than `from` bits and all zero.
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, PrimitivesError> {
    ::bech32::convert_bits(data, from, to, pad).map_err(map_err)
}
