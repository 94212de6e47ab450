//! Base58 encoding and decoding with optional checksum support.
//!
//! Raw Base58 uses Bitcoin's alphabet; Base58Check appends the first four
//! bytes of SHA-256d(payload) and is the wire format for legacy P2PKH
//! addresses, WIF private keys and serialized BIP-32 extended keys.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Length of the Base58Check checksum suffix.
const CHECKSUM_LEN: usize = 4;

/// Encode a byte slice to a Base58 string.
///
/// Uses Bitcoin's modified Base58 alphabet (no `0`, `O`, `I`, `l`).
/// Leading zero bytes are encoded as leading '1' characters.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).with_alphabet(bs58::Alphabet::BITCOIN).into_string()
}

/// Decode a Base58 string to a byte vector.
///
/// # Returns
/// `Ok(Vec<u8>)` on success, or an error for characters outside the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Encode a byte slice with a 4-byte double-SHA-256 checksum appended (Base58Check).
///
/// # Arguments
/// * `data` - The bytes to encode (typically version byte(s) + payload).
///
/// # Returns
/// `encode(data || sha256d(data)[..4])`.
pub fn check_encode(data: &[u8]) -> String {
    let checksum = sha256d(data);
    let mut payload = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    encode(&payload)
}

/// Decode a Base58Check string, verifying the 4-byte checksum.
///
/// # Returns
/// `Ok(Vec<u8>)` of the payload (without checksum), `InvalidBase58` for bad
/// characters or a too-short input, or `ChecksumMismatch`.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    if decoded.len() < CHECKSUM_LEN {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string()
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
    let expected = sha256d(payload);
    if checksum != &expected[..CHECKSUM_LEN] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base58_empty_input() {
        assert_eq!(encode(&[]), "");
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_base58_leading_zeros() {
        let input = hex::decode("000000287FB4CD").unwrap();
        assert_eq!(encode(&input), "111233QC4");
        assert_eq!(decode("111233QC4").unwrap(), input);
    }

    /// Characters excluded from the alphabet are rejected.
    #[test]
    fn test_base58_decode_excluded_characters() {
        for bad in ["0", "O", "I", "l", "1234!@#$%"] {
            assert!(decode(bad).is_err(), "{} should not decode", bad);
        }
    }

    // -- Base58Check --

    /// Version 0x00 + Hash160 of the compressed generator point is the
    /// legacy address of private key 1.
    #[test]
    fn test_check_encode_generator_address() {
        let payload = hex::decode("00751e76e8199196d454941c45d1b3a323f1433bd6").unwrap();
        let encoded = check_encode(&payload);
        assert_eq!(encoded, "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(check_decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_check_decode_bad_checksum() {
        // Swap the last character for a different alphabet character.
        let mut encoded = check_encode(&[0x80, 0x01, 0x02, 0x03]);
        let last = encoded.pop().unwrap();
        encoded.push(if last == '1' { '2' } else { '1' });
        assert!(matches!(
            check_decode(&encoded),
            Err(PrimitivesError::ChecksumMismatch)
        ));
    }

    #[test]
    fn test_check_decode_too_short() {
        assert!(matches!(
            check_decode("1"),
            Err(PrimitivesError::InvalidBase58(_))
        ));
    }
}
