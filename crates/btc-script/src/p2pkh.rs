//! Legacy pay-to-public-key-hash addresses (Base58Check).

use btc_primitives::base58;
use btc_primitives::ec::public_key::COMPRESSED_LEN;
use btc_primitives::ec::PublicKey;

use crate::{Network, ScriptError};

/// Version byte + 20-byte hash.
const PAYLOAD_LEN: usize = 21;

/// Base58Check-encode a public key hash under the network's version byte.
pub fn encode_hash(hash: &[u8; 20], network: Network) -> String {
    let mut payload = Vec::with_capacity(PAYLOAD_LEN);
    payload.push(network.p2pkh_version());
    payload.extend_from_slice(hash);
    base58::check_encode(&payload)
}

/// P2PKH address of a compressed public key.
///
/// # Returns
/// The Base58Check address, `UnsupportedKeyLength` unless the key is 33
/// bytes, or a primitives error if the bytes are not a curve point.
pub fn p2pkh_address(public_key: &[u8], network: Network) -> Result<String, ScriptError> {
    if public_key.len() != COMPRESSED_LEN {
        return Err(ScriptError::UnsupportedKeyLength {
            expected: COMPRESSED_LEN,
            got: public_key.len(),
        });
    }
    let key = PublicKey::from_bytes(public_key)?;
    Ok(encode_hash(&key.hash160(), network))
}

/// Decode a P2PKH address into its network and public key hash.
pub fn decode(addr: &str) -> Result<(Network, [u8; 20]), ScriptError> {
    let payload = base58::check_decode(addr)
        .map_err(|e| ScriptError::InvalidAddress(format!("'{}': {}", addr, e)))?;

    if payload.len() != PAYLOAD_LEN {
        return Err(ScriptError::InvalidAddress(format!(
            "'{}': payload length {}",
            addr,
            payload.len()
        )));
    }

    let network = Network::from_p2pkh_version(payload[0]).ok_or_else(|| {
        ScriptError::UnsupportedAddress(format!("'{}': version 0x{:02x}", addr, payload[0]))
    })?;

    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);
    Ok((network, hash))
}
