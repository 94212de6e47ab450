/// Bitcoin address handling.
///
/// An `Address` is one of the three payload kinds this crate produces:
/// legacy P2PKH (Base58Check), SegWit v0 P2WPKH (Bech32) and taproot P2TR
/// (Bech32m). Parsing detects the encoding and network from the string.

use std::fmt;
use std::str::FromStr;

use crate::segwit::{decode_witness_address, encode_witness_address};
use crate::{p2pkh, segwit, taproot, Network, ScriptError};

/// What an address commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Payload {
    /// Hash160 of a compressed public key, legacy encoding.
    PubkeyHash([u8; 20]),
    /// Hash160 of a compressed public key, witness v0.
    WitnessPubkeyHash([u8; 20]),
    /// Tweaked x-only output key, witness v1.
    Taproot([u8; 32]),
}

impl Payload {
    /// The scriptPubKey locking to this payload.
    pub fn script_pubkey(&self) -> Vec<u8> {
        match self {
            // OP_DUP OP_HASH160 <20> OP_EQUALVERIFY OP_CHECKSIG
            Payload::PubkeyHash(h) => {
                let mut s = vec![0x76, 0xa9, 0x14];
                s.extend_from_slice(h);
                s.extend_from_slice(&[0x88, 0xac]);
                s
            }
            // OP_0 <20>
            Payload::WitnessPubkeyHash(h) => {
                let mut s = vec![0x00, 0x14];
                s.extend_from_slice(h);
                s
            }
            // OP_1 <32>
            Payload::Taproot(q) => {
                let mut s = vec![0x51, 0x20];
                s.extend_from_slice(q);
                s
            }
        }
    }
}

/// A Bitcoin address together with its decoded payload and network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The canonical address string (lowercase for SegWit).
    pub address_string: String,
    /// The committed payload.
    pub payload: Payload,
    /// The network this address belongs to.
    pub network: Network,
}

impl Address {
    /// Parse any supported address string.
    ///
    /// Strings whose prefix is a known HRP followed by `1` are decoded as
    /// SegWit, everything else as Base58Check.
    ///
    /// # Returns
    /// The address, `InvalidAddress` for bad encodings or checksums,
    /// `InvalidWitnessProgram` for malformed witness data, or
    /// `UnsupportedAddress` for valid addresses of other kinds (P2SH,
    /// P2WSH, future witness versions, unknown HRPs).
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        if looks_like_segwit(addr) {
            Self::from_segwit(addr)
        } else {
            let (network, hash) = p2pkh::decode(addr)?;
            Ok(Address {
                address_string: addr.to_string(),
                payload: Payload::PubkeyHash(hash),
                network,
            })
        }
    }

    fn from_segwit(addr: &str) -> Result<Self, ScriptError> {
        let wp = decode_witness_address(addr)?;
        let network = Network::from_hrp(&wp.hrp).ok_or_else(|| {
            ScriptError::UnsupportedAddress(format!("'{}': unknown hrp '{}'", addr, wp.hrp))
        })?;

        let payload = match (wp.version, wp.program.len()) {
            (0, 20) => {
                let mut h = [0u8; 20];
                h.copy_from_slice(&wp.program);
                Payload::WitnessPubkeyHash(h)
            }
            (1, 32) => {
                let mut q = [0u8; 32];
                q.copy_from_slice(&wp.program);
                Payload::Taproot(q)
            }
            (v, len) => {
                return Err(ScriptError::UnsupportedAddress(format!(
                    "'{}': witness v{} program of {} bytes",
                    addr, v, len
                )));
            }
        };

        Ok(Address {
            address_string: addr.to_ascii_lowercase(),
            payload,
            network,
        })
    }

    /// Build an address from a payload.
    pub fn from_payload(payload: Payload, network: Network) -> Result<Self, ScriptError> {
        let address_string = match &payload {
            Payload::PubkeyHash(h) => p2pkh::encode_hash(h, network),
            Payload::WitnessPubkeyHash(h) => encode_witness_address(network.bech32_hrp(), 0, h)?,
            Payload::Taproot(q) => encode_witness_address(network.bech32_hrp(), 1, q)?,
        };
        Ok(Address {
            address_string,
            payload,
            network,
        })
    }

    /// Legacy P2PKH address of a 33-byte compressed public key.
    pub fn p2pkh(public_key: &[u8], network: Network) -> Result<Self, ScriptError> {
        Self::from_string(&p2pkh::p2pkh_address(public_key, network)?)
    }

    /// SegWit v0 P2WPKH address of a 33-byte compressed public key.
    pub fn p2wpkh(public_key: &[u8], network: Network) -> Result<Self, ScriptError> {
        Self::from_string(&segwit::p2wpkh_address(public_key, network)?)
    }

    /// Taproot P2TR address of a 32-byte x-only internal key.
    pub fn p2tr(internal_key: &[u8], network: Network) -> Result<Self, ScriptError> {
        Self::from_string(&taproot::p2tr_address(internal_key, network)?)
    }

    /// Reject addresses for any network other than `network`.
    pub fn require_network(self, network: Network) -> Result<Self, ScriptError> {
        if self.network != network {
            return Err(ScriptError::NetworkMismatch {
                expected: network,
                got: self.network,
            });
        }
        Ok(self)
    }

    pub fn script_pubkey(&self) -> Vec<u8> {
        self.payload.script_pubkey()
    }
}

/// A known HRP followed by the separator, in either case.
fn looks_like_segwit(addr: &str) -> bool {
    let lower = addr.to_ascii_lowercase();
    ["bc1", "tb1", "bcrt1"].iter().any(|p| lower.starts_with(p))
}

impl FromStr for Address {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl fmt::Display for Address {
    /// Display the address as its encoded string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}
