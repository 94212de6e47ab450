//! Network parameters for address and key encoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ScriptError;

/// Mainnet P2PKH address version byte.
const MAINNET_P2PKH: u8 = 0x00;
/// Testnet P2PKH address version byte.
const TESTNET_P2PKH: u8 = 0x6f;

/// Bitcoin network selecting address prefixes and the BIP-44 coin type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Bitcoin mainnet: P2PKH prefix `0x00` ('1'), HRP `bc`, coin type 0.
    #[default]
    Mainnet,
    /// Bitcoin testnet: P2PKH prefix `0x6f` ('m'/'n'), HRP `tb`, coin type 1.
    Testnet,
}

impl Network {
    /// Version byte prepended to the Hash160 in a P2PKH address.
    pub fn p2pkh_version(self) -> u8 {
        match self {
            Network::Mainnet => MAINNET_P2PKH,
            Network::Testnet => TESTNET_P2PKH,
        }
    }

    /// Human-readable part of SegWit addresses.
    pub fn bech32_hrp(self) -> &'static str {
        match self {
            Network::Mainnet => "bc",
            Network::Testnet => "tb",
        }
    }

    /// SLIP-44 coin type used at the second level of BIP-44 style paths.
    pub fn coin_type(self) -> u32 {
        match self {
            Network::Mainnet => 0,
            Network::Testnet => 1,
        }
    }

    /// WIF prefix byte for private keys.
    pub fn wif_prefix(self) -> u8 {
        match self {
            Network::Mainnet => 0x80,
            Network::Testnet => 0xef,
        }
    }

    pub fn from_p2pkh_version(version: u8) -> Option<Self> {
        match version {
            MAINNET_P2PKH => Some(Network::Mainnet),
            TESTNET_P2PKH => Some(Network::Testnet),
            _ => None,
        }
    }

    /// Match a lowercase HRP.
    pub fn from_hrp(hrp: &str) -> Option<Self> {
        match hrp {
            "bc" => Some(Network::Mainnet),
            "tb" => Some(Network::Testnet),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            _ => Err(ScriptError::UnknownNetwork(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_parameters() {
        assert_eq!(Network::Mainnet.p2pkh_version(), 0x00);
        assert_eq!(Network::Testnet.p2pkh_version(), 0x6f);
        assert_eq!(Network::Mainnet.bech32_hrp(), "bc");
        assert_eq!(Network::Testnet.bech32_hrp(), "tb");
        assert_eq!(Network::Mainnet.coin_type(), 0);
        assert_eq!(Network::Testnet.coin_type(), 1);
        assert_eq!(Network::default(), Network::Mainnet);
    }

    #[test]
    fn test_network_lookups() {
        assert_eq!(Network::from_p2pkh_version(0x6f), Some(Network::Testnet));
        assert_eq!(Network::from_p2pkh_version(0x05), None);
        assert_eq!(Network::from_hrp("bc"), Some(Network::Mainnet));
        assert_eq!(Network::from_hrp("bcrt"), None);
    }

    #[test]
    fn test_network_parse_and_display() {
        assert_eq!("Mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("test".parse::<Network>().unwrap(), Network::Testnet);
        assert!(matches!(
            "regtest".parse::<Network>(),
            Err(ScriptError::UnknownNetwork(_))
        ));
        for n in [Network::Mainnet, Network::Testnet] {
            assert_eq!(n.to_string().parse::<Network>().unwrap(), n);
        }
    }
}
