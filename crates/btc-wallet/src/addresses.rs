//! Address derivation for the three purpose schemes.
//!
//! Each purpose walks its own path from the master key and encodes the
//! resulting public key with its address scheme:
//!
//! | purpose | path                | address          |
//! |---------|---------------------|------------------|
//! | 44      | `m/44'/c'/a'/x/i`   | P2PKH (Base58)   |
//! | 84      | `m/84'/c'/a'/x/i`   | P2WPKH (Bech32)  |
//! | 86      | `m/86'/c'/a'/x/i`   | P2TR (Bech32m)   |

use btc_primitives::bip39::{Mnemonic, Seed};
use btc_primitives::ec::PublicKey;
use btc_primitives::PrimitivesError;
use btc_script::{Address, ScriptError};
use serde::{Deserialize, Serialize};

use crate::bip32::{DerivationPath, ExtendedKey};
use crate::scheme::{DerivationParams, Purpose};
use crate::WalletError;

/// One derived address together with the key and path that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedAddress {
    pub purpose: Purpose,
    pub path: DerivationPath,
    pub address: Address,
    pub key: ExtendedKey,
}

impl DerivedAddress {
    pub fn public_key(&self) -> PublicKey {
        self.key.public_key()
    }

    /// Compressed WIF for the address key, if the private half is present.
    pub fn wif(&self) -> Option<String> {
        self.key
            .private_key()
            .map(|k| k.to_wif_prefix(self.address.network.wif_prefix()))
    }
}

impl std::fmt::Display for DerivedAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// Derive the address for `purpose` at the path given by `params`.
///
/// The master key must belong to the same network as `params`.
pub fn derive_address(
    master: &ExtendedKey,
    purpose: Purpose,
    params: &DerivationParams,
) -> Result<DerivedAddress, WalletError> {
    if master.network() != params.network {
        return Err(ScriptError::NetworkMismatch {
            expected: params.network,
            got: master.network(),
        }
        .into());
    }

    let path = params.path(purpose)?;
    let key = master.derive_path(&path)?;
    let public_key = key.public_key();

    let address = match purpose {
        Purpose::Bip44 => Address::p2pkh(&public_key.to_compressed(), params.network)?,
        Purpose::Bip84 => Address::p2wpkh(&public_key.to_compressed(), params.network)?,
        Purpose::Bip86 => Address::p2tr(&public_key.to_x_only(), params.network)?,
    };

    Ok(DerivedAddress {
        purpose,
        path,
        address,
        key,
    })
}

/// One address per purpose, all at the same account/change/index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressSet {
    pub legacy: DerivedAddress,
    pub bech32: DerivedAddress,
    pub bech32m: DerivedAddress,
}

impl AddressSet {
    pub fn get(&self, purpose: Purpose) -> &DerivedAddress {
        match purpose {
            Purpose::Bip44 => &self.legacy,
            Purpose::Bip84 => &self.bech32,
            Purpose::Bip86 => &self.bech32m,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DerivedAddress> {
        [&self.legacy, &self.bech32, &self.bech32m].into_iter()
    }

    pub fn summary(&self) -> AddressSummary {
        AddressSummary {
            legacy: self.legacy.address.to_string(),
            bech32: self.bech32.address.to_string(),
            bech32m: self.bech32m.address.to_string(),
        }
    }
}

/// The three address strings, as emitted by the CLI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSummary {
    pub legacy: String,
    pub bech32: String,
    pub bech32m: String,
}

/// Derive the P2PKH, P2WPKH and P2TR addresses for a seed.
///
/// Either all three addresses are returned or the first error.
pub fn derive_address_set(
    seed: &Seed,
    params: &DerivationParams,
) -> Result<AddressSet, WalletError> {
    let master = ExtendedKey::new_master(seed.as_bytes(), params.network)?;
    Ok(AddressSet {
        legacy: derive_address(&master, Purpose::Bip44, params)?,
        bech32: derive_address(&master, Purpose::Bip84, params)?,
        bech32m: derive_address(&master, Purpose::Bip86, params)?,
    })
}

/// Validate a mnemonic phrase, stretch it with `passphrase` and derive the
/// address set.
pub fn derive_from_mnemonic(
    phrase: &str,
    passphrase: &str,
    params: &DerivationParams,
) -> Result<AddressSet, WalletError> {
    let mnemonic = Mnemonic::from_phrase(phrase).map_err(PrimitivesError::from)?;
    let seed = mnemonic.to_seed(passphrase);
    derive_address_set(&seed, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use btc_primitives::MnemonicError;
    use btc_script::{Network, Payload};

    const ABANDON: &str = "abandon abandon abandon abandon abandon abandon \
                           abandon abandon abandon abandon abandon about";

    #[test]
    fn test_abandon_mainnet_set() {
        let set = derive_from_mnemonic(ABANDON, "", &DerivationParams::default()).unwrap();
        let summary = set.summary();
        assert_eq!(summary.legacy, "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA");
        assert_eq!(summary.bech32, "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu");
        assert_eq!(
            summary.bech32m,
            "bc1p5cyxnuxmeuwuvkwfem96lqzszd02n6xdcjrs20cac6yqjjwudpxqkedrcr"
        );
        assert_eq!(set.legacy.path.to_string(), "m/44'/0'/0'/0/0");
        assert_eq!(set.bech32.path.to_string(), "m/84'/0'/0'/0/0");
        assert_eq!(set.bech32m.path.to_string(), "m/86'/0'/0'/0/0");
    }

    #[test]
    fn test_payload_kinds() {
        let set = derive_from_mnemonic(ABANDON, "", &DerivationParams::default()).unwrap();
        assert!(matches!(set.get(Purpose::Bip44).address.payload, Payload::PubkeyHash(_)));
        assert!(matches!(
            set.get(Purpose::Bip84).address.payload,
            Payload::WitnessPubkeyHash(_)
        ));
        assert!(matches!(set.get(Purpose::Bip86).address.payload, Payload::Taproot(_)));
        assert_eq!(set.iter().count(), 3);
    }

    #[test]
    fn test_wif_of_bip44_key() {
        let set = derive_from_mnemonic(ABANDON, "", &DerivationParams::default()).unwrap();
        assert_eq!(
            set.legacy.key.private_key().unwrap().to_hex(),
            "e284129cc0922579a535bbf4d1a3b25773090d28c909bc0fed73b5e0222cc372"
        );
        assert!(set.legacy.wif().unwrap().starts_with('L'));
        assert_eq!(set.legacy.to_string(), "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA");
    }

    #[test]
    fn test_invalid_mnemonic_surfaces_mnemonic_error() {
        let bad = ABANDON.replace("about", "abandon");
        let err = derive_from_mnemonic(&bad, "", &DerivationParams::default()).unwrap_err();
        assert!(matches!(
            err,
            WalletError::Primitives(PrimitivesError::Mnemonic(MnemonicError::InvalidChecksum))
        ));
    }

    #[test]
    fn test_network_mismatch() {
        let seed = Mnemonic::from_phrase(ABANDON).unwrap().to_seed("");
        let master = ExtendedKey::new_master(seed.as_bytes(), Network::Mainnet).unwrap();
        let err = derive_address(&master, Purpose::Bip44, &DerivationParams::new(Network::Testnet))
            .unwrap_err();
        assert!(matches!(
            err,
            WalletError::Script(ScriptError::NetworkMismatch { .. })
        ));
    }

    #[test]
    fn test_summary_json() {
        let set = derive_from_mnemonic(ABANDON, "", &DerivationParams::default()).unwrap();
        let json = serde_json::to_value(set.summary()).unwrap();
        assert_eq!(json["legacy"], "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA");
        let back: AddressSummary = serde_json::from_value(json).unwrap();
        assert_eq!(back, set.summary());
    }
}
