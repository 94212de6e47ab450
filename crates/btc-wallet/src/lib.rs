/// Bitcoin HD SDK - BIP-32 key derivation and address orchestration.
///
/// Extended keys and derivation paths (BIP-32), the BIP-44/84/86 purpose
/// schemes, and the mnemonic-to-address pipeline producing one P2PKH, one
/// P2WPKH and one P2TR address.

mod error;
pub use error::WalletError;

pub mod bip32;
pub mod scheme;
pub mod addresses;

pub use addresses::{
    derive_address, derive_address_set, derive_from_mnemonic, AddressSet, AddressSummary,
    DerivedAddress,
};
pub use bip32::{ChildNumber, DerivationPath, ExtendedKey, KeyMaterial};
pub use scheme::{DerivationParams, Purpose};
