//! Purpose schemes (BIP-44/84/86) and the parameters that fill in their paths.

use std::fmt;

use btc_script::Network;
use serde::{Deserialize, Serialize};

use crate::bip32::DerivationPath;
use crate::WalletError;

/// Top-level path purpose, which also fixes the address encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    /// `m/44'`: legacy P2PKH.
    Bip44,
    /// `m/84'`: native SegWit v0 P2WPKH.
    Bip84,
    /// `m/86'`: single-key taproot P2TR.
    Bip86,
}

impl Purpose {
    pub const ALL: [Purpose; 3] = [Purpose::Bip44, Purpose::Bip84, Purpose::Bip86];

    pub fn number(self) -> u32 {
        match self {
            Purpose::Bip44 => 44,
            Purpose::Bip84 => 84,
            Purpose::Bip86 => 86,
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BIP{}", self.number())
    }
}

/// Account, change and index applied to every purpose path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationParams {
    pub network: Network,
    pub account: u32,
    pub change: u32,
    pub address_index: u32,
}

impl DerivationParams {
    pub fn new(network: Network) -> Self {
        DerivationParams {
            network,
            ..Default::default()
        }
    }

    pub fn with_account(mut self, account: u32) -> Self {
        self.account = account;
        self
    }

    pub fn with_change(mut self, change: u32) -> Self {
        self.change = change;
        self
    }

    pub fn with_address_index(mut self, address_index: u32) -> Self {
        self.address_index = address_index;
        self
    }

    /// `m/purpose'/coin'/account'/change/address_index`.
    ///
    /// Fails with `InvalidPath` if any value is 2^31 or larger.
    pub fn path(&self, purpose: Purpose) -> Result<DerivationPath, WalletError> {
        DerivationPath::bip44_style(
            purpose.number(),
            self.network.coin_type(),
            self.account,
            self.change,
            self.address_index,
        )
    }

    /// `m/purpose'/coin'/account'`, the level exported as an account xpub.
    pub fn account_path(&self, purpose: Purpose) -> Result<DerivationPath, WalletError> {
        let full = self.path(purpose)?;
        Ok(DerivationPath::from(full.as_slice()[..3].to_vec()))
    }
}
