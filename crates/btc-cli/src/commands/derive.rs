//! Derive Command - Print the BIP-44/84/86 addresses for a mnemonic

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::{debug, info};

use btc_sdk::script::Network;
use btc_sdk::wallet::{derive_from_mnemonic, AddressSet, AddressSummary, DerivationParams};

/// BIP-39 test mnemonic used when none is supplied.
const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
                             abandon abandon abandon abandon abandon about";

/// Derive the three standard addresses
#[derive(Args)]
pub struct DeriveCommand {
    /// Mnemonic phrase (space separated)
    #[arg(short, long, env = "BTC_HD_MNEMONIC", hide_env_values = true)]
    mnemonic: Option<String>,

    /// Read the mnemonic phrase from a file (takes precedence over --mnemonic)
    #[arg(long)]
    mnemonic_file: Option<PathBuf>,

    /// Optional BIP-39 passphrase
    #[arg(short, long, env = "BTC_HD_PASSPHRASE", hide_env_values = true, default_value = "")]
    passphrase: String,

    /// Network (mainnet, testnet)
    #[arg(short, long, default_value = "mainnet")]
    network: Network,

    /// Account index
    #[arg(long, default_value_t = 0)]
    account: u32,

    /// Change index (0 external, 1 internal)
    #[arg(long, default_value_t = 0)]
    change: u32,

    /// Address index
    #[arg(long, default_value_t = 0)]
    index: u32,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also print the WIF private key of each address
    #[arg(long)]
    show_private: bool,
}

#[derive(Serialize)]
struct DeriveOutput {
    network: Network,
    account: u32,
    change: u32,
    index: u32,
    addresses: AddressSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    private_keys: Option<AddressSummary>,
}

impl DeriveCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let (phrase, is_test_vector) = self.read_mnemonic()?;
        if is_test_vector {
            eprintln!("No mnemonic given; using the BIP-39 test mnemonic \"{}\"", TEST_MNEMONIC);
        }

        let params = DerivationParams::new(self.network)
            .with_account(self.account)
            .with_change(self.change)
            .with_address_index(self.index);
        debug!(?params, "deriving address set");

        let set = derive_from_mnemonic(&phrase, &self.passphrase, &params)
            .context("failed to derive addresses")?;
        info!(network = %self.network, "derived address set");

        if self.json {
            let output = DeriveOutput {
                network: self.network,
                account: self.account,
                change: self.change,
                index: self.index,
                addresses: set.summary(),
                private_keys: self.show_private.then(|| private_keys(&set)).flatten(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!(
            "Derived addresses ({}, account {} / change {} / index {}):",
            self.network, self.account, self.change, self.index
        );
        for (label, derived) in [
            ("Legacy  (P2PKH) ", &set.legacy),
            ("Bech32  (P2WPKH)", &set.bech32),
            ("Bech32m (P2TR)  ", &set.bech32m),
        ] {
            println!("{} {}: {}", label, derived.path, derived.address);
            if self.show_private {
                if let Some(wif) = derived.wif() {
                    println!("    WIF: {}", wif);
                }
            }
        }

        Ok(())
    }

    /// The mnemonic from the file, then the flag or env; the test mnemonic otherwise.
    pub(crate) fn read_mnemonic(&self) -> anyhow::Result<(String, bool)> {
        if let Some(path) = &self.mnemonic_file {
            let phrase = fs::read_to_string(path)
                .with_context(|| format!("failed to read mnemonic from {}", path.display()))?;
            return Ok((phrase.trim().to_string(), false));
        }
        if let Some(phrase) = &self.mnemonic {
            return Ok((phrase.clone(), false));
        }
        Ok((TEST_MNEMONIC.to_string(), true))
    }
}

fn private_keys(set: &AddressSet) -> Option<AddressSummary> {
    Some(AddressSummary {
        legacy: set.legacy.wif()?,
        bech32: set.bech32.wif()?,
        bech32m: set.bech32m.wif()?,
    })
}
