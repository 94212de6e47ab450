//! Generate Command - Print a random mnemonic

use anyhow::Context;
use clap::Args;

use btc_sdk::primitives::bip39::{Mnemonic, WordCount};

/// Generate a random BIP-39 mnemonic
#[derive(Args)]
pub struct GenerateCommand {
    /// Number of words (12, 15, 18, 21, 24)
    #[arg(short, long, default_value_t = 12)]
    words: usize,
}

impl GenerateCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let count = WordCount::try_from(self.words).context("unsupported word count")?;
        let mnemonic = Mnemonic::generate(count).context("failed to generate mnemonic")?;
        println!("{}", mnemonic.phrase());
        Ok(())
    }
}
