//! btc-hd
//!
//! Derive Bitcoin addresses from a BIP-39 mnemonic.
//!
//! # Usage
//!
//! ```bash
//! # Addresses for the built-in test mnemonic
//! btc-hd derive
//!
//! # Your own mnemonic, read from a file, second account, testnet
//! btc-hd derive --mnemonic-file words.txt --account 1 --network testnet
//!
//! # Machine-readable output
//! BTC_HD_MNEMONIC="..." btc-hd derive --json
//!
//! # A fresh 24-word mnemonic
//! btc-hd generate --words 24
//! ```

use clap::{Parser, Subcommand};

mod commands;
mod logging;

use commands::{DeriveCommand, GenerateCommand};

/// HD wallet address derivation
#[derive(Parser)]
#[command(name = "btc-hd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Derive P2PKH, P2WPKH and P2TR addresses from a BIP-39 mnemonic", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the BIP-44, BIP-84 and BIP-86 addresses
    Derive(DeriveCommand),

    /// Generate a random mnemonic
    Generate(GenerateCommand),

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level, cli.json_logs)?;

    match cli.command {
        Commands::Derive(cmd) => cmd.execute(),
        Commands::Generate(cmd) => cmd.execute(),
        Commands::Version => {
            println!("btc-hd {}", env!("CARGO_PKG_VERSION"));
            println!("Paths: BIP-44 (P2PKH), BIP-84 (P2WPKH), BIP-86 (P2TR)");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_derive_flags_parse() {
        let cli = Cli::try_parse_from([
            "btc-hd", "derive", "--network", "testnet", "--account", "2", "--json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Derive(_)));
        assert_eq!(cli.log_level, "warn");
    }

    /// A mnemonic file wins over a phrase from the flag or environment.
    #[test]
    fn test_mnemonic_file_takes_precedence() {
        let path = std::env::temp_dir().join(format!("btc-hd-words-{}.txt", std::process::id()));
        std::fs::write(&path, "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong\n").unwrap();

        let cli = Cli::try_parse_from([
            "btc-hd",
            "derive",
            "--mnemonic",
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
            "--mnemonic-file",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let Commands::Derive(cmd) = cli.command else {
            panic!("expected derive");
        };
        let (phrase, is_test_vector) = cmd.read_mnemonic().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(phrase, "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong");
        assert!(!is_test_vector);
    }

    #[test]
    fn test_unknown_network_rejected() {
        assert!(Cli::try_parse_from(["btc-hd", "derive", "--network", "regtest"]).is_err());
    }
}
