/// Bitcoin HD SDK - Network parameters and address encoding.
///
/// Provides the three address encoders (legacy P2PKH, SegWit v0 P2WPKH and
/// taproot P2TR), the taproot output-key tweak, and address parsing.

pub mod network;
pub mod address;
pub mod p2pkh;
pub mod segwit;
pub mod taproot;

mod error;
pub use error::ScriptError;
pub use address::{Address, Payload};
pub use network::Network;
pub use p2pkh::p2pkh_address;
pub use segwit::p2wpkh_address;
pub use taproot::p2tr_address;
