/// Elliptic curve cryptography on secp256k1.
///
/// Provides private keys, public keys (compressed, uncompressed and x-only)
/// and the scalar/point arithmetic used by BIP-32 child derivation and
/// BIP-341 taproot output-key tweaking.

pub mod curve;
pub mod private_key;
pub mod public_key;

pub use curve::{add_scalars, lift_x, private_to_public, tweak_add};
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
