//! Mnemonic-to-seed stretching.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// PBKDF2 iteration count fixed by BIP-39.
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Length of a BIP-39 seed in bytes.
pub const SEED_LEN: usize = 64;

/// Salt prefix prepended to the passphrase.
const SALT_PREFIX: &str = "mnemonic";

/// A 64-byte BIP-39 seed, wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// Wrap raw seed bytes, e.g. when importing a seed produced elsewhere.
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Seed(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

/// Derive the BIP-39 seed for a mnemonic phrase and passphrase.
///
/// PBKDF2-HMAC-SHA512 over the NFKD-normalized phrase, with salt
/// `"mnemonic" || passphrase` (also NFKD), 2048 rounds. The phrase is used
/// as given; it is not checked against the word list.
pub fn derive_seed(mnemonic: &str, passphrase: &str) -> Seed {
    let password = Zeroizing::new(mnemonic.nfkd().collect::<String>());
    let salt = Zeroizing::new(
        SALT_PREFIX
            .chars()
            .chain(passphrase.nfkd())
            .collect::<String>(),
    );

    let mut out = [0u8; SEED_LEN];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut out);
    Seed(out)
}
