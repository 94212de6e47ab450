//! BIP-32 extended keys: master generation, child derivation and
//! Base58Check serialization.

use std::fmt;

use btc_primitives::base58;
use btc_primitives::ec::{PrivateKey, PublicKey};
use btc_primitives::hash::{hash160, sha512_hmac};
use btc_script::Network;
use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

use crate::bip32::path::{ChildNumber, DerivationPath};
use crate::WalletError;

/// HMAC key for master key generation.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Shortest and longest accepted seeds, in bytes.
const MIN_SEED_LEN: usize = 16;
const MAX_SEED_LEN: usize = 64;

/// Length of a serialized extended key before the checksum.
const SERIALIZED_LEN: usize = 78;

const MAINNET_PRIVATE: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];
const MAINNET_PUBLIC: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];
const TESTNET_PRIVATE: [u8; 4] = [0x04, 0x35, 0x83, 0x94];
const TESTNET_PUBLIC: [u8; 4] = [0x04, 0x35, 0x87, 0xCF];

/// The key half of an extended key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyMaterial {
    Private(PrivateKey),
    Public(PublicKey),
}

/// A BIP-32 node: key material plus the chain code and position metadata.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    key: KeyMaterial,
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: ChildNumber,
    network: Network,
}

impl ExtendedKey {
    /// Generate the master key from a seed.
    ///
    /// # Returns
    /// The master private key, `InvalidSeedLength` unless the seed is 16..=64
    /// bytes, or `InvalidMasterKey` if IL is zero or not below n.
    pub fn new_master(seed: &[u8], network: Network) -> Result<Self, WalletError> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(WalletError::InvalidSeedLength(seed.len()));
        }

        let i = Zeroizing::new(sha512_hmac(MASTER_HMAC_KEY, seed));
        let key = PrivateKey::from_bytes(&i[..32]).map_err(|_| WalletError::InvalidMasterKey)?;
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);

        let master = ExtendedKey {
            key: KeyMaterial::Private(key),
            chain_code,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: ChildNumber::Normal(0),
            network,
        };
        debug!(
            fingerprint = %hex::encode(master.fingerprint()),
            %network,
            "created master key"
        );
        Ok(master)
    }

    pub fn is_private(&self) -> bool {
        matches!(self.key, KeyMaterial::Private(_))
    }

    pub fn key_material(&self) -> &KeyMaterial {
        &self.key
    }

    /// The private key, if this is a private extended key.
    pub fn private_key(&self) -> Option<&PrivateKey> {
        match &self.key {
            KeyMaterial::Private(k) => Some(k),
            KeyMaterial::Public(_) => None,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        match &self.key {
            KeyMaterial::Private(k) => k.pub_key(),
            KeyMaterial::Public(p) => p.clone(),
        }
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Hash160 of the compressed public key.
    pub fn identifier(&self) -> [u8; 20] {
        hash160(&self.public_key().to_compressed())
    }

    /// First four bytes of the identifier.
    pub fn fingerprint(&self) -> [u8; 4] {
        let mut fp = [0u8; 4];
        fp.copy_from_slice(&self.identifier()[..4]);
        fp
    }

    /// The public extended key for this node (neutered).
    pub fn to_public(&self) -> ExtendedKey {
        ExtendedKey {
            key: KeyMaterial::Public(self.public_key()),
            ..self.clone()
        }
    }

    /// Derive one child.
    ///
    /// # Returns
    /// The child key; `HardenedDerivationRequiresPrivateKey` for a hardened
    /// child of a public key; `DepthOverflow` past depth 255; or
    /// `InvalidChildIndex` when IL is not below n or the resulting key is
    /// zero / the point at infinity.
    pub fn derive_child(&self, child: ChildNumber) -> Result<ExtendedKey, WalletError> {
        let depth = self.depth.checked_add(1).ok_or(WalletError::DepthOverflow)?;
        let raw = child.to_raw();

        let mut data = Zeroizing::new(Vec::with_capacity(37));
        match (&self.key, child.is_hardened()) {
            (KeyMaterial::Private(k), true) => {
                data.push(0x00);
                data.extend_from_slice(&k.to_bytes());
            }
            (KeyMaterial::Public(_), true) => {
                return Err(WalletError::HardenedDerivationRequiresPrivateKey);
            }
            (_, false) => data.extend_from_slice(&self.public_key().to_compressed()),
        }
        data.extend_from_slice(&raw.to_be_bytes());

        let i = Zeroizing::new(sha512_hmac(&self.chain_code, &data));
        let mut il = Zeroizing::new([0u8; 32]);
        il.copy_from_slice(&i[..32]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);

        let key = match &self.key {
            KeyMaterial::Private(k) => KeyMaterial::Private(
                k.tweak_add(&il)
                    .map_err(|_| WalletError::InvalidChildIndex(raw))?,
            ),
            KeyMaterial::Public(p) => KeyMaterial::Public(
                p.tweak_add(&il)
                    .map_err(|_| WalletError::InvalidChildIndex(raw))?,
            ),
        };

        trace!(depth, child = %child, "derived child key");
        Ok(ExtendedKey {
            key,
            chain_code,
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: child,
            network: self.network,
        })
    }

    /// Walk a path from this key, left to right.
    ///
    /// A segment that yields an invalid child is retried with the next index
    /// of the same hardening until one succeeds.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<ExtendedKey, WalletError> {
        let mut current = self.clone();
        for &segment in path {
            current = skip_invalid_children(segment, |child| current.derive_child(child))?;
        }
        debug!(%path, depth = current.depth, "derived path");
        Ok(current)
    }

    /// Serialize as `xprv`/`xpub` (mainnet) or `tprv`/`tpub` (testnet).
    pub fn to_extended_string(&self) -> String {
        let version = match (self.network, self.is_private()) {
            (Network::Mainnet, true) => MAINNET_PRIVATE,
            (Network::Mainnet, false) => MAINNET_PUBLIC,
            (Network::Testnet, true) => TESTNET_PRIVATE,
            (Network::Testnet, false) => TESTNET_PUBLIC,
        };

        let mut buf = Zeroizing::new(Vec::with_capacity(SERIALIZED_LEN));
        buf.extend_from_slice(&version);
        buf.push(self.depth);
        buf.extend_from_slice(&self.parent_fingerprint);
        buf.extend_from_slice(&self.child_number.to_raw().to_be_bytes());
        buf.extend_from_slice(&self.chain_code);
        match &self.key {
            KeyMaterial::Private(k) => {
                buf.push(0x00);
                buf.extend_from_slice(&k.to_bytes());
            }
            KeyMaterial::Public(p) => buf.extend_from_slice(&p.to_compressed()),
        }
        base58::check_encode(&buf)
    }

    /// Parse an `xprv`/`xpub`/`tprv`/`tpub` string.
    ///
    /// # Returns
    /// The key, or `InvalidExtendedKey` for a bad checksum, length, version,
    /// key encoding, or a depth-0 key with a parent fingerprint or index.
    pub fn from_extended_string(s: &str) -> Result<Self, WalletError> {
        let buf = Zeroizing::new(
            base58::check_decode(s).map_err(|e| WalletError::InvalidExtendedKey(e.to_string()))?,
        );
        if buf.len() != SERIALIZED_LEN {
            return Err(WalletError::InvalidExtendedKey(format!(
                "length {} is not {}",
                buf.len(),
                SERIALIZED_LEN
            )));
        }

        let mut version = [0u8; 4];
        version.copy_from_slice(&buf[0..4]);
        let (network, private) = match version {
            MAINNET_PRIVATE => (Network::Mainnet, true),
            MAINNET_PUBLIC => (Network::Mainnet, false),
            TESTNET_PRIVATE => (Network::Testnet, true),
            TESTNET_PUBLIC => (Network::Testnet, false),
            _ => {
                return Err(WalletError::InvalidExtendedKey(format!(
                    "unknown version {}",
                    hex::encode(version)
                )))
            }
        };

        let depth = buf[4];
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&buf[5..9]);
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&buf[9..13]);
        let child_number = ChildNumber::from_raw(u32::from_be_bytes(raw));
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&buf[13..45]);

        if depth == 0 && (parent_fingerprint != [0u8; 4] || child_number.to_raw() != 0) {
            return Err(WalletError::InvalidExtendedKey(
                "master key with parent fingerprint or child index".to_string(),
            ));
        }

        let key_data = &buf[45..];
        let key = if private {
            if key_data[0] != 0x00 {
                return Err(WalletError::InvalidExtendedKey(
                    "private key data must start with 0x00".to_string(),
                ));
            }
            KeyMaterial::Private(
                PrivateKey::from_bytes(&key_data[1..])
                    .map_err(|e| WalletError::InvalidExtendedKey(e.to_string()))?,
            )
        } else {
            KeyMaterial::Public(
                PublicKey::from_bytes(key_data)
                    .map_err(|e| WalletError::InvalidExtendedKey(e.to_string()))?,
            )
        };

        Ok(ExtendedKey {
            key,
            chain_code,
            depth,
            parent_fingerprint,
            child_number,
            network,
        })
    }
}

/// Run `step` on `child`, moving on to the next index of the same hardening
/// for as long as the step reports `InvalidChildIndex`.
fn skip_invalid_children<T, F>(mut child: ChildNumber, mut step: F) -> Result<T, WalletError>
where
    F: FnMut(ChildNumber) -> Result<T, WalletError>,
{
    loop {
        match step(child) {
            Err(WalletError::InvalidChildIndex(raw)) => {
                warn!(child = %child, "invalid child key, skipping to next index");
                child = child.next().ok_or(WalletError::InvalidChildIndex(raw))?;
            }
            other => return other,
        }
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("private", &self.is_private())
            .field("network", &self.network)
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &self.child_number)
            .field("public_key", &self.public_key().to_hex())
            .finish_non_exhaustive()
    }
}
