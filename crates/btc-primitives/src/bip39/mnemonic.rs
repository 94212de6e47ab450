//! Mnemonic <-> entropy conversion with checksum validation.

use std::fmt;

use ::bip39::Language;
use rand::rngs::OsRng;
use rand::RngCore;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::bip39::seed::{derive_seed, Seed};
use crate::MnemonicError;

/// Allowed mnemonic lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordCount {
    Words12,
    Words15,
    Words18,
    Words21,
    Words24,
}

impl WordCount {
    /// Number of words in the phrase.
    pub fn word_count(self) -> usize {
        match self {
            WordCount::Words12 => 12,
            WordCount::Words15 => 15,
            WordCount::Words18 => 18,
            WordCount::Words21 => 21,
            WordCount::Words24 => 24,
        }
    }

    /// Entropy length in bytes: 4/3 of the word count.
    pub fn entropy_bytes(self) -> usize {
        self.word_count() * 4 / 3
    }

    /// Checksum length in bits: one bit per 32 bits of entropy.
    pub fn checksum_bits(self) -> usize {
        self.word_count() / 3
    }
}

impl TryFrom<usize> for WordCount {
    type Error = MnemonicError;

    fn try_from(words: usize) -> Result<Self, Self::Error> {
        match words {
            12 => Ok(WordCount::Words12),
            15 => Ok(WordCount::Words15),
            18 => Ok(WordCount::Words18),
            21 => Ok(WordCount::Words21),
            24 => Ok(WordCount::Words24),
            other => Err(MnemonicError::InvalidWordCount(other)),
        }
    }
}

/// Raw mnemonic entropy, wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Entropy(Vec<u8>);

impl Entropy {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Entropy {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entropy({} bytes)", self.0.len())
    }
}

/// A checksum-valid BIP-39 mnemonic over the English word list.
///
/// Immutable once constructed, and every constructor validates the checksum.
/// The inner mnemonic wipes its word indices on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    inner: ::bip39::Mnemonic,
}

impl Mnemonic {
    /// Validate a word sequence and recover its entropy.
    ///
    /// # Returns
    /// The entropy bytes, or `InvalidWordCount`, `UnknownWord` or
    /// `InvalidChecksum`. Checks run in that order.
    pub fn validate<S: AsRef<str>>(words: &[S]) -> Result<Entropy, MnemonicError> {
        WordCount::try_from(words.len())?;
        let phrase = Zeroizing::new(
            words.iter().map(|w| w.as_ref()).collect::<Vec<_>>().join(" "),
        );
        let inner = parse_english(&phrase)?;
        Ok(Entropy(inner.to_entropy()))
    }

    /// Encode entropy as a mnemonic.
    ///
    /// # Returns
    /// The mnemonic, or `InvalidEntropyLength` unless the entropy is 16, 20,
    /// 24, 28 or 32 bytes.
    pub fn from_entropy(entropy: &[u8]) -> Result<Self, MnemonicError> {
        let inner = ::bip39::Mnemonic::from_entropy_in(Language::English, entropy)
            .map_err(|e| map_bip39_error(e, ""))?;
        Ok(Mnemonic { inner })
    }

    /// Parse a phrase: NFKD-normalize, then split on any whitespace.
    ///
    /// Words must match the list exactly; no case folding is applied.
    pub fn from_phrase(phrase: &str) -> Result<Self, MnemonicError> {
        let normalized = Zeroizing::new(phrase.nfkd().collect::<String>());
        let inner = parse_english(&normalized)?;
        Ok(Mnemonic { inner })
    }

    /// Generate a random mnemonic from OS entropy.
    ///
    /// Demo utility only: deterministic derivation never calls this.
    pub fn generate(count: WordCount) -> Result<Self, MnemonicError> {
        let mut entropy = Zeroizing::new(vec![0u8; count.entropy_bytes()]);
        OsRng.fill_bytes(&mut entropy);
        Self::from_entropy(&entropy)
    }

    /// Recover the entropy this mnemonic encodes.
    pub fn to_entropy(&self) -> Entropy {
        Entropy(self.inner.to_entropy())
    }

    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    /// Iterate over the words of the phrase.
    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.words()
    }

    /// The canonical phrase: words joined by single spaces.
    pub fn phrase(&self) -> String {
        self.inner.to_string()
    }

    /// Stretch the canonical phrase into a 64-byte seed.
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        let phrase = Zeroizing::new(self.phrase());
        derive_seed(&phrase, passphrase)
    }
}

impl std::str::FromStr for Mnemonic {
    type Err = MnemonicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_phrase(s)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.phrase())
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic({} words)", self.word_count())
    }
}

/// The 2048-word English list, sorted.
pub fn word_list() -> &'static [&'static str; 2048] {
    Language::English.word_list()
}

/// Parse an already-normalized phrase against the English list.
fn parse_english(normalized: &str) -> Result<::bip39::Mnemonic, MnemonicError> {
    ::bip39::Mnemonic::parse_in_normalized(Language::English, normalized)
        .map_err(|e| map_bip39_error(e, normalized))
}

/// Translate a `bip39` error, resolving word positions against `phrase`.
fn map_bip39_error(err: ::bip39::Error, phrase: &str) -> MnemonicError {
    match err {
        ::bip39::Error::BadWordCount(n) => MnemonicError::InvalidWordCount(n),
        ::bip39::Error::UnknownWord(i) => MnemonicError::UnknownWord(
            phrase.split_whitespace().nth(i).unwrap_or_default().to_string(),
        ),
        ::bip39::Error::BadEntropyBitCount(bits) => MnemonicError::InvalidEntropyLength(bits / 8),
        ::bip39::Error::InvalidChecksum => MnemonicError::InvalidChecksum,
        // Only raised by language detection; the language here is fixed.
        ::bip39::Error::AmbiguousLanguages(_) => MnemonicError::InvalidChecksum,
    }
}
