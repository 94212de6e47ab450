//! Child numbers and derivation paths (`m/44'/0'/0'/0/0`).

use std::fmt;
use std::str::FromStr;

use crate::WalletError;

/// Child numbers at or above this value are hardened.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// One path segment: an index below 2^31 plus the hardened flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChildNumber {
    Normal(u32),
    Hardened(u32),
}

impl ChildNumber {
    /// A non-hardened child; `index` must be below 2^31.
    pub fn normal(index: u32) -> Result<Self, WalletError> {
        if index >= HARDENED_OFFSET {
            return Err(WalletError::InvalidPath(format!(
                "index {} out of range",
                index
            )));
        }
        Ok(ChildNumber::Normal(index))
    }

    /// A hardened child; `index` must be below 2^31.
    pub fn hardened(index: u32) -> Result<Self, WalletError> {
        if index >= HARDENED_OFFSET {
            return Err(WalletError::InvalidPath(format!(
                "index {} out of range",
                index
            )));
        }
        Ok(ChildNumber::Hardened(index))
    }

    /// Split a serialized 32-bit child number.
    pub fn from_raw(raw: u32) -> Self {
        if raw >= HARDENED_OFFSET {
            ChildNumber::Hardened(raw - HARDENED_OFFSET)
        } else {
            ChildNumber::Normal(raw)
        }
    }

    /// The 32-bit child number as serialized (`ser32(i)`).
    pub fn to_raw(self) -> u32 {
        match self {
            ChildNumber::Normal(i) => i,
            ChildNumber::Hardened(i) => i | HARDENED_OFFSET,
        }
    }

    pub fn is_hardened(self) -> bool {
        matches!(self, ChildNumber::Hardened(_))
    }

    /// Index without the hardened bit.
    pub fn index(self) -> u32 {
        match self {
            ChildNumber::Normal(i) | ChildNumber::Hardened(i) => i,
        }
    }

    /// The following index with the same hardening, if any remain.
    pub fn next(self) -> Option<Self> {
        let i = self.index().checked_add(1).filter(|&i| i < HARDENED_OFFSET)?;
        Some(match self {
            ChildNumber::Normal(_) => ChildNumber::Normal(i),
            ChildNumber::Hardened(_) => ChildNumber::Hardened(i),
        })
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildNumber::Normal(i) => write!(f, "{}", i),
            ChildNumber::Hardened(i) => write!(f, "{}'", i),
        }
    }
}

impl FromStr for ChildNumber {
    type Err = WalletError;

    /// Parse `"5"`, `"5'"`, `"5h"` or `"5H"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (digits, hardened) = match s.strip_suffix(['\'', 'h', 'H']) {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WalletError::InvalidPath(format!("bad segment '{}'", s)));
        }
        let index: u32 = digits
            .parse()
            .map_err(|_| WalletError::InvalidPath(format!("bad segment '{}'", s)))?;
        if hardened {
            ChildNumber::hardened(index)
        } else {
            ChildNumber::normal(index)
        }
    }
}

/// A sequence of child numbers applied left to right from the master key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// The empty path `m`.
    pub fn master() -> Self {
        DerivationPath(Vec::new())
    }

    /// `m/purpose'/coin'/account'/change/index`.
    pub fn bip44_style(
        purpose: u32,
        coin_type: u32,
        account: u32,
        change: u32,
        address_index: u32,
    ) -> Result<Self, WalletError> {
        Ok(DerivationPath(vec![
            ChildNumber::hardened(purpose)?,
            ChildNumber::hardened(coin_type)?,
            ChildNumber::hardened(account)?,
            ChildNumber::normal(change)?,
            ChildNumber::normal(address_index)?,
        ]))
    }

    /// A copy of this path extended by one segment.
    pub fn child(&self, child: ChildNumber) -> Self {
        let mut segments = self.0.clone();
        segments.push(child);
        DerivationPath(segments)
    }

    pub fn as_slice(&self) -> &[ChildNumber] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_master(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(segments: Vec<ChildNumber>) -> Self {
        DerivationPath(segments)
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = std::slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for c in &self.0 {
            write!(f, "/{}", c)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('/');
        match parts.next() {
            Some("m") | Some("M") => {}
            _ => {
                return Err(WalletError::InvalidPath(format!(
                    "'{}' must start with 'm'",
                    s
                )))
            }
        }
        parts
            .map(ChildNumber::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(DerivationPath)
    }
}
