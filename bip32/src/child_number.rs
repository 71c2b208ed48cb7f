//! Child numbers: single components of a derivation path.

use crate::{Error, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use core::{
    fmt::{self, Display},
    str::FromStr,
};

/// Index of a particular child key under a parent, with the hardened bit
/// folded into the raw `u32` value.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize,
)]
pub struct ChildNumber(pub u32);

impl ChildNumber {
    /// Hardened child numbers have this bit set.
    pub const HARDENED_FLAG: u32 = 1 << 31;

    /// Create a child number from an index within the 31-bit index space
    /// and a hardened marker.
    pub fn new(index: u32, hardened: bool) -> Result<Self> {
        if index & Self::HARDENED_FLAG == 0 {
            Ok(ChildNumber(if hardened { index | Self::HARDENED_FLAG } else { index }))
        } else {
            Err(Error::ChildNumber)
        }
    }

    /// Index of this child number, without the hardened bit.
    pub fn index(&self) -> u32 {
        self.0 & !Self::HARDENED_FLAG
    }

    /// Is this child number hardened?
    pub fn is_hardened(&self) -> bool {
        self.0 & Self::HARDENED_FLAG != 0
    }

    /// Serialize the raw `u32` value, big endian.
    pub fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        ChildNumber(u32::from_be_bytes(bytes))
    }
}

impl From<ChildNumber> for u32 {
    fn from(child_number: ChildNumber) -> u32 {
        child_number.0
    }
}

impl FromStr for ChildNumber {
    type Err = Error;

    /// Parse a single path component: a decimal index with an optional
    /// `'` or `h` hardened suffix.
    fn from_str(component: &str) -> Result<ChildNumber> {
        let (index, hardened) = match component.strip_suffix(['\'', 'h']) {
            Some(index) => (index, true),
            None => (component, false),
        };

        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedPath(format!("invalid path component `{component}`")));
        }

        let index = index
            .parse::<u32>()
            .map_err(|_| Error::MalformedPath(format!("index out of range in `{component}`")))?;

        ChildNumber::new(index, hardened)
            .map_err(|_| Error::MalformedPath(format!("index out of range in `{component}`")))
    }
}

impl Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())?;

        if self.is_hardened() {
            write!(f, "'")?;
        }

        Ok(())
    }
}
