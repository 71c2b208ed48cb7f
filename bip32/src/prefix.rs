//! Serialization prefixes ("versions") for extended keys.

use crate::{Error, Result, Version};
use core::{
    fmt::{self, Display},
    str,
};

/// The four-character, four-byte version quad leading a serialized extended
/// key (e.g. `xprv` / `xpub`). Passed explicitly into serialization entry
/// points; nothing in the engine holds a process-wide default.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Prefix {
    chars: [u8; Self::LENGTH],
    version: Version,
}

impl Prefix {
    /// Mainnet private key.
    pub const XPRV: Prefix = Self::from_parts_unchecked("xprv", 0x0488ade4);

    /// Mainnet public key.
    pub const XPUB: Prefix = Self::from_parts_unchecked("xpub", 0x0488b21e);

    /// Testnet private key.
    pub const TPRV: Prefix = Self::from_parts_unchecked("tprv", 0x04358394);

    /// Testnet public key.
    pub const TPUB: Prefix = Self::from_parts_unchecked("tpub", 0x043587cf);

    /// Length of a prefix in characters (and bytes).
    pub const LENGTH: usize = 4;

    /// Build a prefix from its string identifier and version quad without
    /// checking that they agree.
    pub const fn from_parts_unchecked(chars: &str, version: Version) -> Self {
        let bytes = chars.as_bytes();
        Self { chars: [bytes[0], bytes[1], bytes[2], bytes[3]], version }
    }

    /// Validate a candidate prefix string: exactly four lowercase ASCII
    /// alphanumeric characters.
    pub fn validate_str(s: &str) -> Result<&str> {
        if s.len() != Self::LENGTH {
            return Err(Error::Decode);
        }

        if s.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()) {
            Ok(s)
        } else {
            Err(Error::Decode)
        }
    }

    pub fn as_str(&self) -> &str {
        str::from_utf8(&self.chars).expect("prefix validated as ASCII")
    }

    /// Version quad serialized big endian.
    pub fn to_bytes(self) -> [u8; 4] {
        self.version.to_be_bytes()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Does this prefix mark a private key?
    pub fn is_private(self) -> bool {
        &self.chars[1..] == b"prv"
    }

    /// Does this prefix mark a public key?
    pub fn is_public(self) -> bool {
        &self.chars[1..] == b"pub"
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<Version> for Prefix {
    type Error = Error;

    fn try_from(version: Version) -> Result<Prefix> {
        match version {
            v if v == Self::XPRV.version => Ok(Self::XPRV),
            v if v == Self::XPUB.version => Ok(Self::XPUB),
            v if v == Self::TPRV.version => Ok(Self::TPRV),
            v if v == Self::TPUB.version => Ok(Self::TPUB),
            _ => Err(Error::Decode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Prefix;

    #[test]
    fn known_versions() {
        assert_eq!(Prefix::XPRV.to_bytes(), [0x04, 0x88, 0xad, 0xe4]);
        assert_eq!(Prefix::XPUB.to_bytes(), [0x04, 0x88, 0xb2, 0x1e]);
        assert_eq!(Prefix::TPRV.to_bytes(), [0x04, 0x35, 0x83, 0x94]);
        assert_eq!(Prefix::TPUB.to_bytes(), [0x04, 0x35, 0x87, 0xcf]);
    }

    #[test]
    fn privacy_markers() {
        assert!(Prefix::XPRV.is_private());
        assert!(Prefix::TPRV.is_private());
        assert!(Prefix::XPUB.is_public());
        assert!(!Prefix::XPUB.is_private());
    }

    #[test]
    fn validate() {
        assert!(Prefix::validate_str("xprv").is_ok());
        assert!(Prefix::validate_str("zpub").is_ok());
        assert!(Prefix::validate_str("xprvx").is_err());
        assert!(Prefix::validate_str("XPRV").is_err());
        assert!(Prefix::validate_str("xp!v").is_err());
    }

    #[test]
    fn version_round_trip() {
        assert_eq!(Prefix::try_from(0x0488ade4).unwrap(), Prefix::XPRV);
        assert!(Prefix::try_from(0xdeadbeef).is_err());
    }
}
