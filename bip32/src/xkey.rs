//! Serialized extended keys (i.e. `xprv` and `xpub`).

use crate::{ChildNumber, Error, ExtendedKeyAttrs, Prefix, Result, Version, KEY_SIZE};
use core::{
    fmt::{self, Display},
    str::{self, FromStr},
};
use zeroize::Zeroize;

/// An extended key in its serialized form: a [`Prefix`] plus the positional
/// attributes and 33 bytes of key material (a `0x00`-prefixed private scalar
/// or an SEC1 compressed point).
#[derive(Clone)]
pub struct ExtendedKey {
    /// [`Prefix`] (a.k.a. "version") of the key (e.g. `xprv`, `xpub`).
    pub prefix: Prefix,

    /// Extended key attributes.
    pub attrs: ExtendedKeyAttrs,

    /// Key material, with an extra byte for a public key's SEC1 tag.
    pub key_bytes: [u8; KEY_SIZE + 1],
}

impl ExtendedKey {
    /// Size of an extended key when deserialized into bytes from Base58.
    pub const BYTE_SIZE: usize = 78;

    /// Maximum size of a Base58Check-encoded extended key in bytes.
    pub const MAX_BASE58_SIZE: usize = 112;

    /// Serialize to the canonical fixed layout:
    /// `version(4) ‖ depth(1) ‖ parent fingerprint(4) ‖ child number(4) ‖
    /// chain code(32) ‖ key material(33)`.
    pub fn to_bytes(&self) -> [u8; Self::BYTE_SIZE] {
        let mut bytes = [0u8; Self::BYTE_SIZE];
        bytes[..4].copy_from_slice(&self.prefix.to_bytes());
        bytes[4] = self.attrs.depth;
        bytes[5..9].copy_from_slice(&self.attrs.parent_fingerprint);
        bytes[9..13].copy_from_slice(&self.attrs.child_number.to_bytes());
        bytes[13..45].copy_from_slice(&self.attrs.chain_code);
        bytes[45..78].copy_from_slice(&self.key_bytes);
        bytes
    }

    /// Deserialize from the canonical 78-byte layout, taking the prefix
    /// characters from the caller since the byte form only carries the
    /// version quad.
    pub fn from_bytes(prefix_chars: &str, bytes: &[u8; Self::BYTE_SIZE]) -> Result<Self> {
        Prefix::validate_str(prefix_chars)?;
        let version = Version::from_be_bytes(bytes[..4].try_into()?);
        let prefix = Prefix::from_parts_unchecked(prefix_chars, version);

        let attrs = ExtendedKeyAttrs {
            depth: bytes[4],
            parent_fingerprint: bytes[5..9].try_into()?,
            child_number: ChildNumber::from_bytes(bytes[9..13].try_into()?),
            chain_code: bytes[13..45].try_into()?,
        };

        Ok(ExtendedKey { prefix, attrs, key_bytes: bytes[45..78].try_into()? })
    }

    /// Write a Base58Check-encoded key into the provided buffer, returning
    /// a `&str` of the serialized data.
    ///
    /// This type also impls [`Display`], so an owned string is available
    /// via `to_string()`.
    pub fn write_base58<'a>(&self, buffer: &'a mut [u8; Self::MAX_BASE58_SIZE]) -> Result<&'a str> {
        let mut bytes = self.to_bytes();
        let base58_len = bs58::encode(&bytes).with_check().onto(buffer.as_mut())?;
        bytes.zeroize();

        Ok(str::from_utf8(&buffer[..base58_len])?)
    }
}

impl Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; Self::MAX_BASE58_SIZE];
        self.write_base58(&mut buf).map_err(|_| fmt::Error).and_then(|base58| f.write_str(base58))
    }
}

impl FromStr for ExtendedKey {
    type Err = Error;

    fn from_str(base58: &str) -> Result<Self> {
        let mut bytes = [0u8; Self::BYTE_SIZE + 4]; // with 4-byte checksum
        let decoded_len = bs58::decode(base58).with_check(None).onto(&mut bytes)?;

        if decoded_len != Self::BYTE_SIZE {
            bytes.zeroize();
            return Err(Error::DecodeLength(decoded_len, Self::BYTE_SIZE));
        }

        let prefix_chars = base58.get(..Prefix::LENGTH).ok_or(Error::Decode)?;
        let key = Self::from_bytes(prefix_chars, bytes[..Self::BYTE_SIZE].try_into()?);
        bytes.zeroize();
        key
    }
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        self.key_bytes.zeroize();
    }
}
