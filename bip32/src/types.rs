//! Type aliases shared across the crate.

use hmac::Hmac;
use sha2::Sha512;

/// HMAC with SHA-512, the derivation MAC.
pub type HmacSha512 = Hmac<Sha512>;

/// Bytes in a key material field (private scalar or chain code).
pub const KEY_SIZE: usize = 32;

/// Derivation depth.
pub type Depth = u8;

/// Chain code: extension entropy for derived keys.
pub type ChainCode = [u8; KEY_SIZE];

/// Key fingerprint: the first four bytes of `RIPEMD160(SHA256(public key))`.
pub type KeyFingerprint = [u8; 4];

/// Serialized private scalar.
pub type PrivateKeyBytes = [u8; KEY_SIZE];

/// Serialized compressed (SEC1) curve point.
pub type PublicKeyBytes = [u8; KEY_SIZE + 1];

/// Serialized extended key version quad (e.g. the bytes behind `xprv`).
pub type Version = u32;
