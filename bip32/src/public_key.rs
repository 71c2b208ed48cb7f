//! Public point operations behind watch-only derivation.

use crate::{
    types::{KeyFingerprint, PrivateKeyBytes, PublicKeyBytes},
    Error, Result,
};
use ripemd::Ripemd160;
use secp256k1::{Scalar, SECP256K1};
use sha2::{Digest, Sha256};

/// A curve point serving as a public key, able to derive its child points
/// without access to any private scalar.
pub trait PublicKey: Sized + Clone {
    /// Parse a SEC1 compressed point.
    fn from_bytes(bytes: PublicKeyBytes) -> Result<Self>;

    /// Serialize the point in SEC1 compressed form.
    fn to_bytes(&self) -> PublicKeyBytes;

    /// Child point: `self + tweak * G`. Fails with
    /// [`Error::InvalidChildIndex`] when `tweak >= n` or the sum is the
    /// point at infinity.
    fn derive_child(&self, tweak: PrivateKeyBytes) -> Result<Self>;

    /// Four-byte fingerprint identifying this key to its children:
    /// `RIPEMD160(SHA256(compressed point))[..4]`.
    fn fingerprint(&self) -> KeyFingerprint {
        let digest = Ripemd160::digest(Sha256::digest(self.to_bytes()));
        digest[..4].try_into().expect("digest truncated")
    }
}

impl PublicKey for secp256k1::PublicKey {
    fn from_bytes(bytes: PublicKeyBytes) -> Result<Self> {
        Ok(secp256k1::PublicKey::from_slice(&bytes)?)
    }

    fn to_bytes(&self) -> PublicKeyBytes {
        self.serialize()
    }

    fn derive_child(&self, tweak: PrivateKeyBytes) -> Result<Self> {
        let tweak = Scalar::from_be_bytes(tweak).map_err(|_| Error::InvalidChildIndex)?;
        self.add_exp_tweak(SECP256K1, &tweak).map_err(|_| Error::InvalidChildIndex)
    }
}
