//! Private scalar operations behind the derivation engine.

use crate::{
    types::{PrivateKeyBytes, PublicKeyBytes},
    Error, PublicKey, Result,
};
use secp256k1::Scalar;

/// A private scalar on some curve, able to derive its child scalars.
///
/// Implementations perform all arithmetic modulo the curve order and are
/// pure: no shared mutable state, safe for concurrent use.
pub trait PrivateKey: Sized {
    /// Public key (curve point) type corresponding to this private key.
    type PublicKey: PublicKey;

    /// Parse a raw scalar. Values outside `[1, n-1]` fail with
    /// [`Error::InvalidScalar`].
    fn from_bytes(bytes: &PrivateKeyBytes) -> Result<Self>;

    /// Serialize the raw scalar as a byte array.
    fn to_bytes(&self) -> PrivateKeyBytes;

    /// Child scalar: `(tweak + self) mod n`. Fails with
    /// [`Error::InvalidChildIndex`] when `tweak >= n` or the sum is zero;
    /// the caller owns the decision to move to the next index.
    fn derive_child(&self, tweak: PrivateKeyBytes) -> Result<Self>;

    /// The public point `self * G`.
    fn public_key(&self) -> Self::PublicKey;

    /// Serialize the public point in SEC1 compressed form.
    fn public_key_bytes(&self) -> PublicKeyBytes {
        self.public_key().to_bytes()
    }
}

impl PrivateKey for secp256k1::SecretKey {
    type PublicKey = secp256k1::PublicKey;

    fn from_bytes(bytes: &PrivateKeyBytes) -> Result<Self> {
        secp256k1::SecretKey::from_slice(bytes).map_err(|_| Error::InvalidScalar)
    }

    fn to_bytes(&self) -> PrivateKeyBytes {
        self.secret_bytes()
    }

    fn derive_child(&self, tweak: PrivateKeyBytes) -> Result<Self> {
        let tweak = Scalar::from_be_bytes(tweak).map_err(|_| Error::InvalidChildIndex)?;
        self.add_tweak(&tweak).map_err(|_| Error::InvalidChildIndex)
    }

    fn public_key(&self) -> Self::PublicKey {
        secp256k1::PublicKey::from_secret_key_global(self)
    }
}

#[cfg(test)]
mod tests {
    use super::PrivateKey;
    use crate::Error;
    use secp256k1::SecretKey;

    /// secp256k1 group order, big endian.
    const ORDER: [u8; 32] = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xba, 0xae,
        0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
    ];

    #[test]
    fn rejects_zero_scalar() {
        assert!(matches!(
            <SecretKey as PrivateKey>::from_bytes(&[0u8; 32]),
            Err(Error::InvalidScalar)
        ));
    }

    #[test]
    fn rejects_scalar_at_order() {
        assert!(matches!(<SecretKey as PrivateKey>::from_bytes(&ORDER), Err(Error::InvalidScalar)));
    }

    #[test]
    fn child_tweak_at_order_is_invalid_index() {
        let key = <SecretKey as PrivateKey>::from_bytes(&[1u8; 32]).unwrap();
        assert!(matches!(key.derive_child(ORDER), Err(Error::InvalidChildIndex)));
    }

    #[test]
    fn child_tweak_to_zero_is_invalid_index() {
        // tweak = n - k makes the child scalar (k + tweak) mod n == 0
        let key = <SecretKey as PrivateKey>::from_bytes(&{
            let mut one = [0u8; 32];
            one[31] = 1;
            one
        })
        .unwrap();

        let mut negated = ORDER;
        negated[31] -= 1; // n - 1
        assert!(matches!(key.derive_child(negated), Err(Error::InvalidChildIndex)));
    }

    #[test]
    fn scalar_addition_mod_order() {
        let one = {
            let mut b = [0u8; 32];
            b[31] = 1;
            b
        };
        let two = {
            let mut b = [0u8; 32];
            b[31] = 2;
            b
        };
        let three = {
            let mut b = [0u8; 32];
            b[31] = 3;
            b
        };

        let key = <SecretKey as PrivateKey>::from_bytes(&one).unwrap();
        let child = key.derive_child(two).unwrap();
        assert_eq!(child.to_bytes(), three);
    }
}
