//! Extended public keys: watch-only derivation.

use crate::{
    types::*, ChildNumber, DerivationPath, Error, ExtendedKey, ExtendedKeyAttrs, ExtendedPrivateKey, Prefix, PrivateKey,
    PublicKey, Result,
};
use core::str::FromStr;
use hmac::Mac;

/// Extended public key: a node of the derivation tree holding only a public
/// point, able to derive the public halves of its normal children.
///
/// Generic around a [`PublicKey`] type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtendedPublicKey<K: PublicKey> {
    /// Derived public key.
    public_key: K,

    /// Extended key attributes.
    attrs: ExtendedKeyAttrs,
}

impl<K> ExtendedPublicKey<K>
where
    K: PublicKey,
{
    /// Obtain the non-extended public key value `K`.
    pub fn public_key(&self) -> &K {
        &self.public_key
    }

    /// Attributes of this key: depth, parent fingerprint, child number and
    /// chain code.
    pub fn attrs(&self) -> &ExtendedKeyAttrs {
        &self.attrs
    }

    /// Compute the 4-byte fingerprint of this key.
    pub fn fingerprint(&self) -> KeyFingerprint {
        self.public_key.fingerprint()
    }

    /// Derive the public half of a child key for a [`ChildNumber`].
    ///
    /// Only normal numbers can be derived here: a hardened child commits to
    /// the parent's private scalar, which this key does not have, so the
    /// request fails with [`Error::PublicDerivationOfHardenedIndex`] rather
    /// than producing anything.
    pub fn derive_child(&self, child_number: ChildNumber) -> Result<Self> {
        if child_number.is_hardened() {
            return Err(Error::PublicDerivationOfHardenedIndex);
        }

        let depth = self.attrs.depth.checked_add(1).ok_or(Error::DepthOverflow)?;

        let mut hmac = HmacSha512::new_from_slice(&self.attrs.chain_code)?;
        hmac.update(&self.public_key.to_bytes());
        hmac.update(&child_number.to_bytes());

        let result = hmac.finalize().into_bytes();
        let (child_key, chain_code) = result.split_at(KEY_SIZE);
        let public_key = self.public_key.derive_child(child_key.try_into()?)?;

        let attrs = ExtendedKeyAttrs {
            parent_fingerprint: self.public_key.fingerprint(),
            child_number,
            chain_code: chain_code.try_into()?,
            depth,
        };

        Ok(ExtendedPublicKey { public_key, attrs })
    }

    /// Derive a key at the given path below this one, stopping at the first
    /// failing step.
    pub fn derive_path(self, path: &DerivationPath) -> Result<Self> {
        path.iter().try_fold(self, |key, child_number| key.derive_child(child_number))
    }

    /// Serialize the raw public key as a byte array (SEC1 compressed).
    pub fn to_bytes(&self) -> PublicKeyBytes {
        self.public_key.to_bytes()
    }

    /// Serialize this key as an [`ExtendedKey`].
    pub fn to_extended_key(&self, prefix: Prefix) -> ExtendedKey {
        ExtendedKey { prefix, attrs: self.attrs.clone(), key_bytes: self.to_bytes() }
    }

    pub fn to_string(&self, prefix: Option<Prefix>) -> String {
        self.to_extended_key(prefix.unwrap_or(Prefix::XPUB)).to_string()
    }

    pub fn from_public_key(public_key: K, attrs: &ExtendedKeyAttrs) -> Self {
        ExtendedPublicKey { public_key, attrs: attrs.clone() }
    }
}

impl<K> From<&ExtendedPrivateKey<K>> for ExtendedPublicKey<K::PublicKey>
where
    K: PrivateKey,
{
    fn from(xprv: &ExtendedPrivateKey<K>) -> ExtendedPublicKey<K::PublicKey> {
        ExtendedPublicKey { public_key: xprv.private_key().public_key(), attrs: xprv.attrs().clone() }
    }
}

impl<K> FromStr for ExtendedPublicKey<K>
where
    K: PublicKey,
{
    type Err = Error;

    fn from_str(xpub: &str) -> Result<Self> {
        ExtendedKey::from_str(xpub)?.try_into()
    }
}

impl<K> TryFrom<ExtendedKey> for ExtendedPublicKey<K>
where
    K: PublicKey,
{
    type Error = Error;

    fn try_from(extended_key: ExtendedKey) -> Result<ExtendedPublicKey<K>> {
        if extended_key.prefix.is_public() {
            Ok(ExtendedPublicKey { public_key: K::from_bytes(extended_key.key_bytes)?, attrs: extended_key.attrs.clone() })
        } else {
            Err(Error::Decode)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExtendedPublicKey;
    use crate::{ChildNumber, Error, ExtendedPrivateKey, Prefix};
    use faster_hex::hex_decode_fallback;
    use secp256k1::SecretKey;

    type XPrv = ExtendedPrivateKey<SecretKey>;
    type XPub = ExtendedPublicKey<secp256k1::PublicKey>;

    macro_rules! hex {
        ($str: literal) => {{
            let len = $str.as_bytes().len() / 2;
            let mut dst = vec![0; len];
            dst.resize(len, 0);
            hex_decode_fallback($str.as_bytes(), &mut dst);
            dst
        }
        [..]};
    }

    fn vector1_master() -> XPrv {
        XPrv::new(hex!("000102030405060708090a0b0c0d0e0f").to_vec()).unwrap()
    }

    #[test]
    fn master_xpub_vector_1() {
        let master = vector1_master().public_key();
        assert_eq!(
            master.to_string(None),
            "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhe\
             PY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8"
        );
    }

    #[test]
    fn watch_only_matches_private_derivation() {
        let master = vector1_master();
        let path = "m/0/1/2".parse().unwrap();

        let via_private = master.clone().derive_path(&path).unwrap().public_key();
        let via_public = master.public_key().derive_path(&path).unwrap();

        assert_eq!(via_private.public_key(), via_public.public_key());
        assert_eq!(via_private.attrs(), via_public.attrs());
    }

    #[test]
    fn hardened_derivation_requires_private_key() {
        let xpub = vector1_master().public_key();
        assert!(matches!(
            xpub.derive_child(ChildNumber::new(0, true).unwrap()),
            Err(Error::PublicDerivationOfHardenedIndex)
        ));
    }

    #[test]
    fn xpub_round_trip() {
        let xpub = vector1_master().derive_path(&"m/0/3".parse().unwrap()).unwrap().public_key();
        let encoded = xpub.to_string(Some(Prefix::XPUB));

        let decoded: XPub = encoded.parse().unwrap();
        assert_eq!(decoded, xpub);
    }

    #[test]
    fn parse_rejects_private_prefix() {
        let master = vector1_master();
        let encoded = master.to_string(Prefix::XPRV);
        assert!(encoded.parse::<XPub>().is_err());
    }
}
