//! Extended private keys: the derivation engine.

use hmac::Mac;
use std::fmt::{self, Debug};
use std::str::FromStr;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, Zeroizing};

use crate::{
    types::*, ChildNumber, DerivationPath, Error, ExtendedKey, ExtendedKeyAttrs, ExtendedPublicKey, Prefix, PrivateKey,
    PublicKey, Result,
};

/// Domain separation key for hashing a seed into a master key.
const MASTER_KEY_DOMAIN: &[u8] = b"Bitcoin seed";

/// Extended private key: a node of the derivation tree holding a private
/// scalar and the attributes needed to derive its children.
///
/// Generic around a [`PrivateKey`] type. Instances are immutable value
/// objects; deriving a child never touches the parent.
#[derive(Clone)]
pub struct ExtendedPrivateKey<K: PrivateKey> {
    /// Derived private key.
    private_key: K,

    /// Extended key attributes.
    attrs: ExtendedKeyAttrs,
}

impl<K> ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    /// Maximum derivation depth.
    pub const MAX_DEPTH: Depth = u8::MAX;

    /// Create the root extended key for the given seed value.
    ///
    /// The seed hash is split into the master scalar (left half) and the
    /// master chain code (right half). A zero or out-of-range scalar means
    /// this seed has no master key; the caller must supply a different one,
    /// since reinterpreting the seed would produce keys no other
    /// implementation of the derivation scheme could reproduce.
    pub fn new<S>(seed: S) -> Result<Self>
    where
        S: AsRef<[u8]>,
    {
        if !(16..=64).contains(&seed.as_ref().len()) {
            return Err(Error::SeedLength);
        }

        let mut hmac = HmacSha512::new_from_slice(MASTER_KEY_DOMAIN)?;
        hmac.update(seed.as_ref());

        let result = hmac.finalize().into_bytes();
        let (secret_key, chain_code) = result.split_at(KEY_SIZE);
        let private_key = K::from_bytes(secret_key.try_into()?).map_err(|_| Error::InvalidMasterKey)?;
        let attrs = ExtendedKeyAttrs {
            depth: 0,
            parent_fingerprint: KeyFingerprint::default(),
            child_number: ChildNumber::default(),
            chain_code: chain_code.try_into()?,
        };

        Ok(ExtendedPrivateKey { private_key, attrs })
    }

    /// Derive a child key for a particular [`ChildNumber`].
    ///
    /// Hardened numbers commit the MAC to the parent scalar, normal numbers
    /// to the parent public point. A child index whose intermediate value
    /// falls outside the scalar field, or whose child scalar is zero, fails
    /// with [`Error::InvalidChildIndex`]; whether to continue with the next
    /// index is the caller's call.
    pub fn derive_child(&self, child_number: ChildNumber) -> Result<Self> {
        let depth = self.attrs.depth.checked_add(1).ok_or(Error::DepthOverflow)?;

        let mut hmac = HmacSha512::new_from_slice(&self.attrs.chain_code)?;

        if child_number.is_hardened() {
            hmac.update(&[0]);
            hmac.update(&self.private_key.to_bytes());
        } else {
            hmac.update(&self.private_key.public_key_bytes());
        }

        hmac.update(&child_number.to_bytes());

        let result = hmac.finalize().into_bytes();
        let (child_key, chain_code) = result.split_at(KEY_SIZE);
        let private_key = self.private_key.derive_child(child_key.try_into()?)?;

        let attrs = ExtendedKeyAttrs {
            parent_fingerprint: self.private_key.public_key().fingerprint(),
            child_number,
            chain_code: chain_code.try_into()?,
            depth,
        };

        Ok(ExtendedPrivateKey { private_key, attrs })
    }

    /// Derive a key at the given path below this one, stopping at the first
    /// failing step.
    pub fn derive_path(self, path: &DerivationPath) -> Result<Self> {
        path.iter().try_fold(self, |key, child_number| key.derive_child(child_number))
    }

    /// Borrow the derived private key value.
    pub fn private_key(&self) -> &K {
        &self.private_key
    }

    /// The extended public key matching this node (watch-only view).
    pub fn public_key(&self) -> ExtendedPublicKey<K::PublicKey> {
        self.into()
    }

    /// Attributes of this key: depth, parent fingerprint, child number and
    /// chain code.
    pub fn attrs(&self) -> &ExtendedKeyAttrs {
        &self.attrs
    }

    /// Serialize the raw private key as a byte array.
    pub fn to_bytes(&self) -> PrivateKeyBytes {
        self.private_key.to_bytes()
    }

    /// Serialize this key as an [`ExtendedKey`].
    pub fn to_extended_key(&self, prefix: Prefix) -> ExtendedKey {
        // Key material starts with a `0` marker byte
        let mut key_bytes = [0u8; KEY_SIZE + 1];
        key_bytes[1..].copy_from_slice(&self.to_bytes());

        ExtendedKey { prefix, attrs: self.attrs.clone(), key_bytes }
    }

    pub fn to_string(&self, prefix: Prefix) -> Zeroizing<String> {
        Zeroizing::new(self.to_extended_key(prefix).to_string())
    }
}

impl<K> ConstantTimeEq for ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut key_a = self.to_bytes();
        let mut key_b = other.to_bytes();

        let result = key_a.ct_eq(&key_b)
            & self.attrs.depth.ct_eq(&other.attrs.depth)
            & self.attrs.parent_fingerprint.ct_eq(&other.attrs.parent_fingerprint)
            & self.attrs.child_number.0.ct_eq(&other.attrs.child_number.0)
            & self.attrs.chain_code.ct_eq(&other.attrs.chain_code);

        key_a.zeroize();
        key_b.zeroize();

        result
    }
}

/// NOTE: uses [`ConstantTimeEq`] internally
impl<K> Eq for ExtendedPrivateKey<K> where K: PrivateKey {}

/// NOTE: uses [`ConstantTimeEq`] internally
impl<K> PartialEq for ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<K> Debug for ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPrivateKey").field("private_key", &"...").field("attrs", &self.attrs).finish()
    }
}

impl<K> FromStr for ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    type Err = Error;

    fn from_str(xprv: &str) -> Result<Self> {
        let key = ExtendedKey::from_str(xprv)?;
        key.try_into()
    }
}

impl<K> TryFrom<ExtendedKey> for ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    type Error = Error;

    fn try_from(extended_key: ExtendedKey) -> Result<ExtendedPrivateKey<K>> {
        if extended_key.prefix.is_private() && extended_key.key_bytes[0] == 0 {
            Ok(ExtendedPrivateKey {
                private_key: K::from_bytes(extended_key.key_bytes[1..].try_into()?)?,
                attrs: extended_key.attrs.clone(),
            })
        } else {
            Err(Error::Decode)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExtendedPrivateKey;
    use crate::{ChildNumber, Error, Prefix};
    use faster_hex::hex_decode_fallback;
    use secp256k1::SecretKey;

    type XPrv = ExtendedPrivateKey<SecretKey>;

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

    /// Master key from the derivation test vector 1 seed.
    fn vector1_master() -> XPrv {
        XPrv::new(hex!("000102030405060708090a0b0c0d0e0f").to_vec()).unwrap()
    }

    #[test]
    fn master_from_seed_vector_1() {
        let master = vector1_master();
        assert_eq!(master.attrs().depth, 0);
        assert_eq!(master.attrs().parent_fingerprint, [0u8; 4]);
        assert_eq!(master.attrs().child_number, ChildNumber::default());
        assert_eq!(master.attrs().chain_code, hex!("873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"));
        assert_eq!(master.to_bytes(), hex!("e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"));
        assert_eq!(
            master.to_string(Prefix::XPRV).as_str(),
            "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPP\
             qjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi"
        );
    }

    #[test]
    fn master_from_seed_is_deterministic() {
        let a = vector1_master();
        let b = vector1_master();
        assert_eq!(a, b);
        assert_eq!(a.to_extended_key(Prefix::XPRV).to_bytes(), b.to_extended_key(Prefix::XPRV).to_bytes());
    }

    #[test]
    fn seed_length_gate() {
        assert!(matches!(XPrv::new([0u8; 15]), Err(Error::SeedLength)));
        assert!(matches!(XPrv::new([0u8; 65]), Err(Error::SeedLength)));
        assert!(XPrv::new([0u8; 16]).is_ok());
        assert!(XPrv::new([0u8; 64]).is_ok());
    }

    #[test]
    fn hardened_child_vector_1() {
        let child = vector1_master().derive_child(ChildNumber::new(0, true).unwrap()).unwrap();
        assert_eq!(child.attrs().depth, 1);
        assert_eq!(child.attrs().child_number, ChildNumber(0x80000000));
        assert_eq!(child.attrs().chain_code, hex!("47fdacbd0f1097043b78c63c20c34ef4ed9a111d980047ad16282c7ae6236141"));
        assert_eq!(child.to_bytes(), hex!("edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea"));
    }

    #[test]
    fn path_walk_vector_1() {
        let leaf = vector1_master().derive_path(&"m/0'/1".parse().unwrap()).unwrap();
        assert_eq!(leaf.attrs().depth, 2);
        assert_eq!(leaf.attrs().child_number, ChildNumber(1));
        assert_eq!(leaf.attrs().chain_code, hex!("2a7857631386ba23dacac34180dd1983734e444fdbf774041578e9b6adb37c19"));
        assert_eq!(leaf.to_bytes(), hex!("3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368"));
    }

    #[test]
    fn derivation_stops_at_max_depth() {
        let mut extended_key = vector1_master().to_extended_key(Prefix::XPRV);
        extended_key.attrs.depth = XPrv::MAX_DEPTH;

        let exhausted = XPrv::try_from(extended_key).unwrap();
        assert!(matches!(
            exhausted.derive_child(ChildNumber::new(0, false).unwrap()),
            Err(Error::DepthOverflow)
        ));
    }

    #[test]
    fn extended_key_round_trip() {
        let child = vector1_master().derive_path(&"m/44'/60'/0'/0/0".parse().unwrap()).unwrap();
        let encoded = child.to_string(Prefix::XPRV);

        let decoded: XPrv = encoded.parse().unwrap();
        assert_eq!(decoded, child);
        assert_eq!(decoded.attrs(), child.attrs());
    }

    #[test]
    fn parse_rejects_public_prefix() {
        let master = vector1_master();
        let mut extended_key = master.to_extended_key(Prefix::XPRV);
        extended_key.prefix = Prefix::XPUB;

        assert!(XPrv::try_from(extended_key).is_err());
    }

    #[test]
    fn hardened_and_normal_children_differ() {
        let master = vector1_master();
        let hardened = master.derive_child(ChildNumber::new(7, true).unwrap()).unwrap();
        let normal = master.derive_child(ChildNumber::new(7, false).unwrap()).unwrap();
        assert_ne!(hardened.to_bytes(), normal.to_bytes());
        assert_ne!(hardened.attrs().chain_code, normal.attrs().chain_code);
    }

    #[test]
    fn random_seeds_derive_consistently() {
        use rand::RngCore;

        let mut rng = rand::thread_rng();
        for _ in 0..8 {
            let mut seed = [0u8; 32];
            rng.fill_bytes(&mut seed);

            let a = XPrv::new(seed).unwrap().derive_path(&"m/44'/0'/0'/0/0".parse().unwrap()).unwrap();
            let b = XPrv::new(seed).unwrap().derive_path(&"m/44'/0'/0'/0/0".parse().unwrap()).unwrap();
            assert_eq!(a, b);
        }
    }
}
