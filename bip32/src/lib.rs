//! Hierarchical deterministic key derivation over the BIP32/BIP44 family:
//! seed to master key, hardened and normal child derivation, derivation
//! path parsing and extended key serialization.
//!
//! The derivation engine is generic over the curve via the [`PrivateKey`]
//! and [`PublicKey`] traits; the secp256k1 implementation is provided.
//! All operations are pure and hold no shared state, so independent
//! derivations may run concurrently without locking.

mod private_key;
mod public_key;
mod xkey;
mod xprivate_key;
mod xpublic_key;

mod attrs;
mod child_number;
mod derivation_path;
mod error;
mod prefix;
mod result;
pub mod types;

pub use attrs::ExtendedKeyAttrs;
pub use child_number::ChildNumber;
pub use derivation_path::DerivationPath;
pub use error::Error;
pub use prefix::Prefix;
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use result::Result;
pub use types::*;
pub use xkey::ExtendedKey;
pub use xprivate_key::ExtendedPrivateKey;
pub use xpublic_key::ExtendedPublicKey;

pub use secp256k1;
pub use secp256k1::SecretKey;

/// Extended private key over secp256k1.
pub type XPrv = ExtendedPrivateKey<secp256k1::SecretKey>;

/// Extended public key over secp256k1.
pub type XPub = ExtendedPublicKey<secp256k1::PublicKey>;
