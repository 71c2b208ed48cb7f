//! Error type.

use thiserror::Error;

/// Error type.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Base58check encode/decode failure.
    #[error("base58 error")]
    Base58,

    /// Private scalar outside `[1, n-1]`.
    #[error("private scalar is not in the range [1, n-1]")]
    InvalidScalar,

    /// Seed hashed to a zero or out-of-range master scalar. The caller must
    /// supply a different seed; there is no alternative interpretation of
    /// this one.
    #[error("seed produces an invalid master key")]
    InvalidMasterKey,

    /// Hardened derivation requested from a key without a private scalar.
    #[error("hardened derivation requires the parent private key")]
    PublicDerivationOfHardenedIndex,

    /// The key at this child index does not exist (out-of-range tweak or a
    /// zero/infinity result). The caller decides whether to retry at the
    /// next index; retrying here would diverge from the derivation standard.
    #[error("derivation at this child index yields an invalid key")]
    InvalidChildIndex,

    /// Parent is already at the maximum derivation depth.
    #[error("maximum derivation depth exceeded")]
    DepthOverflow,

    /// Derivation path string rejected by the parser.
    #[error("malformed derivation path: {0}")]
    MalformedPath(String),

    /// Child number outside the 31-bit index space.
    #[error("invalid child number")]
    ChildNumber,

    /// Seed length outside 16..=64 bytes.
    #[error("seed length invalid")]
    SeedLength,

    /// Serialized extended key had the wrong byte length.
    #[error("decoded {0} bytes, expected {1}")]
    DecodeLength(usize, usize),

    /// Decoding failure not related to Base58.
    #[error("decoding error")]
    Decode,

    /// Curve backend failure.
    #[error(transparent)]
    Crypto(#[from] secp256k1::Error),

    /// MAC keying failure.
    #[error("hmac keying error")]
    Hmac,

    /// Invalid UTF-8 while rendering Base58.
    #[error(transparent)]
    Utf8(#[from] core::str::Utf8Error),
}

impl From<hmac::digest::InvalidLength> for Error {
    fn from(_: hmac::digest::InvalidLength) -> Error {
        Error::Hmac
    }
}

impl From<bs58::decode::Error> for Error {
    fn from(_: bs58::decode::Error) -> Error {
        Error::Base58
    }
}

impl From<bs58::encode::Error> for Error {
    fn from(_: bs58::encode::Error) -> Error {
        Error::Base58
    }
}

impl From<core::array::TryFromSliceError> for Error {
    fn from(_: core::array::TryFromSliceError) -> Error {
        Error::Decode
    }
}
