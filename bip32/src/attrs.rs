use crate::{ChainCode, ChildNumber, Depth, KeyFingerprint};
use borsh::{BorshDeserialize, BorshSerialize};

/// Positional metadata shared by private and public extended keys: where a
/// key sits in the hierarchy and the chain code extending it.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, BorshSerialize, BorshDeserialize)]
pub struct ExtendedKeyAttrs {
    /// Depth in the key derivation hierarchy; 0 for the master key.
    pub depth: Depth,

    /// Fingerprint of the immediate parent; zero for the master key.
    pub parent_fingerprint: KeyFingerprint,

    /// Child number this key was derived with; zero for the master key.
    pub child_number: ChildNumber,

    /// Chain code.
    pub chain_code: ChainCode,
}
