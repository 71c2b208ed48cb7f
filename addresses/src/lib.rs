//! Coin-specific address encoding for derived public keys.
//!
//! Every codec is a pure function from public key bytes (plus the network
//! tag) to an address string; dispatch is over the explicit [`Coin`]
//! enumeration, and nothing here holds shared state.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};
use thiserror::Error;

mod ethereum;
mod p2pkh;
mod segwit;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum AddressError {
    #[error("invalid public key")]
    InvalidPublicKey,
}

/// Which network an address belongs to; selects version bytes and
/// human-readable prefixes.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum Network {
    #[serde(rename = "mainnet")]
    Mainnet,
    #[serde(rename = "testnet")]
    Testnet,
}

/// Coin/format pair an address is encoded for.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum Coin {
    /// Keccak-256 account address with EIP-55 checksum casing.
    #[serde(rename = "ethereum")]
    Ethereum,
    /// Pay-to-pubkey-hash, Base58Check with a network version byte.
    #[serde(rename = "bitcoin-p2pkh")]
    BitcoinP2pkh,
    /// Pay-to-witness-pubkey-hash, bech32 with witness version 0.
    #[serde(rename = "bitcoin-p2wpkh")]
    BitcoinP2wpkh,
}

impl Coin {
    /// Length of the canonical payload for this coin.
    pub fn payload_len(&self) -> usize {
        // All three formats hash the public key down to 20 bytes.
        20
    }
}

/// Size of the payload vector of an address.
pub const PAYLOAD_VECTOR_SIZE: usize = 20;

/// Used as the underlying type for address payload.
pub type PayloadVec = SmallVec<[u8; PAYLOAD_VECTOR_SIZE]>;

/// An address: the canonical byte payload (the hashed public key) plus the
/// coin and network tags needed to render the final string form.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug, Hash)]
pub struct Address {
    pub coin: Coin,
    pub network: Network,
    pub payload: PayloadVec,
}

impl Address {
    pub fn new(coin: Coin, network: Network, payload: &[u8]) -> Self {
        assert_eq!(payload.len(), coin.payload_len());
        Self { coin, network, payload: PayloadVec::from_slice(payload) }
    }

    /// Encode an address for a parsed public key.
    pub fn from_public_key(coin: Coin, network: Network, public_key: &secp256k1::PublicKey) -> Self {
        let payload = match coin {
            Coin::Ethereum => ethereum::payload(public_key),
            Coin::BitcoinP2pkh | Coin::BitcoinP2wpkh => p2pkh::hash160(&public_key.serialize()),
        };
        Self::new(coin, network, &payload)
    }

    /// Encode an address for an SEC1 compressed public key.
    pub fn from_compressed_public_key(coin: Coin, network: Network, bytes: &[u8; 33]) -> Result<Self, AddressError> {
        let public_key = secp256k1::PublicKey::from_slice(bytes).map_err(|_| AddressError::InvalidPublicKey)?;
        Ok(Self::from_public_key(coin, network, &public_key))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let encoded = match self.coin {
            Coin::Ethereum => ethereum::encode(&self.payload),
            Coin::BitcoinP2pkh => p2pkh::encode(self.network, &self.payload),
            Coin::BitcoinP2wpkh => segwit::encode(self.network, &self.payload),
        };
        f.write_str(&encoded)
    }
}
