//! Pay-to-pubkey-hash addresses: HASH160 of the compressed public key,
//! Base58Check-encoded behind a network version byte.

use crate::Network;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// `RIPEMD160(SHA256(bytes))`, the canonical 20-byte key hash.
pub(crate) fn hash160(bytes: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(bytes)).into()
}

fn version_byte(network: Network) -> u8 {
    match network {
        Network::Mainnet => 0x00,
        Network::Testnet => 0x6f,
    }
}

pub(crate) fn encode(network: Network, payload: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(1 + payload.len());
    bytes.push(version_byte(network));
    bytes.extend_from_slice(payload);

    bs58::encode(bytes).with_check().into_string()
}
