//! Ethereum account addresses: Keccak-256 of the uncompressed public point,
//! rendered with EIP-55 checksum casing.

use sha3::{Digest, Keccak256};

/// The canonical 20-byte account payload: the tail of the Keccak-256 hash
/// of the uncompressed point, SEC1 tag byte excluded.
pub(crate) fn payload(public_key: &secp256k1::PublicKey) -> [u8; 20] {
    let uncompressed = public_key.serialize_uncompressed();
    let digest = Keccak256::digest(&uncompressed[1..]);

    let mut payload = [0u8; 20];
    payload.copy_from_slice(&digest[12..]);
    payload
}

/// Render the payload as a `0x`-prefixed hex string with EIP-55 mixed-case
/// checksum: a hex letter is uppercased when the corresponding nibble of
/// the Keccak-256 hash of the lowercase hex form is >= 8.
pub(crate) fn encode(payload: &[u8]) -> String {
    let mut hex = faster_hex::hex_string(payload).into_bytes();
    let digest = Keccak256::digest(&hex);

    for (i, c) in hex.iter_mut().enumerate() {
        let nibble = if i % 2 == 0 { digest[i / 2] >> 4 } else { digest[i / 2] & 0x0f };
        if nibble >= 8 {
            c.make_ascii_uppercase();
        }
    }

    format!("0x{}", String::from_utf8(hex).expect("hex is ASCII"))
}
