//! Pay-to-witness-pubkey-hash addresses: bech32 encoding of a version-0
//! witness program.

use crate::Network;

const CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Checksum generator coefficients.
const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

fn polymod<'data, I>(values: I) -> u32
where
    I: Iterator<Item = &'data u8>,
{
    let mut chk: u32 = 1;
    for v in values {
        let b = chk >> 25;
        chk = ((chk & 0x01ffffff) << 5) ^ (*v as u32);

        for (i, coefficient) in GENERATOR.iter().enumerate() {
            if (b >> i) & 1 != 0 {
                chk ^= coefficient;
            }
        }
    }
    chk
}

/// The human-readable part enters the checksum expanded into its character
/// high bits, a zero separator, then the low bits.
fn hrp_expand(hrp: &[u8]) -> Vec<u8> {
    hrp.iter()
        .map(|b| b >> 5)
        .chain(std::iter::once(0))
        .chain(hrp.iter().map(|b| b & 0x1f))
        .collect()
}

fn checksum(hrp: &[u8], payload: &[u8]) -> [u8; 6] {
    let values: Vec<u8> =
        hrp_expand(hrp).into_iter().chain(payload.iter().copied()).chain([0u8; 6]).collect();
    let residue = polymod(values.iter()) ^ 1;

    let mut out = [0u8; 6];
    for (i, symbol) in out.iter_mut().enumerate() {
        *symbol = ((residue >> (5 * (5 - i))) & 0x1f) as u8;
    }
    out
}

/// Convert an 8-bit array to a 5-bit array with right padding.
fn conv8to5(payload: &[u8]) -> Vec<u8> {
    let mut fivebit = Vec::with_capacity(payload.len() * 8 / 5 + 1);
    let mut acc: u32 = 0;
    let mut bits = 0u32;

    for b in payload {
        acc = (acc << 8) | *b as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            fivebit.push(((acc >> bits) & 0x1f) as u8);
        }
    }

    if bits > 0 {
        fivebit.push(((acc << (5 - bits)) & 0x1f) as u8);
    }

    fivebit
}

pub(crate) fn encode(network: Network, program: &[u8]) -> String {
    let hrp: &[u8] = match network {
        Network::Mainnet => b"bc",
        Network::Testnet => b"tb",
    };

    // Witness version 0, then the regrouped program
    let mut payload = vec![0u8];
    payload.extend(conv8to5(program));

    let checksum = checksum(hrp, &payload);

    let mut address = String::with_capacity(hrp.len() + 1 + payload.len() + checksum.len());
    address.push_str(std::str::from_utf8(hrp).expect("hrp is ASCII"));
    address.push('1');
    for symbol in payload.iter().chain(&checksum) {
        address.push(CHARSET[*symbol as usize] as char);
    }

    address
}
