//! Placeholder message cipher.
//!
//! Stands in for AES-128 with an interface-compatible XOR stream keyed by
//! HMAC-SHA256. Not a security-grade cipher; the surrounding components
//! depend only on its shape: a 16-byte IV prefix followed by the masked
//! message bytes, and a packing of the whole ciphertext into an integer
//! amount.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// IV length carried in front of the masked bytes. The XOR stream does not
/// consume it; it exists so the ciphertext layout matches a block cipher's.
const IV_LEN: usize = 16;

/// Mask a message with a keystream derived from `key`.
///
/// Layout: `iv[16] || message ^ keystream`, keystream repeating as needed.
pub fn encrypt_aes128(message: &str, key: &[u8]) -> Vec<u8> {
    let keystream = derive_keystream(key);

    let mut iv = [0u8; IV_LEN];
    rand::rngs::OsRng.fill_bytes(&mut iv);

    let mut out = Vec::with_capacity(IV_LEN + message.len());
    out.extend_from_slice(&iv);
    out.extend(
        message
            .as_bytes()
            .iter()
            .enumerate()
            .map(|(i, b)| b ^ keystream[i % keystream.len()]),
    );
    out
}

/// Invert [`encrypt_aes128`]. Bytes that do not form valid UTF-8 after
/// unmasking are replaced, mirroring a lossy text decode.
pub fn decrypt_aes128(encrypted: &[u8], key: &[u8]) -> String {
    let keystream = derive_keystream(key);
    let ciphertext = encrypted.get(IV_LEN..).unwrap_or(&[]);

    let plain: Vec<u8> = ciphertext
        .iter()
        .enumerate()
        .map(|(i, b)| b ^ keystream[i % keystream.len()])
        .collect();

    String::from_utf8_lossy(&plain).into_owned()
}

/// Pack ciphertext bytes big-endian into an integer amount.
///
/// The amount is a u128, so at most 16 bytes of ciphertext fit; longer inputs
/// return `None`.
pub fn encode_message_as_amount(encrypted: &[u8]) -> Option<u128> {
    if encrypted.len() > 16 {
        return None;
    }
    let mut amount: u128 = 0;
    for &b in encrypted {
        amount = (amount << 8) | u128::from(b);
    }
    Some(amount)
}

/// Unpack an amount into `expected_len` big-endian bytes.
pub fn decode_amount_as_message(amount: u128, expected_len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; expected_len];
    let mut rest = amount;
    for slot in bytes.iter_mut().rev() {
        *slot = (rest & 0xff) as u8;
        rest >>= 8;
    }
    bytes
}

fn derive_keystream(key: &[u8]) -> [u8; 32] {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(&[0x01]);
    mac.finalize().into_bytes().into()
}
