//! Hex encoding conventions for keys, secrets and addresses.
//!
//! Byte strings cross component boundaries as lowercase hex with a `0x`
//! prefix, two digits per byte.

use crate::error::CoreError;

/// Encode bytes as `0x`-prefixed lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode a hex string, with or without a `0x` prefix.
pub fn from_hex(input: &str) -> Result<Vec<u8>, CoreError> {
    let stripped = input.strip_prefix("0x").unwrap_or(input);
    Ok(hex::decode(stripped)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let bytes = [0x00, 0x1f, 0xab, 0xff];
        let encoded = to_hex(&bytes);
        assert_eq!(encoded, "0x001fabff");
        assert_eq!(from_hex(&encoded).unwrap(), bytes);
        assert_eq!(from_hex("001fabff").unwrap(), bytes);
    }

    #[test]
    fn rejects_garbage() {
        assert!(from_hex("0xzz").is_err());
    }
}
