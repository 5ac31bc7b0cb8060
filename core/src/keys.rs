//! Key-pair generation and address derivation on secp256k1.
//!
//! A key pair is a 32-byte scalar, the 65-byte uncompressed public point it
//! generates, and the address derived from that point. Addresses are the last
//! 20 bytes of the SHA-256 digest of the public key without its 0x04 prefix,
//! rendered as `0x`-prefixed hex.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::encoding::to_hex;
use crate::error::CoreError;

/// Length of an uncompressed SEC1 public key.
pub const PUBLIC_KEY_LEN: usize = 65;

// ============================================================================
// Zeroizing Secret Wrapper
// ============================================================================

/// 32 bytes of secret key material, zeroized on drop.
#[derive(Clone)]
pub struct SecretBytes {
    bytes: [u8; 32],
}

impl SecretBytes {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Get the raw bytes (use carefully)
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Render as `0x`-prefixed hex for export or display.
    pub fn to_hex(&self) -> String {
        to_hex(&self.bytes)
    }
}

impl Drop for SecretBytes {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretBytes([REDACTED])")
    }
}

// ============================================================================
// Key Pairs
// ============================================================================

/// A secp256k1 key pair with its derived address.
///
/// `public_key = G * private_key`; the address is a function of the public
/// key only. Never transmitted; owned by the party that generated it.
pub struct KeyPair {
    private_key: SecretBytes,
    pub public_key: [u8; PUBLIC_KEY_LEN],
    pub address: String,
}

impl KeyPair {
    /// Generate a fresh key pair from OS entropy.
    pub fn generate() -> Self {
        let secret = SecretKey::random(&mut OsRng);
        Self::from_secret(secret)
    }

    /// Deterministic variant: build the key pair for a known scalar.
    ///
    /// Fails with [`CoreError::InvalidScalar`] if the bytes are zero or not
    /// below the curve order.
    pub fn from_private_key(bytes: &[u8; 32]) -> Result<Self, CoreError> {
        let field = k256::FieldBytes::from(*bytes);
        let secret = SecretKey::from_bytes(&field).map_err(|_| CoreError::InvalidScalar)?;
        Ok(Self::from_secret(secret))
    }

    /// Derive a key pair deterministically from arbitrary seed bytes.
    ///
    /// The seed (typically a wallet signature over a fixed message) is
    /// SHA-256 hashed and the digest becomes the private key. Any seed yields
    /// a valid key pair: an invalid digest is re-hashed until valid, so both
    /// parties resolve the same key from the same seed.
    pub fn from_seed(seed: &[u8]) -> Self {
        let digest: [u8; 32] = Sha256::digest(seed).into();
        let (_, secret) = secret_from_digest(digest);
        Self::from_secret(secret)
    }

    fn from_secret(secret: SecretKey) -> Self {
        let public_key = uncompressed_public_key(&secret);
        let address = address_of(&public_key);
        let mut bytes: [u8; 32] = secret.to_bytes().into();
        let pair = Self {
            private_key: SecretBytes::from_bytes(bytes),
            public_key,
            address,
        };
        bytes.zeroize();
        pair
    }

    /// The private key bytes (use carefully)
    pub fn private_key(&self) -> &SecretBytes {
        &self.private_key
    }

    /// Public key as `0x`-prefixed hex, the shape shared with a counterparty.
    pub fn public_key_hex(&self) -> String {
        to_hex(&self.public_key)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Address Derivation
// ============================================================================

/// Convert a 65-byte uncompressed public key to an address.
///
/// Strips the 0x04 prefix, SHA-256 hashes the remaining 64 bytes and keeps
/// the last 20, hex-encoded with a `0x` prefix. Deterministic and total over
/// valid inputs.
pub fn public_key_to_address(public_key: &[u8]) -> Result<String, CoreError> {
    if public_key.len() != PUBLIC_KEY_LEN || public_key[0] != 0x04 {
        return Err(CoreError::InvalidPublicKey);
    }
    Ok(address_of(public_key.try_into().expect("length checked above")))
}

pub(crate) fn address_of(public_key: &[u8; PUBLIC_KEY_LEN]) -> String {
    let hash = Sha256::digest(&public_key[1..]);
    to_hex(&hash[hash.len() - 20..])
}

// ============================================================================
// Helpers
// ============================================================================

/// Turn a SHA-256 digest into a valid secret key.
///
/// A digest is an invalid scalar with probability ~2^-128. The invalid case
/// re-hashes the digest until a valid scalar appears, keeping the mapping
/// deterministic for every input.
pub(crate) fn secret_from_digest(digest: [u8; 32]) -> ([u8; 32], SecretKey) {
    let mut candidate = digest;
    loop {
        let field = k256::FieldBytes::from(candidate);
        if let Ok(secret) = SecretKey::from_bytes(&field) {
            return (candidate, secret);
        }
        candidate = Sha256::digest(candidate).into();
    }
}

pub(crate) fn uncompressed_public_key(secret: &SecretKey) -> [u8; PUBLIC_KEY_LEN] {
    let point = secret.public_key().to_encoded_point(false);
    let mut out = [0u8; PUBLIC_KEY_LEN];
    out.copy_from_slice(point.as_bytes());
    out
}
