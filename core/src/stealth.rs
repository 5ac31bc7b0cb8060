//! Stealth key and address derivation.
//!
//! The derivation is keyed by `(shared_secret, public_key, nonce)`:
//!
//! ```text
//! stealth_priv = SHA256(shared_secret || public_key || nonce_be32)
//! stealth_pub  = G * stealth_priv
//! address      = address_of(stealth_pub)
//! ```
//!
//! Anyone holding the shared secret can compute the address for any nonce;
//! spending keys are only meaningful to the party whose role owns the
//! `public_key` parameter. The observer-side entry therefore never carries a
//! private key.
//!
//! Sequences are ordered by ascending nonce. That ordering defines the scan
//! protocol and must match between two parties deriving independently.

use k256::SecretKey;
use sha2::{Digest, Sha256};

use crate::error::CoreError;
use crate::keys::{
    address_of, secret_from_digest, uncompressed_public_key, SecretBytes, PUBLIC_KEY_LEN,
};

/// A stealth entry derived by the owning side: spending key included.
pub struct OwnedStealthEntry {
    pub nonce: u32,
    pub private_key: SecretBytes,
    pub public_key: [u8; PUBLIC_KEY_LEN],
    pub address: String,
}

/// A stealth entry derived by the observing side: address only, no spending
/// key is ever learned.
#[derive(Debug, Clone)]
pub struct ObservedStealthEntry {
    pub nonce: u32,
    pub public_key: [u8; PUBLIC_KEY_LEN],
    pub address: String,
}

/// Derive the stealth private key for `(shared_secret, public_key, nonce)`.
///
/// The nonce is encoded as 4-byte big-endian. The SHA-256 digest is used as
/// the secp256k1 scalar; the ~2^-128 invalid-digest case re-hashes
/// deterministically, so both parties always resolve the same key.
pub fn derive_private_key(shared_secret: &[u8; 32], public_key: &[u8], nonce: u32) -> [u8; 32] {
    let (bytes, _) = secret_from_digest(stealth_digest(shared_secret, public_key, nonce));
    bytes
}

/// Derive the address controlled by a private key.
pub fn derive_address(private_key: &[u8; 32]) -> Result<String, CoreError> {
    let field = k256::FieldBytes::from(*private_key);
    let secret = SecretKey::from_bytes(&field).map_err(|_| CoreError::InvalidScalar)?;
    Ok(address_of(&uncompressed_public_key(&secret)))
}

/// Derive a full stealth entry (owner side).
pub fn derive_stealth_address(
    shared_secret: &[u8; 32],
    public_key: &[u8],
    nonce: u32,
) -> OwnedStealthEntry {
    let (stealth_public, address, private_bytes) = derive_parts(shared_secret, public_key, nonce);
    OwnedStealthEntry {
        nonce,
        private_key: SecretBytes::from_bytes(private_bytes),
        public_key: stealth_public,
        address,
    }
}

/// Derive a stealth entry without exposing the private key (observer side).
///
/// Same derivation as [`derive_stealth_address`], used to compute a
/// counterparty's addresses from public information plus the shared secret.
pub fn derive_stealth_public_key(
    shared_secret: &[u8; 32],
    public_key: &[u8],
    nonce: u32,
) -> ObservedStealthEntry {
    let (stealth_public, address, _) = derive_parts(shared_secret, public_key, nonce);
    ObservedStealthEntry {
        nonce,
        public_key: stealth_public,
        address,
    }
}

/// Derive `count` consecutive owned entries starting at `start_nonce`, in
/// ascending nonce order.
pub fn derive_sequence(
    shared_secret: &[u8; 32],
    public_key: &[u8],
    start_nonce: u32,
    count: u32,
) -> Vec<OwnedStealthEntry> {
    (0..count)
        .map(|i| derive_stealth_address(shared_secret, public_key, start_nonce + i))
        .collect()
}

/// Observer-side variant of [`derive_sequence`].
pub fn derive_observed_sequence(
    shared_secret: &[u8; 32],
    public_key: &[u8],
    start_nonce: u32,
    count: u32,
) -> Vec<ObservedStealthEntry> {
    (0..count)
        .map(|i| derive_stealth_public_key(shared_secret, public_key, start_nonce + i))
        .collect()
}

fn stealth_digest(shared_secret: &[u8; 32], public_key: &[u8], nonce: u32) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(shared_secret);
    hasher.update(public_key);
    hasher.update(nonce.to_be_bytes());
    hasher.finalize().into()
}

fn derive_parts(
    shared_secret: &[u8; 32],
    public_key: &[u8],
    nonce: u32,
) -> ([u8; PUBLIC_KEY_LEN], String, [u8; 32]) {
    let digest = stealth_digest(shared_secret, public_key, nonce);
    let (private_bytes, secret) = secret_from_digest(digest);

    let stealth_public = uncompressed_public_key(&secret);
    let address = address_of(&stealth_public);

    (stealth_public, address, private_bytes)
}
