//! CLI command implementations.

pub mod address;
pub mod balance;
pub mod encode;
pub mod exchange;
pub mod info;
pub mod keygen;
pub mod scan;
pub mod send;
pub mod sequence;

use anyhow::{bail, Context, Result};

use stealthgram_core::encoding::from_hex;
use stealthgram_core::{perform_ecdh, SharedSecret};

use crate::config::{load_peer, PeerRecord};
use crate::secure_storage::{prompt_password, KeyData, SecureKeyStorage};

/// Decrypt the stored key pair after prompting for the password.
pub(crate) fn unlock_keys() -> Result<KeyData> {
    let storage = SecureKeyStorage::new(SecureKeyStorage::default_path());

    if !storage.exists() {
        bail!("No keys found. Run 'stealthgram keygen' first.");
    }

    let password = prompt_password("Enter password to decrypt keys: ")?;
    storage
        .load(&password)
        .context("Failed to decrypt keys. Wrong password?")
}

/// The current exchange with the shared secret recomputed for this
/// invocation. The secret itself is never persisted.
pub(crate) struct Session {
    pub peer: PeerRecord,
    pub own_public_key: Vec<u8>,
    pub peer_public_key: Vec<u8>,
    pub shared: SharedSecret,
}

pub(crate) fn open_session() -> Result<Session> {
    let keys = unlock_keys()?;
    let peer = load_peer()?;

    let own_public_key = from_hex(&keys.public_key)?;
    let peer_public_key = from_hex(&peer.public_key)?;
    let shared = perform_ecdh(&keys.private_key, &peer_public_key)?;

    Ok(Session {
        peer,
        own_public_key,
        peer_public_key,
        shared,
    })
}
