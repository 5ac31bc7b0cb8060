//! Core engine for stealthgram
//!
//! Derives deterministic, unlinkable stealth-address sequences from an ECDH
//! shared secret on secp256k1, and embeds short text messages in the
//! sub-denomination digits of transfer amounts so a counterparty can recover
//! them by scanning balances.
//!
//! All derivation operations are synchronous and pure; the only async
//! component is the balance scanner, which talks to an external
//! [`scanner::BalanceSource`].

pub mod cipher;
pub mod ecdh;
pub mod encoding;
pub mod error;
pub mod keys;
pub mod message;
pub mod scanner;
pub mod stealth;

pub use ecdh::{perform_ecdh, SharedSecret};
pub use error::CoreError;
pub use keys::{public_key_to_address, KeyPair, SecretBytes};
pub use message::{decode, encode_message, EncodedMessage, MessageChunk};
pub use scanner::{scan_sequence, BalanceError, BalanceSource, ScanEntry};
pub use stealth::{
    derive_address, derive_observed_sequence, derive_private_key, derive_sequence,
    derive_stealth_address, derive_stealth_public_key, ObservedStealthEntry, OwnedStealthEntry,
};

#[cfg(test)]
mod test_vectors;

#[cfg(test)]
mod fuzz_tests;
