//! Known-answer vectors for the derivation pipeline.
//!
//! Fixed inputs exercised end to end: key pair, ECDH exchange, stealth
//! sequence and message amounts, asserting the concrete values every
//! conforming party must produce.

use crate::ecdh::perform_ecdh;
use crate::keys::KeyPair;
use crate::message::{decode, encode_message, EncodedMessage};
use crate::stealth::{derive_observed_sequence, derive_sequence};

fn scalar(byte: u8) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[31] = byte;
    out
}

/// Two parties with scalars 1 and 2 must reach the same shared secret and
/// derive identical, identically-ordered sequences for either public key.
#[test]
fn both_parties_derive_the_same_sequences() {
    let alice = KeyPair::from_private_key(&scalar(1)).unwrap();
    let bob = KeyPair::from_private_key(&scalar(2)).unwrap();

    let alice_view = perform_ecdh(&scalar(1), &bob.public_key).unwrap();
    let bob_view = perform_ecdh(&scalar(2), &alice.public_key).unwrap();
    assert_eq!(alice_view, bob_view);
    assert_eq!(
        alice_view.seed,
        "0xb1c9938f01121e159887ac2c8d393a22e4476ff8212de13fe1939de2a236f0a7"
    );

    // Alice owns her side; Bob observes it. Addresses must agree pairwise.
    let owned = derive_sequence(&alice_view.secret, &alice.public_key, 0, 6);
    let observed = derive_observed_sequence(&bob_view.secret, &alice.public_key, 0, 6);

    assert_eq!(owned.len(), observed.len());
    for (own, seen) in owned.iter().zip(&observed) {
        assert_eq!(own.nonce, seen.nonce);
        assert_eq!(own.address, seen.address);
        assert_eq!(own.public_key, seen.public_key);
    }
}

/// The owner's spending key regenerates the observed public key.
#[test]
fn spending_key_matches_observed_entry() {
    let shared = [0x33u8; 32];
    let pubkey = KeyPair::from_private_key(&scalar(5)).unwrap().public_key;

    for nonce in [0u32, 1, 41] {
        let owned = crate::stealth::derive_stealth_address(&shared, &pubkey, nonce);
        let recovered = KeyPair::from_private_key(owned.private_key.as_bytes()).unwrap();
        assert_eq!(recovered.public_key, owned.public_key);
        assert_eq!(recovered.address, owned.address);
    }
}

/// A long message maps chunk-for-nonce onto the start of a sequence.
#[test]
fn chunked_message_assignment_covers_leading_nonces() {
    let encoded = encode_message("HelloWorld").unwrap();
    let chunks = match encoded {
        EncodedMessage::Chunked { chunks } => chunks,
        EncodedMessage::Single { .. } => panic!("ten characters must chunk"),
    };

    assert_eq!(chunks.len(), 3);
    for (i, chunk) in chunks.iter().enumerate() {
        // Chunk i+1 rides at nonce i.
        assert_eq!(chunk.sequence as usize, i + 1);
        assert_eq!(chunk.total, 3);
    }

    assert_eq!(decode(chunks[0].amount), "[1/3] He");
    assert_eq!(decode(chunks[1].amount), "[2/3] oW");
    assert_eq!(decode(chunks[2].amount), "[3/3] ld");
}
