//! ECDH shared-secret computation.
//!
//! Both parties hash the same Diffie-Hellman point, so
//! `perform_ecdh(a.priv, b.pub) == perform_ecdh(b.priv, a.pub)` for any two
//! key pairs. The shared secret is computed once per session and keys every
//! stealth derivation that follows.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, SecretKey};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::encoding::to_hex;
use crate::error::CoreError;

/// The symmetric value both parties derive from an ECDH exchange.
///
/// `secret` is the SHA-256 digest of the shared point's compressed encoding;
/// `seed` is the same digest as `0x`-prefixed hex.
#[derive(Clone)]
pub struct SharedSecret {
    pub secret: [u8; 32],
    pub seed: String,
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.secret.ct_eq(&other.secret))
    }
}

impl Eq for SharedSecret {}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SharedSecret([REDACTED])")
    }
}

/// Compute the ECDH shared secret between a local private key and a
/// counterparty public key.
///
/// Fails with [`CoreError::InvalidScalar`] on bad private-key bytes and
/// [`CoreError::InvalidPublicKey`] if the public key is not a point on the
/// curve.
pub fn perform_ecdh(private_key: &[u8; 32], public_key: &[u8]) -> Result<SharedSecret, CoreError> {
    let field = k256::FieldBytes::from(*private_key);
    let secret = SecretKey::from_bytes(&field).map_err(|_| CoreError::InvalidScalar)?;
    let public = PublicKey::from_sec1_bytes(public_key).map_err(|_| CoreError::InvalidPublicKey)?;

    // Shared point: priv_a * pub_b. Cofactor is 1 on secp256k1, so the
    // product of a nonzero scalar and a valid point is never the identity.
    let shared_point = public.to_projective() * *secret.to_nonzero_scalar();
    let encoded = shared_point.to_affine().to_encoded_point(true);

    let digest: [u8; 32] = Sha256::digest(encoded.as_bytes()).into();
    Ok(SharedSecret {
        secret: digest,
        seed: to_hex(&digest),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyPair;

    #[test]
    fn symmetry() {
        let alice = KeyPair::generate();
        let bob = KeyPair::generate();

        let from_alice =
            perform_ecdh(alice.private_key().as_bytes(), &bob.public_key).unwrap();
        let from_bob = perform_ecdh(bob.private_key().as_bytes(), &alice.public_key).unwrap();

        assert_eq!(from_alice, from_bob);
        assert_eq!(from_alice.seed, from_bob.seed);
    }

    #[test]
    fn matches_known_vector() {
        let mut one = [0u8; 32];
        one[31] = 1;
        let mut two = [0u8; 32];
        two[31] = 2;

        let pub_two = KeyPair::from_private_key(&two).unwrap().public_key;
        let shared = perform_ecdh(&one, &pub_two).unwrap();
        assert_eq!(
            shared.seed,
            "0xb1c9938f01121e159887ac2c8d393a22e4476ff8212de13fe1939de2a236f0a7"
        );
    }

    #[test]
    fn rejects_bad_inputs() {
        let pair = KeyPair::generate();
        let zero = [0u8; 32];
        assert!(matches!(
            perform_ecdh(&zero, &pair.public_key),
            Err(CoreError::InvalidScalar)
        ));

        let not_a_point = [0x04u8; 65];
        assert!(matches!(
            perform_ecdh(pair.private_key().as_bytes(), &not_a_point),
            Err(CoreError::InvalidPublicKey)
        ));
    }
}
