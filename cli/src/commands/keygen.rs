//! Key generation command with encrypted storage and deterministic
//! signature-seeded derivation.

use anyhow::{bail, Result};
use colored::Colorize;

use stealthgram_core::encoding::from_hex;
use stealthgram_core::KeyPair;

use crate::secure_storage::{prompt_new_password, KeyData, SecureKeyStorage};

/// Fixed message an external wallet signs to seed a deterministic key pair.
/// The signature over exactly this text is the sole entropy source.
pub const ENTROPY_MESSAGE: &str = "Aknowledge you are going steganographic";

/// Options for key generation
pub struct KeygenOptions {
    /// Force overwrite existing keys
    pub force: bool,
    /// Wallet signature over [`ENTROPY_MESSAGE`]
    pub from_signature: Option<String>,
    /// Raw 32-byte private key, hex
    pub from_private_key: Option<String>,
}

pub fn run(options: KeygenOptions) -> Result<()> {
    let storage = SecureKeyStorage::new(SecureKeyStorage::default_path());

    if storage.exists() && !options.force {
        bail!(
            "Keys already exist. Use --force to overwrite.\n\
             Warning: Overwriting keys makes existing stealth sequences unrecoverable!"
        );
    }

    println!("{}", "=== stealthgram Key Generation ===".cyan().bold());
    println!();

    let pair = if let Some(ref signature) = options.from_signature {
        println!("{}", "Deriving key pair from wallet signature...".cyan());
        println!(
            "{}",
            format!("(signature must be over: \"{ENTROPY_MESSAGE}\")").dimmed()
        );
        KeyPair::from_seed(signature.as_bytes())
    } else if let Some(ref key_hex) = options.from_private_key {
        println!("{}", "Importing raw private key...".cyan());
        let bytes = from_hex(key_hex)?;
        let scalar: [u8; 32] = bytes
            .try_into()
            .map_err(|_| anyhow::anyhow!("Private key must be exactly 32 bytes"))?;
        KeyPair::from_private_key(&scalar)?
    } else {
        println!("{}", "Generating random key pair...".cyan());
        println!(
            "{}",
            "Tip: --from-signature gives a key pair you can re-derive from your wallet.".dimmed()
        );
        KeyPair::generate()
    };

    println!();
    println!("{}", "Choose a strong password to encrypt your keys.".cyan());
    println!(
        "{}",
        "Requirements: 8+ chars, uppercase, lowercase, and numbers".dimmed()
    );
    println!();

    let password = prompt_new_password("Enter password: ")?;

    let key_data = KeyData {
        private_key: *pair.private_key().as_bytes(),
        public_key: pair.public_key_hex(),
        address: pair.address.clone(),
    };

    storage.save(&key_data, &password)?;

    println!();
    println!("{}", "Keys generated and encrypted.".green().bold());
    println!();
    println!("Address:    {}", pair.address);
    println!("Public key: {}", pair.public_key_hex());
    println!();
    println!(
        "{}",
        "Share the public key (or publish it in a name record) so a\n\
         counterparty can run the exchange."
            .dimmed()
    );

    Ok(())
}
