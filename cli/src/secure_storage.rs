//! Secure key storage with encryption at rest
//!
//! Uses AES-256-GCM for encryption and Argon2id for key derivation.
//! Keys are never stored in plaintext.

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use anyhow::{bail, Context, Result};
use argon2::{
    password_hash::{rand_core::RngCore, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use zeroize::Zeroize;

/// Argon2 parameters for key derivation
const ARGON2_M_COST: u32 = 65536; // 64 MB memory
const ARGON2_T_COST: u32 = 3; // 3 iterations
const ARGON2_P_COST: u32 = 4; // 4 parallel lanes

/// Encrypted key file format
#[derive(Serialize, Deserialize)]
pub struct EncryptedKeyFile {
    /// Version for future compatibility
    pub version: u8,
    /// Salt for Argon2 (base64)
    pub salt: String,
    /// Nonce for AES-GCM (base64)
    pub nonce: String,
    /// Encrypted data (base64)
    pub ciphertext: String,
    /// Password hash for verification (optional, using Argon2)
    pub password_hash: Option<String>,
    /// Creation timestamp
    pub created_at: String,
}

/// Unencrypted key data (internal use only)
#[derive(Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
pub struct KeyData {
    /// secp256k1 private key scalar
    pub private_key: [u8; 32],
    /// Uncompressed public key, `0x`-prefixed hex
    pub public_key: String,
    /// Derived address
    pub address: String,
}

impl EncryptedKeyFile {
    /// Encrypt key data with a password
    pub fn encrypt(data: &KeyData, password: &str) -> Result<Self> {
        let salt = SaltString::generate(&mut OsRng);

        let argon2 = argon2_instance()?;

        // Derive 32-byte key
        let mut key_bytes = [0u8; 32];
        argon2
            .hash_password_into(password.as_bytes(), salt.as_str().as_bytes(), &mut key_bytes)
            .map_err(|e| anyhow::anyhow!("Key derivation failed: {}", e))?;

        let cipher = Aes256Gcm::new_from_slice(&key_bytes)
            .map_err(|e| anyhow::anyhow!("Cipher creation failed: {}", e))?;

        let mut nonce_bytes = [0u8; 12];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from(nonce_bytes);

        let plaintext = serde_json::to_vec(data)?;

        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_ref())
            .map_err(|e| anyhow::anyhow!("Encryption failed: {}", e))?;

        // Password hash for fast verification before the expensive decrypt
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .ok()
            .map(|h| h.to_string());

        key_bytes.zeroize();

        Ok(Self {
            version: 1,
            salt: salt.as_str().to_string(),
            nonce: b64::encode(&nonce_bytes),
            ciphertext: b64::encode(&ciphertext),
            password_hash,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Decrypt key data with a password
    pub fn decrypt(&self, password: &str) -> Result<KeyData> {
        if let Some(ref hash) = self.password_hash {
            let parsed_hash = argon2::PasswordHash::new(hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash: {}", e))?;

            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .map_err(|_| anyhow::anyhow!("Invalid password"))?;
        }

        let argon2 = argon2_instance()?;

        let mut key_bytes = [0u8; 32];
        argon2
            .hash_password_into(password.as_bytes(), self.salt.as_bytes(), &mut key_bytes)
            .map_err(|e| anyhow::anyhow!("Key derivation failed: {}", e))?;

        let cipher = Aes256Gcm::new_from_slice(&key_bytes)
            .map_err(|e| anyhow::anyhow!("Cipher creation failed: {}", e))?;

        let nonce_bytes = b64::decode(&self.nonce).context("Invalid nonce encoding")?;
        let ciphertext = b64::decode(&self.ciphertext).context("Invalid ciphertext encoding")?;

        if nonce_bytes.len() != 12 {
            bail!("Invalid nonce length");
        }

        let nonce_array: [u8; 12] = nonce_bytes
            .try_into()
            .map_err(|_| anyhow::anyhow!("Failed to convert nonce to array"))?;
        let nonce = Nonce::from(nonce_array);

        let plaintext = cipher
            .decrypt(&nonce, ciphertext.as_ref())
            .map_err(|_| anyhow::anyhow!("Decryption failed - wrong password or corrupted data"))?;

        key_bytes.zeroize();

        let data: KeyData =
            serde_json::from_slice(&plaintext).context("Failed to parse decrypted key data")?;

        Ok(data)
    }
}

fn argon2_instance() -> Result<Argon2<'static>> {
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2::Params::new(ARGON2_M_COST, ARGON2_T_COST, ARGON2_P_COST, Some(32))
            .map_err(|e| anyhow::anyhow!("Argon2 params error: {}", e))?,
    ))
}

/// Secure key storage manager
pub struct SecureKeyStorage {
    path: PathBuf,
}

impl SecureKeyStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the default storage path
    pub fn default_path() -> PathBuf {
        crate::config::stealthgram_dir().join("keys.enc")
    }

    /// Check if encrypted keys exist
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Save encrypted keys
    pub fn save(&self, data: &KeyData, password: &str) -> Result<()> {
        let encrypted = EncryptedKeyFile::encrypt(data, password)?;
        let json = serde_json::to_string_pretty(&encrypted)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write with restrictive permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::write(&self.path, &json)?;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, &json)?;
        }

        Ok(())
    }

    /// Load and decrypt keys
    pub fn load(&self, password: &str) -> Result<KeyData> {
        let json = fs::read_to_string(&self.path).context("Failed to read encrypted key file")?;

        let encrypted: EncryptedKeyFile =
            serde_json::from_str(&json).context("Failed to parse encrypted key file")?;

        encrypted.decrypt(password)
    }
}

/// Password strength validation
pub fn validate_password_strength(password: &str) -> Result<()> {
    if password.len() < 8 {
        bail!("Password must be at least 8 characters");
    }

    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_numeric());

    if !has_upper || !has_lower || !has_digit {
        bail!("Password must contain uppercase, lowercase, and numeric characters");
    }

    Ok(())
}

/// Prompt for password securely (hides input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    rpassword::prompt_password(prompt).context("Failed to read password")
}

/// Prompt for password with confirmation
pub fn prompt_new_password(prompt: &str) -> Result<String> {
    let password = prompt_password(prompt)?;
    let confirm = prompt_password("Confirm password: ")?;

    if password != confirm {
        bail!("Passwords do not match");
    }

    validate_password_strength(&password)?;

    Ok(password)
}

// Base64 encoding/decoding helpers
mod b64 {
    use base64::{engine::general_purpose::STANDARD, Engine};

    pub fn encode(data: &[u8]) -> String {
        STANDARD.encode(data)
    }

    pub fn decode(s: &str) -> anyhow::Result<Vec<u8>> {
        STANDARD
            .decode(s)
            .map_err(|e| anyhow::anyhow!("Base64 decode error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KeyData {
        KeyData {
            private_key: [0x42; 32],
            public_key: format!("0x04{}", "ab".repeat(64)),
            address: "0xb46a7a1a23f3897cc83a94521a96da5c23bc58db".to_string(),
        }
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let data = sample();
        let password = "TestPassword123";

        let encrypted = EncryptedKeyFile::encrypt(&data, password).unwrap();
        let decrypted = encrypted.decrypt(password).unwrap();

        assert_eq!(data.private_key, decrypted.private_key);
        assert_eq!(data.public_key, decrypted.public_key);
        assert_eq!(data.address, decrypted.address);
    }

    #[test]
    fn test_wrong_password_fails() {
        let encrypted = EncryptedKeyFile::encrypt(&sample(), "TestPassword123").unwrap();
        assert!(encrypted.decrypt("WrongPassword123").is_err());
    }

    #[test]
    fn test_storage_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SecureKeyStorage::new(dir.path().join("keys.enc"));
        assert!(!storage.exists());

        storage.save(&sample(), "TestPassword123").unwrap();
        assert!(storage.exists());

        let loaded = storage.load("TestPassword123").unwrap();
        assert_eq!(loaded.address, sample().address);
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password_strength("short").is_err());
        assert!(validate_password_strength("alllowercase").is_err());
        assert!(validate_password_strength("ALLUPPERCASE").is_err());
        assert!(validate_password_strength("NoNumbers").is_err());
        assert!(validate_password_strength("ValidPass123").is_ok());
    }
}
