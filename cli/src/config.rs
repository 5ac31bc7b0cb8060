//! Configuration and session state for the stealthgram CLI.
//!
//! Network configuration (RPC endpoint list, resolver URL, timeout) lives in
//! a JSON file under `~/.stealthgram/` and is threaded explicitly into the
//! collaborators; nothing reads it as ambient global state. The directory
//! also holds the encrypted key file and the current exchange peer.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_DIR: &str = ".stealthgram";
const CONFIG_FILE: &str = "config.json";
const PEER_FILE: &str = "peer.json";

/// Network configuration for the balance, transfer and resolver
/// collaborators.
#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    /// JSON-RPC endpoints, tried in order until one answers.
    pub rpc_endpoints: Vec<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Base URL of the name-record resolver.
    pub resolver_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_endpoints: vec![
                "https://sepolia.base.org".to_string(),
                "https://base-sepolia.blockscout.com/api".to_string(),
                "https://base-sepolia-rpc.publicnode.com".to_string(),
            ],
            request_timeout_secs: 10,
            resolver_url: "https://namestone.com/api/public_v1/get-names".to_string(),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when none exists.
    pub fn load_or_default() -> Result<Self> {
        let path = config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(&path).context("Failed to read config file")?;
        serde_json::from_str(&json).context("Failed to parse config file")
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, rpc_urls: &[String], resolver_url: Option<&str>) -> Self {
        if !rpc_urls.is_empty() {
            self.rpc_endpoints = rpc_urls.to_vec();
        }
        if let Some(url) = resolver_url {
            self.resolver_url = url.to_string();
        }
        self
    }

}

/// The counterparty of the current exchange.
#[derive(Serialize, Deserialize, Clone)]
pub struct PeerRecord {
    /// Counterparty public key, `0x`-prefixed hex.
    pub public_key: String,
    /// Name the key was resolved from, if any.
    pub name: Option<String>,
    /// Exchange timestamp
    pub created_at: String,
}

/// Get the stealthgram directory path
pub fn stealthgram_dir() -> PathBuf {
    dirs::home_dir()
        .expect("Could not find home directory")
        .join(CONFIG_DIR)
}

fn config_file() -> PathBuf {
    stealthgram_dir().join(CONFIG_FILE)
}

fn peer_file() -> PathBuf {
    stealthgram_dir().join(PEER_FILE)
}

/// Persist the exchange peer for later sequence/scan/send commands.
pub fn save_peer(peer: &PeerRecord) -> Result<()> {
    let dir = stealthgram_dir();
    fs::create_dir_all(&dir).context("Failed to create config directory")?;
    let json = serde_json::to_string_pretty(peer)?;
    fs::write(peer_file(), json).context("Failed to write peer file")?;
    Ok(())
}

/// Load the exchange peer stored by `stealthgram exchange`.
pub fn load_peer() -> Result<PeerRecord> {
    let path = peer_file();
    if !path.exists() {
        bail!("No exchange established. Run 'stealthgram exchange' first.");
    }
    let json = fs::read_to_string(&path).context("Failed to read peer file")?;
    serde_json::from_str(&json).context("Failed to parse peer file")
}
