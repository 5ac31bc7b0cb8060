//! Show configuration and key info.

use anyhow::Result;
use colored::Colorize;

use crate::config::{load_peer, stealthgram_dir, Config};
use crate::secure_storage::SecureKeyStorage;

pub fn run(cfg: &Config) -> Result<()> {
    println!("{}", "=== stealthgram info ===".cyan().bold());
    println!();

    println!("Config dir:  {}", stealthgram_dir().display());
    println!("RPC endpoints (tried in order):");
    for endpoint in &cfg.rpc_endpoints {
        println!("  - {endpoint}");
    }
    println!("Request timeout: {}s", cfg.request_timeout_secs);
    println!("Resolver URL:    {}", cfg.resolver_url);
    println!();

    let storage = SecureKeyStorage::new(SecureKeyStorage::default_path());
    if storage.exists() {
        println!("Keys: {}", "present (encrypted)".green());
    } else {
        println!(
            "Keys: {}",
            "none - run 'stealthgram keygen'".yellow()
        );
    }

    match load_peer() {
        Ok(peer) => {
            println!("Exchange peer: {}", peer.public_key);
            if let Some(name) = peer.name {
                println!("  resolved from: {name}");
            }
            println!("  established:   {}", peer.created_at);
        }
        Err(_) => {
            println!(
                "Exchange peer: {}",
                "none - run 'stealthgram exchange'".yellow()
            );
        }
    }

    Ok(())
}
