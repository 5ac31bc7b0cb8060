//! Establish the ECDH shared secret with a counterparty.
//!
//! Accepts the counterparty public key directly or resolves it from a name
//! record. The peer is persisted; the shared secret is recomputed from the
//! stored private key on every later command instead of being written to
//! disk.

use anyhow::{bail, Result};
use colored::Colorize;

use stealthgram_core::encoding::from_hex;
use stealthgram_core::perform_ecdh;

use crate::commands::unlock_keys;
use crate::config::{save_peer, Config, PeerRecord};
use crate::resolver::NameResolver;

pub async fn run(cfg: &Config, pubkey: Option<&str>, name: Option<&str>) -> Result<()> {
    let (peer_key, resolved_from) = match (pubkey, name) {
        (Some(key), _) => (key.to_string(), None),
        (None, Some(name)) => {
            println!("{}", format!("Resolving name record for {name}...").cyan());
            let resolver = NameResolver::new(cfg)?;
            let key = resolver.resolve(name).await?;
            println!("{}", "Name resolved.".green());
            (key, Some(name.to_string()))
        }
        (None, None) => bail!("Provide --pubkey or --name"),
    };

    let keys = unlock_keys()?;
    let peer_bytes = from_hex(&peer_key)?;
    let shared = perform_ecdh(&keys.private_key, &peer_bytes)?;

    save_peer(&PeerRecord {
        public_key: peer_key.clone(),
        name: resolved_from,
        created_at: chrono::Utc::now().to_rfc3339(),
    })?;

    println!();
    println!("{}", "Shared secret established.".green().bold());
    println!();
    println!("Peer public key: {peer_key}");
    println!("Secret seed:     {}", shared.seed);
    println!();
    println!(
        "{}",
        "Your counterparty derives the same secret from their private key\n\
         and your public key. Run 'stealthgram sequence' to see the shared\n\
         address sequences."
            .dimmed()
    );

    Ok(())
}
