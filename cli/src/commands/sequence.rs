//! Print stealth address sequences for the current exchange.

use anyhow::Result;
use colored::Colorize;

use stealthgram_core::{derive_observed_sequence, derive_sequence};

use crate::commands::open_session;
use crate::Side;

pub fn run(count: u32, start: u32, side: Side, show_keys: bool) -> Result<()> {
    let session = open_session()?;

    if matches!(side, Side::Mine | Side::Both) {
        println!("{}", "Your sequence".cyan().bold());
        let entries = derive_sequence(&session.shared.secret, &session.own_public_key, start, count);
        for entry in &entries {
            println!("  nonce {:>4}  {}", entry.nonce, entry.address);
            if show_keys {
                println!("             key {}", entry.private_key.to_hex().dimmed());
            }
        }
        println!();
    }

    if matches!(side, Side::Theirs | Side::Both) {
        println!(
            "{}",
            format!(
                "Counterparty sequence{}",
                session
                    .peer
                    .name
                    .as_deref()
                    .map(|n| format!(" ({n})"))
                    .unwrap_or_default()
            )
            .cyan()
            .bold()
        );
        let entries =
            derive_observed_sequence(&session.shared.secret, &session.peer_public_key, start, count);
        for entry in &entries {
            println!("  nonce {:>4}  {}", entry.nonce, entry.address);
        }
        println!();
    }

    println!(
        "{}",
        "Both parties derive identical sequences in identical order; the\n\
         scan walks them from nonce 0 until the first zero balance."
            .dimmed()
    );

    Ok(())
}
