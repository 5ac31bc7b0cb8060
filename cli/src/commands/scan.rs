//! Scan stealth sequences for incoming messages.
//!
//! Derives both parties' sequences from the shared secret and walks each in
//! nonce order until the first zero balance. The two scans are independent
//! and run concurrently; within one sequence queries stay strictly
//! sequential so the stop condition is evaluated in order.

use anyhow::Result;
use colored::Colorize;

use stealthgram_core::message::wei_to_display;
use stealthgram_core::{derive_observed_sequence, scan_sequence, ScanEntry};

use crate::commands::open_session;
use crate::config::Config;
use crate::rpc::RpcClient;
use crate::Side;

pub async fn run(cfg: &Config, count: u32, side: Side) -> Result<()> {
    let session = open_session()?;
    let rpc = RpcClient::new(cfg)?;

    println!(
        "{}",
        format!("Scanning up to {count} addresses per sequence...").cyan()
    );
    println!();

    let mine = derive_observed_sequence(&session.shared.secret, &session.own_public_key, 0, count);
    let theirs =
        derive_observed_sequence(&session.shared.secret, &session.peer_public_key, 0, count);

    let (own_results, peer_results) = match side {
        Side::Mine => (Some(scan_sequence(&rpc, &mine).await), None),
        Side::Theirs => (None, Some(scan_sequence(&rpc, &theirs).await)),
        Side::Both => {
            let (own, peer) =
                tokio::join!(scan_sequence(&rpc, &mine), scan_sequence(&rpc, &theirs));
            (Some(own), Some(peer))
        }
    };

    let mut messages = 0;
    if let Some(ref entries) = own_results {
        print_sequence("Your sequence", entries);
        messages += entries.iter().filter(|e| e.message.is_some()).count();
    }
    if let Some(ref entries) = peer_results {
        let label = match session.peer.name.as_deref() {
            Some(name) => format!("Counterparty sequence ({name})"),
            None => "Counterparty sequence".to_string(),
        };
        print_sequence(&label, entries);
        messages += entries.iter().filter(|e| e.message.is_some()).count();
    }

    if messages == 0 {
        println!("{}", "No messages found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {messages} message(s).").green().bold()
        );
    }

    Ok(())
}

fn print_sequence(label: &str, entries: &[ScanEntry]) {
    println!("{}", label.cyan().bold());

    if entries.is_empty() {
        println!("  (no addresses scanned)");
        println!();
        return;
    }

    for entry in entries {
        match &entry.message {
            Some(message) => {
                println!(
                    "  nonce {:>4}  {}  {} wei  {}",
                    entry.nonce,
                    entry.address,
                    entry.balance,
                    format!("\"{message}\"").green()
                );
            }
            None => {
                println!(
                    "  nonce {:>4}  {}  {}",
                    entry.nonce,
                    entry.address,
                    "empty (end of sequence)".dimmed()
                );
            }
        }
    }

    let last = &entries[entries.len() - 1];
    if last.balance != 0 {
        println!(
            "  {}",
            "sequence still live past the scan window; raise --count to see more".dimmed()
        );
    }
    println!("  total scanned: {} ({} display units overall)", entries.len(), {
        let total: u128 = entries.iter().map(|e| e.balance).sum();
        wei_to_display(total)
    });
    println!();
}
