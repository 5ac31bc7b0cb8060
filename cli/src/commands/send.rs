//! Encode a message and submit the value transfer(s).
//!
//! Messages ride on the sender's own sequence: the counterparty scans it and
//! decodes whatever the balances spell out. A chunked message occupies the
//! leading nonces, chunk i at nonce i - 1.

use anyhow::Result;
use colored::Colorize;

use stealthgram_core::message::wei_to_display;
use stealthgram_core::{derive_stealth_address, encode_message, EncodedMessage};

use crate::commands::open_session;
use crate::config::Config;
use crate::rpc::RpcClient;

pub async fn run(cfg: &Config, message: &str, from: &str, to_nonce: u32) -> Result<()> {
    let session = open_session()?;
    let rpc = RpcClient::new(cfg)?;

    let encoded = encode_message(message)?;

    match encoded {
        EncodedMessage::Single { amount } => {
            let entry =
                derive_stealth_address(&session.shared.secret, &session.own_public_key, to_nonce);

            println!(
                "Sending \"{message}\" ({} wei, {}) to nonce {to_nonce}...",
                amount,
                wei_to_display(amount)
            );
            let tx = rpc.send_transfer(from, &entry.address, amount).await?;
            println!("  {} {}", "submitted".green(), tx);
        }
        EncodedMessage::Chunked { chunks } => {
            println!(
                "Sending \"{message}\" as {} chunks across nonces 0..{}...",
                chunks.len(),
                chunks.len() - 1
            );
            for chunk in &chunks {
                let entry = derive_stealth_address(
                    &session.shared.secret,
                    &session.own_public_key,
                    chunk.sequence - 1,
                );

                println!(
                    "  [{}/{}] {} wei -> nonce {} ({})",
                    chunk.sequence,
                    chunk.total,
                    chunk.amount,
                    chunk.sequence - 1,
                    entry.address
                );
                let tx = rpc.send_transfer(from, &entry.address, chunk.amount).await?;
                println!("        {} {}", "submitted".green(), tx);
            }
        }
    }

    println!();
    println!(
        "{}",
        "Your counterparty will pick the message up the next time they scan\n\
         your sequence."
            .dimmed()
    );

    Ok(())
}
