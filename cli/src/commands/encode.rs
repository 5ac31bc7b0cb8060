//! Encode a message into the exact transfer amount(s) without sending.

use anyhow::Result;
use colored::Colorize;

use stealthgram_core::message::wei_to_display;
use stealthgram_core::{encode_message, EncodedMessage};

pub fn run(message: &str) -> Result<()> {
    match encode_message(message)? {
        EncodedMessage::Single { amount } => {
            println!("{}", "Single message".cyan().bold());
            println!();
            println!("Message: \"{message}\"");
            println!("Amount:  {amount} wei");
            println!("         {} in display units", wei_to_display(amount));
            println!();
            println!(
                "{}",
                "Send exactly this amount to any unread stealth address of yours;\n\
                 the low 12 digits carry the message."
                    .dimmed()
            );
        }
        EncodedMessage::Chunked { chunks } => {
            println!(
                "{}",
                format!("Chunked message ({} chunks)", chunks.len()).cyan().bold()
            );
            println!();
            for chunk in &chunks {
                println!(
                    "[{}/{}] \"{}\" -> nonce {:>3}  {} wei  ({})",
                    chunk.sequence,
                    chunk.total,
                    chunk.chunk,
                    chunk.sequence - 1,
                    chunk.amount,
                    wei_to_display(chunk.amount),
                );
            }
            println!();
            println!(
                "{}",
                "Chunk amounts keep only the first two characters of each chunk;\n\
                 the other digits carry the [sequence/total] header."
                    .dimmed()
            );
        }
    }

    Ok(())
}
