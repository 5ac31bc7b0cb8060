//! Show the stored address and shareable public key.

use anyhow::Result;
use colored::Colorize;

use crate::commands::unlock_keys;

pub fn run() -> Result<()> {
    let keys = unlock_keys()?;

    println!("{}", "Your identity".cyan().bold());
    println!();
    println!("Address:    {}", keys.address);
    println!("Public key: {}", keys.public_key);
    println!();
    println!(
        "{}",
        "Publish the public key in your name record's description field,\n\
         or hand it to your counterparty directly."
            .dimmed()
    );

    Ok(())
}
