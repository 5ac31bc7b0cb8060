//! Query the balance of a single address.
//!
//! Useful for checking RPC connectivity and inspecting what a specific
//! stealth address currently carries.

use anyhow::Result;
use colored::Colorize;

use stealthgram_core::message::{decode, wei_to_display};

use crate::config::Config;
use crate::rpc::RpcClient;

pub async fn run(cfg: &Config, address: &str) -> Result<()> {
    let rpc = RpcClient::new(cfg)?;

    println!("{}", format!("Checking balance of {address}...").cyan());

    let balance = rpc.fetch_balance(address).await?;

    println!();
    println!("Balance: {balance} wei ({})", wei_to_display(balance));

    if balance != 0 {
        let message = decode(balance);
        if message.is_empty() {
            println!("Message: {}", "(none decodable)".dimmed());
        } else {
            println!("Message: \"{message}\"");
        }
    }

    Ok(())
}
