//! stealthgram CLI - stealth-address messaging over transfer amounts

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod resolver;
mod rpc;
mod secure_storage;

use commands::*;

#[derive(Parser)]
#[command(name = "stealthgram")]
#[command(version = "0.1.0")]
#[command(about = "Steganographic messaging over stealth-address transfer amounts")]
#[command(long_about = r#"
stealthgram hides short messages in the sub-denomination digits of value
transfers to stealth addresses. Both parties derive the same address
sequences from an ECDH shared secret; the receiver scans balances in nonce
order and decodes any message it finds.

Quick Start:
  1. stealthgram keygen                         Generate your key pair
  2. stealthgram address                        Share your public key
  3. stealthgram exchange --pubkey 0x..         Establish the shared secret
  4. stealthgram send --message Hi --from 0x..  Send a message
  5. stealthgram scan                           Read incoming messages
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC endpoint override; repeat the flag to supply a fallback list
    #[arg(long = "rpc-url", global = true)]
    rpc_urls: Vec<String>,

    /// Name-resolver base URL override
    #[arg(long, global = true)]
    resolver_url: Option<String>,
}

/// Which side's stealth sequence to operate on.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Side {
    Mine,
    Theirs,
    Both,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate your key pair (random, from a signature, or from a raw key)
    Keygen {
        /// Force overwrite existing keys
        #[arg(short, long)]
        force: bool,

        /// Derive deterministically from a wallet signature over the fixed
        /// entropy message
        #[arg(long)]
        from_signature: Option<String>,

        /// Import a raw 32-byte private key (hex)
        #[arg(long, conflicts_with = "from_signature")]
        from_private_key: Option<String>,
    },

    /// Show your address and shareable public key
    Address,

    /// Establish the ECDH shared secret with a counterparty
    Exchange {
        /// Counterparty public key (hex)
        #[arg(long, conflicts_with = "name")]
        pubkey: Option<String>,

        /// Resolve the counterparty public key from a name record
        #[arg(long)]
        name: Option<String>,
    },

    /// Print stealth address sequences for the current exchange
    Sequence {
        /// Number of entries to derive
        #[arg(short, long, default_value = "10")]
        count: u32,

        /// First nonce of the sequence
        #[arg(long, default_value = "0")]
        start: u32,

        /// Whose sequence to derive
        #[arg(long, value_enum, default_value = "mine")]
        side: Side,

        /// Also print spending keys for your own entries
        #[arg(long)]
        show_keys: bool,
    },

    /// Encode a message into the exact transfer amount(s)
    Encode {
        /// Message text; longer than 4 characters splits into chunks
        #[arg(short, long)]
        message: String,
    },

    /// Encode a message and submit the value transfer(s)
    Send {
        /// Message text
        #[arg(short, long)]
        message: String,

        /// Funding account the node signs for
        #[arg(long)]
        from: String,

        /// Nonce to send a single (unchunked) message to
        #[arg(long, default_value = "0")]
        to_nonce: u32,
    },

    /// Scan stealth sequences for incoming messages
    Scan {
        /// Number of addresses to derive per sequence
        #[arg(short, long, default_value = "100")]
        count: u32,

        /// Whose sequence(s) to scan
        #[arg(long, value_enum, default_value = "both")]
        side: Side,
    },

    /// Query the balance of a single address
    Balance {
        /// Address to check
        #[arg(short, long)]
        address: String,
    },

    /// Show configuration and key info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let cfg = config::Config::load_or_default()?
        .with_overrides(&cli.rpc_urls, cli.resolver_url.as_deref());

    match cli.command {
        Commands::Keygen {
            force,
            from_signature,
            from_private_key,
        } => {
            keygen::run(keygen::KeygenOptions {
                force,
                from_signature,
                from_private_key,
            })?;
        }
        Commands::Address => {
            address::run()?;
        }
        Commands::Exchange { pubkey, name } => {
            exchange::run(&cfg, pubkey.as_deref(), name.as_deref()).await?;
        }
        Commands::Sequence {
            count,
            start,
            side,
            show_keys,
        } => {
            sequence::run(count, start, side, show_keys)?;
        }
        Commands::Encode { message } => {
            encode::run(&message)?;
        }
        Commands::Send {
            message,
            from,
            to_nonce,
        } => {
            send::run(&cfg, &message, &from, to_nonce).await?;
        }
        Commands::Scan { count, side } => {
            scan::run(&cfg, count, side).await?;
        }
        Commands::Balance { address } => {
            balance::run(&cfg, &address).await?;
        }
        Commands::Info => {
            info::run(&cfg)?;
        }
    }

    Ok(())
}
