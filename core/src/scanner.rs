//! Sequential balance scanning over a stealth sequence.
//!
//! Messages are sent densely from nonce 0 upward, so the first zero balance
//! marks the end of a sequence. Queries are issued strictly in ascending
//! nonce order and each waits for the previous result; the stopping
//! condition cannot be evaluated out of order. Two counterparties' sequences
//! are scanned independently and may run concurrently with each other.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::message::decode;
use crate::stealth::ObservedStealthEntry;

/// Failures from an external balance service.
#[derive(Debug, Error)]
pub enum BalanceError {
    #[error("all balance endpoints failed")]
    AllEndpointsFailed,

    #[error("balance query failed: {0}")]
    Query(String),
}

/// External service answering balance queries in the smallest currency unit.
#[async_trait]
pub trait BalanceSource {
    async fn balance_of(&self, address: &str) -> Result<u128, BalanceError>;
}

/// One scanned position of a stealth sequence.
#[derive(Debug, Clone)]
pub struct ScanEntry {
    pub nonce: u32,
    pub address: String,
    pub balance: u128,
    /// Decoded message, present only for non-zero balances.
    pub message: Option<String>,
}

/// Walk a stealth sequence in nonce order, decoding messages from non-zero
/// balances.
///
/// Stops at the first zero balance after recording it. A query error is
/// recorded as a zero-balance placeholder and also stops the sequence:
/// "unknown" and "empty" end a scan the same way, so network trouble yields
/// a truncated result set rather than a hard failure.
pub async fn scan_sequence<S>(source: &S, addresses: &[ObservedStealthEntry]) -> Vec<ScanEntry>
where
    S: BalanceSource + ?Sized,
{
    let mut entries = Vec::new();

    for entry in addresses {
        match source.balance_of(&entry.address).await {
            Ok(0) => {
                debug!(nonce = entry.nonce, "zero balance, stopping sequence");
                entries.push(ScanEntry {
                    nonce: entry.nonce,
                    address: entry.address.clone(),
                    balance: 0,
                    message: None,
                });
                break;
            }
            Ok(balance) => {
                let message = decode(balance);
                debug!(nonce = entry.nonce, balance, %message, "message found");
                entries.push(ScanEntry {
                    nonce: entry.nonce,
                    address: entry.address.clone(),
                    balance,
                    message: Some(message),
                });
            }
            Err(err) => {
                warn!(nonce = entry.nonce, %err, "balance query failed, stopping sequence");
                entries.push(ScanEntry {
                    nonce: entry.nonce,
                    address: entry.address.clone(),
                    balance: 0,
                    message: None,
                });
                break;
            }
        }
    }

    entries
}
