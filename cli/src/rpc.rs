//! JSON-RPC collaborators: balance queries and value transfers.
//!
//! Balance queries walk the configured endpoint list in order and accept the
//! first well-formed successful response. Transfers go to the first endpoint
//! only; retrying a transfer elsewhere could submit it twice.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use stealthgram_core::{BalanceError, BalanceSource};

use crate::config::Config;

/// Failures from the transfer collaborator.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("transfer rejected: {0}")]
    Rejected(String),

    #[error("no RPC endpoint configured")]
    NoEndpoint,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Client over the configured ordered endpoint list.
pub struct RpcClient {
    endpoints: Vec<String>,
    http: Client,
}

impl RpcClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            endpoints: cfg.rpc_endpoints.clone(),
            http,
        })
    }

    /// Query a balance, trying each endpoint in order.
    pub async fn fetch_balance(&self, address: &str) -> Result<u128, BalanceError> {
        let request = json!({
            "jsonrpc": "2.0",
            "method": "eth_getBalance",
            "params": [address, "latest"],
            "id": 1,
        });

        for endpoint in &self.endpoints {
            match self.post(endpoint, &request).await {
                Ok(JsonRpcResponse {
                    result: Some(result),
                    error: None,
                }) => {
                    let quantity = match result.as_str() {
                        Some(s) => s,
                        None => {
                            debug!(%endpoint, "non-string balance result, trying next endpoint");
                            continue;
                        }
                    };
                    match parse_hex_quantity(quantity) {
                        Ok(balance) => return Ok(balance),
                        Err(_) => {
                            debug!(%endpoint, quantity, "unparseable balance, trying next endpoint");
                            continue;
                        }
                    }
                }
                Ok(JsonRpcResponse { error: Some(err), .. }) => {
                    debug!(%endpoint, code = err.code, message = %err.message, "RPC error");
                }
                Ok(_) => {
                    debug!(%endpoint, "response carried neither result nor error");
                }
                Err(err) => {
                    debug!(%endpoint, %err, "endpoint unreachable");
                }
            }
        }

        Err(BalanceError::AllEndpointsFailed)
    }

    /// Submit a value transfer signed by a node-managed account.
    pub async fn send_transfer(
        &self,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<String, TransferError> {
        let endpoint = self.endpoints.first().ok_or(TransferError::NoEndpoint)?;

        let request = json!({
            "jsonrpc": "2.0",
            "method": "eth_sendTransaction",
            "params": [{
                "from": from,
                "to": to,
                "value": format!("0x{amount:x}"),
            }],
            "id": 1,
        });

        let response = self
            .post(endpoint, &request)
            .await
            .map_err(|e| TransferError::Rejected(e.to_string()))?;

        if let Some(err) = response.error {
            return Err(TransferError::Rejected(err.message));
        }
        match response.result.and_then(|r| r.as_str().map(String::from)) {
            Some(tx_hash) => Ok(tx_hash),
            None => Err(TransferError::Rejected(
                "node returned no transaction hash".to_string(),
            )),
        }
    }

    async fn post(
        &self,
        endpoint: &str,
        request: &serde_json::Value,
    ) -> Result<JsonRpcResponse, reqwest::Error> {
        self.http
            .post(endpoint)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl BalanceSource for RpcClient {
    async fn balance_of(&self, address: &str) -> Result<u128, BalanceError> {
        self.fetch_balance(address).await
    }
}

/// Parse a `0x`-prefixed hex quantity into the smallest currency unit.
fn parse_hex_quantity(quantity: &str) -> Result<u128> {
    let stripped = quantity.strip_prefix("0x").unwrap_or(quantity);
    if stripped.is_empty() {
        anyhow::bail!("empty quantity");
    }
    u128::from_str_radix(stripped, 16).context("invalid hex quantity")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_quantities() {
        assert_eq!(parse_hex_quantity("0x0").unwrap(), 0);
        assert_eq!(parse_hex_quantity("0x10").unwrap(), 16);
        assert_eq!(
            parse_hex_quantity("0x108ca6a7d97877").unwrap(),
            0x108ca6a7d97877
        );
        assert_eq!(parse_hex_quantity("ff").unwrap(), 255);
    }

    #[test]
    fn rejects_malformed_quantities() {
        assert!(parse_hex_quantity("0x").is_err());
        assert!(parse_hex_quantity("0xzz").is_err());
        assert!(parse_hex_quantity("").is_err());
    }

    #[test]
    fn deserializes_success_and_error_responses() {
        let ok: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"0x1a"}"#).unwrap();
        assert_eq!(ok.result.unwrap().as_str(), Some("0x1a"));
        assert!(ok.error.is_none());

        let err: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"insufficient funds"}}"#,
        )
        .unwrap();
        assert!(err.result.is_none());
        assert_eq!(err.error.unwrap().message, "insufficient funds");
    }
}
