//! Name-record resolution collaborator.
//!
//! A counterparty can publish their public key in the `description` text
//! record of a human-readable name. The resolver fetches the record and
//! accepts the description only when it has the shape of a hex-encoded
//! public key; anything else is a resolution failure.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// No record, no description field, or a malformed key in the record.
    #[error("no usable public key record for {0}")]
    NotFound(String),

    #[error("resolver request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct NameRecord {
    #[allow(dead_code)]
    domain: Option<String>,
    text_records: Option<TextRecords>,
}

#[derive(Deserialize)]
struct TextRecords {
    description: Option<String>,
}

pub struct NameResolver {
    base_url: String,
    http: Client,
}

impl NameResolver {
    pub fn new(cfg: &Config) -> Result<Self, ResolveError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()?;

        Ok(Self {
            base_url: cfg.resolver_url.clone(),
            http,
        })
    }

    /// Resolve a domain-like name to the public key published in its
    /// description record.
    pub async fn resolve(&self, name: &str) -> Result<String, ResolveError> {
        debug!(name, url = %self.base_url, "resolving name record");

        let records: Vec<NameRecord> = self
            .http
            .get(&self.base_url)
            .query(&[("domain", name), ("text_records", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let description = records
            .into_iter()
            .next()
            .and_then(|r| r.text_records)
            .and_then(|t| t.description)
            .ok_or_else(|| ResolveError::NotFound(name.to_string()))?;

        let key = description.trim();
        if !is_public_key_record(key) {
            return Err(ResolveError::NotFound(name.to_string()));
        }

        Ok(key.to_string())
    }
}

/// Accept only `0x` followed by exactly 64 hex digits.
fn is_public_key_record(value: &str) -> bool {
    match value.strip_prefix("0x") {
        Some(rest) => rest.len() == 64 && rest.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_canonical_key_records() {
        let record = format!("0x{}", "a1".repeat(32));
        assert!(is_public_key_record(&record));
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(!is_public_key_record(""));
        assert!(!is_public_key_record("a1b2"));
        assert!(!is_public_key_record(&"a1".repeat(32)));
        assert!(!is_public_key_record(&format!("0x{}", "a1".repeat(33))));
        assert!(!is_public_key_record(&format!("0x{}zz", "a1".repeat(31))));
    }

    #[test]
    fn deserializes_resolver_payload() {
        let json = r#"[{"domain":"alice.eth","text_records":{"description":"0xabc"}}]"#;
        let records: Vec<NameRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(
            records[0]
                .text_records
                .as_ref()
                .and_then(|t| t.description.as_deref()),
            Some("0xabc")
        );
    }
}
