//! External IP lookup
//!
//! Asks a plain-text echo service (checkip.amazonaws.com by default) which
//! address our requests come from. The request is unauthenticated and uses
//! its own client, separate from the provider client.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::constants::USER_AGENT;
use crate::error::Result;

/// Source of the caller's current public address
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Returns the address as text, surrounding whitespace removed
    async fn fetch_external_ip(&self) -> Result<String>;
}

/// HTTP echo-service IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpIpSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl IpSource for HttpIpSource {
    async fn fetch_external_ip(&self) -> Result<String> {
        debug!("GET {}", self.url);
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let ip = normalize_ip_text(&body);

        if ip.parse::<IpAddr>().is_err() {
            warn!("IP service returned text that is not an IP address: {:?}", ip);
        }
        Ok(ip)
    }
}

/// Strips the trailing newline (and any other edge whitespace) echo services emit
pub fn normalize_ip_text(body: &str) -> String {
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trailing_newline() {
        assert_eq!(normalize_ip_text("198.51.100.4\n"), "198.51.100.4");
    }

    #[test]
    fn test_normalize_surrounding_whitespace() {
        assert_eq!(normalize_ip_text("  \t2001:db8::1 \r\n"), "2001:db8::1");
        assert_eq!(normalize_ip_text("\n"), "");
    }

    #[test]
    fn test_normalize_keeps_garbage_unchanged() {
        assert_eq!(normalize_ip_text("not-an-ip\n"), "not-an-ip");
    }
}
