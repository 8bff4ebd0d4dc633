//! Cloudflare API client for DNS operations
//!
//! Uses reqwest with rustls for HTTP requests. Authentication is the
//! email + global API key header pair.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::constants::{HEADER_AUTH_EMAIL, HEADER_AUTH_KEY, USER_AGENT};
use crate::dns_provider::{ApiError, DnsProvider, DnsRecord, UpdateResult, Zone};
use crate::error::{Error, Result};

//==============================================================================
// Types
//==============================================================================

/// `{ "result": [...] }` envelope of the list endpoints
#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    result: Vec<T>,
}

/// Error-shaped body returned with non-2xx statuses
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ApiError>,
}

//==============================================================================
// Client
//==============================================================================

pub struct CloudflareClient {
    api_base: String,
    auth_email: Zeroizing<String>,
    auth_key: Zeroizing<String>,
    client: reqwest::Client,
}

impl fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareClient")
            .field("api_base", &self.api_base)
            .field("auth_email", &self.auth_email.as_str())
            .field("auth_key", &"<REDACTED>")
            .finish()
    }
}

impl CloudflareClient {
    pub fn new(
        api_base: &str,
        auth_email: &str,
        auth_key: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            auth_email: Zeroizing::new(auth_email.to_string()),
            auth_key: Zeroizing::new(auth_key.to_string()),
            client,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn zones_url(&self) -> String {
        format!("{}/zones", self.api_base)
    }

    fn records_url(&self, zone_id: &str) -> String {
        format!("{}/zones/{}/dns_records", self.api_base, zone_id)
    }

    fn record_url(&self, zone_id: &str, record_id: &str) -> String {
        format!("{}/zones/{}/dns_records/{}", self.api_base, zone_id, record_id)
    }

    /// Authenticated GET, body decoded as `T`
    pub async fn fetch_json<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .header(HEADER_AUTH_EMAIL, self.auth_email.as_str())
            .header(HEADER_AUTH_KEY, self.auth_key.as_str())
            .send()
            .await?;
        decode_response(resp).await
    }

    /// Authenticated PUT of a pre-serialized JSON payload, body decoded as `T`
    pub async fn send_json<T>(&self, url: &str, payload: Vec<u8>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!("PUT {} ({} bytes)", url, payload.len());
        let resp = self
            .client
            .put(url)
            .header(HEADER_AUTH_EMAIL, self.auth_email.as_str())
            .header(HEADER_AUTH_KEY, self.auth_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;
        decode_response(resp).await
    }
}

#[async_trait]
impl DnsProvider for CloudflareClient {
    async fn resolve_zone(&self, name: &str) -> Result<Zone> {
        let zones: ListResponse<Zone> = self.fetch_json(&self.zones_url()).await?;
        debug!("Scanning {} zone(s) for {}", zones.result.len(), name);

        find_by_name(zones.result, name, |z| z.name.as_str()).ok_or_else(|| {
            Error::ZoneNotFound {
                name: name.to_string(),
            }
        })
    }

    async fn resolve_record(&self, name: &str, zone_id: &str) -> Result<DnsRecord> {
        let records: ListResponse<DnsRecord> =
            self.fetch_json(&self.records_url(zone_id)).await?;
        debug!("Scanning {} record(s) for {}", records.result.len(), name);

        find_by_name(records.result, name, |r| r.name.as_str()).ok_or_else(|| {
            Error::RecordNotFound {
                name: name.to_string(),
                zone_id: zone_id.to_string(),
            }
        })
    }

    async fn update_record(&self, zone_id: &str, record: &DnsRecord) -> Result<UpdateResult> {
        let zone_id = record
            .zone_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(zone_id);
        let payload = serde_json::to_vec(record)?;
        self.send_json(&self.record_url(zone_id, &record.id), payload)
            .await
    }
}

/// First element whose name equals `name` exactly, in provider order
fn find_by_name<T, F>(items: Vec<T>, name: &str, key: F) -> Option<T>
where
    F: Fn(&T) -> &str,
{
    items.into_iter().find(|item| key(item) == name)
}

/// Reads the whole body, rejects non-2xx statuses, then decodes JSON
async fn decode_response<T>(resp: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = resp.status();
    let body = resp.bytes().await?;

    if !status.is_success() {
        return Err(Error::Api {
            status: status.as_u16(),
            message: error_message(status, &body),
        });
    }

    Ok(serde_json::from_slice(&body)?)
}

fn error_message(status: StatusCode, body: &[u8]) -> String {
    let envelope: ErrorEnvelope = serde_json::from_slice(body).unwrap_or_default();
    if envelope.errors.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string();
    }
    envelope
        .errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

//==============================================================================
// Tests
//==============================================================================
