//! DNS provider abstraction layer
//!
//! This module defines the entities exchanged with the DNS provider and the
//! trait the update orchestrator drives. Cloudflare is the only implementation;
//! the trait exists so the orchestration can be exercised without a network.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

//==============================================================================
// Types
//==============================================================================

/// A provider-managed domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
}

/// One DNS resource record as returned by the provider
///
/// The record is fetched, its `content` is replaced locally and the whole
/// value is sent back. Serialization omits every field that is unset, `false`,
/// zero or empty, which is what the update endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub record_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "is_unset_flag")]
    pub proxiable: Option<bool>,
    #[serde(default, skip_serializing_if = "is_unset_flag")]
    pub proxied: Option<bool>,
    #[serde(default, skip_serializing_if = "is_unset_ttl")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "is_unset_flag")]
    pub locked: Option<bool>,
    #[serde(default, skip_serializing_if = "is_unset_text")]
    pub zone_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset_text")]
    pub zone_name: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset_text")]
    pub created_on: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset_text")]
    pub modified_on: Option<String>,
}

impl DnsRecord {
    /// Minimal record with only the four identifying fields set
    pub fn new(
        id: impl Into<String>,
        record_type: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            record_type: record_type.into(),
            name: name.into(),
            content: content.into(),
            proxiable: None,
            proxied: None,
            ttl: None,
            locked: None,
            zone_id: None,
            zone_name: None,
            created_on: None,
            modified_on: None,
        }
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DNS {} {} -> {} (TTL: {}, Proxied: {})",
            self.record_type,
            self.name,
            self.content,
            self.ttl.unwrap_or(0),
            self.proxied.unwrap_or(false)
        )
    }
}

fn is_unset_flag(v: &Option<bool>) -> bool {
    !v.unwrap_or(false)
}

fn is_unset_ttl(v: &Option<u32>) -> bool {
    v.unwrap_or(0) == 0
}

fn is_unset_text(v: &Option<String>) -> bool {
    v.as_deref().map_or(true, str::is_empty)
}

/// Provider verdict on an update call
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

/// Error entry from a provider response envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: u64,
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

//==============================================================================
// Trait
//==============================================================================

/// DNS provider operations needed by the updater
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Finds the zone whose name matches exactly; first match wins
    ///
    /// # Errors
    ///
    /// `Error::ZoneNotFound` when no zone carries the name, or any gateway error.
    async fn resolve_zone(&self, name: &str) -> Result<Zone>;

    /// Finds the record in `zone_id` whose name matches exactly; first match wins
    ///
    /// # Errors
    ///
    /// `Error::RecordNotFound` when no record carries the name, or any gateway error.
    async fn resolve_record(&self, name: &str, zone_id: &str) -> Result<DnsRecord>;

    /// Sends the full record back to the provider
    async fn update_record(&self, zone_id: &str, record: &DnsRecord) -> Result<UpdateResult>;
}

//==============================================================================
// Tests
//==============================================================================
