//! cfddns - one-shot dynamic DNS updater for a Cloudflare record
//!
//! Architecture:
//! - `cloudflare`: authenticated JSON gateway plus zone/record lookup and update
//! - `external_ip`: plain-text echo service lookup of the public address
//! - `updater`: zone -> record -> IP -> conditional PUT, strictly in order
//! - `config`: TOML file with environment overrides, validated up front

pub mod cloudflare;
pub mod config;
pub mod constants;
pub mod dns_provider;
pub mod error;
pub mod external_ip;
pub mod updater;
pub mod validation;

pub use cloudflare::CloudflareClient;
pub use config::Config;
pub use dns_provider::{DnsProvider, DnsRecord, UpdateResult, Zone};
pub use error::{Error, Result};
pub use external_ip::{HttpIpSource, IpSource};
pub use updater::{Outcome, RunError, Step, Updater};
