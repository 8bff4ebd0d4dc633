//! Validation utilities for cfddns
//!
//! This module provides validation functions for configuration inputs:
//! DNS names, endpoint URLs and leftover placeholder values.

use crate::constants::{MAX_LABEL_LENGTH, MAX_RECORD_NAME_LENGTH};
use crate::error::{Error, Result};

/// Validates a fully qualified zone or record name as Cloudflare lists it
///
/// Lookups compare names byte for byte against the API's `name` field, which
/// is always the full name without a trailing dot. Rules:
///
/// - No surrounding whitespace, no `@` shorthand, no trailing dot
/// - Maximum total length 253 characters, labels at most 63
/// - Labels separated by `.`, no empty labels, no leading dot
/// - Labels cannot start or end with `-`
/// - Letters, digits, `-` and `_` are allowed; `*` only as a whole label
///
/// # Examples
///
/// ```
/// use cfddns::validation::validate_record_name;
///
/// assert!(validate_record_name("example.com").is_ok());
/// assert!(validate_record_name("home.example.com").is_ok());
/// assert!(validate_record_name("*.example.com").is_ok());
/// assert!(validate_record_name("_acme-challenge.example.com").is_ok());
///
/// assert!(validate_record_name("@").is_err());
/// assert!(validate_record_name("example.com.").is_err());
/// assert!(validate_record_name("home.example.com ").is_err());
/// assert!(validate_record_name("example..com").is_err());
/// assert!(validate_record_name("ex@mple.com").is_err());
/// ```
pub fn validate_record_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::config("Record name cannot be empty"));
    }
    if name.trim() != name {
        return Err(Error::config(format!(
            "Record name has leading or trailing whitespace: {:?}",
            name
        )));
    }
    if name == "@" {
        return Err(Error::config(
            "Record name must be the full name, not the '@' shorthand",
        ));
    }
    if name.contains(' ') {
        return Err(Error::config("Record name cannot contain spaces"));
    }
    if name.ends_with('.') {
        return Err(Error::config(format!(
            "Record name must not end with a dot: {}",
            name
        )));
    }
    if name.len() > MAX_RECORD_NAME_LENGTH {
        return Err(Error::config(format!(
            "Record name too long (max {} characters, got {})",
            MAX_RECORD_NAME_LENGTH,
            name.len()
        )));
    }
    if name.starts_with('.') {
        return Err(Error::config("Record name cannot start with a dot"));
    }
    if name.contains("..") {
        return Err(Error::config("Record name cannot contain consecutive dots"));
    }

    for label in name.split('.') {
        if label.is_empty() {
            return Err(Error::config("Record name contains empty label"));
        }
        if label == "*" {
            continue;
        }
        if label.len() > MAX_LABEL_LENGTH {
            return Err(Error::config(format!(
                "Record name label too long (max {} characters, got {})",
                MAX_LABEL_LENGTH,
                label.len()
            )));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::config(
                "Record name label cannot start or end with hyphen",
            ));
        }
        if let Some(ch) = label
            .chars()
            .find(|c| !c.is_alphanumeric() && *c != '-' && *c != '_')
        {
            return Err(Error::config(format!(
                "Record name contains invalid character: '{}' (allowed: letters, digits, '-', '_', or wildcard labels)",
                ch
            )));
        }
    }

    Ok(())
}

/// Validates that an endpoint is an absolute http(s) URL
pub fn validate_http_url(field: &str, url: &str) -> Result<()> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| {
            Error::config(format!(
                "{} must start with http:// or https://, got: {}",
                field, url
            ))
        })?;
    if rest.is_empty() || rest.starts_with('/') {
        return Err(Error::config(format!("{} has no host: {}", field, url)));
    }
    Ok(())
}

/// Values shipped in the sample `etc/config.toml`
const SAMPLE_VALUES: &[&str] = &[
    "your-cloudflare-email",
    "your-auth-key",
    "the-cloudflare-zone-name(e.g. example.com)",
    "the-record-name(e.g. subdomain.example.com)",
];

/// Returns true for values copied verbatim from the sample config
pub fn is_placeholder(value: &str) -> bool {
    SAMPLE_VALUES.contains(&value.trim())
}
