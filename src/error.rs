//! Error types for cfddns
//!
//! Every failure the updater can surface is a variant of [`Error`]. The
//! binary wraps these in `anyhow` only at the top level.

use thiserror::Error;

/// Result type alias for cfddns operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing, placeholder or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network-level failure on any outbound HTTP call
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not the JSON shape we expected (or a payload failed to encode)
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Provider answered with a non-2xx status
    #[error("Cloudflare API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("requested zone name '{name}' was not found")]
    ZoneNotFound { name: String },

    #[error("requested dns record name '{name}' was not found for the zone id '{zone_id}'")]
    RecordNotFound { name: String, zone_id: String },

    /// Provider accepted the request but reported `success: false`
    #[error("unsuccessful updating DNS to '{ip}' for record '{record}'")]
    UpdateRejected { ip: String, record: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for the two lookup misses
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ZoneNotFound { .. } | Self::RecordNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages_carry_keys() {
        let zone = Error::ZoneNotFound {
            name: "example.com".to_string(),
        };
        assert_eq!(
            zone.to_string(),
            "requested zone name 'example.com' was not found"
        );
        assert!(zone.is_not_found());

        let record = Error::RecordNotFound {
            name: "home.example.com".to_string(),
            zone_id: "z1".to_string(),
        };
        let msg = record.to_string();
        assert!(msg.contains("home.example.com"));
        assert!(msg.contains("z1"));
        assert!(record.is_not_found());
    }

    #[test]
    fn test_update_rejected_message() {
        let err = Error::UpdateRejected {
            ip: "203.0.113.10".to_string(),
            record: "home.example.com".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("203.0.113.10"));
        assert!(msg.contains("home.example.com"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_decode_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Decode(_)));
        assert!(err.to_string().starts_with("Decode error"));
    }
}
