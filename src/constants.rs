//! Common constants used throughout the cfddns application

//==============================================================================
// Cloudflare API Constants
//==============================================================================

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// User agent string for outbound requests
pub const USER_AGENT: &str = "cfddns/1.0";

/// Header carrying the account email
pub const HEADER_AUTH_EMAIL: &str = "X-Auth-Email";

/// Header carrying the global API key
pub const HEADER_AUTH_KEY: &str = "X-Auth-Key";

//==============================================================================
// External IP Constants
//==============================================================================

/// Plain-text IP echo service
pub const DEFAULT_IP_SERVICE_URL: &str = "http://checkip.amazonaws.com";

//==============================================================================
// Timeout Constants
//==============================================================================

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Minimum HTTP request timeout in seconds
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum HTTP request timeout in seconds
pub const MAX_TIMEOUT_SECS: u64 = 300;

//==============================================================================
// Validation Constants
//==============================================================================

/// Maximum DNS record name length in characters
pub const MAX_RECORD_NAME_LENGTH: usize = 253;

/// Maximum DNS label length in characters
pub const MAX_LABEL_LENGTH: usize = 63;

/// Default config file location, read when present
pub const DEFAULT_CONFIG_PATH: &str = "/etc/cfddns/config.toml";

//==============================================================================
// Environment Variable Names
//==============================================================================

/// Environment variable name for the Cloudflare account email
pub const ENV_AUTH_EMAIL: &str = "CLOUDFLARE_AUTH_EMAIL";

/// Environment variable name for the Cloudflare global API key
pub const ENV_AUTH_KEY: &str = "CLOUDFLARE_AUTH_KEY";

/// Environment variable name for the zone name (e.g. example.com)
pub const ENV_ZONE_NAME: &str = "CLOUDFLARE_ZONE_NAME";

/// Environment variable name for DNS record name
pub const ENV_RECORD_NAME: &str = "CLOUDFLARE_RECORD_NAME";

/// Environment variable name for the API base URL
pub const ENV_API_BASE: &str = "CLOUDFLARE_API_BASE";

/// Environment variable name for the IP echo service URL
pub const ENV_IP_SERVICE_URL: &str = "CFDDNS_IP_SERVICE_URL";

/// Environment variable name for the HTTP timeout (seconds)
pub const ENV_TIMEOUT: &str = "CFDDNS_TIMEOUT";

/// Environment variable name for verbose logging
pub const ENV_VERBOSE: &str = "CFDDNS_VERBOSE";
