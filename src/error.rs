//! Error types for dnsimple-ddns.

use thiserror::Error;

/// Result type alias for dnsimple-ddns.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// DDNS error types.
#[derive(Error, Debug)]
pub enum DdnsError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote service could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The remote service answered with a body we could not decode.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The remote service answered with an unexpected status.
    #[error("{operation} failed: {reason} ({status})")]
    Api {
        operation: &'static str,
        status: u16,
        reason: String,
    },

    /// A record is missing data required for the requested operation.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DdnsError {
    /// Build an API error from a response status.
    pub fn api(operation: &'static str, status: reqwest::StatusCode) -> Self {
        DdnsError::Api {
            operation,
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string(),
        }
    }
}

impl From<reqwest::Error> for DdnsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            DdnsError::Parse(e.to_string())
        } else {
            DdnsError::Network(e.to_string())
        }
    }
}

impl From<toml::de::Error> for DdnsError {
    fn from(e: toml::de::Error) -> Self {
        DdnsError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for DdnsError {
    fn from(e: serde_json::Error) -> Self {
        DdnsError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = DdnsError::api("Record creation", reqwest::StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Record creation failed: Unauthorized (401)");
    }

    #[test]
    fn test_json_error_is_parse() {
        let err: DdnsError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, DdnsError::Parse(_)));
    }
}
