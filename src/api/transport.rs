use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while talking to the news API.
/// All of them end up as an `Envelope::Error` at the fetch boundary.
#[derive(Debug)]
pub enum TransportError {
    /// Transport misconfigured (bad base URL, client build failure).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status.
    Api { status: u16, message: String },
    /// Body was not valid JSON, or not the shape we expected.
    Parse(String),
}

impl TransportError {
    /// The underlying failure message, without the kind prefix used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            TransportError::Config(msg)
            | TransportError::Network(msg)
            | TransportError::Parse(msg) => msg,
            TransportError::Api { message, .. } => message,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Config(msg) => write!(f, "config error: {msg}"),
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            TransportError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// The read-only endpoints the client knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    News,
    Ad,
    TodayThreat,
}

impl Resource {
    /// Path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Resource::News => "news",
            Resource::Ad => "ad",
            Resource::TodayThreat => "today-threat",
        }
    }
}

/// Query pairs for a request. Only present values are included.
pub type Query = Vec<(&'static str, String)>;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Returns the name of the transport, for logs.
    fn name(&self) -> &str;

    /// Issues exactly one GET for `resource` and returns the parsed JSON body.
    async fn get(
        &self,
        resource: Resource,
        query: &[(&'static str, String)],
    ) -> Result<serde_json::Value, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        assert_eq!(Resource::News.path(), "news");
        assert_eq!(Resource::Ad.path(), "ad");
        assert_eq!(Resource::TodayThreat.path(), "today-threat");
    }

    #[test]
    fn test_message_strips_kind() {
        let err = TransportError::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.message(), "Internal Server Error");
        assert_eq!(err.to_string(), "API error (HTTP 500): Internal Server Error");

        let err = TransportError::Network(String::new());
        assert_eq!(err.message(), "");
    }
}
