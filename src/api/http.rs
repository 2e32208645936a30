//! reqwest-backed transport for the news API.
//!
//! Endpoints are plain JSON GETs:
//! - `GET /news?category=&start=&end=`
//! - `GET /ad`
//! - `GET /today-threat`

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::api::{Resource, Transport, TransportError};

pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(TransportError::Config("base URL is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn get(
        &self,
        resource: Resource,
        query: &[(&'static str, String)],
    ) -> Result<serde_json::Value, TransportError> {
        let url = format!("{}/{}", self.base_url, resource.path());
        info!("GET {} query={:?}", url, query);

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        debug!("{} response status: {}", resource.path(), status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match body.trim() {
                "" => status.canonical_reason().unwrap_or("request failed").to_string(),
                trimmed => trimmed.to_string(),
            };
            warn!("{} API error: {} - {}", resource.path(), status.as_u16(), message);
            return Err(TransportError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let transport =
            HttpTransport::new("http://10.0.2.2:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.base_url(), "http://10.0.2.2:8080");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let result = HttpTransport::new("  ", Duration::from_secs(1));
        assert!(matches!(result, Err(TransportError::Config(_))));
    }
}
