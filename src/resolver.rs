//! Public IP resolution through a JSON echo service.

use crate::error::{DdnsError, Result};
use async_trait::async_trait;
use reqwest::header::CONNECTION;
use serde::Deserialize;

/// Source of the caller's public IP address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Resolve the current public IP.
    async fn resolve(&self) -> Result<String>;
}

/// Resolver backed by an echo service answering `{"ip": "..."}`.
pub struct IpResolver {
    client: reqwest::Client,
    service: String,
}

#[derive(Debug, Deserialize)]
struct EchoResponse {
    ip: String,
}

impl IpResolver {
    /// Create a resolver for the given echo service URL.
    pub fn new(service: String) -> Self {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, service }
    }
}

#[async_trait]
impl IpSource for IpResolver {
    async fn resolve(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.service)
            .header(CONNECTION, "close")
            .send()
            .await
            .map_err(|e| DdnsError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DdnsError::Network(format!(
                "HTTP {} from {}",
                response.status(),
                self.service
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DdnsError::Network(e.to_string()))?;
        let echo: EchoResponse = serde_json::from_slice(&body)?;

        tracing::debug!("Resolved {} from {}", echo.ip, self.service);
        Ok(echo.ip)
    }
}
