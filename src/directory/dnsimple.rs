//! DNSimple v1 records API, authenticated with a domain token.

use super::RecordDirectory;
use crate::config::Config;
use crate::error::{DdnsError, Result};
use crate::record::{Record, RecordEnvelope};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONNECTION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};

const TOKEN_HEADER: &str = "X-DNSimple-Domain-Token";

/// DNSimple record directory for a single domain.
pub struct DnsimpleDirectory {
    client: reqwest::Client,
    token: String,
    domain: String,
    ttl: u32,
    base_url: String,
}

impl DnsimpleDirectory {
    /// Create a directory from the runtime configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(
            config.domain_token.clone(),
            config.domain.clone(),
            config.ttl,
            config.api_base_url(),
        )
    }

    /// Create with custom base URL (for testing).
    pub fn with_base_url(token: String, domain: String, ttl: u32, base_url: String) -> Self {
        // Every request closes its connection, so nothing is kept idle.
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            token,
            domain,
            ttl,
            base_url,
        }
    }

    fn records_url(&self) -> String {
        format!("{}/v1/domains/{}/records", self.base_url, self.domain)
    }

    fn record_url(&self, id: u64) -> String {
        format!("{}/{}", self.records_url(), id)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let json = HeaderValue::from_static("application/json");
        headers.insert("Accepts", json.clone());
        headers.insert(CONTENT_TYPE, json);
        headers.insert(
            TOKEN_HEADER,
            HeaderValue::from_str(&self.token)
                .map_err(|e| DdnsError::Config(format!("invalid domain token: {}", e)))?,
        );
        headers.insert(CONNECTION, HeaderValue::from_static("close"));
        Ok(headers)
    }

    fn request(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        tracing::debug!("{} {}", method, url);
        Ok(self.client.request(method, url).headers(self.headers()?))
    }

    async fn send_record(
        &self,
        method: Method,
        url: &str,
        record: Record,
        expected: StatusCode,
        operation: &'static str,
    ) -> Result<()> {
        let body = serde_json::to_vec(&RecordEnvelope::from(record))?;
        let response = self.request(method, url)?.body(body).send().await?;

        if response.status() != expected {
            return Err(DdnsError::api(operation, response.status()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordDirectory for DnsimpleDirectory {
    async fn list(&self) -> Result<Vec<Record>> {
        let response = self
            .request(Method::GET, &self.records_url())?
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DdnsError::api("Record listing", response.status()));
        }

        let body = response.bytes().await?;
        let records: Vec<RecordEnvelope> = serde_json::from_slice(&body)?;
        Ok(records.into_iter().map(|envelope| envelope.record).collect())
    }

    async fn create(&self, name: &str, ip: &str) -> Result<()> {
        self.send_record(
            Method::POST,
            &self.records_url(),
            Record::new_a(name, ip, self.ttl),
            StatusCode::CREATED,
            "Record creation",
        )
        .await
    }

    async fn update(&self, record: &Record, ip: &str) -> Result<()> {
        let id = record.id.ok_or_else(|| {
            DdnsError::InvalidRecord(format!("record {} has no id", record.name))
        })?;

        self.send_record(
            Method::PUT,
            &self.record_url(id),
            record.clone().retarget(ip, self.ttl),
            StatusCode::OK,
            "Record update",
        )
        .await
    }
}
