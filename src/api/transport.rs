use super::constants::{CONTENT_TYPE, USER_AGENT};
use crate::error::Result;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{CONTENT_TYPE as CONTENT_TYPE_HEADER, HeaderMap, HeaderValue};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one request body to a URL and returns the raw response.
///
/// Implementations must not retry; failures surface to the caller as-is.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse>;
}

/// reqwest backed transport with connection pooling
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE_HEADER, HeaderValue::from_static(CONTENT_TYPE));

        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self::with_client(http_client))
    }

    /// Use a preconfigured client; it must already send the gateway content type
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse> {
        debug!("POST {} ({} bytes)", url, body.len());
        let response = self.http_client.post(url).body(body).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("Response status: {}", status);
        Ok(TransportResponse { status, body })
    }
}
