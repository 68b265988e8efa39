use crate::domain::model::HttpResponse;
use crate::domain::ports::{EndpointProvider, HttpFetcher};
use crate::utils::error::{FlyoverError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// `HttpFetcher` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| FlyoverError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })?;
        Ok(Self { client })
    }

    /// Builds a fetcher honouring the configured request timeout.
    pub fn from_config<C: EndpointProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(config.timeout())
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FlyoverError::transport(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FlyoverError::transport(url, e))?;

        Ok(HttpResponse { status, body })
    }
}
