use crate::domain::model::{Address, Coordinates, HttpResponse, PassRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Performs a plain GET and reports the status and body, or a transport failure.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<HttpResponse>;
}

pub trait EndpointProvider: Send + Sync {
    fn ip_endpoint(&self) -> &str;
    /// Template containing an `{ip}` placeholder.
    fn geo_endpoint(&self) -> &str;
    /// Template containing `{lat}` and `{lon}` placeholders.
    fn pass_endpoint(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
}

/// The three dependent lookups, each fed the output of the previous one.
#[async_trait]
pub trait PassPipeline: Send + Sync {
    async fn resolve_address(&self) -> Result<Address>;
    async fn resolve_location(&self, address: &Address) -> Result<Coordinates>;
    async fn resolve_passes(&self, coordinates: &Coordinates) -> Result<Vec<PassRecord>>;
}
