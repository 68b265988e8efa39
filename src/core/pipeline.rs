use crate::core::resolvers;
use crate::core::{Address, Coordinates, EndpointProvider, HttpFetcher, PassPipeline, PassRecord};
use crate::utils::error::{FlyoverError, Result};
use url::{form_urlencoded, Url};

/// Fills `{ip}` into the geolocation template. The address is percent-encoded
/// so it always stays a single path segment or query value.
pub fn render_geo_url(template: &str, address: &Address) -> Result<String> {
    if matches!(address.as_str(), "" | "." | "..") {
        return Err(FlyoverError::InvalidConfigValue {
            field: "ip".to_string(),
            value: address.to_string(),
            reason: "Address cannot be used as a URL path segment".to_string(),
        });
    }
    let encoded: String = form_urlencoded::byte_serialize(address.as_str().as_bytes()).collect();
    checked_url("geo_endpoint", template.replace("{ip}", &encoded))
}

/// Fills `{lat}` and `{lon}` into the pass prediction template.
pub fn render_pass_url(template: &str, coordinates: &Coordinates) -> Result<String> {
    let rendered = template
        .replace("{lat}", &coordinates.latitude.to_string())
        .replace("{lon}", &coordinates.longitude.to_string());
    checked_url("pass_endpoint", rendered)
}

fn checked_url(field: &str, rendered: String) -> Result<String> {
    match Url::parse(&rendered) {
        Ok(_) => Ok(rendered),
        Err(e) => Err(FlyoverError::InvalidConfigValue {
            field: field.to_string(),
            value: rendered,
            reason: format!("Rendered URL is invalid: {}", e),
        }),
    }
}

pub struct HttpPassPipeline<F: HttpFetcher, C: EndpointProvider> {
    fetcher: F,
    config: C,
}

impl<F: HttpFetcher, C: EndpointProvider> HttpPassPipeline<F, C> {
    pub fn new(fetcher: F, config: C) -> Self {
        Self { fetcher, config }
    }
}

#[async_trait::async_trait]
impl<F: HttpFetcher, C: EndpointProvider> PassPipeline for HttpPassPipeline<F, C> {
    async fn resolve_address(&self) -> Result<Address> {
        resolvers::resolve_address(&self.fetcher, self.config.ip_endpoint()).await
    }

    async fn resolve_location(&self, address: &Address) -> Result<Coordinates> {
        let url = render_geo_url(self.config.geo_endpoint(), address)?;
        resolvers::resolve_location(&self.fetcher, &url).await
    }

    async fn resolve_passes(&self, coordinates: &Coordinates) -> Result<Vec<PassRecord>> {
        let url = render_pass_url(self.config.pass_endpoint(), coordinates)?;
        resolvers::resolve_passes(&self.fetcher, &url).await
    }
}
