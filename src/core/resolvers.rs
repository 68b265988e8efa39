use crate::core::{
    Address, Coordinates, GeoLookupResponse, HttpFetcher, HttpResponse, IpLookupResponse,
    PassPredictionResponse, PassRecord,
};
use crate::utils::error::{FlyoverError, Result};
use serde::de::DeserializeOwned;

/// Fetch `url` and reject non-2xx responses. Transport errors pass through untouched.
async fn fetch_ok<F: HttpFetcher + ?Sized>(fetcher: &F, url: &str) -> Result<HttpResponse> {
    tracing::debug!("GET {}", url);
    let response = fetcher.fetch(url).await?;
    tracing::debug!("{} answered with status {}", url, response.status);

    if !response.is_success() {
        return Err(FlyoverError::HttpStatus {
            url: url.to_string(),
            status: response.status,
            body: response.body,
        });
    }
    Ok(response)
}

fn parse_body<T: DeserializeOwned>(context: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| FlyoverError::parse(context, e))
}

pub async fn resolve_address<F: HttpFetcher + ?Sized>(fetcher: &F, url: &str) -> Result<Address> {
    let response = fetch_ok(fetcher, url).await?;
    let parsed: IpLookupResponse = parse_body("IP lookup", &response.body)?;
    Ok(Address::new(parsed.ip))
}

pub async fn resolve_location<F: HttpFetcher + ?Sized>(
    fetcher: &F,
    url: &str,
) -> Result<Coordinates> {
    let response = fetch_ok(fetcher, url).await?;
    let parsed: GeoLookupResponse = parse_body("geolocation", &response.body)?;
    Ok(Coordinates::new(parsed.latitude, parsed.longitude))
}

/// Returns the pass list unwrapped from its `response` envelope, in upstream order.
pub async fn resolve_passes<F: HttpFetcher + ?Sized>(
    fetcher: &F,
    url: &str,
) -> Result<Vec<PassRecord>> {
    let response = fetch_ok(fetcher, url).await?;
    if response.is_empty() {
        return Err(FlyoverError::EmptyResult {
            url: url.to_string(),
        });
    }
    let envelope: PassPredictionResponse = parse_body("pass prediction", &response.body)?;
    Ok(envelope.response)
}
