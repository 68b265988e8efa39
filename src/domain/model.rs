use serde::{Deserialize, Serialize};
use std::fmt;

/// Public network address of the caller, as reported by the IP lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One predicted pass: `risetime` is seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassRecord {
    pub risetime: u64,
    pub duration: u64,
}

impl PassRecord {
    pub fn new(risetime: u64, duration: u64) -> Self {
        Self { risetime, duration }
    }
}

/// Raw outcome of a GET, before any status or body interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

// Wire formats of the upstream services. Unknown fields are ignored.

#[derive(Debug, Deserialize)]
pub struct IpLookupResponse {
    pub ip: String,
}

#[derive(Debug, Deserialize)]
pub struct GeoLookupResponse {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct PassPredictionResponse {
    pub response: Vec<PassRecord>,
}
