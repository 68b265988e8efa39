pub mod engine;
pub mod pipeline;
pub mod resolvers;

pub use crate::domain::model::{
    Address, Coordinates, GeoLookupResponse, HttpResponse, IpLookupResponse,
    PassPredictionResponse, PassRecord,
};
pub use crate::domain::ports::{EndpointProvider, HttpFetcher, PassPipeline};
pub use crate::utils::error::Result;
