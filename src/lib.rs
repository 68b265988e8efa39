pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, Command};

pub use crate::adapters::http::ReqwestFetcher;
pub use crate::app::presenter;
pub use crate::config::{toml_config::TomlConfig, EndpointConfig};
pub use crate::core::{engine::FlyoverEngine, pipeline::HttpPassPipeline};
pub use crate::domain::model::{Address, Coordinates, PassRecord};
pub use crate::utils::error::{FlyoverError, Result};
