use crate::config::EndpointConfig;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "iss-flyover")]
#[command(about = "Predict upcoming ISS passes over your current location")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// IP lookup endpoint
    #[arg(long, global = true)]
    pub ip_endpoint: Option<String>,

    /// Geolocation endpoint template, `{ip}` is replaced by the address
    #[arg(long, global = true)]
    pub geo_endpoint: Option<String>,

    /// Pass prediction endpoint template with `{lat}` and `{lon}`
    #[arg(long, global = true)]
    pub pass_endpoint: Option<String>,

    /// Per-request timeout in seconds (no timeout when omitted)
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the full chain: address, location, then pass times (default)
    Next,
    /// Print the caller's public IP address
    Ip,
    /// Print approximate coordinates for an address (the caller's own when omitted)
    Locate {
        #[arg(long)]
        ip: Option<String>,
    },
    /// Print pass times for explicit coordinates
    Passes {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Next)
    }

    /// Flags given on the command line win over `base`.
    pub fn apply_overrides(&self, base: EndpointConfig) -> EndpointConfig {
        EndpointConfig {
            ip_endpoint: self.ip_endpoint.clone().unwrap_or(base.ip_endpoint),
            geo_endpoint: self.geo_endpoint.clone().unwrap_or(base.geo_endpoint),
            pass_endpoint: self.pass_endpoint.clone().unwrap_or(base.pass_endpoint),
            timeout_seconds: self.timeout_seconds.or(base.timeout_seconds),
        }
    }
}
