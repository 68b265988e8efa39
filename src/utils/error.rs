use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlyoverError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Status Code {status} when fetching {url}. Response: {body}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Failed to parse {context}: {message}")]
    Parse { context: String, message: String },

    #[error("Empty response from {url}")]
    EmptyResult { url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl FlyoverError {
    pub fn transport(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub fn parse(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            context: context.to_string(),
            message: err.to_string(),
        }
    }

    /// True for errors raised while talking to an upstream service, as
    /// opposed to local configuration problems.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. }
                | Self::HttpStatus { .. }
                | Self::Parse { .. }
                | Self::EmptyResult { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Transport { url, .. } => format!("Could not reach {}", url),
            Self::HttpStatus { status, url, .. } => {
                format!("The service at {} answered with status {}", url, status)
            }
            Self::Parse { context, .. } => format!("Unexpected {} response", context),
            Self::EmptyResult { url } => format!("No pass data returned by {}", url),
            Self::Io(e) => format!("File access failed: {}", e),
            Self::ConfigError { message } => format!("Invalid configuration: {}", message),
            Self::InvalidConfigValue { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "Check your network connection and try again",
            Self::HttpStatus { status, .. } if *status == 429 => {
                "The service is rate limiting requests, wait a moment before retrying"
            }
            Self::HttpStatus { .. } => "The upstream service may be down, try again later",
            Self::Parse { .. } => "The endpoint may have changed its format, check the configured URL",
            Self::EmptyResult { .. } => "The pass prediction service returned nothing, try again later",
            Self::Io(_) => "Make sure the file exists and is readable",
            Self::ConfigError { .. } | Self::InvalidConfigValue { .. } => {
                "Fix the configuration file or command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FlyoverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message_carries_code_and_body() {
        let err = FlyoverError::HttpStatus {
            url: "https://api.ipify.org".to_string(),
            status: 503,
            body: "try later".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("try later"));
        assert!(err.is_upstream());
    }

    #[test]
    fn test_config_errors_are_not_upstream() {
        let err = FlyoverError::ConfigError {
            message: "endpoints.ip is empty".to_string(),
        };
        assert!(!err.is_upstream());
        assert_eq!(
            err.recovery_suggestion(),
            "Fix the configuration file or command line flags"
        );
    }
}
