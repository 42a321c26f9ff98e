//! Gateway configuration
//!
//! Loaded from `JALKI_*` environment variables, with code overrides for
//! embedders that wire things up programmatically.

use crate::dispatch::DEFAULT_MAX_BODY_BYTES;
use crate::error::GatewayError;
use std::net::SocketAddr;
use std::str::FromStr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Machine-readable JSON lines.
    Json,
    /// Human-readable output for development.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(GatewayError::Config(format!(
                "unknown log format '{other}', expected 'json' or 'pretty'"
            ))),
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// gRPC listen address.
    pub grpc_addr: SocketAddr,
    /// Maximum encoded payload size accepted by the request factory.
    pub max_body_bytes: usize,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from `JALKI_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self, GatewayError> {
        let grpc_addr = parse_addr(&env_or("JALKI_GRPC_ADDR", "0.0.0.0:50051"))?;
        let max_body_bytes = parse_size(&env_or(
            "JALKI_MAX_BODY_BYTES",
            &DEFAULT_MAX_BODY_BYTES.to_string(),
        ))?;
        let log_level = env_or("JALKI_LOG_LEVEL", "info");
        let log_format = env_or("JALKI_LOG_FORMAT", "pretty").parse()?;

        Ok(Self {
            grpc_addr,
            max_body_bytes,
            log_level,
            log_format,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grpc_addr: SocketAddr::from(([0, 0, 0, 0], 50051)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_addr(value: &str) -> Result<SocketAddr, GatewayError> {
    value
        .parse()
        .map_err(|e| GatewayError::Config(format!("invalid listen address '{value}': {e}")))
}

fn parse_size(value: &str) -> Result<usize, GatewayError> {
    value
        .parse()
        .map_err(|e| GatewayError::Config(format!("invalid byte size '{value}': {e}")))
}

/// Initialise the tracing subscriber based on config.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_tracing(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.log_format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Pretty => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.grpc_addr.port(), 50051);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_parse_addr() {
        assert_eq!(
            parse_addr("127.0.0.1:9000").unwrap(),
            SocketAddr::from(([127, 0, 0, 1], 9000))
        );
        assert!(parse_addr("not-an-addr").is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1024").unwrap(), 1024);
        assert!(parse_size("4mb").is_err());
    }
}
