use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::screening::RankingConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub ranking: RankingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            ranking: load_ranking()?,
        })
    }
}

fn load_ranking() -> Result<RankingConfig, ConfigError> {
    let defaults = RankingConfig::default();

    let qualified_cutoff = cutoff_from_env("SCREENING_QUALIFIED_CUTOFF")?
        .unwrap_or(defaults.qualified_cutoff);
    let reserve_cutoff =
        cutoff_from_env("SCREENING_RESERVE_CUTOFF")?.unwrap_or(defaults.reserve_cutoff);
    if reserve_cutoff < qualified_cutoff {
        return Err(ConfigError::InvertedCutoffs {
            qualified: qualified_cutoff,
            reserve: reserve_cutoff,
        });
    }

    let tie_break = match env::var("SCREENING_TIE_BREAK") {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" | "" => false,
            _ => return Err(ConfigError::InvalidFlag { name: "SCREENING_TIE_BREAK" }),
        },
        Err(_) => defaults.tie_break,
    };

    Ok(RankingConfig {
        qualified_cutoff,
        reserve_cutoff,
        tie_break,
    })
}

fn cutoff_from_env(name: &'static str) -> Result<Option<usize>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidCutoff { name }),
        Err(_) => Ok(None),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCutoff { name: &'static str },
    InvertedCutoffs { qualified: usize, reserve: usize },
    InvalidFlag { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCutoff { name } => {
                write!(f, "{name} must be a non-negative integer")
            }
            ConfigError::InvertedCutoffs { qualified, reserve } => write!(
                f,
                "reserve cutoff {reserve} must not be below qualified cutoff {qualified}"
            ),
            ConfigError::InvalidFlag { name } => write!(f, "{name} must be true or false"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidCutoff { .. }
            | ConfigError::InvertedCutoffs { .. }
            | ConfigError::InvalidFlag { .. } => None,
        }
    }
}
