//! Environment-driven configuration
//!
//! `NEWSDESK_ENV` selects the environment (development, test, production)
//! and with it the `.env.<env>` file that is loaded before variables are
//! read. Variables already present in the process environment win.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// Default pool size outside production
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Hosted databases in production allow very few connections
const PRODUCTION_MAX_CONNECTIONS: u32 = 2;

const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_STATEMENT_TIMEOUT: Duration = Duration::from_millis(10_000);
const DEFAULT_PORT: u16 = 8080;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No PGDATABASE or DATABASE_URL configured")]
    MissingDatabase,

    #[error("DATABASE_URL must be set in production")]
    MissingProductionUrl,

    #[error("unknown environment '{0}' (expected development, test or production)")]
    UnknownEnvironment(String),

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }

    /// Name of the dotenv file for this environment
    pub fn dotenv_file(self) -> String {
        format!(".env.{}", self.as_str())
    }

    /// Read `NEWSDESK_ENV`; unset means development.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("NEWSDESK_ENV") {
            Ok(raw) if !raw.trim().is_empty() => raw.trim().parse(),
            _ => Ok(Self::default()),
        }
    }

    /// Load `.env.<env>` from the working directory. A missing file is fine;
    /// variables already set are not overwritten.
    pub fn load_dotenv(self) {
        let file = self.dotenv_file();
        match dotenvy::from_filename(&file) {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("failed to load {}: {}", file, e),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::UnknownEnvironment(s.to_owned())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database connection settings
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub statement_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            statement_timeout: DEFAULT_STATEMENT_TIMEOUT,
        }
    }
}

// Connection strings can carry passwords
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("statement_timeout", &self.statement_timeout)
            .finish()
    }
}

/// Full application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub bind_addr: SocketAddr,
    pub cors_permissive: bool,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from `NEWSDESK_ENV`, the matching `.env.<env>`
    /// file (if present) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|_| None)
    }

    /// Like [`AppConfig::from_env`], but `overrides` is consulted before the
    /// process environment. Used for command-line flags.
    pub fn from_env_with<F>(overrides: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_env()?;
        environment.load_dotenv();
        Self::from_lookup(environment, |key| {
            overrides(key).or_else(|| std::env::var(key).ok())
        })
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(environment: Environment, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = match (get("DATABASE_URL"), get("PGDATABASE")) {
            (Some(url), _) => url,
            (None, _) if environment == Environment::Production => {
                return Err(ConfigError::MissingProductionUrl)
            }
            (None, Some(name)) => format!("postgres:///{}", name),
            (None, None) => return Err(ConfigError::MissingDatabase),
        };

        let default_max = match environment {
            Environment::Production => PRODUCTION_MAX_CONNECTIONS,
            _ => DEFAULT_MAX_CONNECTIONS,
        };

        let host: IpAddr = parse_or("HOST", get("HOST"), IpAddr::V4(Ipv4Addr::LOCALHOST))?;
        let port: u16 = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;
        let bind_addr = SocketAddr::new(host, port);

        Ok(Self {
            environment,
            bind_addr,
            cors_permissive: parse_or("CORS_PERMISSIVE", get("CORS_PERMISSIVE"), false)?,
            database: DatabaseConfig {
                url,
                max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    get("DATABASE_MAX_CONNECTIONS"),
                    default_max,
                )?,
                acquire_timeout: Duration::from_secs(parse_or(
                    "DATABASE_ACQUIRE_TIMEOUT_SECS",
                    get("DATABASE_ACQUIRE_TIMEOUT_SECS"),
                    DEFAULT_ACQUIRE_TIMEOUT.as_secs(),
                )?),
                statement_timeout: Duration::from_millis(parse_or(
                    "DATABASE_STATEMENT_TIMEOUT_MS",
                    get("DATABASE_STATEMENT_TIMEOUT_MS"),
                    DEFAULT_STATEMENT_TIMEOUT.as_millis() as u64,
                )?),
            },
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
