//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Bind address variable.
pub const ADDR_ENV: &str = "GRID_ARCHITECT_ADDR";
/// Asset mode variable (`development` or `production`).
pub const MODE_ENV: &str = "GRID_ARCHITECT_MODE";
/// Client asset directory variable.
pub const ASSETS_ENV: &str = "GRID_ARCHITECT_ASSETS";

const DEFAULT_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 3030);

/// Server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid {env} {value:?}: {source}", env = ADDR_ENV)]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("Invalid {env} {0:?} (expected development or production)", env = MODE_ENV)]
    InvalidMode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which client build the page loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetMode {
    /// Unoptimized wasm-pack output with debug info, served from `/pkg`.
    Development,
    /// Optimized bundle, served from `/static`.
    Production,
}

impl AssetMode {
    /// URL prefix the assets are served under.
    pub fn url_prefix(self) -> &'static str {
        match self {
            AssetMode::Development => "/pkg",
            AssetMode::Production => "/static",
        }
    }

    /// Directory the assets are read from unless overridden.
    pub fn default_dir(self) -> &'static str {
        match self {
            AssetMode::Development => "crates/gridarchitect-web/pkg",
            AssetMode::Production => "dist/static",
        }
    }
}

impl Default for AssetMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            AssetMode::Development
        } else {
            AssetMode::Production
        }
    }
}

impl FromStr for AssetMode {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AssetMode::Development),
            "production" | "prod" => Ok(AssetMode::Production),
            _ => Err(ServerError::InvalidMode(s.to_string())),
        }
    }
}

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub mode: AssetMode,
    pub assets_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let mode = AssetMode::default();
        Self {
            addr: SocketAddr::from(DEFAULT_ADDR),
            mode,
            assets_dir: PathBuf::from(mode.default_dir()),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from a variable lookup. Unset or empty
    /// variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = match get(ADDR_ENV) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ServerError::InvalidAddr { value, source })?,
            None => SocketAddr::from(DEFAULT_ADDR),
        };
        let mode = match get(MODE_ENV) {
            Some(value) => value.parse()?,
            None => AssetMode::default(),
        };
        let assets_dir = get(ASSETS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(mode.default_dir()));

        Ok(Self {
            addr,
            mode,
            assets_dir,
        })
    }
}
