//! Configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables (after `.env` is loaded), then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::address::normalize;
use crate::domain::MAX_DECIMALS;
use crate::infrastructure::explorer::BASESCAN_API_URL;
use crate::modules::sweep::{SweepSettings, TokenConfig};

pub const RPC_URL_VAR: &str = "RPC_URL";
pub const API_KEY_VAR: &str = "BASESCAN_API_KEY";
pub const CONFIG_PATH_VAR: &str = "CONTRACT_SWEEP_CONFIG";

pub const DEFAULT_INPUT: &str = "contracts.csv";
pub const DEFAULT_OUTPUT: &str = "contract_analysis.csv";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set (environment, .env file or command line)")]
    Missing(&'static str),
    #[error("invalid RPC URL {url:?}: {reason}")]
    InvalidRpcUrl { url: String, reason: String },
    #[error("invalid token address {0:?}")]
    InvalidTokenAddress(String),
    #[error("token decimals {0} out of range (max 77)")]
    InvalidTokenDecimals(u8),
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSpec {
    pub address: String,
    pub decimals: Option<u8>,
}

/// Contents of the optional TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub explorer_url: Option<String>,
    pub strict_logs: Option<bool>,
    pub truncate: Option<usize>,
    pub token: Option<TokenSpec>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub rpc: Option<String>,
    pub api_key: Option<String>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub explorer_url: Option<String>,
    pub strict_logs: bool,
}

/// Fully resolved run settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub rpc_url: String,
    pub api_key: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub explorer_url: String,
    pub sweep: SweepSettings,
}

/// Resolve settings from the config file, the process environment and `overrides`
pub fn load(overrides: &Overrides) -> Result<Settings, ConfigError> {
    let file = match &overrides.config {
        Some(path) => read_file(path)?,
        None => match config_path() {
            Some(path) if path.exists() => read_file(&path)?,
            _ => FileConfig::default(),
        },
    };
    resolve(file, overrides, |name| std::env::var(name).ok())
}

/// Merge layers; `env` looks up an environment variable
pub fn resolve(
    file: FileConfig,
    overrides: &Overrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    let rpc_url = overrides
        .rpc
        .clone()
        .or_else(|| env(RPC_URL_VAR))
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(RPC_URL_VAR))?;
    validate_rpc_url(&rpc_url)?;

    let api_key = overrides
        .api_key
        .clone()
        .or_else(|| env(API_KEY_VAR))
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(API_KEY_VAR))?;

    let token = match &file.token {
        Some(spec) => {
            let address = normalize(&spec.address)
                .ok_or_else(|| ConfigError::InvalidTokenAddress(spec.address.clone()))?;
            let decimals = spec.decimals.unwrap_or(TokenConfig::default().decimals);
            if decimals > MAX_DECIMALS {
                return Err(ConfigError::InvalidTokenDecimals(decimals));
            }
            TokenConfig { address, decimals }
        }
        None => TokenConfig::default(),
    };

    let defaults = SweepSettings::default();

    Ok(Settings {
        rpc_url: rpc_url.trim().to_string(),
        api_key: api_key.trim().to_string(),
        input: overrides
            .input
            .clone()
            .or(file.input)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
        output: overrides
            .output
            .clone()
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        explorer_url: overrides
            .explorer_url
            .clone()
            .or(file.explorer_url)
            .unwrap_or_else(|| BASESCAN_API_URL.to_string()),
        sweep: SweepSettings {
            token,
            strict_logs: overrides.strict_logs || file.strict_logs.unwrap_or(false),
            code_len: file.truncate.unwrap_or(defaults.code_len),
        },
    })
}

pub fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<FileConfig>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("contract-sweep").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "contract-sweep", "contract-sweep")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn validate_rpc_url(url: &str) -> Result<(), ConfigError> {
    let parsed = reqwest::Url::parse(url.trim()).map_err(|e| ConfigError::InvalidRpcUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" | "ws" | "wss" => Ok(()),
        other => Err(ConfigError::InvalidRpcUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}
