use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::store::filestore::DEFAULT_CACHE_FILE;

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/meta";
pub const ENDPOINT_ENV: &str = "ACTIONS_IP_ENDPOINT";
pub const CACHE_ENV: &str = "ACTIONS_IP_CACHE";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub endpoint: String,
    pub cache_path: PathBuf,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            cache_path: default_cache_path(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Defaults, overridden by `ACTIONS_IP_ENDPOINT` and `ACTIONS_IP_CACHE`
    /// when set to a non-empty value.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let lookup = |key: &str| lookup(key).filter(|v: &String| !v.is_empty());

        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            config.endpoint = endpoint;
        }
        if let Some(path) = lookup(CACHE_ENV) {
            config.cache_path = PathBuf::from(path);
        }

        config
    }
}

/// The cache lives next to the executable; the working directory is used when
/// the executable path can't be resolved.
fn default_cache_path() -> PathBuf {
    let dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    dir.join(DEFAULT_CACHE_FILE)
}
