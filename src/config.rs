//! Runtime configuration and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::providers::DEFAULT_ENDPOINT;

pub const DEFAULT_STORAGE_KEY: &str = "users";
const APP_DIR_NAME: &str = "people-directory";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    /// Remote list of people, consumed once at startup.
    pub endpoint: String,
    /// Where the file store keeps its documents.
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            data_dir: default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DIRECTORY_ENDPOINT` - Remote people endpoint (default: JSONPlaceholder users)
    /// - `DIRECTORY_DATA_DIR` - Storage directory (default: platform data dir)
    /// - `DIRECTORY_STORAGE_KEY` - Key the directory is stored under (default: `users`)
    /// - `DIRECTORY_TIMEOUT_SECS` - HTTP request timeout (default: 10)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(endpoint) = env::var("DIRECTORY_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(dir) = env::var("DIRECTORY_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(key) = env::var("DIRECTORY_STORAGE_KEY") {
            config.storage_key = key;
        }
        if let Some(secs) = read_env::<u64>("DIRECTORY_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs.max(1));
        }

        config
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR_NAME)))
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.parse::<T>().ok())
}
