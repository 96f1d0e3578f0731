//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Backend base URL, fixed when the client is built
pub const DEFAULT_API_BASE_URL: &str = match option_env!("AVENDRO_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:8000/api",
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// REST API root, without the endpoint paths
    pub api_base_url: String,
    /// Local store holding the session keys
    pub database_path: PathBuf,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            database_path: data_dir.join("avendro.db"),
        }
    }

    pub fn data_dir() -> PathBuf {
        data_local_dir()
            .map(|d| d.join("Avendro"))
            .unwrap_or_else(|| PathBuf::from(".avendro"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

fn data_local_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
    }
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join("Library/Application Support"))
    }
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_DATA_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".local/share"))
            })
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        None
    }
}
