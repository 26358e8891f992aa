use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite database file. Its parent directory is created on startup.
    pub database: PathBuf,
}

impl ServerConfig {
    /// Loads settings from a TOML file. Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e.message())))
    }

    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
            database: PathBuf::from("./data/poshbullet.db"),
        }
    }
}
