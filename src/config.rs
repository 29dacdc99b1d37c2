//! Server configuration
//!
//! Values come from defaults, then an optional YAML file, then the `LISTEN`
//! and `FILEGATE_ROOT` environment variables. The binary applies command
//! line overrides last.
//!
//! ```yaml
//! server:
//!   listen_addr: "127.0.0.1:8080"
//!   root: "/srv/files"
//!   max_request_bytes: 2048
//! access:
//!   list_file: "./server_lists.serverconf"
//!   guard_put: false
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
pub const DEFAULT_LIST_FILE: &str = "./server_lists.serverconf";
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 2048;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub access: AccessConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Directory the `.`-anchored request paths resolve against
    pub root: PathBuf,
    /// Size of the single read per connection
    pub max_request_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Relative paths are taken from `server.root`
    pub list_file: PathBuf,
    /// Require the write list for PUT as well as POST
    pub guard_put: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN.to_string(),
            root: PathBuf::from("."),
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            list_file: PathBuf::from(DEFAULT_LIST_FILE),
            guard_put: false,
        }
    }
}

impl Config {
    /// Defaults with environment overrides applied.
    pub fn load() -> Self {
        Self::default().with_env()
    }

    /// Reads a YAML file, then applies environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;

        Ok(Self::from_yaml(&text)
            .with_context(|| format!("invalid config {}", path.display()))?
            .with_env())
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn with_env(mut self) -> Self {
        if let Ok(addr) = std::env::var("LISTEN") {
            self.server.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("FILEGATE_ROOT") {
            self.server.root = PathBuf::from(root);
        }
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.max_request_bytes == 0 {
            anyhow::bail!("server.max_request_bytes must be greater than zero");
        }
        if self.server.listen_addr.is_empty() {
            anyhow::bail!("server.listen_addr must not be empty");
        }
        Ok(())
    }

    /// Location of the access-list file on disk.
    pub fn list_file_path(&self) -> PathBuf {
        if self.access.list_file.is_absolute() {
            self.access.list_file.clone()
        } else {
            self.server.root.join(&self.access.list_file)
        }
    }
}
