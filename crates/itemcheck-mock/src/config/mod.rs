//! Configuration for the mock item server.
//!
//! ```yaml
//! listen:
//!   host: 127.0.0.1
//!   port: 5000
//! store:
//!   data_file: mocks/mock_data.yaml
//! auth:
//!   token: secret-token
//! ```
//!
//! Every section is optional. Command-line flags and `ITEMCHECK_*`
//! environment variables override file values via [`ConfigOverrides`].

mod listen;
mod store;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use listen::ListenConfig;
pub use store::{AuthConfig, StoreConfig};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub data_file: Option<PathBuf>,
    pub token: Option<String>,
}

impl ServerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let contents = std::fs::read_to_string(path)?;
        let config: Option<ServerConfig> = serde_yaml::from_str(&contents)?;
        let config = config.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.listen.host = host;
        }
        if let Some(port) = overrides.port {
            self.listen.port = port;
        }
        if let Some(data_file) = overrides.data_file {
            self.store.data_file = data_file;
        }
        if let Some(token) = overrides.token {
            self.auth.token = Some(token);
        }
        self
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.listen.host.trim().is_empty() {
            anyhow::bail!("listen.host must not be empty");
        }
        if self.store.data_file.as_os_str().is_empty() {
            anyhow::bail!("store.data_file must not be empty");
        }
        if let Some(token) = &self.auth.token {
            if token.trim().is_empty() {
                anyhow::bail!("auth.token must not be empty when set");
            }
            if token.chars().any(char::is_whitespace) {
                anyhow::bail!("auth.token must not contain whitespace");
            }
        }
        self.listen.socket_addr()?;
        Ok(())
    }
}
