//! Store and auth configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoreConfig {
    /// YAML file holding the `items` collection.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("mocks/mock_data.yaml")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Fixed bearer token. A random one is generated at startup when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
