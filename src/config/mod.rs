//! Configuration loading and management

use crate::core::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Configuration for one JSON-backed collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Name used in the route (e.g., "colors" for `/api/colors`)
    pub name: String,

    /// File name, relative to `data_dir`
    pub file: String,

    /// Answer in columnar form
    #[serde(default = "default_true")]
    pub optimize: bool,

    /// Fields the search term is matched against (all string fields if absent)
    #[serde(default)]
    pub search_fields: Option<Vec<String>>,
}

/// Configuration for the directory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Directory below which folders can be listed
    pub root: PathBuf,

    /// Folder listed when the request names none
    #[serde(default)]
    pub default_folder: Option<String>,
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Pretty-print JSON responses
    #[serde(default)]
    pub debug: bool,

    /// Directory holding the collection files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// `Cache-Control: max-age` of catalog responses, in seconds
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age: u64,

    #[serde(default)]
    pub collections: Vec<CollectionConfig>,

    /// Directory listing; disabled when absent
    #[serde(default)]
    pub files: Option<FilesConfig>,
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    44555
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_cache_max_age() -> u64 {
    60 * 15
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that collection names are usable as routes
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();

        for collection in &self.collections {
            let name = collection.name.trim();
            if name.is_empty() || name.contains('/') {
                return Err(ConfigError::InvalidValue {
                    field: "collections.name".to_string(),
                    value: collection.name.clone(),
                    message: "must be a non-empty path segment".to_string(),
                });
            }
            if name == "files" {
                return Err(ConfigError::InvalidValue {
                    field: "collections.name".to_string(),
                    value: collection.name.clone(),
                    message: "is reserved for the directory listing".to_string(),
                });
            }
            if !seen.insert(name) {
                return Err(ConfigError::InvalidValue {
                    field: "collections.name".to_string(),
                    value: collection.name.clone(),
                    message: "is declared more than once".to_string(),
                });
            }
            if collection.file.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "collections.file".to_string(),
                    value: collection.file.clone(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Address to bind, as `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Full path of a collection's backing file
    pub fn collection_path(&self, collection: &CollectionConfig) -> PathBuf {
        self.data_dir.join(&collection.file)
    }

    /// Default configuration serving the demo collections
    pub fn default_config() -> Self {
        let collection = |name: &str| CollectionConfig {
            name: name.to_string(),
            file: format!("{}.json", name),
            optimize: true,
            search_fields: None,
        };

        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
            data_dir: default_data_dir(),
            cache_max_age: default_cache_max_age(),
            collections: vec![collection("colors"), collection("people"), collection("products")],
            files: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
