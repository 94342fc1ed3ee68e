//! Configuration loading and management
//!
//! Settings come from an optional YAML file (path in `ENTRY_LEDGER_CONFIG`),
//! then from environment variables, which win over the file. Variables missing
//! from the process environment are read from a `.env` file in the working
//! directory when one exists.
//!
//! | Key | Variable | Default |
//! |---|---|---|
//! | `host` | `HOST` | `0.0.0.0` |
//! | `port` | `PORT` | `5000` |
//! | `database_uri` | `MONGODB_URI` | unset |
//! | `database_name` | `MONGODB_DATABASE` | from the URI |
//! | `collection` | `ENTRIES_COLLECTION` | `entries` |

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use validator::{Validate, ValidationError};

/// Environment variable naming the YAML config file
pub const CONFIG_PATH_VAR: &str = "ENTRY_LEDGER_CONFIG";

/// Dotenv file consulted by [`ServerConfig::load`]
pub const ENV_FILE: &str = ".env";

/// Server and store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Interface to listen on
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// MongoDB connection string; the in-memory store is used when unset
    #[serde(default)]
    #[validate(custom(function = "validate_database_uri"))]
    pub database_uri: Option<String>,

    /// Database name, overriding the one in the connection string
    #[serde(default)]
    #[validate(length(min = 1))]
    pub database_name: Option<String>,

    /// Collection holding the entries
    #[serde(default = "default_collection")]
    #[validate(length(min = 1))]
    pub collection: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_collection() -> String {
    "entries".to_string()
}

fn validate_database_uri(uri: &str) -> Result<(), ValidationError> {
    let rest = uri
        .strip_prefix("mongodb://")
        .or_else(|| uri.strip_prefix("mongodb+srv://"));

    match rest {
        Some(hosts) if !hosts.is_empty() => Ok(()),
        _ => Err(ValidationError::new("database_uri").with_message(Cow::from(
            "expected a mongodb:// or mongodb+srv:// connection string",
        ))),
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_uri: None,
            database_name: None,
            collection: default_collection(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("Failed to parse config file '{}'", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from the process environment, `.env` and the YAML file they name
    pub fn load() -> Result<Self> {
        Self::load_with_env_file(Path::new(ENV_FILE), |key| std::env::var(key).ok())
    }

    /// Load using `lookup`, falling back to the variables in `env_file`
    ///
    /// A missing `env_file` is skipped. The process environment is never
    /// modified.
    pub fn load_with_env_file(
        env_file: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let file_vars = read_env_file(env_file)?;
        if !file_vars.is_empty() {
            tracing::debug!(path = %env_file.display(), vars = file_vars.len(), "Loaded env file");
        }

        Self::load_with(|key| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| file_vars.get(key).cloned())
        })
    }

    /// Load using `lookup` in place of the process environment
    ///
    /// Empty values count as unset. The result is validated.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_yaml_file(&path)?,
            None => Self::default(),
        };

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value '{}'", port))?;
        }
        if let Some(uri) = lookup("MONGODB_URI") {
            config.database_uri = Some(uri);
        }
        if let Some(name) = lookup("MONGODB_DATABASE") {
            config.database_name = Some(name);
        }
        if let Some(collection) = lookup("ENTRIES_COLLECTION") {
            config.collection = collection;
        }

        config
            .validate()
            .map_err(|e| anyhow!("Invalid configuration: {}", e))?;
        Ok(config)
    }

    /// `host:port` string to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    dotenv::from_path_iter(path)
        .with_context(|| format!("Failed to read env file '{}'", path.display()))?
        .map(|item| item.with_context(|| format!("Failed to parse env file '{}'", path.display())))
        .collect()
}
