//! Client configuration.
//!
//! # Example
//!
//! ```
//! use kvtree_core::Config;
//!
//! // Defaults
//! let config = Config::default();
//! assert_eq!(config.separator, '/');
//! assert!(config.skip_directories);
//!
//! // Override what you need
//! let config = Config {
//!     address: "https://kv.internal:8501".into(),
//!     token: Some("secret".into()),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::path::Path as FsPath;

use serde::Deserialize;

use crate::path::DEFAULT_SEPARATOR;
use crate::Error;

/// Environment variable holding the store address.
pub const ENV_ADDRESS: &str = "KVTREE_HTTP_ADDR";

/// Environment variable holding the access token.
pub const ENV_TOKEN: &str = "KVTREE_HTTP_TOKEN";

/// Configuration passed explicitly into every client entry point.
///
/// Nothing in kvtree reads or mutates process-wide state; build a `Config`
/// once and hand it to the client.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the key-value HTTP API (default: `http://127.0.0.1:8500`)
    #[serde(default = "default_address")]
    pub address: String,

    /// Token attached to every request, if any
    #[serde(default)]
    pub token: Option<String>,

    /// Namespace separator (default: `/`)
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Hide directory markers from key listings (default: true)
    #[serde(default = "default_skip_directories")]
    pub skip_directories: bool,
}

fn default_address() -> String {
    "http://127.0.0.1:8500".to_string()
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

fn default_skip_directories() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: default_address(),
            token: None,
            separator: default_separator(),
            skip_directories: default_skip_directories(),
        }
    }
}

impl Config {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: &FsPath) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config: Config = serde_json::from_str(&text).map_err(|e| Error::Config {
            message: format!("cannot parse {}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values found through `lookup` (normally `std::env::var`).
    #[must_use]
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(address) = lookup(ENV_ADDRESS).filter(|a| !a.is_empty()) {
            self.address = address;
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|t| !t.is_empty()) {
            self.token = Some(token);
        }
        self
    }

    /// Reject configurations the projector cannot work with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.separator.is_alphanumeric() || self.separator.is_whitespace() {
            return Err(Error::Config {
                message: format!("separator {:?} must be punctuation", self.separator),
            });
        }
        if self.address.is_empty() {
            return Err(Error::Config {
                message: "address must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
