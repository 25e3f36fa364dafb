//! Configuration layering: defaults, config file, environment, flags.

use std::path::{Path, PathBuf};

use kvtree_core::Config;
use tracing::debug;

use crate::Error;

/// Values given on the command line; each one wins over every other source.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub address: Option<String>,
    pub token: Option<String>,
    pub separator: Option<char>,
}

/// `<config dir>/kvtree/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("kvtree").join("config.json"))
}

/// Resolve the effective configuration.
///
/// An explicit `config_path` must exist. The default path is read only when
/// the file is there.
pub fn resolve<F>(
    config_path: Option<&Path>,
    overrides: &Overrides,
    lookup: F,
) -> Result<Config, Error>
where
    F: Fn(&str) -> Option<String>,
{
    let from_file = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|p| p.is_file()),
    };

    let config = match from_file {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            Config::from_file(&path)?
        }
        None => Config::default(),
    };

    let mut config = config.with_env(lookup);
    if let Some(address) = &overrides.address {
        config.address = address.clone();
    }
    if let Some(token) = &overrides.token {
        config.token = Some(token.clone());
    }
    if let Some(separator) = overrides.separator {
        config.separator = separator;
    }
    config.validate()?;
    Ok(config)
}
