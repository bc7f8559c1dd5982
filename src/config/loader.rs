use super::Config;
use crate::error::ConfigError;
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".r2g2";
const CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Default location: `~/.r2g2/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        UserDirs::new().map(|u| u.home_dir().join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load the config from `path` (or the default location), apply
    /// environment overrides and validate.
    ///
    /// A missing file at the default location yields defaults; an explicitly
    /// requested file must exist. Nothing is written back.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(explicit) => Self::from_file(explicit)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}
