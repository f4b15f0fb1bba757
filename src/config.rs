use crate::consts;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct Config {
    /// How keypresses that arrive between ticks are handled
    pub(crate) input_policy: InputPolicy,

    /// Show the head & tail coordinates under each frame
    pub(crate) debug: bool,

    /// Append log messages to this file instead of stderr
    pub(crate) log_file: Option<PathBuf>,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("ttysnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Load the configuration file named by the `TTYSNAKE_CONFIG` environment
    /// variable or, if that is unset, the file at the default path.  Only the
    /// default file is allowed to be missing.
    pub(crate) fn load_default() -> Result<Config, ConfigError> {
        match std::env::var_os(consts::CONFIG_ENV_VAR) {
            Some(p) => Config::load(Path::new(&p), false),
            None => Config::load(&Config::default_path()?, true),
        }
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

/// How the input thread hands directions to the tick thread
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum InputPolicy {
    /// After each accepted direction, wait for the tick that applies it
    /// before reading the next key, so every keypress takes effect in order
    #[default]
    Queue,

    /// Discard keypresses until the tick has applied the last accepted
    /// direction, so a burst of keys collapses to the first one
    Ignore,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
