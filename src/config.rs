//! Process configuration, read once from the environment (or a `.env` file) at startup.

use std::{env::VarError, num::ParseIntError, path::PathBuf};

use thiserror::Error;

/// The server's configuration.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Config {
    /// The socket address to listen on. Read from `ADDRESS`.
    pub address: String,

    /// The shared secret required to overwrite the tabs. Read from `SECRET`.
    ///
    /// If this is `None`, every overwrite is rejected.
    pub secret: Option<String>,

    /// The path of the JSON file the tabs are loaded from and saved to. Read from `TABS_FILE`.
    pub tabs_file: PathBuf,

    /// The maximum accepted size of a request body in bytes. Read from `MAX_BODY_BYTES`.
    pub max_body_bytes: usize,
}

/// An error reading the [`Config`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable (or the `.env` file) couldn't be read.
    #[error("failed to read environment variable `{name}`: {source}")]
    Env {
        /// The name of the environment variable.
        name: &'static str,

        /// The underlying error.
        #[source]
        source: dotenvy::Error,
    },

    /// An environment variable which should be a number isn't one.
    #[error("environment variable `{name}` should be a non-negative integer: {source}")]
    NotANumber {
        /// The name of the environment variable.
        name: &'static str,

        /// The underlying error.
        #[source]
        source: ParseIntError,
    },
}

impl Config {
    /// The address used when `ADDRESS` isn't set.
    pub const DEFAULT_ADDRESS: &'static str = "127.0.0.1:3000";

    /// The tabs file used when `TABS_FILE` isn't set, relative to the working directory.
    pub const DEFAULT_TABS_FILE: &'static str = "tabs.json";

    /// The body size limit used when `MAX_BODY_BYTES` isn't set.
    pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

    /// Reads the configuration from the environment, loading a `.env` file first if one exists.
    ///
    /// Unset and empty variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// See [`ConfigError`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    /// Builds the configuration from a function that looks up variables by name.
    fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&'static str) -> Result<Option<String>, ConfigError>,
    {
        let mut var = |name| lookup(name).map(|value| value.filter(|value| !value.is_empty()));

        let address = var("ADDRESS")?.unwrap_or_else(|| Self::DEFAULT_ADDRESS.to_owned());
        let secret = var("SECRET")?;
        let tabs_file = var("TABS_FILE")?
            .map_or_else(|| PathBuf::from(Self::DEFAULT_TABS_FILE), PathBuf::from);

        let max_body_bytes = match var("MAX_BODY_BYTES")? {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::NotANumber {
                    name: "MAX_BODY_BYTES",
                    source,
                })?,
            None => Self::DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            address,
            secret,
            tabs_file,
            max_body_bytes,
        })
    }
}

/// Reads an environment variable, or `None` if it's unset.
fn env_var(name: &'static str) -> Result<Option<String>, ConfigError> {
    match dotenvy::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
        Err(source) => Err(ConfigError::Env { name, source }),
    }
}
