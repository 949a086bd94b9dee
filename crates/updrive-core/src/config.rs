//! Configuration module for updrive.
//!
//! Startup parameters come from the process environment. Missing or invalid
//! required values are a fatal startup condition: [`Config::from_env`] is
//! called before the first reconciliation pass and the daemon exits on error.
//!
//! The parser is lookup-injected ([`Config::from_lookup`]) so tests can
//! supply values without mutating the process environment.

use std::path::PathBuf;

use thiserror::Error;

/// Environment variable holding the opaque access token.
pub const ENV_TOKEN: &str = "UPDRIVE_TOKEN";
/// Environment variable holding the local directory to mirror.
pub const ENV_LOCAL_DIR: &str = "UPDRIVE_LOCAL_DIR";
/// Environment variable holding the remote directory path.
pub const ENV_REMOTE_DIR: &str = "UPDRIVE_REMOTE_DIR";
/// Environment variable holding the poll interval in seconds (optional).
pub const ENV_POLL_INTERVAL: &str = "UPDRIVE_POLL_INTERVAL";
/// Environment variable holding the log file path (optional).
pub const ENV_LOG_FILE: &str = "UPDRIVE_LOG_FILE";

/// Default seconds between reconciliation passes.
const DEFAULT_POLL_INTERVAL: u64 = 60;

/// Errors raised while reading the startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent or empty
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A variable is present but its value cannot be used
    #[error("invalid value for {var}: {reason}")]
    InvalidValue {
        /// The offending variable name
        var: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Typed startup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Opaque credential for the remote storage account.
    pub token: String,
    /// Local directory whose immediate files are mirrored.
    pub local_dir: PathBuf,
    /// Remote directory path on the storage account.
    pub remote_dir: String,
    /// Seconds between reconciliation passes.
    pub poll_interval: u64,
    /// Log file target; events go to stderr when unset.
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the configuration through an injected variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| -> Result<String, ConfigError> {
            match lookup(var) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(ConfigError::MissingVar(var)),
            }
        };

        let token = required(ENV_TOKEN)?;
        let local_dir = PathBuf::from(required(ENV_LOCAL_DIR)?);
        let remote_dir = required(ENV_REMOTE_DIR)?;

        let poll_interval = match lookup(ENV_POLL_INTERVAL) {
            None => DEFAULT_POLL_INTERVAL,
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    var: ENV_POLL_INTERVAL,
                    reason: format!("'{raw}' is not a whole number of seconds"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        var: ENV_POLL_INTERVAL,
                        reason: "interval must be positive".to_string(),
                    });
                }
                secs
            }
        };

        let log_file = lookup(ENV_LOG_FILE)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            token,
            local_dir,
            remote_dir,
            poll_interval,
            log_file,
        })
    }
}
