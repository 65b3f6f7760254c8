//! Shared configuration for the RBL policy-check daemon.
//!
//! Values are layered by `ortho_config`: built-in defaults first, then the
//! TOML file named by `--config-path` or `RBLD_CONFIG_PATH`, then `RBLD_*`
//! environment variables, and finally command-line flags. The daemon consumes
//! the resolved [`Config`] once at startup and hands the pieces it needs to
//! each collaborator.

mod address;
mod defaults;
mod logging;
mod score;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use address::{ServerAddress, ServerAddressParseError};
pub use defaults::{
    DEFAULT_DATABASE_PATH, DEFAULT_LOG_FILTER, DEFAULT_SCORE_INTERVAL, DEFAULT_SCORE_LIMIT,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, default_database_path, default_log_filter,
    default_log_format, default_server_address,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use score::{ScoreConfig, ScoreConfigError};

/// Resolved daemon configuration.
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "RBLD")]
pub struct Config {
    /// Address the policy-check listener binds to.
    #[ortho_config(default = defaults::default_server_address())]
    pub server_address: ServerAddress,
    /// Scoring window in days; also the decay denominator.
    #[ortho_config(default = defaults::DEFAULT_SCORE_INTERVAL)]
    pub score_interval: u32,
    /// Decay score above which a target is rejected.
    #[ortho_config(default = defaults::DEFAULT_SCORE_LIMIT)]
    pub score_limit: f64,
    /// SQLite database holding spam evidence.
    #[ortho_config(default = defaults::default_database_path())]
    pub database_path: Utf8PathBuf,
    /// `tracing` filter directive.
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: default_server_address(),
            score_interval: DEFAULT_SCORE_INTERVAL,
            score_limit: DEFAULT_SCORE_LIMIT,
            database_path: default_database_path(),
            log_filter: defaults::default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Address the listener binds to.
    #[must_use]
    pub fn server_address(&self) -> &ServerAddress {
        &self.server_address
    }

    /// Location of the SQLite evidence database.
    #[must_use]
    pub fn database_path(&self) -> &Utf8PathBuf {
        &self.database_path
    }

    /// Filter directive handed to the tracing subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format for log lines.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Validated scoring parameters.
    ///
    /// Zero values fall back to the defaults; see [`ScoreConfig::new`].
    pub fn score(&self) -> Result<ScoreConfig, ScoreConfigError> {
        ScoreConfig::new(self.score_interval, self.score_limit)
    }
}
