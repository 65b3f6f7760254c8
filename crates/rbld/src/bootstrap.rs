//! Daemon bootstrap orchestration.
//!
//! Bootstrap turns configuration into a ready-to-serve [`Daemon`]: it loads
//! the layered configuration, installs telemetry, validates the scoring
//! parameters, and opens the evidence store. Every failure is reported to the
//! [`HealthReporter`] before it is returned.

use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use rbl_config::{Config, ScoreConfig, ScoreConfigError};
use rbl_store::{ScoreStore, SqliteScoreStore, StoreError};

use crate::decision::ScoreDecider;
use crate::health::HealthReporter;
use crate::session::SessionContext;
use crate::telemetry::{self, TelemetryError};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the daemon configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader that hands out a configuration resolved elsewhere.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an already resolved configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Opens the evidence store the daemon will query.
pub trait StoreProvider: Send + Sync {
    /// Opens a store for `config`, ready to answer queries.
    fn open(&self, config: &Config) -> Result<Arc<dyn ScoreStore>, StoreError>;
}

/// Provider that opens the configured SQLite database and applies the schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteStoreProvider;

impl StoreProvider for SqliteStoreProvider {
    fn open(&self, config: &Config) -> Result<Arc<dyn ScoreStore>, StoreError> {
        let store = SqliteScoreStore::open(config.database_path().as_std_path())?;
        store.migrate()?;
        Ok(Arc::new(store))
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The scoring parameters are unusable.
    #[error("invalid scoring parameters: {source}")]
    Score {
        /// Underlying validation error.
        #[source]
        source: ScoreConfigError,
    },
    /// The evidence store could not be opened.
    #[error("failed to open evidence store: {source}")]
    Store {
        /// Underlying store error.
        #[source]
        source: StoreError,
    },
}

/// Result of a successful bootstrap invocation.
pub struct Daemon {
    config: Config,
    score: ScoreConfig,
    decider: Arc<ScoreDecider>,
}

impl Daemon {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validated scoring parameters.
    #[must_use]
    pub fn score(&self) -> ScoreConfig {
        self.score
    }

    pub(crate) fn session_context(&self) -> SessionContext {
        SessionContext::new(Arc::clone(&self.decider), self.score)
    }
}

/// Bootstraps the daemon using the supplied collaborators.
///
/// # Errors
///
/// Returns [`BootstrapError`] for the first stage that fails.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: &dyn HealthReporter,
    provider: &dyn StoreProvider,
) -> Result<Daemon, BootstrapError> {
    reporter.bootstrap_starting();
    let result = bootstrap_stages(loader, provider);
    match &result {
        Ok(daemon) => reporter.bootstrap_succeeded(daemon.config()),
        Err(error) => reporter.bootstrap_failed(error),
    }
    result
}

fn bootstrap_stages(
    loader: &dyn ConfigLoader,
    provider: &dyn StoreProvider,
) -> Result<Daemon, BootstrapError> {
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;
    let score = config
        .score()
        .map_err(|source| BootstrapError::Score { source })?;
    let store = provider
        .open(&config)
        .map_err(|source| BootstrapError::Store { source })?;

    Ok(Daemon {
        config,
        score,
        decider: Arc::new(ScoreDecider::new(store)),
    })
}
