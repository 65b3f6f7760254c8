use camino::Utf8PathBuf;

use crate::address::ServerAddress;

/// Host the listener binds to when none is configured.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// TCP port the listener binds to when none is configured.
pub const DEFAULT_SERVER_PORT: u16 = 2000;

/// Scoring window in days.
pub const DEFAULT_SCORE_INTERVAL: u32 = 60;

/// Decay score above which a target is rejected.
pub const DEFAULT_SCORE_LIMIT: f64 = 0.22;

/// SQLite database used when none is configured.
pub const DEFAULT_DATABASE_PATH: &str = "rbld.sqlite";

/// Default log filter expression used by the daemon.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the daemon.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub(crate) fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the daemon.
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Default listener address.
pub fn default_server_address() -> ServerAddress {
    ServerAddress::new(DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT)
}

/// Default evidence database location.
pub fn default_database_path() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_DATABASE_PATH)
}
