//! RBL policy-check daemon.
//!
//! `rbld` answers mail servers that ask whether a client (an address, host
//! name, or IP) has collected enough recent spam evidence to be rejected. It
//! listens on a TCP socket, serves any number of concurrent clients, and
//! speaks a newline-delimited request/response protocol described in the
//! `protocol` module.
//!
//! Each accepted connection becomes a session that stays open across many
//! requests. A request line is parsed into a verb and a normalised target;
//! lookups consult the evidence store, which sums the victim scores recorded
//! for the target inside the configured window and applies the decay formula
//! `1 - e^(-sum / interval)`. Scores above the configured limit are answered
//! with `200 REJECT`.
//!
//! The bootstrap sequence loads layered configuration, installs structured
//! telemetry, validates the scoring parameters and opens the store. Health
//! reporting hooks emit a structured event at each stage so operators can
//! diagnose startup failures quickly.

mod bootstrap;
mod decision;
mod health;
mod process;
mod protocol;
mod session;
mod telemetry;
mod transport;
mod version;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, SqliteStoreProvider, StaticConfigLoader, StoreProvider,
    SystemConfigLoader, bootstrap_with,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{LaunchError, run_daemon};
pub use telemetry::TelemetryError;
pub use version::{VERSION_LINE, version_requested};

#[cfg(test)]
mod tests;
