//! Shared doubles for the daemon test suites.

mod reporter;
mod shutdown;
mod store;
mod stream;

pub(crate) use reporter::{HealthEvent, RecordingHealthReporter};
pub(crate) use shutdown::TestShutdownSignal;
pub(crate) use store::{MockStore, StaticStoreProvider, seeded_store};
pub(crate) use stream::ScriptedStream;
