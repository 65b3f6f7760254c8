//! Launch sequencing for the policy daemon.

use std::sync::Arc;

use tracing::info;

use crate::bootstrap::{
    ConfigLoader, SqliteStoreProvider, StoreProvider, SystemConfigLoader, bootstrap_with,
};
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::session::SessionHandler;
use crate::transport::SocketListener;

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};

/// Collaborators required to launch the daemon runtime.
pub(crate) struct LaunchPlan<L, P, S> {
    pub(crate) loader: L,
    pub(crate) provider: P,
    pub(crate) reporter: Arc<dyn HealthReporter>,
    pub(crate) shutdown: S,
}

/// Runs the daemon using the production collaborators.
///
/// Blocks until a termination signal arrives.
///
/// # Errors
///
/// Returns [`LaunchError`] when bootstrap, binding, or signal installation
/// fails, or when the accept thread panics.
pub fn run_daemon() -> Result<(), LaunchError> {
    run_daemon_with(LaunchPlan {
        loader: SystemConfigLoader,
        provider: SqliteStoreProvider,
        reporter: Arc::new(StructuredHealthReporter::new()),
        shutdown: SystemShutdownSignal::new(),
    })
}

/// Runs the daemon with injected collaborators.
pub(crate) fn run_daemon_with<L, P, S>(plan: LaunchPlan<L, P, S>) -> Result<(), LaunchError>
where
    L: ConfigLoader,
    P: StoreProvider,
    S: ShutdownSignal,
{
    let LaunchPlan {
        loader,
        provider,
        reporter,
        shutdown,
    } = plan;

    let daemon = bootstrap_with(&loader, reporter.as_ref(), &provider)?;
    let listener = SocketListener::bind(daemon.config().server_address())?;
    let local = listener.local_addr()?;
    let handler = Arc::new(SessionHandler::new(daemon.session_context()));
    let listener_handle = listener.start(handler)?;

    reporter.listener_ready(local);
    info!(
        target: PROCESS_TARGET,
        service = env!("CARGO_PKG_NAME"),
        address = %daemon.config().server_address(),
        local = %local,
        "service started"
    );

    shutdown.wait()?;
    reporter.shutdown_requested();
    listener_handle.shutdown();
    listener_handle.join()?;
    info!(
        target: PROCESS_TARGET,
        "shutdown sequence completed"
    );
    Ok(())
}
