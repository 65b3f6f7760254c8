//! Listener integration for sessions.

use std::net::TcpStream;

use tracing::{info, warn};

use super::{SESSION_TARGET, Session, SessionContext, SessionId};
use crate::transport::ConnectionHandler;

/// Runs a [`Session`] for every accepted connection.
pub(crate) struct SessionHandler {
    context: SessionContext,
}

impl SessionHandler {
    pub(crate) fn new(context: SessionContext) -> Self {
        Self { context }
    }
}

impl ConnectionHandler for SessionHandler {
    fn handle(&self, stream: TcpStream) {
        let id = SessionId::generate();
        let peer = stream.peer_addr().ok();
        let local = stream.local_addr().ok();
        info!(
            target: SESSION_TARGET,
            session = %id,
            peer = ?peer,
            local = ?local,
            "connection opened"
        );

        let session = Session::new(id.clone(), stream, self.context.clone());
        if let Err(error) = session.run() {
            warn!(
                target: SESSION_TARGET,
                session = %id,
                error = %error,
                "session ended with transport error"
            );
        }

        info!(
            target: SESSION_TARGET,
            session = %id,
            peer = ?peer,
            "connection closed"
        );
    }
}
