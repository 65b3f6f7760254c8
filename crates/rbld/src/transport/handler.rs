//! Connection handling abstraction for the listener.

use std::net::TcpStream;

/// Handles accepted client connections.
///
/// Every accepted stream is passed to [`ConnectionHandler::handle`] on a
/// dedicated thread. The stream is closed when the handler drops it.
pub(crate) trait ConnectionHandler: Send + Sync + 'static {
    /// Serves a single connection until the peer leaves or an error occurs.
    /// Implementations should avoid panicking.
    fn handle(&self, stream: TcpStream);
}
