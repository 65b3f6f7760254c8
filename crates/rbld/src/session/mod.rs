//! Connection sessions.
//!
//! A session owns one client stream. It reads request lines, answers each one
//! with exactly one response line, and only ends when the peer closes its side
//! or the transport fails. Malformed requests and backend failures are
//! answered with an error response and never close the connection.

mod errors;
mod handler;
mod id;
mod reader;

use std::io::{Read, Write};
use std::sync::Arc;

use rbl_config::ScoreConfig;
use tracing::{debug, info, warn};

use crate::decision::{ScoreDecider, ScoreOutcome};
use crate::protocol::{Command, Response, ResponseWriter, Verb};

pub(crate) use self::errors::SessionError;
pub(crate) use self::handler::SessionHandler;
pub(crate) use self::id::SessionId;
pub(crate) use self::reader::LineReader;

pub(crate) const SESSION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::session");

/// State shared by every session: the decider and its scoring parameters.
#[derive(Clone)]
pub(crate) struct SessionContext {
    decider: Arc<ScoreDecider>,
    score: ScoreConfig,
}

impl SessionContext {
    pub(crate) fn new(decider: Arc<ScoreDecider>, score: ScoreConfig) -> Self {
        Self { decider, score }
    }
}

/// One client connection being served.
pub(crate) struct Session<S> {
    id: SessionId,
    reader: LineReader<S>,
    context: SessionContext,
}

impl<S: Read + Write> Session<S> {
    pub(crate) fn new(id: SessionId, stream: S, context: SessionContext) -> Self {
        Self::with_reader(id, LineReader::new(stream), context)
    }

    pub(crate) fn with_reader(id: SessionId, reader: LineReader<S>, context: SessionContext) -> Self {
        Self {
            id,
            reader,
            context,
        }
    }

    /// Serves request lines until end of stream.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when reading or writing the stream fails, or
    /// a request line exceeds the length limit. A clean end of stream is
    /// `Ok(())`.
    pub(crate) fn run(mut self) -> Result<(), SessionError> {
        while let Some(line) = self.reader.next_line()? {
            debug!(
                target: SESSION_TARGET,
                session = %self.id,
                bytes = line.len(),
                "read request line"
            );
            let response = self.respond(&line);
            ResponseWriter::new(self.reader.get_mut())
                .write_response(response)
                .map_err(|source| SessionError::Write { source })?;
        }
        Ok(())
    }

    fn respond(&self, line: &[u8]) -> Response {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(error) => {
                warn!(
                    target: SESSION_TARGET,
                    session = %self.id,
                    error = %error,
                    "rejected request line"
                );
                return Response::Error;
            }
        };
        info!(
            target: SESSION_TARGET,
            session = %self.id,
            verb = ?command.verb(),
            client = command.target(),
            "request received"
        );

        if command.verb() == Verb::Write {
            info!(
                target: SESSION_TARGET,
                session = %self.id,
                "command `put` is not supported yet"
            );
            return Response::NotFound;
        }

        let outcome = self.context.decider.decide(
            command.target(),
            self.context.score.interval(),
            self.context.score.limit(),
        );
        let response = Response::from(&outcome);
        match &outcome {
            ScoreOutcome::Rejected(sum) => info!(
                target: SESSION_TARGET,
                session = %self.id,
                client = command.target(),
                score = sum,
                code = response.code(),
                "client has bothersome score, reject"
            ),
            ScoreOutcome::Clear => info!(
                target: SESSION_TARGET,
                session = %self.id,
                client = command.target(),
                code = response.code(),
                "client was not found"
            ),
            ScoreOutcome::Failed(error) => warn!(
                target: SESSION_TARGET,
                session = %self.id,
                client = command.target(),
                error = %error,
                code = response.code(),
                "score query failed"
            ),
        }
        response
    }
}
