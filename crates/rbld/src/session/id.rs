//! Per-connection identifiers used to correlate log lines.

use std::fmt;

use rand::{Rng, distributions::Alphanumeric};

const SESSION_ID_LEN: usize = 12;

/// Random alphanumeric tag attached to every log line of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SessionId(String);

impl SessionId {
    pub(crate) fn generate() -> Self {
        let id = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_ID_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
