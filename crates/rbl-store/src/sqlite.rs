//! SQLite-backed evidence store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::{STORE_TARGET, ScoreQuery, ScoreStore, StoreError, decay_score};

const DECAY_FUNCTION: &str = "decay_score";

const SCHEMA_V1: &str = r"
CREATE TABLE IF NOT EXISTS spammers (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  client TEXT NOT NULL,
  spam_victims_score INTEGER NOT NULL DEFAULT 1,
  created INTEGER NOT NULL DEFAULT (CAST(strftime('%s', 'now') AS INTEGER))
);

CREATE INDEX IF NOT EXISTS idx_spammers_client_created
  ON spammers(client, created);
";

// ?2 is the window in days, ?3 the decay denominator, ?4 the threshold.
const AGGREGATE_QUERY: &str = r"
SELECT SUM(spam_victims_score) AS vsum
FROM spammers
WHERE client = ?1
  AND created >= CAST(strftime('%s', 'now') AS INTEGER) - (?2 * 86400)
GROUP BY client
HAVING decay_score(vsum, ?3) > ?4
";

/// Evidence store backed by a single SQLite connection.
///
/// The connection sits behind a mutex so one store can serve every session
/// concurrently.
#[derive(Debug)]
pub struct SqliteScoreStore {
    conn: Mutex<Connection>,
}

impl SqliteScoreStore {
    /// Opens (or creates) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] when the file cannot be opened and
    /// [`StoreError::Configure`] when the connection cannot be prepared.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(|source| StoreError::Configure { source })?;
        Self::with_connection(conn)
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: ":memory:".into(),
            source,
        })?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.create_scalar_function(
            DECAY_FUNCTION,
            2,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let sum: f64 = ctx.get(0)?;
                let interval: f64 = ctx.get(1)?;
                Ok(decay_score(sum, interval))
            },
        )
        .map_err(|source| StoreError::Configure { source })?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates the evidence table and its lookup index when missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Migrate`] when the schema cannot be applied.
    pub fn migrate(&self) -> Result<(), StoreError> {
        let conn = self.connection()?;
        conn.execute_batch(SCHEMA_V1)
            .map_err(|source| StoreError::Migrate { source })?;
        debug!(target: STORE_TARGET, "evidence schema ready");
        Ok(())
    }

    /// Records `victims_score` points of spam evidence against `client` now.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Record`] when the insert fails.
    pub fn record_event(&self, client: &str, victims_score: i64) -> Result<(), StoreError> {
        self.record_event_at(client, victims_score, SystemTime::now())
    }

    /// Records evidence with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timestamp`] when `created` cannot be stored as
    /// Unix seconds, or [`StoreError::Record`] when the insert fails.
    pub fn record_event_at(
        &self,
        client: &str,
        victims_score: i64,
        created: SystemTime,
    ) -> Result<(), StoreError> {
        let seconds = created
            .duration_since(UNIX_EPOCH)
            .map_err(|source| StoreError::Timestamp {
                source: Some(source),
            })?
            .as_secs();
        let seconds =
            i64::try_from(seconds).map_err(|_| StoreError::Timestamp { source: None })?;
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO spammers(client, spam_victims_score, created) VALUES (?1, ?2, ?3)",
            params![client, victims_score, seconds],
        )
        .map_err(|source| StoreError::Record { source })?;
        Ok(())
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl ScoreStore for SqliteScoreStore {
    fn aggregate(&self, query: &ScoreQuery) -> Result<Option<i64>, StoreError> {
        let conn = self.connection()?;
        let mut statement = conn
            .prepare_cached(AGGREGATE_QUERY)
            .map_err(|source| StoreError::Query { source })?;
        statement
            .query_row(
                params![
                    query.target(),
                    query.interval_days(),
                    query.decay_interval(),
                    query.threshold()
                ],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .map_err(|source| StoreError::Query { source })
    }
}
