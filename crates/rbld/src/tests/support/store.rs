//! Evidence store doubles.

use std::sync::Arc;

use mockall::mock;

use rbl_config::Config;
use rbl_store::{ScoreQuery, ScoreStore, SqliteScoreStore, StoreError};

use crate::bootstrap::StoreProvider;

mock! {
    pub(crate) Store {}

    impl ScoreStore for Store {
        fn aggregate(&self, query: &ScoreQuery) -> Result<Option<i64>, StoreError>;
    }
}

/// Builds a migrated in-memory store holding `evidence` recorded now.
pub(crate) fn seeded_store(evidence: &[(&str, i64)]) -> Arc<SqliteScoreStore> {
    let store = SqliteScoreStore::open_in_memory().expect("open in-memory store");
    store.migrate().expect("apply schema");
    for (client, score) in evidence {
        store.record_event(client, *score).expect("record evidence");
    }
    Arc::new(store)
}

/// Provider that hands out one pre-built store regardless of configuration.
#[derive(Clone)]
pub(crate) struct StaticStoreProvider {
    store: Arc<dyn ScoreStore>,
}

impl StaticStoreProvider {
    pub(crate) fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }

    pub(crate) fn empty() -> Self {
        Self::new(seeded_store(&[]))
    }
}

impl StoreProvider for StaticStoreProvider {
    fn open(&self, _config: &Config) -> Result<Arc<dyn ScoreStore>, StoreError> {
        Ok(Arc::clone(&self.store))
    }
}
