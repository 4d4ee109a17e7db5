use crate::config::StoreConfig;
use crate::database::store_repository::StoreRepository;
use crate::models::session::Session;
use crate::seed::initialize_store;
use rocket::fairing::AdHoc;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("row {0} does not exist")]
    MissingRow(i32),
    #[error("row {0} already exists")]
    DuplicateRow(i32),
}

/// Monotonic identity source. The first id handed out is 1.
#[derive(Debug, Default)]
pub struct IdSequence(AtomicI32);

impl IdSequence {
    pub fn next(&self) -> i32 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Memory-resident rows keyed by integer identity, returned to callers as
/// owned copies. Writes replace whole rows.
#[derive(Debug)]
pub struct Table<T> {
    rows: RwLock<BTreeMap<i32, T>>,
    ids: IdSequence,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            ids: IdSequence::default(),
        }
    }
}

impl<T: Clone> Table<T> {
    pub fn next_id(&self) -> i32 {
        self.ids.next()
    }

    pub async fn all(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }

    pub async fn get(&self, id: i32) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    pub async fn insert(&self, id: i32, row: T) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&id) {
            return Err(StoreError::DuplicateRow(id));
        }
        rows.insert(id, row);
        Ok(())
    }

    pub async fn replace(&self, id: i32, row: T) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&id) {
            Some(existing) => {
                *existing = row;
                Ok(())
            }
            None => Err(StoreError::MissingRow(id)),
        }
    }
}

/// The process-wide backing store. Ideas live inside their session row but
/// draw identities from their own sequence.
#[derive(Debug, Default)]
pub struct Store {
    pub sessions: Table<Session>,
    pub idea_ids: IdSequence,
}

pub type SessionStore = Arc<Store>;

pub fn stage_store(store_config: StoreConfig) -> AdHoc {
    AdHoc::try_on_ignite("In-memory session store", move |rocket| async move {
        let store: SessionStore = Arc::new(Store::default());

        if store_config.seed_sample_data {
            let repo = StoreRepository { store: store.clone() };
            if let Err(e) = initialize_store(&repo).await {
                tracing::error!("Failed to seed session store: {}", e);
                return Err(rocket);
            }
        }

        tracing::info!("Session store initialized");
        Ok(rocket.manage(store))
    })
}
