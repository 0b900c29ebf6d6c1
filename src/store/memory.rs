//! In-memory submission store
//!
//! Backing vector is kept in insertion order, which is also creation-time
//! order since inserts stamp `Utc::now()`.

use std::sync::RwLock;

use serde_json::Value;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::{paginate, SortOrder, Submission, SubmissionPage, SubmissionStore};

/// RwLock-backed store with no persistence
#[derive(Debug, Default)]
pub struct InMemoryStore {
    submissions: RwLock<Vec<Submission>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmissionStore for InMemoryStore {
    fn insert(&self, data: Value) -> StoreResult<Submission> {
        let submission = Submission::new(data);
        let mut store = self
            .submissions
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        store.push(submission.clone());
        Ok(submission)
    }

    fn get(&self, id: Uuid) -> StoreResult<Submission> {
        let store = self
            .submissions
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        store
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&self, page: usize, limit: usize, order: SortOrder) -> StoreResult<SubmissionPage> {
        let store = self
            .submissions
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(paginate(store.clone(), page, limit, order))
    }

    fn count(&self) -> StoreResult<usize> {
        let store = self
            .submissions
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(store.len())
    }
}
