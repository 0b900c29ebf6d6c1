//! Submission persistence
//!
//! Submissions are immutable once created: the store offers insert, get,
//! list, and count, nothing else. Listing is always ordered by creation
//! time. Two implementations: an in-memory store for tests and ephemeral
//! serving, and an append-only JSON-lines store for a data directory.

mod errors;
mod jsonl;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use jsonl::JsonlStore;
pub use memory::InMemoryStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Sort direction for listing, by creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// One stored form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub data: Value,
}

impl Submission {
    /// Creates a submission with a fresh id and the current timestamp.
    pub fn new(data: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            data,
        }
    }
}

/// One page of submissions plus the totals the listing endpoint reports
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPage {
    pub submissions: Vec<Submission>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

impl SubmissionPage {
    /// Assembles a page, computing the total page count.
    pub fn new(submissions: Vec<Submission>, total: usize, page: usize, limit: usize) -> Self {
        Self {
            submissions,
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit.max(1)),
        }
    }
}

/// Persistence interface for validated submissions
///
/// Implementations are shared behind an `Arc` across request handlers, so
/// all methods take `&self`.
pub trait SubmissionStore: Send + Sync {
    /// Stores a normalized payload as a new submission.
    fn insert(&self, data: Value) -> StoreResult<Submission>;

    /// Fetches a single submission by id.
    fn get(&self, id: Uuid) -> StoreResult<Submission>;

    /// Lists one page of submissions ordered by creation time.
    ///
    /// `page` is 1-based; callers are expected to have clamped `page` and
    /// `limit` to at least 1.
    fn list(&self, page: usize, limit: usize, order: SortOrder) -> StoreResult<SubmissionPage>;

    /// Total number of stored submissions.
    fn count(&self) -> StoreResult<usize>;
}

/// Shared slicing logic: sort by creation time, then cut one page out.
///
/// Insertion order is the tiebreaker for equal timestamps, so pagination
/// is stable across calls.
pub(crate) fn paginate(
    mut all: Vec<Submission>,
    page: usize,
    limit: usize,
    order: SortOrder,
) -> SubmissionPage {
    let total = all.len();

    // Stored vectors are already in insertion (ascending) order.
    if order == SortOrder::Desc {
        all.reverse();
    }

    let page = page.max(1);
    let limit = limit.max(1);
    // Saturate so an absurd client-supplied page lands on an empty page
    // instead of wrapping the offset.
    let offset = (page - 1).saturating_mul(limit);
    let submissions = all.into_iter().skip(offset).take(limit).collect();

    SubmissionPage::new(submissions, total, page, limit)
}
