//! JSON-lines submission store
//!
//! Each accepted submission is appended as one JSON object per line to
//! `submissions.jsonl` under the data directory, and the whole file is
//! replayed into memory at startup. A torn final line (partial last write)
//! is cut off during replay so the next append starts a fresh record; a
//! malformed line anywhere else is a decode error, since it means the file
//! was edited or corrupted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use serde_json::Value;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::{paginate, SortOrder, Submission, SubmissionPage, SubmissionStore};

const STORE_FILE: &str = "submissions.jsonl";

/// Append-only file-backed store with an in-memory copy for reads
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    submissions: RwLock<Vec<Submission>>,
    // Serializes appends so lines never interleave.
    file: Mutex<File>,
}

impl JsonlStore {
    /// Opens (or creates) the store under the given data directory and
    /// replays any existing submissions.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(STORE_FILE);

        let submissions = if path.exists() {
            let (submissions, good_len) = Self::replay(&path)?;
            // Drop the torn fragment so the next append starts a fresh
            // record instead of extending it into the new line.
            if good_len < fs::metadata(&path)?.len() {
                let file = OpenOptions::new().write(true).open(&path)?;
                file.set_len(good_len)?;
            }
            submissions
        } else {
            Vec::new()
        };

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            submissions: RwLock::new(submissions),
            file: Mutex::new(file),
        })
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replays the file, returning the decoded submissions and the byte
    /// length of the prefix that decoded cleanly. A shorter length than the
    /// file means the last line is a torn fragment.
    fn replay(path: &Path) -> StoreResult<(Vec<Submission>, u64)> {
        let bytes = fs::read(path)?;
        let mut submissions = Vec::new();
        let mut good_len = 0u64;

        let mut lines = bytes.split_inclusive(|&b| b == b'\n').peekable();
        while let Some(raw) = lines.next() {
            let last = lines.peek().is_none();

            // A write interrupted mid-character leaves invalid UTF-8, which
            // is only tolerable in the final line.
            let line = match std::str::from_utf8(raw) {
                Ok(s) => s.trim(),
                Err(e) if last => {
                    Self::warn_torn_tail(path, &e.to_string());
                    break;
                }
                Err(e) => {
                    return Err(StoreError::Io(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("{}: {}", path.display(), e),
                    )))
                }
            };
            if line.is_empty() {
                good_len += raw.len() as u64;
                continue;
            }
            match serde_json::from_str::<Submission>(line) {
                Ok(s) => {
                    submissions.push(s);
                    good_len += raw.len() as u64;
                }
                // Only the last line may be torn by an interrupted write.
                Err(e) if last => Self::warn_torn_tail(path, &e.to_string()),
                Err(e) => return Err(StoreError::Serialization(e)),
            }
        }

        Ok((submissions, good_len))
    }

    fn warn_torn_tail(path: &Path, error: &str) {
        crate::observability::Logger::log_stderr(
            crate::observability::Severity::Warn,
            "store.replay.torn_tail",
            &[("path", &path.display().to_string()), ("error", error)],
        );
    }

    fn append(&self, submission: &Submission) -> StoreResult<()> {
        let mut line = serde_json::to_string(submission)?;
        line.push('\n');

        let mut file = self.file.lock().map_err(|_| StoreError::LockPoisoned)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

impl SubmissionStore for JsonlStore {
    fn insert(&self, data: Value) -> StoreResult<Submission> {
        let submission = Submission::new(data);

        // Durable first: the in-memory copy only sees appended records.
        self.append(&submission)?;

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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_insert_survives_reopen() {
        let tmp = TempDir::new().unwrap();

        let id = {
            let store = JsonlStore::open(tmp.path()).unwrap();
            store.insert(json!({ "name": "Alice" })).unwrap();
            store.insert(json!({ "name": "Bob" })).unwrap().id
        };

        let store = JsonlStore::open(tmp.path()).unwrap();
        assert_eq!(store.count().unwrap(), 2);
        assert_eq!(store.get(id).unwrap().data["name"], "Bob");
    }

    #[test]
    fn test_torn_tail_is_skipped_on_replay() {
        let tmp = TempDir::new().unwrap();

        {
            let store = JsonlStore::open(tmp.path()).unwrap();
            store.insert(json!({ "n": 1 })).unwrap();
        }

        // Simulate an interrupted final write.
        let path = tmp.path().join(STORE_FILE);
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"{\"id\":\"trunc").unwrap();
        drop(file);

        let store = JsonlStore::open(tmp.path()).unwrap();
        assert_eq!(store.count().unwrap(), 1);

        // The fragment was cut off, so this append starts a fresh line and
        // survives another reopen instead of merging into the fragment.
        store.insert(json!({ "n": 2 })).unwrap();
        drop(store);

        let store = JsonlStore::open(tmp.path()).unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_corrupt_interior_line_fails_replay() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(STORE_FILE);
        let valid = serde_json::to_string(&Submission::new(json!({}))).unwrap();
        fs::write(&path, format!("garbage\n{valid}\n")).unwrap();

        assert!(matches!(
            JsonlStore::open(tmp.path()),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_list_pages_match_memory_semantics() {
        let tmp = TempDir::new().unwrap();
        let store = JsonlStore::open(tmp.path()).unwrap();
        for i in 0..5 {
            store.insert(json!({ "i": i })).unwrap();
        }

        let page = store.list(1, 2, SortOrder::Desc).unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.submissions[0].data["i"], 4);
    }
}
