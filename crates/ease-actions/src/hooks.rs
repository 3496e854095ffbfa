//! Persistence hooks.
//!
//! Handlers never write to storage directly; each domain record is handed to
//! a hook supplied by the caller through the
//! [`ExecutionContext`](crate::context::ExecutionContext). Two reference
//! implementations live here: an in-memory hook for tests and a JSON-lines
//! file hook used by the CLI.

use crate::error::HookError;
use async_trait::async_trait;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable sink for one kind of domain record.
#[async_trait]
pub trait PersistenceHook<R>: Send + Sync
where
    R: Send + 'static,
{
    /// Store a newly created record.
    async fn persist(&self, record: R) -> Result<(), HookError>;
}

/// In-memory hook that keeps every record it receives.
pub struct MemoryHook<R> {
    records: Mutex<Vec<R>>,
}

impl<R> Default for MemoryHook<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> MemoryHook<R> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Number of records stored so far.
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: Clone> MemoryHook<R> {
    /// Snapshot of stored records, oldest first.
    pub fn records(&self) -> Vec<R> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl<R> PersistenceHook<R> for MemoryHook<R>
where
    R: Send + 'static,
{
    async fn persist(&self, record: R) -> Result<(), HookError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| HookError::Unavailable(format!("failed to acquire lock: {}", e)))?;
        records.push(record);
        Ok(())
    }
}

/// Appends each record as one JSON document per line.
pub struct JsonLinesHook {
    path: PathBuf,
}

impl JsonLinesHook {
    /// Create a hook writing to `path`; the file is created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<R> PersistenceHook<R> for JsonLinesHook
where
    R: Serialize + Send + 'static,
{
    async fn persist(&self, record: R) -> Result<(), HookError> {
        let json = serde_json::to_string(&record)?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", json)?;

        tracing::debug!(path = %self.path.display(), "Record appended");
        Ok(())
    }
}
