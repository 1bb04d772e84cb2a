use std::io::Write;
use std::path::Path;

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use skald_core::SkaldPaths;

use crate::plan::ChunkPlan;

/// Queue entry lifecycle. New entries always start `pre_chunked`;
/// downstream documentation tooling flips them to `documented`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    PreChunked,
    Documented,
}

impl QueueStatus {
    pub fn label(&self) -> &'static str {
        match self {
            QueueStatus::PreChunked => "pre_chunked",
            QueueStatus::Documented => "documented",
        }
    }
}

/// Producer marker recorded on every entry.
pub const QUEUE_SOURCE: &str = "structure_analysis";

/// One persisted work item. `file` is the unique key: the queue holds at
/// most one live entry per file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub file: String,
    pub chunk_plan: ChunkPlan,
    pub queued_at: String,
    pub status: QueueStatus,
    pub source: String,
    /// Fingerprint of the file content at planning time, so consumers can
    /// detect staleness before documenting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

/// The documentation queue: a pretty-printed JSON array in
/// `.skald/queue.json`, rewritten whole on every enqueue.
pub struct ChunkQueue {
    paths: SkaldPaths,
}

impl ChunkQueue {
    pub fn open(paths: &SkaldPaths) -> Self {
        Self {
            paths: paths.clone(),
        }
    }

    /// Load all entries. A missing file is an empty queue; a corrupt file
    /// is an error, never silently dropped.
    pub fn load(&self) -> anyhow::Result<Vec<QueueEntry>> {
        let content = match std::fs::read_to_string(&self.paths.queue_json) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let entries = serde_json::from_str(&content)?;
        Ok(entries)
    }

    /// Upsert a plan: any previous entry for the same file is removed
    /// before the new one is appended. Guarded by the exclusive queue
    /// lock; the rewrite lands atomically.
    pub fn enqueue(
        &self,
        plan: ChunkPlan,
        content_hash: Option<String>,
    ) -> anyhow::Result<QueueEntry> {
        self.paths.ensure_state_dir()?;
        let _guard = lock_queue(&self.paths)?;
        let mut entries = self.load()?;
        entries.retain(|e| e.file != plan.file);
        let entry = QueueEntry {
            file: plan.file.clone(),
            chunk_plan: plan,
            queued_at: now_rfc3339(),
            status: QueueStatus::PreChunked,
            source: QUEUE_SOURCE.to_string(),
            content_hash,
        };
        entries.push(entry.clone());
        let json = serde_json::to_string_pretty(&entries)?;
        write_atomic(&self.paths.queue_json, json.as_bytes())?;
        Ok(entry)
    }
}

/// Exclusive queue lock backed by `.skald/LOCK`. Released when dropped.
struct QueueLock {
    _file: std::fs::File,
}

fn lock_queue(paths: &SkaldPaths) -> anyhow::Result<QueueLock> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(&paths.lock_file)
        .map_err(|e| {
            anyhow::anyhow!("cannot open lock file {}: {}", paths.lock_file.display(), e)
        })?;
    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "queue is locked by another process ({})",
            paths.lock_file.display()
        )
    })?;
    Ok(QueueLock { _file: file })
}

/// Atomic write: temp file in the same directory, then rename over.
fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("no parent dir for {}", path.display()))?;
    std::fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

fn now_rfc3339() -> String {
    let now = time::OffsetDateTime::now_utc();
    now.format(&time::format_description::well_known::Rfc3339)
        .expect("RFC3339 formatting should not fail")
}
