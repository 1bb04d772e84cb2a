use std::path::PathBuf;

/// All well-known paths under a workspace base directory.
///
/// `memory/`, `memory/handoffs/`, and `logs/` are observed stores owned by
/// external tooling; only `.skald/` belongs to skald itself.
#[derive(Debug, Clone)]
pub struct SkaldPaths {
    pub root: PathBuf,
    pub skald_dir: PathBuf,
    pub config_json: PathBuf,
    pub queue_json: PathBuf,
    pub lock_file: PathBuf,
    pub memory_dir: PathBuf,
    pub handoff_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl SkaldPaths {
    /// Derive all paths from a base directory. Pure computation, no I/O.
    pub fn discover(base: impl Into<PathBuf>) -> Self {
        let root = base.into();
        let skald_dir = root.join(".skald");
        let memory_dir = root.join("memory");
        Self {
            config_json: skald_dir.join("config.json"),
            queue_json: skald_dir.join("queue.json"),
            lock_file: skald_dir.join("LOCK"),
            handoff_dir: memory_dir.join("handoffs"),
            logs_dir: root.join("logs"),
            memory_dir,
            skald_dir,
            root,
        }
    }

    /// Create `.skald/`. Idempotent; never touches the observed stores.
    pub fn ensure_state_dir(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.skald_dir)?;
        Ok(())
    }
}
