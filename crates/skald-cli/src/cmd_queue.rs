use skald_chunk::{ChunkQueue, QueueEntry};
use skald_core::SkaldPaths;
use std::path::Path;

pub fn list(repo_root: &Path) -> anyhow::Result<()> {
    let queue = ChunkQueue::open(&SkaldPaths::discover(repo_root));
    let entries = queue.load()?;

    if entries.is_empty() {
        println!("Queue is empty.");
        return Ok(());
    }
    for entry in &entries {
        print_entry_line(entry);
    }
    println!("\n({} entries)", entries.len());
    Ok(())
}

pub fn show(repo_root: &Path, file: &str) -> anyhow::Result<()> {
    let queue = ChunkQueue::open(&SkaldPaths::discover(repo_root));
    let entries = queue.load()?;

    let Some(entry) = entries.iter().find(|e| e.file == file) else {
        anyhow::bail!("No queue entry for '{file}'.");
    };
    println!("{}", serde_json::to_string_pretty(entry)?);
    Ok(())
}

fn print_entry_line(entry: &QueueEntry) {
    // "2026-08-25T03:42:00Z" -> "2026-08-25 03:42"
    let ts_short = if entry.queued_at.len() >= 16 {
        format!("{} {}", &entry.queued_at[..10], &entry.queued_at[11..16])
    } else {
        entry.queued_at.clone()
    };
    println!(
        "[{ts_short}] {:<40} {:>3} chunks  {:>5} lines  {}",
        entry.file,
        entry.chunk_plan.chunks.len(),
        entry.chunk_plan.total_lines,
        entry.status.label()
    );
}
