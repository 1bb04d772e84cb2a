pub mod plan;
pub mod queue;
pub mod structure;

pub use plan::{plan, Chunk, ChunkPlan, Priority};
pub use queue::{ChunkQueue, QueueEntry, QueueStatus};
pub use structure::{analyze, AnalysisOutcome, Complexity, StructureAnalysis, StructureBoundary};

use skald_core::{SkaldConfig, SkaldPaths, TimeWindow};
use skald_infer::InferenceClient;

/// Result of one pre-chunk attempt.
#[derive(Debug)]
pub enum PrechunkOutcome {
    /// Plan queued with this many chunks.
    Queued { chunks: usize },
    /// Nothing queued; the reason is user-facing.
    Skipped(String),
}

impl PrechunkOutcome {
    pub fn describe(&self) -> String {
        match self {
            PrechunkOutcome::Queued { chunks } => format!("queued with {chunks} chunks"),
            PrechunkOutcome::Skipped(reason) => format!("skipped ({reason})"),
        }
    }
}

/// Analyze one file, derive its chunk plan, and upsert it into the queue.
///
/// `rel_path` is relative to the workspace root. Analysis failures are
/// soft (`Skipped`); only unreadable input or queue persistence surface
/// as errors.
pub fn prechunk_file(
    client: &InferenceClient,
    paths: &SkaldPaths,
    config: &SkaldConfig,
    rel_path: &str,
) -> anyhow::Result<PrechunkOutcome> {
    let full = paths.root.join(rel_path);
    let content = std::fs::read_to_string(&full)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", full.display()))?;

    let analysis = match structure::analyze(client, rel_path, &content, config.min_analyze_lines) {
        AnalysisOutcome::NotNeeded => {
            return Ok(PrechunkOutcome::Skipped(
                "below analysis threshold".to_string(),
            ))
        }
        AnalysisOutcome::Failed(reason) => {
            tracing::warn!(
                file = rel_path,
                model = client.model(),
                reason = %reason,
                "structure analysis failed"
            );
            return Ok(PrechunkOutcome::Skipped(format!(
                "analysis failed: {reason}"
            )));
        }
        AnalysisOutcome::Analyzed(a) => a,
    };

    let chunk_plan = plan::plan(rel_path, &analysis.boundaries, config.chunk_size_threshold);
    let chunks = chunk_plan.chunks.len();
    let queue = queue::ChunkQueue::open(paths);
    queue.enqueue(chunk_plan, Some(content_fingerprint(&content)))?;
    Ok(PrechunkOutcome::Queued { chunks })
}

/// Pre-chunk every source file touched by commits in the window.
///
/// Seeded from version control; per-file failures are reported in the
/// result list and never abort the batch.
pub fn prechunk_recent(
    client: &InferenceClient,
    paths: &SkaldPaths,
    config: &SkaldConfig,
    window: &TimeWindow,
) -> Vec<(String, PrechunkOutcome)> {
    let candidates = skald_collect::vcs::changed_files(paths, window);
    let mut results = Vec::new();
    for file in candidates {
        let outcome = match prechunk_file(client, paths, config, &file) {
            Ok(o) => o,
            Err(e) => PrechunkOutcome::Skipped(format!("failed: {e}")),
        };
        results.push((file, outcome));
    }
    results
}

/// Short content fingerprint recorded with each queue entry.
fn content_fingerprint(content: &str) -> String {
    let hash = blake3::hash(content.as_bytes());
    hash.to_hex()[..32].to_string()
}
