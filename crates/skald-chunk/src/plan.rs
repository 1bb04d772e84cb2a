use serde::{Deserialize, Serialize};

use crate::structure::StructureBoundary;

/// Chunk urgency, derived from size alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Normal,
}

/// Strategy marker persisted with every plan.
pub const STRATEGY_STRUCTURAL: &str = "structural_boundaries";

/// A contiguous inclusive line range between two boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: u32,
    pub start_line: u32,
    pub end_line: u32,
    pub size: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub priority: Priority,
}

/// A non-overlapping chunk plan for one file.
///
/// `total_lines` is the last boundary's line: the extent of the analyzed
/// region, not necessarily the file's true length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkPlan {
    pub file: String,
    pub total_lines: u32,
    pub chunks: Vec<Chunk>,
    pub strategy: String,
}

/// Convert a strictly increasing boundary sequence into contiguous chunks.
///
/// Chunk `i+1` spans boundary `i` through one line before boundary `i+1`;
/// the final boundary is an end marker and produces no chunk of its own.
/// Zero or one boundary yields an empty plan, which is valid, not an
/// error. A chunk larger than `threshold` lines is high priority.
pub fn plan(file: &str, boundaries: &[StructureBoundary], threshold: u32) -> ChunkPlan {
    let total_lines = boundaries.last().map(|b| b.line).unwrap_or(0);
    let mut chunks = Vec::new();
    for (i, pair) in boundaries.windows(2).enumerate() {
        let start = pair[0].line;
        let end = pair[1].line.saturating_sub(1);
        if end < start {
            continue; // out-of-order input, already rejected upstream
        }
        let size = end - start + 1;
        chunks.push(Chunk {
            id: (i + 1) as u32,
            start_line: start,
            end_line: end,
            size,
            kind: pair[0].kind.clone(),
            description: pair[0].description.clone(),
            priority: if size > threshold {
                Priority::High
            } else {
                Priority::Normal
            },
        });
    }
    ChunkPlan {
        file: file.to_string(),
        total_lines,
        chunks,
        strategy: STRATEGY_STRUCTURAL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary(line: u32, kind: &str) -> StructureBoundary {
        StructureBoundary {
            line,
            kind: kind.to_string(),
            description: format!("{kind} section"),
        }
    }

    #[test]
    fn three_boundaries_make_two_normal_chunks() {
        let bs = [boundary(1, "imports"), boundary(45, "class"), boundary(120, "methods")];
        let p = plan("src/app.js", &bs, 200);

        assert_eq!(p.file, "src/app.js");
        assert_eq!(p.total_lines, 120);
        assert_eq!(p.strategy, STRATEGY_STRUCTURAL);
        assert_eq!(p.chunks.len(), 2);

        assert_eq!(p.chunks[0].id, 1);
        assert_eq!((p.chunks[0].start_line, p.chunks[0].end_line), (1, 44));
        assert_eq!(p.chunks[0].size, 44);
        assert_eq!(p.chunks[0].kind, "imports");
        assert_eq!(p.chunks[0].priority, Priority::Normal);

        assert_eq!(p.chunks[1].id, 2);
        assert_eq!((p.chunks[1].start_line, p.chunks[1].end_line), (45, 119));
        assert_eq!(p.chunks[1].size, 75);
        assert_eq!(p.chunks[1].priority, Priority::Normal);
    }

    #[test]
    fn oversized_chunk_is_high_priority() {
        let bs = [boundary(1, "module"), boundary(260, "end")];
        let p = plan("big.rs", &bs, 200);
        assert_eq!(p.chunks.len(), 1);
        assert_eq!((p.chunks[0].start_line, p.chunks[0].end_line), (1, 259));
        assert_eq!(p.chunks[0].size, 259);
        assert_eq!(p.chunks[0].priority, Priority::High);
    }

    #[test]
    fn threshold_is_tunable() {
        let bs = [boundary(1, "module"), boundary(62, "end")];
        let p = plan("mid.rs", &bs, 50);
        assert_eq!(p.chunks[0].size, 61);
        assert_eq!(p.chunks[0].priority, Priority::High);
    }

    #[test]
    fn exact_threshold_stays_normal() {
        // priority flips strictly above the threshold
        let bs = [boundary(1, "module"), boundary(201, "end")];
        let p = plan("edge.rs", &bs, 200);
        assert_eq!(p.chunks[0].size, 200);
        assert_eq!(p.chunks[0].priority, Priority::Normal);
    }

    #[test]
    fn degenerate_inputs_yield_empty_plans() {
        let empty = plan("none.rs", &[], 200);
        assert_eq!(empty.total_lines, 0);
        assert!(empty.chunks.is_empty());

        let single = plan("one.rs", &[boundary(40, "module")], 200);
        assert_eq!(single.total_lines, 40);
        assert!(single.chunks.is_empty());
    }

    #[test]
    fn chunks_are_contiguous_without_gaps() {
        let bs = [
            boundary(1, "imports"),
            boundary(30, "types"),
            boundary(90, "impl"),
            boundary(140, "tests"),
        ];
        let p = plan("lib.rs", &bs, 200);
        assert_eq!(p.chunks.len(), 3);
        for pair in p.chunks.windows(2) {
            assert_eq!(pair[0].end_line + 1, pair[1].start_line);
        }
    }
}
