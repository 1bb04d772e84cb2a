use std::path::Path;

use serde::Deserialize;

use skald_infer::{GenerateOptions, InferenceClient};

/// Lines of context handed to the analyzer from the top of the file.
const HEAD_LINES: usize = 50;
/// Lines of context from the bottom.
const TAIL_LINES: usize = 20;

/// Near-greedy sampling with a bounded response; boundary maps are small.
const ANALYSIS_OPTIONS: GenerateOptions = GenerateOptions {
    temperature: Some(0.1),
    num_predict: Some(500),
};

/// One structural marker proposed by the analyzer. Line numbers are
/// 1-based; the last boundary of a sequence marks the end of the analyzed
/// region, not necessarily end-of-file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructureBoundary {
    pub line: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// Complexity label reported by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// A validated structure analysis for one file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructureAnalysis {
    #[serde(default)]
    pub recommended_chunk_size: Option<u32>,
    pub boundaries: Vec<StructureBoundary>,
    pub complexity: Complexity,
}

/// Outcome of structure analysis for one file.
#[derive(Debug)]
pub enum AnalysisOutcome {
    /// File is short enough to hand over whole; no service call was made.
    NotNeeded,
    /// Validated boundary map.
    Analyzed(StructureAnalysis),
    /// Service failure or schema violation; planning is skipped for this
    /// file and the batch continues.
    Failed(String),
}

/// Ask the inference service for a boundary map.
///
/// Files shorter than `min_analyze_lines` come back `NotNeeded` without
/// any external call.
pub fn analyze(
    client: &InferenceClient,
    rel_path: &str,
    content: &str,
    min_analyze_lines: u32,
) -> AnalysisOutcome {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < min_analyze_lines as usize {
        return AnalysisOutcome::NotNeeded;
    }
    let prompt = build_prompt(rel_path, &lines);
    match client.generate_json(&prompt, ANALYSIS_OPTIONS) {
        Ok(raw) => match parse_analysis(&raw) {
            Ok(analysis) => AnalysisOutcome::Analyzed(analysis),
            Err(reason) => AnalysisOutcome::Failed(reason),
        },
        Err(e) => AnalysisOutcome::Failed(e.to_string()),
    }
}

/// Strict schema validation: a usable analysis or a reason. Partial reads
/// are never accepted.
pub fn parse_analysis(raw: &str) -> Result<StructureAnalysis, String> {
    let analysis: StructureAnalysis =
        serde_json::from_str(raw.trim()).map_err(|e| format!("schema mismatch: {e}"))?;
    validate(&analysis)?;
    Ok(analysis)
}

fn validate(analysis: &StructureAnalysis) -> Result<(), String> {
    let mut prev = 0u32;
    for b in &analysis.boundaries {
        if b.line == 0 {
            return Err("boundary line numbers are 1-based".to_string());
        }
        if b.line <= prev {
            return Err(format!(
                "boundary lines must be strictly increasing (saw {} after {prev})",
                b.line
            ));
        }
        prev = b.line;
    }
    Ok(())
}

fn build_prompt(rel_path: &str, lines: &[&str]) -> String {
    let ext = Path::new(rel_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("txt");
    let head = lines[..HEAD_LINES.min(lines.len())].join("\n");
    let tail_start = lines.len().saturating_sub(TAIL_LINES);
    let tail = lines[tail_start..].join("\n");
    format!(
        "Analyze this .{ext} file structure and identify chunking boundaries.\n\
         File: {rel_path} ({} lines)\n\n\
         Look for:\n\
         - Function and type boundaries\n\
         - Major sections or modules\n\
         - Comment-separated logical blocks\n\
         - Import/export sections\n\n\
         Respond with JSON only:\n\
         {{\n\
           \"recommended_chunk_size\": 200,\n\
           \"boundaries\": [\n\
             {{\"line\": 1, \"type\": \"imports\", \"description\": \"Import section\"}},\n\
             {{\"line\": 45, \"type\": \"class\", \"description\": \"Main type definition\"}},\n\
             {{\"line\": 120, \"type\": \"methods\", \"description\": \"Helper methods\"}}\n\
           ],\n\
           \"complexity\": \"low|medium|high\"\n\
         }}\n\n\
         First {HEAD_LINES} lines:\n{head}\n\n\
         Last {TAIL_LINES} lines:\n{tail}",
        lines.len()
    )
}
