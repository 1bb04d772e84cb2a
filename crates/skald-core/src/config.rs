use std::collections::BTreeMap;

use serde::Deserialize;

use crate::paths::SkaldPaths;
use crate::window;

/// Runtime configuration, stored in `.skald/config.json`.
///
/// Every field has a working default; a missing or unparseable file means
/// "run with defaults", never an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SkaldConfig {
    /// Base URL of the local inference service.
    pub inference_endpoint: String,
    /// Model identifier passed through on every generate call.
    pub model: String,
    /// Hard timeout for a single inference call, in seconds.
    pub timeout_secs: u64,
    /// Chunks larger than this many lines are marked high priority.
    pub chunk_size_threshold: u32,
    /// Files shorter than this many lines skip structure analysis.
    pub min_analyze_lines: u32,
    /// Timeframe token table, minutes per token. Replaces the built-ins
    /// when set; bare day counts always resolve regardless.
    pub timeframes: BTreeMap<String, u32>,
}

impl Default for SkaldConfig {
    fn default() -> Self {
        Self {
            inference_endpoint: "http://localhost:11434".to_string(),
            model: "qwen2.5-coder:7b".to_string(),
            timeout_secs: 120,
            chunk_size_threshold: 200,
            min_analyze_lines: 100,
            timeframes: window::default_table(),
        }
    }
}

impl SkaldConfig {
    /// Load from `.skald/config.json`; defaults if missing or unparseable.
    pub fn load(paths: &SkaldPaths) -> Self {
        let content = match std::fs::read_to_string(&paths.config_json) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::debug!(error = %e, "config.json unparseable, using defaults");
                Self::default()
            }
        }
    }
}
