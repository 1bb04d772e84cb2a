use skald_core::{preview, ActivityEvent, ActivityKind, SkaldPaths, TimeWindow};

use crate::modified_at;

/// Longest log preview carried into a prompt.
pub const LOG_PREVIEW_CHARS: usize = 1000;

/// One event per file in `logs/` modified inside the window.
pub fn collect(paths: &SkaldPaths, window: &TimeWindow) -> Vec<ActivityEvent> {
    let Ok(entries) = std::fs::read_dir(&paths.logs_dir) else {
        return Vec::new(); // store absent
    };
    let mut events = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(ts) = modified_at(&path) else {
            continue;
        };
        if !window.contains(ts) {
            continue;
        }
        let Ok(bytes) = std::fs::read(&path) else {
            continue;
        };
        // lossy: a log with stray binary bytes still counts as activity
        let content = String::from_utf8_lossy(&bytes);
        events.push(ActivityEvent::new(
            ActivityKind::LogEntry,
            ts,
            name,
            preview(&content, LOG_PREVIEW_CHARS),
        ));
    }
    events
}
