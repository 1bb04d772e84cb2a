use skald_core::{ActivityEvent, ActivityKind, SkaldPaths, TimeWindow};

use crate::modified_at;

/// Memory stores surfaced in recaps. An explicit allow-list; files not
/// named here never produce events.
pub const MEMORY_STORE_FILES: &[&str] = &[
    "memory.json",
    "decisions.json",
    "tasks.json",
    "interactions.json",
    "preferences.json",
    "handoff.json",
];

/// One templated event per allow-listed store modified inside the window.
/// Store content is never read; only the modification instant matters.
pub fn collect(paths: &SkaldPaths, window: &TimeWindow) -> Vec<ActivityEvent> {
    let mut events = Vec::new();
    for file in MEMORY_STORE_FILES {
        let path = paths.memory_dir.join(file);
        let Some(ts) = modified_at(&path) else {
            continue;
        };
        if !window.contains(ts) {
            continue;
        }
        events.push(ActivityEvent::new(
            ActivityKind::MemoryUpdate,
            ts,
            *file,
            format!("{file} was updated"),
        ));
    }
    events
}
