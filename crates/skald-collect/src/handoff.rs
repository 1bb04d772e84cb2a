use std::path::Path;

use globset::Glob;

use skald_core::{preview, ActivityEvent, ActivityKind, SkaldPaths, TimeWindow};

use crate::modified_at;

/// Longest handoff preview carried into a prompt.
pub const HANDOFF_PREVIEW_CHARS: usize = 2000;

const CATCH_UP_GLOB: &str = "catch-up-*.md";

/// Session handoffs: two known aggregate-state files under `memory/` plus
/// per-session catch-up records in `memory/handoffs/`.
pub fn collect(paths: &SkaldPaths, window: &TimeWindow) -> Vec<ActivityEvent> {
    let mut events = Vec::new();
    collect_aggregate_state(paths, window, &mut events);
    collect_catch_ups(paths, window, &mut events);
    events
}

fn collect_aggregate_state(paths: &SkaldPaths, window: &TimeWindow, out: &mut Vec<ActivityEvent>) {
    let consolidated = paths.memory_dir.join("consolidated-matrix.json");
    if let Some(ts) = modified_at(&consolidated) {
        if window.contains(ts) {
            let count = indexed_entry_count(&consolidated).unwrap_or(0);
            out.push(ActivityEvent::new(
                ActivityKind::Handoff,
                ts,
                "consolidated-matrix.json",
                format!("Consolidated memory with {count} indexed entries"),
            ));
        }
    }

    let context = paths.memory_dir.join("context-matrix.json");
    if let Some(ts) = modified_at(&context) {
        if window.contains(ts) {
            out.push(ActivityEvent::new(
                ActivityKind::Handoff,
                ts,
                "context-matrix.json",
                "Context matrix was updated",
            ));
        }
    }
}

fn indexed_entry_count(path: &Path) -> Option<usize> {
    let content = std::fs::read_to_string(path).ok()?;
    let val: serde_json::Value = serde_json::from_str(&content).ok()?;
    Some(val.get("entries")?.as_object()?.len())
}

fn collect_catch_ups(paths: &SkaldPaths, window: &TimeWindow, out: &mut Vec<ActivityEvent>) {
    let Ok(glob) = Glob::new(CATCH_UP_GLOB) else {
        return;
    };
    let matcher = glob.compile_matcher();
    let Ok(entries) = std::fs::read_dir(&paths.handoff_dir) else {
        return; // store absent
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !matcher.is_match(name) {
            continue;
        }
        let Some(ts) = modified_at(&path) else {
            continue;
        };
        if !window.contains(ts) {
            continue;
        }
        let Ok(bytes) = std::fs::read(&path) else {
            continue;
        };
        let content = String::from_utf8_lossy(&bytes);
        out.push(ActivityEvent::new(
            ActivityKind::Handoff,
            ts,
            name,
            preview(&content, HANDOFF_PREVIEW_CHARS),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_back_one_hour() -> TimeWindow {
        TimeWindow {
            cutoff: time::OffsetDateTime::now_utc() - time::Duration::hours(1),
        }
    }

    #[test]
    fn missing_stores_yield_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = SkaldPaths::discover(tmp.path());
        assert!(collect(&paths, &window_back_one_hour()).is_empty());
    }

    #[test]
    fn catch_up_records_are_collected_and_truncated() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = SkaldPaths::discover(tmp.path());
        std::fs::create_dir_all(&paths.handoff_dir).unwrap();
        std::fs::write(
            paths.handoff_dir.join("catch-up-2026-08-25.md"),
            "x".repeat(3000),
        )
        .unwrap();
        std::fs::write(paths.handoff_dir.join("notes.md"), "not a handoff").unwrap();

        let events = collect(&paths, &window_back_one_hour());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ActivityKind::Handoff);
        assert_eq!(events[0].source, "catch-up-2026-08-25.md");
        assert_eq!(events[0].content.len(), HANDOFF_PREVIEW_CHARS);
    }

    #[test]
    fn non_utf8_catch_up_still_surfaces() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = SkaldPaths::discover(tmp.path());
        std::fs::create_dir_all(&paths.handoff_dir).unwrap();
        std::fs::write(
            paths.handoff_dir.join("catch-up-2026-08-26.md"),
            b"\xf0\x28\x8c\x28 session notes",
        )
        .unwrap();

        let events = collect(&paths, &window_back_one_hour());
        assert_eq!(events.len(), 1);
        assert!(events[0].content.contains("session notes"));
    }

    #[test]
    fn consolidated_matrix_reports_entry_count() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = SkaldPaths::discover(tmp.path());
        std::fs::create_dir_all(&paths.memory_dir).unwrap();
        std::fs::write(
            paths.memory_dir.join("consolidated-matrix.json"),
            r#"{"entries":{"a":1,"b":2,"c":3}}"#,
        )
        .unwrap();

        let events = collect(&paths, &window_back_one_hour());
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].content,
            "Consolidated memory with 3 indexed entries"
        );
    }

    #[test]
    fn unreadable_matrix_counts_zero_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = SkaldPaths::discover(tmp.path());
        std::fs::create_dir_all(&paths.memory_dir).unwrap();
        std::fs::write(paths.memory_dir.join("consolidated-matrix.json"), "oops").unwrap();

        let events = collect(&paths, &window_back_one_hour());
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].content,
            "Consolidated memory with 0 indexed entries"
        );
    }

    #[test]
    fn records_outside_window_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = SkaldPaths::discover(tmp.path());
        std::fs::create_dir_all(&paths.handoff_dir).unwrap();
        std::fs::write(paths.handoff_dir.join("catch-up-old.md"), "old").unwrap();

        let future = TimeWindow {
            cutoff: time::OffsetDateTime::now_utc() + time::Duration::hours(1),
        };
        assert!(collect(&paths, &future).is_empty());
    }
}
