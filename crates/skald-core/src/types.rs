/// Which backing store produced an activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Handoff,
    MemoryUpdate,
    Commit,
    LogEntry,
}

impl ActivityKind {
    /// Stable name used in prompts and grouped summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Handoff => "handoff",
            ActivityKind::MemoryUpdate => "memory_update",
            ActivityKind::Commit => "commit",
            ActivityKind::LogEntry => "log_entry",
        }
    }
}

/// One normalized activity record.
///
/// Events are value objects: collected, ordered, rendered to text, then
/// dropped. Nothing persists them and nothing assigns them identity, so
/// duplicates across overlapping runs are tolerated.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEvent {
    pub kind: ActivityKind,
    pub ts: time::OffsetDateTime,
    /// File name or "git"; names the store the record came from.
    pub source: String,
    /// Bounded preview or templated description, depending on the collector.
    pub content: String,
}

impl ActivityEvent {
    pub fn new(
        kind: ActivityKind,
        ts: time::OffsetDateTime,
        source: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            ts,
            source: source.into(),
            content: content.into(),
        }
    }
}

/// Truncate to at most `max_chars` characters without splitting a code point.
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_long_input() {
        let s = "a".repeat(50);
        assert_eq!(preview(&s, 10), "a".repeat(10));
    }

    #[test]
    fn preview_keeps_short_input_whole() {
        assert_eq!(preview("short", 2000), "short");
    }

    #[test]
    fn preview_counts_chars_not_bytes() {
        // four code points, twelve bytes
        let s = "日本語文";
        assert_eq!(preview(s, 2), "日本");
        assert_eq!(preview(s, 4), s);
    }

    #[test]
    fn kind_labels_are_stable() {
        assert_eq!(ActivityKind::Handoff.label(), "handoff");
        assert_eq!(ActivityKind::MemoryUpdate.label(), "memory_update");
        assert_eq!(ActivityKind::Commit.label(), "commit");
        assert_eq!(ActivityKind::LogEntry.label(), "log_entry");
    }
}
