use skald_collect::collect_window;
use skald_core::{window, ActivityEvent, ActivityKind, SkaldConfig, SkaldPaths, TimeWindow};
use skald_infer::InferenceClient;

/// Generate a recap for a timeframe token ("last", "6h", bare day counts).
///
/// Collects and orders activity across all stores, then asks the inference
/// service for a narrative; any service failure degrades to the grouped
/// summary. Never fails: the worst outcome is the no-activity message.
pub fn generate(
    paths: &SkaldPaths,
    client: &InferenceClient,
    config: &SkaldConfig,
    token: &str,
) -> String {
    let win = TimeWindow::resolve(token, &config.timeframes);
    let label = window::describe(token, &config.timeframes);
    let events = collect_window(paths, &win);
    recap_events(client, &events, &label)
}

/// Recap an already-aggregated stream (newest first).
///
/// Empty input short-circuits to the no-activity message without touching
/// the inference service.
pub fn recap_events(client: &InferenceClient, events: &[ActivityEvent], label: &str) -> String {
    match summarize(client, events, label) {
        RecapOutcome::NoActivity => no_activity(label),
        RecapOutcome::Inferred(text) | RecapOutcome::Fallback(text) => text,
    }
}

/// How a recap came to be. `NoActivity` is decided before any service
/// call is made.
#[derive(Debug)]
enum RecapOutcome {
    NoActivity,
    Inferred(String),
    Fallback(String),
}

fn summarize(client: &InferenceClient, events: &[ActivityEvent], label: &str) -> RecapOutcome {
    if events.is_empty() {
        return RecapOutcome::NoActivity;
    }
    match client.generate(&build_prompt(events, label)) {
        Ok(text) => {
            RecapOutcome::Inferred(format!("Activity recap - last {label}\n\n{}", text.trim()))
        }
        Err(e) => {
            tracing::warn!(
                model = client.model(),
                error = %e,
                "inference unavailable, using grouped summary"
            );
            RecapOutcome::Fallback(fallback_summary(events, label))
        }
    }
}

/// Deterministic grouped summary: one count line per non-empty kind, plus
/// the three most recent commit entries. Never fails.
pub fn fallback_summary(events: &[ActivityEvent], label: &str) -> String {
    if events.is_empty() {
        return no_activity(label);
    }
    let mut lines = Vec::new();
    lines.push(format!("Activity recap - last {label}"));
    lines.push(String::new());

    let handoffs = count_kind(events, ActivityKind::Handoff);
    if handoffs > 0 {
        lines.push(format!("Handoffs: {handoffs}"));
    }
    let commits: Vec<&ActivityEvent> = events
        .iter()
        .filter(|e| e.kind == ActivityKind::Commit)
        .collect();
    if !commits.is_empty() {
        lines.push(format!("Commits: {}", commits.len()));
        for event in commits.iter().take(3) {
            lines.push(format!("  - {}", event.content));
        }
    }
    let updates = count_kind(events, ActivityKind::MemoryUpdate);
    if updates > 0 {
        lines.push(format!("Memory updates: {updates}"));
    }
    let logs = count_kind(events, ActivityKind::LogEntry);
    if logs > 0 {
        lines.push(format!("Log entries: {logs}"));
    }
    lines.join("\n")
}

fn build_prompt(events: &[ActivityEvent], label: &str) -> String {
    let entries: Vec<String> = events
        .iter()
        .map(|e| format!("[{}] {}: {}", e.kind.label(), ts_rfc3339(e.ts), e.content))
        .collect();
    format!(
        "You are an assistant summarizing recent development activity.\n\n\
         TIMEFRAME: last {label}\n\
         DATA TO SUMMARIZE:\n\
         {}\n\n\
         Provide a concise summary covering:\n\
         1. Main objectives and accomplishments\n\
         2. Technical changes made\n\
         3. Issues encountered and resolved\n\
         4. Current status and next steps\n\
         5. Warnings or concerns\n\n\
         Keep it brief but informative for quick context switching.",
        entries.join("\n\n")
    )
}

fn count_kind(events: &[ActivityEvent], kind: ActivityKind) -> usize {
    events.iter().filter(|e| e.kind == kind).count()
}

fn no_activity(label: &str) -> String {
    format!("No significant activity found in the last {label}")
}

fn ts_rfc3339(ts: time::OffsetDateTime) -> String {
    // commit times can predate year 0, which RFC3339 cannot render
    ts.format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| ts.unix_timestamp().to_string())
}
