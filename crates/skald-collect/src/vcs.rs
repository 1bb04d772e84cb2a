use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use skald_core::{ActivityEvent, ActivityKind, SkaldPaths, TimeWindow};

/// File name patterns eligible for chunk-candidate seeding.
const SOURCE_GLOBS: &[&str] = &["*.rs", "*.js", "*.ts", "*.py", "*.go", "*.css", "*.html"];

/// Commits since the cutoff's calendar date, excluding merges.
///
/// `git log --since` takes a date, so same-day commits older than the
/// cutoff instant can slip in; timestamps are the real committer times,
/// which keeps aggregator ordering correct regardless.
pub fn collect(paths: &SkaldPaths, window: &TimeWindow) -> Vec<ActivityEvent> {
    let since = since_date(window);
    let Ok(output) = std::process::Command::new("git")
        .args([
            "log",
            &format!("--since={since}"),
            "--no-merges",
            "--pretty=format:%ct %h %s",
        ])
        .current_dir(&paths.root)
        .output()
    else {
        return Vec::new(); // git not installed
    };
    if !output.status.success() {
        tracing::debug!("git log unavailable, skipping commit history");
        return Vec::new();
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut events = Vec::new();
    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((epoch, summary)) = line.split_once(' ') else {
            continue;
        };
        let Ok(secs) = epoch.parse::<i64>() else {
            continue;
        };
        let Ok(ts) = time::OffsetDateTime::from_unix_timestamp(secs) else {
            continue;
        };
        events.push(ActivityEvent::new(ActivityKind::Commit, ts, "git", summary));
    }
    events
}

/// Distinct source files touched by commits in the window that still exist
/// on disk. Seeds the chunk-planning batch.
pub fn changed_files(paths: &SkaldPaths, window: &TimeWindow) -> Vec<String> {
    let since = since_date(window);
    let Ok(output) = std::process::Command::new("git")
        .args([
            "log",
            &format!("--since={since}"),
            "--no-merges",
            "--name-only",
            "--pretty=format:",
        ])
        .current_dir(&paths.root)
        .output()
    else {
        return Vec::new();
    };
    if !output.status.success() {
        return Vec::new();
    }

    let matcher = source_matcher();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut files = Vec::new();
    for line in stdout.lines() {
        let file = line.trim();
        if file.is_empty() {
            continue;
        }
        let name = Path::new(file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file);
        if !matcher.is_match(name) {
            continue;
        }
        if files.iter().any(|f| f == file) {
            continue;
        }
        if !paths.root.join(file).is_file() {
            continue; // renamed or deleted since the commit
        }
        files.push(file.to_string());
    }
    files
}

fn since_date(window: &TimeWindow) -> String {
    let Ok(ts) = window
        .cutoff
        .format(&time::format_description::well_known::Rfc3339)
    else {
        return "1970-01-01".to_string(); // cutoff outside the renderable range
    };
    ts[..10].to_string()
}

fn source_matcher() -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pat in SOURCE_GLOBS {
        if let Ok(glob) = Glob::new(pat) {
            builder.add(glob);
        }
    }
    builder.build().unwrap_or_else(|_| GlobSet::empty())
}
