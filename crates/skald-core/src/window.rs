use std::collections::BTreeMap;

/// Built-in timeframe tokens mapped to lookback minutes.
///
/// Bare day counts ("2", "7") are handled by the resolver itself and
/// deliberately absent here.
pub fn default_table() -> BTreeMap<String, u32> {
    BTreeMap::from([
        ("last".to_string(), 30),
        ("1h".to_string(), 60),
        ("6h".to_string(), 360),
        ("12h".to_string(), 720),
        ("24h".to_string(), 1440),
        ("7d".to_string(), 10_080),
    ])
}

/// A resolved lookback window: everything strictly after `cutoff` is in.
/// Never persisted; recomputed from the clock on every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub cutoff: time::OffsetDateTime,
}

impl TimeWindow {
    /// Resolve `token` against `table`, reading the clock now.
    pub fn resolve(token: &str, table: &BTreeMap<String, u32>) -> Self {
        Self::resolve_at(token, table, time::OffsetDateTime::now_utc())
    }

    /// Resolve `token` against `table` relative to an explicit `now`.
    ///
    /// A plain non-negative integer means that many *days* and wins over
    /// the table; a table hit maps to its minute count; anything else
    /// falls back to one hour (logged, not an error). Lookbacks reaching
    /// past year 0 clamp to the Unix epoch; RFC3339 cannot render earlier
    /// instants.
    pub fn resolve_at(token: &str, table: &BTreeMap<String, u32>, now: time::OffsetDateTime) -> Self {
        let cutoff = match now.checked_sub(lookback(token, table)) {
            Some(t) if t.year() >= 0 => t,
            _ => {
                tracing::debug!(token, "lookback predates year 0, clamping to epoch");
                time::OffsetDateTime::UNIX_EPOCH
            }
        };
        Self { cutoff }
    }

    /// True when `instant` falls inside the window.
    pub fn contains(&self, instant: time::OffsetDateTime) -> bool {
        instant > self.cutoff
    }
}

fn lookback(token: &str, table: &BTreeMap<String, u32>) -> time::Duration {
    if let Ok(days) = token.parse::<u32>() {
        return time::Duration::days(i64::from(days));
    }
    if let Some(minutes) = table.get(token) {
        return time::Duration::minutes(i64::from(*minutes));
    }
    tracing::warn!(token, "unknown timeframe token, defaulting to 1h");
    time::Duration::hours(1)
}

/// Human label for a timeframe token: "30 minutes", "1 hour", "7 days".
/// Unknown tokens are echoed back unchanged.
pub fn describe(token: &str, table: &BTreeMap<String, u32>) -> String {
    if let Ok(days) = token.parse::<u32>() {
        return humanize(u64::from(days) * 24 * 60);
    }
    match table.get(token) {
        Some(minutes) => humanize(u64::from(*minutes)),
        None => token.to_string(),
    }
}

fn humanize(minutes: u64) -> String {
    const DAY: u64 = 24 * 60;
    if minutes >= DAY && minutes % DAY == 0 {
        let days = minutes / DAY;
        return if days == 1 {
            "1 day".to_string()
        } else {
            format!("{days} days")
        };
    }
    if minutes >= 60 && minutes % 60 == 0 {
        let hours = minutes / 60;
        return if hours == 1 {
            "1 hour".to_string()
        } else {
            format!("{hours} hours")
        };
    }
    if minutes == 1 {
        "1 minute".to_string()
    } else {
        format!("{minutes} minutes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinned_now() -> time::OffsetDateTime {
        time::OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
    }

    #[test]
    fn named_tokens_subtract_exact_durations() {
        let table = default_table();
        let now = pinned_now();
        let cases = [
            ("last", time::Duration::minutes(30)),
            ("1h", time::Duration::hours(1)),
            ("6h", time::Duration::hours(6)),
            ("12h", time::Duration::hours(12)),
            ("24h", time::Duration::hours(24)),
            ("7d", time::Duration::days(7)),
        ];
        for (token, dur) in cases {
            let w = TimeWindow::resolve_at(token, &table, now);
            assert_eq!(w.cutoff, now - dur, "token {token}");
        }
    }

    #[test]
    fn numeric_tokens_mean_days() {
        let table = default_table();
        let now = pinned_now();
        let two = TimeWindow::resolve_at("2", &table, now);
        assert_eq!(two.cutoff, now - time::Duration::days(2));
        // "7" and "7d" agree
        let bare = TimeWindow::resolve_at("7", &table, now);
        let named = TimeWindow::resolve_at("7d", &table, now);
        assert_eq!(bare.cutoff, named.cutoff);
    }

    #[test]
    fn numeric_wins_over_table() {
        // a table entry spelled as a bare integer is shadowed by the
        // days interpretation
        let mut table = default_table();
        table.insert("3".to_string(), 5);
        let now = pinned_now();
        let w = TimeWindow::resolve_at("3", &table, now);
        assert_eq!(w.cutoff, now - time::Duration::days(3));
    }

    #[test]
    fn unknown_token_defaults_to_one_hour() {
        let table = default_table();
        let now = pinned_now();
        let w = TimeWindow::resolve_at("fortnight", &table, now);
        assert_eq!(w.cutoff, now - time::Duration::hours(1));
    }

    #[test]
    fn distant_numeric_tokens_clamp_to_the_epoch() {
        let table = default_table();
        let now = pinned_now();
        // too far back to subtract at all
        let w = TimeWindow::resolve_at("7000000", &table, now);
        assert_eq!(w.cutoff, time::OffsetDateTime::UNIX_EPOCH);
        // subtractable, but lands before year 0
        let w = TimeWindow::resolve_at("1000000", &table, now);
        assert_eq!(w.cutoff, time::OffsetDateTime::UNIX_EPOCH);
        // a century back still resolves exactly
        let w = TimeWindow::resolve_at("36500", &table, now);
        assert_eq!(w.cutoff, now - time::Duration::days(36_500));
    }

    #[test]
    fn custom_table_entry_resolves() {
        let mut table = default_table();
        table.insert("2h".to_string(), 120);
        let now = pinned_now();
        let w = TimeWindow::resolve_at("2h", &table, now);
        assert_eq!(w.cutoff, now - time::Duration::hours(2));
    }

    #[test]
    fn contains_is_strict() {
        let table = default_table();
        let now = pinned_now();
        let w = TimeWindow::resolve_at("1h", &table, now);
        assert!(w.contains(now));
        assert!(!w.contains(w.cutoff));
        assert!(!w.contains(w.cutoff - time::Duration::seconds(1)));
    }

    #[test]
    fn describe_humanizes_known_tokens() {
        let table = default_table();
        assert_eq!(describe("last", &table), "30 minutes");
        assert_eq!(describe("1h", &table), "1 hour");
        assert_eq!(describe("6h", &table), "6 hours");
        assert_eq!(describe("7d", &table), "7 days");
        assert_eq!(describe("1", &table), "1 day");
        assert_eq!(describe("14", &table), "14 days");
    }

    #[test]
    fn describe_echoes_unknown_tokens() {
        let table = default_table();
        assert_eq!(describe("fortnight", &table), "fortnight");
    }
}
