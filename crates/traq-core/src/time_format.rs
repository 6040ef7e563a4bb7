//! Elapsed/spent time display formatting.

/// Format a second count as `hours:minutes:seconds`.
///
/// No zero-padding: 5 seconds renders as `"0:0:5"`, not `"0:00:05"`. This
/// matches what the client has always displayed and tests pin it down as a
/// quirk, not a contract worth breaking.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}:{minutes}:{seconds}")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
