// Output: the rendering port, terminal display, and JSON export.

pub mod export;
pub mod terminal;
pub mod traits;

use chrono::{DateTime, Utc};

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Relative age of a post: "Just now", "5m ago", "3h ago", "2d ago".
///
/// Timestamps in the future count as "Just now".
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let mins = (now - timestamp).num_minutes();
    if mins < 1 {
        return "Just now".to_string();
    }
    if mins < 60 {
        return format!("{mins}m ago");
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

/// Format a count with thousands separators ("12,345").
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
