//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Render the query for quoting inside a response.
///
/// Blank queries are shown as a placeholder so responses never quote `""`.
pub fn quote_query(query: &str, max_len: usize) -> String {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        "(no query text)".to_string()
    } else {
        format!("\"{}\"", truncate(trimmed, max_len))
    }
}

/// Format a [0,1] ratio as a whole percentage.
pub fn percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}
