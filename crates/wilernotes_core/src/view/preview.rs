use once_cell::sync::Lazy;
use regex::Regex;

/// Default snippet length used by list rows.
pub const DEFAULT_PREVIEW_LEN: usize = 50;
/// Marker appended to truncated snippets.
pub const ELLIPSIS: &str = "...";

static MARKUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[#*`_]").expect("valid markup regex"));

/// One-line, markup-free summary of `content`.
///
/// Strips `#`, `*`, backtick and `_`, keeps the first line and cuts it to
/// `max_len` characters plus `...` when longer. The line is trimmed before
/// the length check, so the space left behind by a heading marker does not
/// count toward `max_len`. Returns an empty string for empty content;
/// placeholder text is a shell concern.
pub fn preview_snippet(content: &str, max_len: usize) -> String {
    let stripped = MARKUP_RE.replace_all(content, "");
    let first_line = stripped.split('\n').next().unwrap_or_default().trim();

    if first_line.chars().count() > max_len {
        let mut snippet: String = first_line.chars().take(max_len).collect();
        snippet.push_str(ELLIPSIS);
        snippet
    } else {
        first_line.to_string()
    }
}
