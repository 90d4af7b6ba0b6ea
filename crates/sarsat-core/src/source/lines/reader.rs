use super::layout;

/// Strip comments and surrounding whitespace from one input line.
///
/// Returns `None` when nothing is left to decode.
///
/// # Examples
/// This helper is part of an internal module, so the example is marked as
/// text example.
/// ```text
/// use sarsat_core::source::lines::reader::hex_id_from_line;
///
/// assert_eq!(hex_id_from_line("  A029C2900D97591 # vessel\n"), Some("A029C2900D97591"));
/// assert_eq!(hex_id_from_line("# header"), None);
/// ```
pub fn hex_id_from_line(line: &str) -> Option<&str> {
    let content = match line.split_once(layout::COMMENT_PREFIX) {
        Some((before, _)) => before,
        None => line,
    };
    let content = content.trim();
    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}
