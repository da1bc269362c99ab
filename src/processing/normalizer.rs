/// Canonicalize raw OCR text before any field logic runs.
///
/// A vertical bar is almost always a misread capital I; backticks and
/// apostrophes are dropped. Line structure is preserved.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    raw.chars()
        .filter(|c| *c != '`' && *c != '\'')
        .map(|c| if c == '|' { 'I' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}
