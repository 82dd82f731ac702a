//! Small text helpers shared by the query layer.

/// Uppercase the first character of a string, leaving the rest untouched
/// ("movie" -> "Movie", "tv show" -> "Tv show").
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Escape `%`, `_` and `\` so user input can be embedded in a LIKE pattern
/// with `ESCAPE '\'`.
pub fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
