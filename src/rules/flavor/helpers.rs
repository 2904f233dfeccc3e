use regex::{Regex, RegexBuilder};

/// Uppercase the first character, keep the rest verbatim.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Case-fold a phrase for dictionary comparison.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Case-insensitive whole-word matcher for a literal phrase.
///
/// `None` only if the escaped phrase exceeds the regex size limit.
pub fn whole_word_regex(phrase: &str) -> Option<Regex> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(phrase))).case_insensitive(true).build().ok()
}

/// Distinct values in first-occurrence order.
pub fn dedup_in_order<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|seen| seen == value) {
            out.push(value.to_string());
        }
    }
    out
}
