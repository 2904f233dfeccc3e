//! Matching strategies shared by the flavor stages.
//!
//! Each function is one way of finding a dictionary phrase in a piece of
//! flavor text. Stages combine them in a fixed order and keep the first hit;
//! the [`Strategy`] tag records which one produced it.
//!
//! Two views of the input are in play. `lower` is the lowercased, trimmed
//! text; `original` is the verbatim text, used wherever casing or bracket
//! positions matter.

use regex::Regex;
use serde::Serialize;

use super::compiled::{Dictionary, Entry};
use crate::rules::flavor::helpers::dedup_in_order;
use crate::rules::flavor::patterns;

/// Matching primitive that produced a stage result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Longest dictionary phrase contained in the text.
    LongestPhrase,
    /// Fixed capture pattern whose capture is a dictionary phrase.
    PatternCapture,
    /// Content of a `(...)` group.
    Parenthetical,
    /// Text before the first colon.
    ColonPrefix,
    /// Whole-word dictionary phrase, in declaration order.
    WholeWord,
    /// Signed integer literals.
    ModifierScan,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::LongestPhrase => "longest-phrase",
            Strategy::PatternCapture => "pattern-capture",
            Strategy::Parenthetical => "parenthetical",
            Strategy::ColonPrefix => "colon-prefix",
            Strategy::WholeWord => "whole-word",
            Strategy::ModifierScan => "modifier-scan",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved stage hit: canonical key, display text, and how it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub key: String,
    pub raw: String,
    pub strategy: Strategy,
}

impl Extracted {
    pub fn new(entry: &Entry, raw: String, strategy: Strategy) -> Self {
        Extracted { key: entry.key.clone(), raw, strategy }
    }
}

/// Longest phrase of `dict` contained in `lower`.
pub fn longest_phrase<'d>(dict: &'d Dictionary, lower: &str) -> Option<&'d Entry> {
    dict.longest_in(lower)
}

/// First capture (group 1) of `family`, tried in order, that is a phrase of `dict`.
///
/// Only the leftmost match of each pattern is considered. The returned slice
/// is the trimmed capture.
pub fn validated_capture<'d, 't>(
    dict: &'d Dictionary,
    family: &[&Regex],
    lower: &'t str,
) -> Option<(&'d Entry, &'t str)> {
    for re in family {
        let Some(capture) = re.captures(lower).and_then(|caps| caps.get(1)) else {
            continue;
        };
        let candidate = capture.as_str().trim();
        if let Some(entry) = dict.get(candidate) {
            return Some((entry, candidate));
        }
    }
    None
}

/// First `(...)` group of `original`, left to right, whose trimmed content is a phrase of `dict`.
pub fn parenthetical<'d, 't>(dict: &'d Dictionary, original: &'t str) -> Option<(&'d Entry, &'t str)> {
    patterns::parenthetical()
        .captures_iter(original)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find_map(|content| dict.get(content).map(|entry| (entry, content)))
}

/// Trimmed text before the first colon of `original`, if it is a phrase of `dict`.
pub fn colon_prefix<'d, 't>(dict: &'d Dictionary, original: &'t str) -> Option<(&'d Entry, &'t str)> {
    let prefix = patterns::colon_prefix().captures(original)?.get(1)?.as_str().trim();
    dict.get(prefix).map(|entry| (entry, prefix))
}

/// First phrase of `dict`, in declaration order, occurring as a whole word in `lower`.
///
/// Phrases of two characters or fewer are skipped; abbreviations like "in"
/// or "co" collide with ordinary words.
pub fn whole_word<'d>(dict: &'d Dictionary, lower: &str) -> Option<&'d Entry> {
    dict.iter().filter(|entry| entry.chars > 2).find(|entry| entry.is_word_in(lower))
}

/// Distinct signed integer literals of `original` in first-occurrence order.
pub fn modifiers(original: &str) -> Vec<String> {
    dedup_in_order(patterns::modifier().captures_iter(original).filter_map(|caps| caps.get(1)).map(|m| m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(pairs: &[(&str, &str)]) -> Dictionary {
        Dictionary::new(&pairs.iter().map(|(p, k)| (p.to_string(), k.to_string())).collect())
    }

    fn skills() -> Dictionary {
        dictionary(&[("stealth", "stealth"), ("sleight of hand", "sleight_of_hand"), ("arcana", "arcana")])
    }

    #[test]
    fn validated_capture_skips_non_phrases() {
        let dict = skills();
        let family = patterns::skill_check();
        assert_eq!(
            validated_capture(&dict, &family, "check: sleight of hand (dex)").map(|(e, raw)| (e.key.as_str(), raw)),
            Some(("sleight_of_hand", "sleight of hand"))
        );
        // "attack" is captured by the second pattern but is not a skill.
        assert!(validated_capture(&dict, &family, "attack roll").is_none());
    }

    #[test]
    fn parenthetical_scans_every_group() {
        let dict = skills();
        let hit = parenthetical(&dict, "Roll (+2) ( Arcana ) (Stealth)").map(|(e, raw)| (e.key.as_str(), raw));
        assert_eq!(hit, Some(("arcana", "Arcana")));
        assert!(parenthetical(&dict, "Roll (unknown)").is_none());
        assert!(parenthetical(&dict, "()").is_none());
    }

    #[test]
    fn colon_prefix_uses_text_before_first_colon() {
        let dict = skills();
        assert_eq!(colon_prefix(&dict, " Stealth : DC 15").map(|(e, raw)| (e.key.as_str(), raw)), Some(("stealth", "Stealth")));
        assert!(colon_prefix(&dict, "DC 15: Stealth").is_none());
    }

    #[test]
    fn whole_word_skips_short_phrases_and_partial_words() {
        let abilities = dictionary(&[("st", "str"), ("dex", "dex"), ("wisdom", "wis")]);
        assert!(whole_word(&abilities, "st check").is_none());
        assert!(whole_word(&abilities, "dexterous wisdomless").is_none());
        assert_eq!(whole_word(&abilities, "a dex or wisdom test").map(|e| e.key.as_str()), Some("dex"));
    }

    #[test]
    fn modifiers_are_distinct_and_ordered() {
        assert_eq!(modifiers("Stealth Check (+2) (+2) (-1)"), vec!["+2", "-1"]);
        assert_eq!(modifiers("-3 penalty, +10 bonus, -3"), vec!["-3", "+10"]);
        assert!(modifiers("no numbers, 5 unsigned").is_empty());
        assert!(modifiers("+\u{0662} +\u{FF12}").is_empty());
        assert_eq!(modifiers("Stealth \u{0663}+\u{0662} and +1\u{0660}"), vec!["+1"]);
    }
}
