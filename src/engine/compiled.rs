//! Dictionary compilation and indexing.
//!
//! A [`LanguageMapping`] is stored exactly as authored. Before a parser can
//! use it, each of its three phrase maps is compiled once into a
//! [`Dictionary`]:
//!
//! ```text
//! IndexMap<phrase, key>          (declaration order, author casing)
//!        │
//!        ▼  Dictionary::new
//! entries   [Entry { phrase, folded, key, chars, word }]   declaration order
//!           (`word` only for dictionaries built with whole-word matchers)
//! by_length [ids sorted by chars desc, stable]              longest match
//! lookup    { folded phrase -> first id }                   exact lookup
//! ```
//!
//! ## Invariants
//!
//! - `by_length` and `lookup` hold indices into `entries`.
//! - Blank phrases are dropped at compile time; they would match everything.
//! - When two phrases fold to the same text, `lookup` keeps the first one
//!   declared.

use std::collections::HashMap;

use indexmap::IndexMap;
use regex::Regex;

use crate::registry::LanguageMapping;
use crate::rules::flavor::helpers::{capitalize_first, fold, whole_word_regex};

/// Index into `Dictionary::entries`.
type EntryId = usize;

/// One compiled phrase.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Phrase as authored.
    pub phrase: String,
    /// Case-folded phrase used for every comparison.
    pub folded: String,
    /// Canonical key the phrase resolves to.
    pub key: String,
    /// Length of the phrase in characters.
    pub chars: usize,
    word: Option<Regex>,
}

impl Entry {
    fn new(phrase: &str, key: &str, whole_words: bool) -> Self {
        let folded = fold(phrase);
        Entry {
            phrase: phrase.to_string(),
            word: if whole_words { whole_word_regex(&folded) } else { None },
            chars: phrase.chars().count(),
            folded,
            key: key.to_string(),
        }
    }

    /// Whether the phrase occurs as a whole word in `text` (case-insensitive).
    pub fn is_word_in(&self, text: &str) -> bool {
        self.word.as_ref().is_some_and(|re| re.is_match(text))
    }

    /// The phrase as it is written in `original`, else the capitalized phrase.
    pub fn recover_case(&self, original: &str) -> String {
        self.word
            .as_ref()
            .and_then(|re| re.find(original))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| capitalize_first(&self.phrase))
    }
}

/// Compiled phrase map with a longest-first index and folded lookup.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<Entry>,
    by_length: Vec<EntryId>,
    lookup: HashMap<String, EntryId>,
}

impl Dictionary {
    /// Dictionary with a whole-word matcher per phrase.
    pub fn new(phrases: &IndexMap<String, String>) -> Self {
        Self::build(phrases, true)
    }

    /// Dictionary matched by substring only; no per-phrase regex is compiled.
    pub fn substrings_only(phrases: &IndexMap<String, String>) -> Self {
        Self::build(phrases, false)
    }

    fn build(phrases: &IndexMap<String, String>, whole_words: bool) -> Self {
        let entries: Vec<Entry> = phrases
            .iter()
            .filter(|(phrase, _)| !phrase.trim().is_empty())
            .map(|(phrase, key)| Entry::new(phrase, key, whole_words))
            .collect();

        // Stable sort: equal lengths keep declaration order.
        let mut by_length: Vec<EntryId> = (0..entries.len()).collect();
        by_length.sort_by(|&a, &b| entries[b].chars.cmp(&entries[a].chars));

        let mut lookup = HashMap::with_capacity(entries.len());
        for (id, entry) in entries.iter().enumerate() {
            lookup.entry(entry.folded.clone()).or_insert(id);
        }

        Dictionary { entries, by_length, lookup }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup of a candidate phrase; the candidate is trimmed and folded.
    pub fn get(&self, candidate: &str) -> Option<&Entry> {
        self.lookup.get(&fold(candidate.trim())).map(|&id| &self.entries[id])
    }

    /// The longest phrase occurring as a substring of the folded `haystack`.
    pub fn longest_in(&self, haystack: &str) -> Option<&Entry> {
        self.by_length.iter().map(|&id| &self.entries[id]).find(|entry| haystack.contains(entry.folded.as_str()))
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

/// The three dictionaries of one `(system, language)` pair.
///
/// Roll types are only ever found by longest substring, so they skip the
/// whole-word matchers.
#[derive(Debug, Clone, Default)]
pub struct CompiledMapping {
    pub skills: Dictionary,
    pub abilities: Dictionary,
    pub roll_types: Dictionary,
}

impl CompiledMapping {
    pub fn new(mapping: &LanguageMapping) -> Self {
        CompiledMapping {
            skills: Dictionary::new(&mapping.skills),
            abilities: Dictionary::new(&mapping.abilities),
            roll_types: Dictionary::substrings_only(&mapping.roll_types),
        }
    }
}
