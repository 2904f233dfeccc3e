//! Configuration records and the on-disk document shapes they load from.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classify::TieBreak;

/// Per-system rules for deciding PC / NPC / Monster.
///
/// Type lists are ordered sets of type names compared case-insensitively. The
/// lists may overlap; `tie_break` settles NPC-vs-Monster ambiguity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassificationConfig {
    #[serde(default)]
    pub pc_types: Vec<String>,
    #[serde(default)]
    pub npc_types: Vec<String>,
    #[serde(default)]
    pub monster_types: Vec<String>,
    /// Types that are never classified at all (vehicles, containers, ...).
    #[serde(default)]
    pub excluded_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_break: Option<TieBreak>,
}

impl ClassificationConfig {
    pub fn is_excluded(&self, kind: &str) -> bool {
        contains_folded(&self.excluded_types, kind)
    }

    pub fn is_pc_type(&self, kind: &str) -> bool {
        contains_folded(&self.pc_types, kind)
    }

    pub fn is_npc_type(&self, kind: &str) -> bool {
        contains_folded(&self.npc_types, kind)
    }

    pub fn is_monster_type(&self, kind: &str) -> bool {
        contains_folded(&self.monster_types, kind)
    }
}

fn contains_folded(list: &[String], kind: &str) -> bool {
    let kind = kind.to_lowercase();
    list.iter().any(|candidate| candidate.to_lowercase() == kind)
}

/// Localized phrase dictionaries for one `(system, language)` pair.
///
/// Keys keep the author's casing; folding happens when a parser compiles the
/// mapping (see `engine::compiled`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageMapping {
    #[serde(default)]
    pub skills: IndexMap<String, String>,
    #[serde(default)]
    pub abilities: IndexMap<String, String>,
    #[serde(default)]
    pub roll_types: IndexMap<String, String>,
}

impl LanguageMapping {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.abilities.is_empty() && self.roll_types.is_empty()
    }
}

/// Languages available for one system, keyed by language code.
pub type SystemLanguages = IndexMap<String, LanguageMapping>;

/// `classification.yaml`: the generic record plus one record per system.
///
/// `generic` is optional so overlay directories can ship only system records.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ClassificationDocument {
    #[serde(default)]
    pub generic: Option<ClassificationConfig>,
    #[serde(default)]
    pub systems: IndexMap<String, ClassificationConfig>,
}

/// `languages/<system>.yaml`: every language bundle of one system.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LanguageDocument {
    pub system: String,
    /// Other system ids that share these mappings.
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub languages: SystemLanguages,
}
