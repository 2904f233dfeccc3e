//! Entity classification: PC, NPC or Monster.
//!
//! The decision is a fixed priority list; the first step that applies wins:
//!
//! ```text
//! has_player_owner ───────────────▶ PC          (1) explicit assignment
//! type ∈ pc_types ────────────────▶ PC          (2) unclaimed pregens
//! type ∈ monster_types ──┬─ tie-break ─▶ NPC | Monster
//!                        └────────────▶ Monster (3)
//! type ∈ npc_types ──────┬─ tie-break ─▶ NPC | Monster
//!                        └────────────▶ NPC     (4)
//! otherwise ──────────────────────▶ NPC         (5) fallback
//! ```
//!
//! Exclusion is a separate question answered by [`is_included`]; excluded
//! entities (vehicles, loot, ...) should not be classified at all.
//!
//! A type listed as both NPC and Monster without a tie-break resolves to
//! Monster, because the monster list is consulted first.

#[path = "classify/tie_break.rs"]
mod tie_break;

pub use tie_break::TieBreak;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::registry::{ClassificationConfig, Registry};

/// Canonical entity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pc,
    Npc,
    Monster,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Pc => "pc",
            Category::Npc => "npc",
            Category::Monster => "monster",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a tie-break; a tie-break can never produce a PC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NpcOrMonster {
    Npc,
    Monster,
}

impl From<NpcOrMonster> for Category {
    fn from(value: NpcOrMonster) -> Self {
        match value {
            NpcOrMonster::Npc => Category::Npc,
            NpcOrMonster::Monster => Category::Monster,
        }
    }
}

/// An actor record as supplied by the host application.
///
/// `system` is the open bag of system-specific fields; only the active
/// system's tie-break reads it, through dotted paths like `details.cr`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub has_player_owner: bool,
    #[serde(default)]
    pub system: Value,
    /// Display name, only used in log events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Entity {
    pub fn new(kind: impl Into<String>) -> Self {
        Entity { kind: kind.into(), ..Entity::default() }
    }

    pub fn owned(mut self, has_player_owner: bool) -> Self {
        self.has_player_owner = has_player_owner;
        self
    }

    pub fn with_system(mut self, system: Value) -> Self {
        self.system = system;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Look up a system attribute by dotted path.
    pub fn attr(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.system, |value, key| value.get(key)).filter(|value| !value.is_null())
    }

    /// Numeric attribute; numeric strings are accepted.
    pub fn number(&self, path: &str) -> Option<f64> {
        match self.attr(path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn text(&self, path: &str) -> Option<&str> {
        self.attr(path)?.as_str()
    }

    /// Truthiness of an attribute: missing, null, false, zero and "" are false.
    pub fn truthy(&self, path: &str) -> bool {
        match self.attr(path) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// Which priority step decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "step", content = "strategy")]
pub enum Reason {
    PlayerOwner,
    PcType,
    MonsterType,
    NpcType,
    TieBreak(TieBreak),
    Fallback,
    /// No entity was supplied.
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Classification {
    pub category: Category,
    pub reason: Reason,
}

/// `false` iff the entity's type is excluded by `config` (or there is no entity).
pub fn is_included(entity: Option<&Entity>, config: &ClassificationConfig) -> bool {
    let Some(entity) = entity else {
        return false;
    };

    if config.is_excluded(&entity.kind) {
        debug!(name = entity.label(), kind = %entity.kind, "entity excluded by type");
        return false;
    }
    true
}

/// Classify `entity` under `config`.
pub fn classify(entity: &Entity, config: &ClassificationConfig) -> Category {
    explain(entity, config).category
}

/// Classify a possibly-absent entity; an absent one is an NPC.
pub fn classify_opt(entity: Option<&Entity>, config: &ClassificationConfig) -> Category {
    match entity {
        Some(entity) => classify(entity, config),
        None => Category::Npc,
    }
}

/// Classify `entity` and report the step that decided it.
pub fn explain(entity: &Entity, config: &ClassificationConfig) -> Classification {
    let decided = |category: Category, reason: Reason| {
        debug!(name = entity.label(), kind = %entity.kind, %category, ?reason, "entity classified");
        Classification { category, reason }
    };

    if entity.has_player_owner {
        return decided(Category::Pc, Reason::PlayerOwner);
    }

    let kind = entity.kind.as_str();

    if config.is_pc_type(kind) {
        return decided(Category::Pc, Reason::PcType);
    }

    if config.is_monster_type(kind) {
        return match config.tie_break {
            Some(strategy) => decided(strategy.resolve(entity).into(), Reason::TieBreak(strategy)),
            None => decided(Category::Monster, Reason::MonsterType),
        };
    }

    if config.is_npc_type(kind) {
        return match config.tie_break {
            Some(strategy) => decided(strategy.resolve(entity).into(), Reason::TieBreak(strategy)),
            None => decided(Category::Npc, Reason::NpcType),
        };
    }

    decided(Category::Npc, Reason::Fallback)
}

/// Classifier bound to one system's resolved configuration.
#[derive(Debug, Clone, Copy)]
pub struct EntityClassifier<'r> {
    config: &'r ClassificationConfig,
}

impl EntityClassifier<'static> {
    /// Classifier for `system_id` from the built-in registry.
    pub fn for_system(system_id: &str) -> Self {
        Self::with_registry(Registry::builtin(), system_id)
    }
}

impl<'r> EntityClassifier<'r> {
    pub fn new(config: &'r ClassificationConfig) -> Self {
        EntityClassifier { config }
    }

    pub fn with_registry(registry: &'r Registry, system_id: &str) -> Self {
        EntityClassifier { config: registry.resolve_classification(system_id) }
    }

    pub fn config(&self) -> &'r ClassificationConfig {
        self.config
    }

    pub fn is_included(&self, entity: &Entity) -> bool {
        is_included(Some(entity), self.config)
    }

    pub fn classify(&self, entity: &Entity) -> Category {
        classify(entity, self.config)
    }

    pub fn explain(&self, entity: Option<&Entity>) -> Classification {
        match entity {
            Some(entity) => explain(entity, self.config),
            None => Classification { category: Category::Npc, reason: Reason::Absent },
        }
    }
}

#[cfg(test)]
#[path = "classify/tests.rs"]
mod tests;
