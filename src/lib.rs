//! Rule-based normalization of tabletop RPG data.
//!
//! Two engines share one configuration registry:
//!
//! - **Entity classification** ([`EntityClassifier`], [`classify`]): decide
//!   whether an actor is a player character, an NPC or a monster under the
//!   conventions of its game system.
//! - **Flavor extraction** ([`FlavorParser`]): read the free-form annotation of
//!   a dice roll ("Perception Check (Wisdom)", "Jet de sauvegarde de Dextérité")
//!   into canonical skill, ability and roll-type keys, signed modifiers and a
//!   confidence score.
//!
//! ```text
//! system id ──────────────▶ Registry ──▶ ClassificationConfig ──▶ classify ──▶ Category
//! (system id, language) ──▶ Registry ──▶ LanguageMapping ──▶ FlavorParser ──▶ ParsedFlavor
//! ```
//!
//! Unknown systems and languages are normal: resolution falls back to the
//! built-in generic configuration. Everything is deterministic and free of
//! I/O except the explicit loaders on [`Registry`].
//!
//! # Example
//! ```
//! use rpgnorm::{Category, Entity, EntityClassifier, FlavorParser};
//! use serde_json::json;
//!
//! let classifier = EntityClassifier::for_system("dnd5e");
//! let dragon = Entity::new("npc").with_system(json!({"details": {"cr": 17}}));
//! assert_eq!(classifier.classify(&dragon), Category::Monster);
//!
//! let parsed = FlavorParser::new("dnd5e", "en").parse("Stealth Check (+2) (+2) (-1)");
//! assert_eq!(parsed.skill.as_deref(), Some("stealth"));
//! assert_eq!(parsed.modifiers, vec!["+2", "-1"]);
//! ```

#[macro_use]
mod macros;
mod api;
mod classify;
mod engine;
mod error;
mod registry;
mod rules;

pub use api::{
    FlavorParser, ParseDetails, ParseResultVerbose, ParsedFlavor, StageTrace, classify_entity, is_entity_included,
    parse_flavor,
};
pub use classify::{
    Category, Classification, Entity, EntityClassifier, NpcOrMonster, Reason, TieBreak, classify, classify_opt,
    explain, is_included,
};
pub use engine::{Stage, StageSet, Strategy};
pub use error::{ConfigError, Result};
pub use registry::{ClassificationConfig, DEFAULT_LANGUAGE, GENERIC_SYSTEM, LanguageMapping, Registry, SystemLanguages};
