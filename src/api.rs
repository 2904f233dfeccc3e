use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{Category, Entity, EntityClassifier};
use crate::engine::{self, CompiledMapping, Extracted, Stage, StageSet, Strategy};
use crate::registry::{LanguageMapping, Registry};

/// Structured reading of one flavor string.
///
/// Serialized with camelCase names (`skillRaw`, `rollType`, `rawFlavor`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFlavor {
    /// Canonical skill key, e.g. `"stealth"`.
    pub skill: Option<String>,
    /// Skill as written (or capitalized dictionary phrase).
    pub skill_raw: Option<String>,
    pub ability: Option<String>,
    pub ability_raw: Option<String>,
    pub roll_type: Option<String>,
    pub roll_type_raw: Option<String>,
    /// Distinct signed integer literals, first occurrence first.
    pub modifiers: Vec<String>,
    /// 0–100; 0 iff nothing was recognized.
    pub confidence: u8,
    /// The input verbatim; `None` when there was no input.
    pub raw_flavor: Option<String>,
}

impl ParsedFlavor {
    fn empty(raw_flavor: Option<&str>) -> Self {
        ParsedFlavor { raw_flavor: raw_flavor.map(str::to_string), ..ParsedFlavor::default() }
    }

    fn from_extraction(text: &str, extraction: engine::Extraction) -> Self {
        let confidence = extraction.confidence();
        let (skill, skill_raw) = split(extraction.skill);
        let (ability, ability_raw) = split(extraction.ability);
        let (roll_type, roll_type_raw) = split(extraction.roll_type);

        ParsedFlavor {
            skill,
            skill_raw,
            ability,
            ability_raw,
            roll_type,
            roll_type_raw,
            modifiers: extraction.modifiers,
            confidence,
            raw_flavor: Some(text.to_string()),
        }
    }

    /// `true` when no stage recognized anything.
    pub fn is_empty(&self) -> bool {
        self.confidence == 0
    }
}

fn split(hit: Option<Extracted>) -> (Option<String>, Option<String>) {
    match hit {
        Some(Extracted { key, raw, .. }) => (Some(key), Some(raw)),
        None => (None, None),
    }
}

/// Per-stage trace returned by [`FlavorParser::parse_verbose`].
#[derive(Debug, Clone)]
pub struct StageTrace {
    pub stage: Stage,
    /// Strategy that produced the stage result; `None` when nothing matched.
    pub strategy: Option<Strategy>,
    /// Confidence points awarded by this stage.
    pub points: u8,
    pub duration: Duration,
}

/// Additional details returned by [`FlavorParser::parse_verbose`].
#[derive(Debug, Clone)]
pub struct ParseDetails {
    /// Total elapsed time.
    pub total: Duration,
    /// Stages that produced a result.
    pub matched: StageSet,
    pub stages: Vec<StageTrace>,
}

/// Result of [`FlavorParser::parse_verbose`].
#[derive(Debug, Clone)]
pub struct ParseResultVerbose {
    pub flavor: ParsedFlavor,
    pub elapsed: Duration,
    pub details: ParseDetails,
}

/// Flavor-text parser bound to one `(system, language)` pair.
///
/// The language mapping is resolved and compiled once at construction;
/// [`parse`](Self::parse) is then a pure function of its input.
///
/// # Example
/// ```
/// use rpgnorm::FlavorParser;
///
/// let parser = FlavorParser::new("dnd5e", "en");
/// let out = parser.parse("Perception Check (Wisdom)");
/// assert_eq!(out.skill.as_deref(), Some("perception"));
/// assert_eq!(out.ability.as_deref(), Some("wis"));
/// assert_eq!(out.confidence, 60);
/// ```
#[derive(Debug, Clone)]
pub struct FlavorParser {
    system_id: String,
    language: String,
    compiled: CompiledMapping,
}

impl FlavorParser {
    /// Parser over the built-in registry.
    pub fn new(system_id: &str, language: &str) -> Self {
        Self::with_registry(Registry::builtin(), system_id, language)
    }

    pub fn with_registry(registry: &Registry, system_id: &str, language: &str) -> Self {
        Self::from_mapping(system_id, language, registry.resolve_language(system_id, language))
    }

    /// Parser over an explicit mapping, bypassing registry resolution.
    pub fn from_mapping(system_id: &str, language: &str, mapping: &LanguageMapping) -> Self {
        let compiled = CompiledMapping::new(mapping);

        debug!(
            system = system_id,
            language,
            skills = compiled.skills.len(),
            abilities = compiled.abilities.len(),
            roll_types = compiled.roll_types.len(),
            "flavor parser initialized"
        );

        FlavorParser { system_id: system_id.to_string(), language: language.to_string(), compiled }
    }

    pub fn system_id(&self) -> &str {
        &self.system_id
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Extract skill, ability, roll type and modifiers from `text`.
    pub fn parse(&self, text: &str) -> ParsedFlavor {
        let flavor = ParsedFlavor::from_extraction(text, engine::Parser::new(text, &self.compiled).run());
        log_parsed(&flavor);
        flavor
    }

    /// Like [`parse`](Self::parse), for a flavor that may be missing.
    pub fn parse_opt(&self, text: Option<&str>) -> ParsedFlavor {
        match text {
            Some(text) => self.parse(text),
            None => ParsedFlavor::empty(None),
        }
    }

    /// Parse `text` and return per-stage timings and strategies as well.
    ///
    /// The default [`parse`](Self::parse) path does not build the trace.
    pub fn parse_verbose(&self, text: &str) -> ParseResultVerbose {
        let run = engine::Parser::new(text, &self.compiled).run_with_metrics();
        let matched = run.extraction.matched();

        let stages = run
            .metrics
            .stages
            .iter()
            .map(|m| StageTrace {
                stage: m.stage,
                strategy: m.strategy,
                points: if matched.contains(m.stage.flag()) { m.stage.points() } else { 0 },
                duration: m.duration,
            })
            .collect();

        let flavor = ParsedFlavor::from_extraction(text, run.extraction);
        log_parsed(&flavor);

        let total = run.metrics.total;
        ParseResultVerbose { flavor, elapsed: total, details: ParseDetails { total, matched, stages } }
    }
}

fn log_parsed(flavor: &ParsedFlavor) {
    debug!(
        input = flavor.raw_flavor.as_deref().unwrap_or_default(),
        skill = flavor.skill.as_deref(),
        ability = flavor.ability.as_deref(),
        roll_type = flavor.roll_type.as_deref(),
        modifiers = ?flavor.modifiers,
        confidence = flavor.confidence,
        "flavor parsed"
    );
}

/// Parse `text` with the built-in configuration for `(system_id, language)`.
///
/// Builds a parser per call; keep a [`FlavorParser`] around for repeated use.
pub fn parse_flavor(system_id: &str, language: &str, text: &str) -> ParsedFlavor {
    FlavorParser::new(system_id, language).parse(text)
}

/// Classify `entity` with the built-in configuration for `system_id`.
pub fn classify_entity(system_id: &str, entity: &Entity) -> Category {
    EntityClassifier::for_system(system_id).classify(entity)
}

/// Whether `entity` should be classified at all under `system_id`.
pub fn is_entity_included(system_id: &str, entity: &Entity) -> bool {
    EntityClassifier::for_system(system_id).is_included(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_verbose_matches_parse() {
        let parser = FlavorParser::new("dnd5e", "en");
        let verbose = parser.parse_verbose("Stealth Check (+2)");

        assert_eq!(verbose.flavor, parser.parse("Stealth Check (+2)"));
        assert_eq!(verbose.elapsed, verbose.details.total);
        assert_eq!(verbose.details.stages.len(), 4);
        assert_eq!(verbose.details.matched, StageSet::SKILL | StageSet::MODIFIERS);

        let points: u8 = verbose.details.stages.iter().map(|trace| trace.points).sum();
        assert_eq!(points, verbose.flavor.confidence);
        assert_eq!(verbose.details.stages[1].strategy, Some(Strategy::LongestPhrase));
        assert_eq!(verbose.details.stages[0].strategy, None);
    }

    #[test]
    fn absent_flavor_has_no_raw_text() {
        let parser = FlavorParser::new("dnd5e", "en");
        let absent = parser.parse_opt(None);
        assert_eq!(absent, ParsedFlavor::default());
        assert!(absent.is_empty());

        let empty = parser.parse_opt(Some(""));
        assert_eq!(empty.raw_flavor.as_deref(), Some(""));
        assert_eq!(empty.confidence, 0);
    }

    #[test]
    fn parsed_flavor_serializes_camel_case() {
        let out = parse_flavor("dnd5e", "en", "Perception Check (Wisdom)");
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(
            value,
            json!({
                "skill": "perception",
                "skillRaw": "Perception",
                "ability": "wis",
                "abilityRaw": "Wisdom",
                "rollType": null,
                "rollTypeRaw": null,
                "modifiers": [],
                "confidence": 60,
                "rawFlavor": "Perception Check (Wisdom)"
            })
        );
        let back: ParsedFlavor = serde_json::from_value(value).unwrap();
        assert_eq!(back, out);
    }

    #[test]
    fn parser_keeps_requested_identifiers() {
        let parser = FlavorParser::new("no-such-system", "xx");
        assert_eq!(parser.system_id(), "no-such-system");
        assert_eq!(parser.language(), "xx");
        // Falls back to the generic English mapping.
        assert_eq!(parser.parse("Wisdom save").ability.as_deref(), Some("wis"));
    }

    #[test]
    fn convenience_functions_use_builtin_registry() {
        let goblin = Entity::new("npc").with_system(json!({"details": {"cr": 0.25}}));
        assert_eq!(classify_entity("dnd5e", &goblin), Category::Npc);
        assert!(is_entity_included("dnd5e", &goblin));
        assert!(!is_entity_included("dnd5e", &Entity::new("vehicle")));
    }

    #[test]
    fn from_mapping_bypasses_registry() {
        let mut mapping = LanguageMapping::default();
        mapping.skills.insert("Lockpicking".into(), "lockpicking".into());
        let parser = FlavorParser::from_mapping("homebrew", "en", &mapping);
        let out = parser.parse("lockpicking: DC 20");
        assert_eq!(out.skill.as_deref(), Some("lockpicking"));
        assert_eq!(out.skill_raw.as_deref(), Some("lockpicking"));
        assert_eq!(out.confidence, 40);
    }
}
