//! Stage orchestration.
//!
//! A [`Parser`] runs the four flavor stages over one input against one
//! [`CompiledMapping`]. Stages are independent: none reads another's result,
//! and each tries its strategies in a fixed order, keeping the first hit.
//!
//! ```text
//! stage        points  strategies (first hit wins)              view
//! ─────────    ──────  ─────────────────────────────────────    ────────
//! roll type      30    longest-phrase                           lower
//! skill          40    longest-phrase                           lower
//!                      pattern-capture (skill check family)     lower
//!                      parenthetical                            original
//!                      colon-prefix                             original
//! ability        20    parenthetical                            original
//!                      pattern-capture (saving throw family)    lower
//!                      whole-word                               lower
//! modifiers      10    modifier-scan                            original
//! ```
//!
//! Confidence is the sum of the points of the matched stages, capped at 100,
//! so it is 0 exactly when nothing matched.

use std::time::Instant;

use super::compiled::CompiledMapping;
use super::extract::{self, Extracted, Strategy};
use super::metrics::{Extraction, RunMetrics, RunResult, StageMetrics};
use crate::rules::flavor::helpers::capitalize_first;
use crate::rules::flavor::patterns;

bitflags::bitflags! {
    /// Set of stages that produced a result.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StageSet: u8 {
        const ROLL_TYPE = 1 << 0;
        const SKILL     = 1 << 1;
        const ABILITY   = 1 << 2;
        const MODIFIERS = 1 << 3;
    }
}

impl StageSet {
    pub fn confidence(self) -> u8 {
        let total: u16 =
            Stage::ALL.iter().filter(|stage| self.contains(stage.flag())).map(|stage| u16::from(stage.points())).sum();
        total.min(100) as u8
    }
}

/// One extraction step of the flavor parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    RollType,
    Skill,
    Ability,
    Modifiers,
}

impl Stage {
    /// Execution order.
    pub const ALL: [Stage; 4] = [Stage::RollType, Stage::Skill, Stage::Ability, Stage::Modifiers];

    /// Confidence awarded when the stage matches.
    pub fn points(self) -> u8 {
        match self {
            Stage::RollType => 30,
            Stage::Skill => 40,
            Stage::Ability => 20,
            Stage::Modifiers => 10,
        }
    }

    pub fn flag(self) -> StageSet {
        match self {
            Stage::RollType => StageSet::ROLL_TYPE,
            Stage::Skill => StageSet::SKILL,
            Stage::Ability => StageSet::ABILITY,
            Stage::Modifiers => StageSet::MODIFIERS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::RollType => "roll type",
            Stage::Skill => "skill",
            Stage::Ability => "ability",
            Stage::Modifiers => "modifiers",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs the stages over one input.
///
/// Usage: `Parser::new(text, &compiled).run()`.
#[derive(Debug)]
pub struct Parser<'a> {
    /// Verbatim input.
    input: &'a str,
    /// Lowercased, trimmed input.
    lower: String,
    compiled: &'a CompiledMapping,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, compiled: &'a CompiledMapping) -> Self {
        Parser { input, lower: input.to_lowercase().trim().to_string(), compiled }
    }

    fn roll_type(&self) -> Option<Extracted> {
        let entry = extract::longest_phrase(&self.compiled.roll_types, &self.lower)?;
        Some(Extracted::new(entry, capitalize_first(&entry.phrase), Strategy::LongestPhrase))
    }

    fn skill(&self) -> Option<Extracted> {
        let skills = &self.compiled.skills;

        if let Some(entry) = extract::longest_phrase(skills, &self.lower) {
            return Some(Extracted::new(entry, entry.recover_case(self.input), Strategy::LongestPhrase));
        }

        if let Some((entry, capture)) = extract::validated_capture(skills, &patterns::skill_check(), &self.lower) {
            return Some(Extracted::new(entry, capitalize_first(capture), Strategy::PatternCapture));
        }

        if let Some((entry, content)) = extract::parenthetical(skills, self.input) {
            return Some(Extracted::new(entry, content.to_string(), Strategy::Parenthetical));
        }

        extract::colon_prefix(skills, self.input)
            .map(|(entry, prefix)| Extracted::new(entry, prefix.to_string(), Strategy::ColonPrefix))
    }

    fn ability(&self) -> Option<Extracted> {
        let abilities = &self.compiled.abilities;

        if let Some((entry, content)) = extract::parenthetical(abilities, self.input) {
            return Some(Extracted::new(entry, content.to_string(), Strategy::Parenthetical));
        }

        if let Some((entry, capture)) = extract::validated_capture(abilities, &patterns::saving_throw(), &self.lower) {
            return Some(Extracted::new(entry, capitalize_first(capture), Strategy::PatternCapture));
        }

        extract::whole_word(abilities, &self.lower)
            .map(|entry| Extracted::new(entry, entry.recover_case(self.input), Strategy::WholeWord))
    }

    /// Run every stage and return timing details.
    pub fn run_with_metrics(self) -> RunResult {
        let total_start = Instant::now();
        let mut stages = Vec::with_capacity(Stage::ALL.len());

        let start = Instant::now();
        let roll_type = self.roll_type();
        stages.push(StageMetrics {
            stage: Stage::RollType,
            strategy: roll_type.as_ref().map(|hit| hit.strategy),
            duration: start.elapsed(),
        });

        let start = Instant::now();
        let skill = self.skill();
        stages.push(StageMetrics {
            stage: Stage::Skill,
            strategy: skill.as_ref().map(|hit| hit.strategy),
            duration: start.elapsed(),
        });

        let start = Instant::now();
        let ability = self.ability();
        stages.push(StageMetrics {
            stage: Stage::Ability,
            strategy: ability.as_ref().map(|hit| hit.strategy),
            duration: start.elapsed(),
        });

        let start = Instant::now();
        let modifiers = extract::modifiers(self.input);
        stages.push(StageMetrics {
            stage: Stage::Modifiers,
            strategy: (!modifiers.is_empty()).then_some(Strategy::ModifierScan),
            duration: start.elapsed(),
        });

        let extraction = Extraction { roll_type, skill, ability, modifiers };
        RunResult { extraction, metrics: RunMetrics { total: total_start.elapsed(), stages } }
    }

    /// Run every stage, discarding timing details.
    pub fn run(self) -> Extraction {
        self.run_with_metrics().extraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    use crate::registry::LanguageMapping;

    fn phrases(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs.iter().map(|(p, k)| (p.to_string(), k.to_string())).collect()
    }

    fn mapping(skills: &[(&str, &str)], abilities: &[(&str, &str)], roll_types: &[(&str, &str)]) -> CompiledMapping {
        CompiledMapping::new(&LanguageMapping {
            skills: phrases(skills),
            abilities: phrases(abilities),
            roll_types: phrases(roll_types),
        })
    }

    #[test]
    fn confidence_sums_stage_points() {
        assert_eq!(StageSet::empty().confidence(), 0);
        assert_eq!((StageSet::SKILL | StageSet::ABILITY).confidence(), 60);
        assert_eq!(StageSet::all().confidence(), 100);
    }

    #[test]
    fn skill_substring_scan_recovers_original_case() {
        let compiled = mapping(&[("Lore", "lore")], &[], &[]);
        let run = Parser::new("Check: LORE - history", &compiled).run_with_metrics();
        let skill = run.extraction.skill.unwrap();
        assert_eq!(skill.key, "lore");
        assert_eq!(skill.strategy, Strategy::LongestPhrase);
        assert_eq!(skill.raw, "LORE");
    }

    #[test]
    fn ability_prefers_parenthetical_over_later_strategies() {
        let compiled = mapping(&[], &[("strength", "str"), ("dexterity", "dex")], &[]);
        let extraction = Parser::new("Strength save (Dexterity)", &compiled).run();
        let ability = extraction.ability.unwrap();
        assert_eq!((ability.key.as_str(), ability.raw.as_str()), ("dex", "Dexterity"));
        assert_eq!(ability.strategy, Strategy::Parenthetical);
    }

    #[test]
    fn saving_throw_capture_is_capitalized() {
        let compiled = mapping(&[], &[("con", "con")], &[]);
        let ability = Parser::new("Save: CON", &compiled).run().ability.unwrap();
        assert_eq!((ability.key.as_str(), ability.raw.as_str()), ("con", "Con"));
        assert_eq!(ability.strategy, Strategy::PatternCapture);
    }

    #[test]
    fn metrics_cover_every_stage_in_order() {
        let compiled = mapping(&[("stealth", "stealth")], &[], &[("check", "check")]);
        let run = Parser::new("Stealth check +2", &compiled).run_with_metrics();
        let stages: Vec<Stage> = run.metrics.stages.iter().map(|m| m.stage).collect();
        assert_eq!(stages, Stage::ALL.to_vec());
        assert_eq!(run.metrics.stages[2].strategy, None);
        assert_eq!(run.metrics.stages[3].strategy, Some(Strategy::ModifierScan));
        assert_eq!(run.extraction.matched(), StageSet::ROLL_TYPE | StageSet::SKILL | StageSet::MODIFIERS);
        assert_eq!(run.extraction.confidence(), 80);
        assert!(run.metrics.total >= run.metrics.stages[0].duration);
    }
}
