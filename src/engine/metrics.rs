//! Engine run metrics.
//!
//! `Parser::run` returns only the extraction; `Parser::run_with_metrics` also
//! times each stage and records which strategy (if any) won it. The verbose
//! API and the CLI report are built from these.

use std::time::Duration;

use super::extract::{Extracted, Strategy};
use super::parser::{Stage, StageSet};

/// Everything the four stages found in one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub roll_type: Option<Extracted>,
    pub skill: Option<Extracted>,
    pub ability: Option<Extracted>,
    pub modifiers: Vec<String>,
}

impl Extraction {
    /// Stages that produced a result.
    pub fn matched(&self) -> StageSet {
        let mut set = StageSet::empty();
        set.set(StageSet::ROLL_TYPE, self.roll_type.is_some());
        set.set(StageSet::SKILL, self.skill.is_some());
        set.set(StageSet::ABILITY, self.ability.is_some());
        set.set(StageSet::MODIFIERS, !self.modifiers.is_empty());
        set
    }

    /// Sum of the points of every matched stage, capped at 100.
    pub fn confidence(&self) -> u8 {
        self.matched().confidence()
    }
}

/// Timing and outcome of a single stage.
#[derive(Debug, Clone)]
pub struct StageMetrics {
    pub stage: Stage,
    /// Winning strategy; `None` when the stage found nothing.
    pub strategy: Option<Strategy>,
    pub duration: Duration,
}

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Parser::run_with_metrics`](super::Parser::run_with_metrics).
    pub total: Duration,
    /// One entry per stage, in execution order.
    pub stages: Vec<StageMetrics>,
}

/// Parser output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub extraction: Extraction,
    pub metrics: RunMetrics,
}
