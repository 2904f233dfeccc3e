//! Flavor extraction engine.
//!
//! Parsing one flavor string is a two-phase pipeline:
//!
//! ```text
//! LanguageMapping ── CompiledMapping::new ──┐          (compiled.rs)
//!                    once per FlavorParser  │
//!                                           v
//! input ── Parser::new ── lowercase + trim ─┼─ roll type  ┐
//!                                           ├─ skill      │ strategies
//!                                           ├─ ability    │ (extract.rs)
//!                                           └─ modifiers  ┘
//!                                           │
//!                                           v
//!                                    Extraction + RunMetrics   (metrics.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `compiled.rs`: folds and indexes phrase dictionaries (longest-first order,
//!   exact lookup, whole-word matchers).
//! - `extract.rs`: the matching strategies and the [`Strategy`] tag.
//! - `parser.rs`: stage order, strategy order per stage, scoring.
//! - `metrics.rs`: per-stage timing for the verbose API and the CLI.
//!
//! The fixed capture patterns live in `src/rules/`; the public wrapper is
//! `api::FlavorParser`.

#[path = "engine/compiled.rs"]
mod compiled;
#[path = "engine/extract.rs"]
mod extract;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;

pub use compiled::CompiledMapping;
pub use extract::{Extracted, Strategy};
pub use metrics::Extraction;
pub use parser::{Parser, Stage, StageSet};
