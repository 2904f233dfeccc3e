//! Compile-time bundled configuration data.
//!
//! The classification tables and every per-system language file under `data/`
//! are embedded with `include_str!` and parsed once when the built-in registry
//! is first touched.

use tracing::{debug, warn};

use super::Registry;

const CLASSIFICATION: &str = include_str!("../../data/classification.yaml");

/// Language bundles with labels for error reporting.
///
/// Order matters only for `Registry::language_systems`; `generic` comes last.
pub(super) const LANGUAGE_SOURCES: &[(&str, &str)] = &[
    ("languages/dnd5e", include_str!("../../data/languages/dnd5e.yaml")),
    ("languages/pf2e", include_str!("../../data/languages/pf2e.yaml")),
    ("languages/pf1", include_str!("../../data/languages/pf1.yaml")),
    ("languages/wfrp4e", include_str!("../../data/languages/wfrp4e.yaml")),
    ("languages/lancer", include_str!("../../data/languages/lancer.yaml")),
    ("languages/cyberpunk-red-core", include_str!("../../data/languages/cyberpunk-red-core.yaml")),
    ("languages/CoC7", include_str!("../../data/languages/CoC7.yaml")),
    ("languages/swade", include_str!("../../data/languages/swade.yaml")),
    ("languages/sfrpg", include_str!("../../data/languages/sfrpg.yaml")),
    ("languages/starwarsffg", include_str!("../../data/languages/starwarsffg.yaml")),
    ("languages/wod5e", include_str!("../../data/languages/wod5e.yaml")),
    ("languages/alienrpg", include_str!("../../data/languages/alienrpg.yaml")),
    ("languages/wrath-and-glory", include_str!("../../data/languages/wrath-and-glory.yaml")),
    ("languages/deltagreen", include_str!("../../data/languages/deltagreen.yaml")),
    ("languages/forbidden-lands", include_str!("../../data/languages/forbidden-lands.yaml")),
    ("languages/blades-in-the-dark", include_str!("../../data/languages/blades-in-the-dark.yaml")),
    ("languages/morkborg", include_str!("../../data/languages/morkborg.yaml")),
    ("languages/vaesen", include_str!("../../data/languages/vaesen.yaml")),
    ("languages/k4lt", include_str!("../../data/languages/k4lt.yaml")),
    ("languages/cairn", include_str!("../../data/languages/cairn.yaml")),
    ("languages/mothership", include_str!("../../data/languages/mothership.yaml")),
    ("languages/dungeonworld", include_str!("../../data/languages/dungeonworld.yaml")),
    ("languages/fate-core-official", include_str!("../../data/languages/fate-core-official.yaml")),
    ("languages/ose", include_str!("../../data/languages/ose.yaml")),
    ("languages/demonlord", include_str!("../../data/languages/demonlord.yaml")),
    ("languages/foundry-ironsworn", include_str!("../../data/languages/foundry-ironsworn.yaml")),
    ("languages/generic", include_str!("../../data/languages/generic.yaml")),
];

/// Build the registry from the bundled sources.
///
/// A source that fails to parse is logged and skipped so the process-wide
/// snapshot is always available; `tests::bundled_assets_parse` keeps that path
/// cold.
pub(super) fn builtin() -> Registry {
    let mut registry = Registry::default();

    if let Err(err) = registry.merge_classification_yaml("classification", CLASSIFICATION) {
        warn!(error = %err, "bundled classification data skipped");
    }

    for (origin, source) in LANGUAGE_SOURCES {
        if let Err(err) = registry.merge_language_yaml(origin, source) {
            warn!(origin = %origin, error = %err, "bundled language data skipped");
        }
    }

    debug!(
        systems = registry.systems.len(),
        language_systems = registry.languages.len(),
        "built-in registry loaded"
    );

    registry
}

/// Raw classification source, exposed for the strict parse test.
#[cfg(test)]
pub(super) fn classification_source() -> &'static str {
    CLASSIFICATION
}
