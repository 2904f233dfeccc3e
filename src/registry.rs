//! Configuration registry.
//!
//! A [`Registry`] is an immutable snapshot of every per-system configuration
//! record the classifier and the flavor parser consume:
//!
//! ```text
//! system_id ───────────────▶ resolve_classification ──▶ &ClassificationConfig
//!                              exact id, else generic
//!
//! (system_id, language) ───▶ resolve_language ─────────▶ &LanguageMapping
//!                              (system, language)
//!                              (system, "en")
//!                              ("generic", "en")
//! ```
//!
//! Falling back is the expected case for unknown systems, never an error. A
//! fallback step is taken only when the previous key is missing entirely; an
//! explicitly empty mapping is returned as-is.
//!
//! ## Sources
//!
//! - [`Registry::builtin`]: the bundled tables in `data/`, parsed once.
//! - [`Registry::from_sources`]: strict snapshot from caller-supplied YAML.
//! - [`Registry::load_dir`]: the built-in snapshot overlaid with a directory
//!   laid out like `data/` (`classification.yaml`, `languages/*.yaml`).

#[path = "registry/assets.rs"]
mod assets;
#[path = "registry/model.rs"]
mod model;

pub use model::{ClassificationConfig, LanguageMapping, SystemLanguages};

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{ConfigError, Result};
use model::{ClassificationDocument, LanguageDocument};

/// System id of the built-in fallback configuration.
pub const GENERIC_SYSTEM: &str = "generic";

/// Language tried when the requested one is not available for a system.
pub const DEFAULT_LANGUAGE: &str = "en";

static BUILTIN: Lazy<Registry> = Lazy::new(assets::builtin);

/// Read-only configuration snapshot, safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    generic: ClassificationConfig,
    systems: IndexMap<String, ClassificationConfig>,
    languages: IndexMap<String, SystemLanguages>,
    /// Cached `("generic", "en")`, the last step of the language chain.
    generic_english: LanguageMapping,
}

impl Registry {
    /// The process-wide snapshot built from the bundled data.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    /// Build a snapshot from YAML text only, without the bundled data.
    ///
    /// `languages` holds `(origin, yaml)` pairs; `origin` labels errors. The
    /// result must contain a generic classification record and a
    /// `generic`/`en` language mapping.
    pub fn from_sources(classification: &str, languages: &[(&str, &str)]) -> Result<Self> {
        let document = parse_yaml::<ClassificationDocument>("classification", classification)?;
        let generic = document.generic.ok_or(ConfigError::MissingGeneric)?;

        let mut registry = Registry { generic, systems: document.systems, ..Registry::default() };
        for (origin, source) in languages {
            registry.merge_language_yaml(origin, source)?;
        }

        if !registry.has_generic_english() {
            return Err(ConfigError::MissingGenericLanguage);
        }

        Ok(registry)
    }

    /// Overlay the directory at `path` on top of the built-in snapshot.
    ///
    /// Missing files are skipped. Language files are applied in file-name order.
    pub fn load_dir(path: impl AsRef<Path>) -> Result<Self> {
        let dir = path.as_ref();
        let mut registry = Self::builtin().clone();

        let classification = dir.join("classification.yaml");
        if classification.is_file() {
            let source = read_file(&classification)?;
            registry.merge_classification_yaml(&classification.display().to_string(), &source)?;
        }

        let languages = dir.join("languages");
        if languages.is_dir() {
            for file in yaml_files(&languages)? {
                let source = read_file(&file)?;
                registry.merge_language_yaml(&file.display().to_string(), &source)?;
            }
        }

        debug!(dir = %dir.display(), systems = registry.systems.len(), "configuration overlay loaded");
        Ok(registry)
    }

    /// Merge a `classification.yaml` document.
    ///
    /// System records replace records with the same id; a `generic` record, if
    /// present, replaces the fallback.
    pub fn merge_classification_yaml(&mut self, origin: &str, source: &str) -> Result<()> {
        let document = parse_yaml::<ClassificationDocument>(origin, source)?;
        if let Some(generic) = document.generic {
            self.generic = generic;
        }
        self.systems.extend(document.systems);
        Ok(())
    }

    /// Merge one `languages/<system>.yaml` document.
    ///
    /// The system's bundle (and every alias it declares) is replaced wholesale.
    pub fn merge_language_yaml(&mut self, origin: &str, source: &str) -> Result<()> {
        let document = parse_yaml::<LanguageDocument>(origin, source)?;
        for alias in &document.aliases {
            self.languages.insert(alias.clone(), document.languages.clone());
        }
        self.languages.insert(document.system, document.languages);
        self.refresh_generic_english();
        Ok(())
    }

    /// Classification rules for `system_id`, or the generic fallback.
    pub fn resolve_classification(&self, system_id: &str) -> &ClassificationConfig {
        match self.systems.get(system_id) {
            Some(config) => config,
            None => {
                debug!(system = system_id, "no dedicated classification, using generic");
                &self.generic
            }
        }
    }

    /// Phrase dictionaries for `(system_id, language)` following the fallback chain.
    pub fn resolve_language(&self, system_id: &str, language: &str) -> &LanguageMapping {
        let Some(bundle) = self.languages.get(system_id) else {
            debug!(system = system_id, language, "no language bundle, using generic/en");
            return &self.generic_english;
        };

        if let Some(mapping) = bundle.get(language) {
            return mapping;
        }

        debug!(system = system_id, language, "language missing, falling back to English");
        bundle.get(DEFAULT_LANGUAGE).unwrap_or(&self.generic_english)
    }

    /// The generic fallback classification record.
    pub fn generic_classification(&self) -> &ClassificationConfig {
        &self.generic
    }

    /// System ids with a dedicated classification record, in declaration order.
    pub fn supported_systems(&self) -> Vec<&str> {
        self.systems.keys().map(String::as_str).collect()
    }

    /// Whether `system_id` has a dedicated classification record.
    pub fn has_system_support(&self, system_id: &str) -> bool {
        self.systems.contains_key(system_id)
    }

    /// System ids (aliases included) with at least one language bundle.
    pub fn language_systems(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }

    /// Language codes bundled for `system_id` (empty when it has none).
    pub fn languages_for(&self, system_id: &str) -> Vec<&str> {
        self.languages.get(system_id).map(|bundle| bundle.keys().map(String::as_str).collect()).unwrap_or_default()
    }

    fn has_generic_english(&self) -> bool {
        self.languages.get(GENERIC_SYSTEM).is_some_and(|bundle| bundle.contains_key(DEFAULT_LANGUAGE))
    }

    fn refresh_generic_english(&mut self) {
        self.generic_english = self
            .languages
            .get(GENERIC_SYSTEM)
            .and_then(|bundle| bundle.get(DEFAULT_LANGUAGE))
            .cloned()
            .unwrap_or_default();
    }
}

fn parse_yaml<T: serde::de::DeserializeOwned>(origin: &str, source: &str) -> Result<T> {
    serde_yaml::from_str(source).map_err(|source| ConfigError::Parse { origin: origin.to_string(), source })
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
}

fn yaml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |source| ConfigError::Io { path: dir.to_path_buf(), source };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if matches!(path.extension().and_then(|ext| ext.to_str()), Some("yaml" | "yml")) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
