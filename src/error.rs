//! Errors raised while building a configuration snapshot.
//!
//! Resolution itself never fails: unknown systems and languages fall back,
//! degenerate input produces an empty result. Only the explicit loading paths
//! (`Registry::from_sources`, `Registry::load_dir`, the `merge_*` methods) can
//! return a [`ConfigError`].

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration file could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration document is not valid YAML for its schema.
    #[error("invalid configuration in '{origin}': {source}")]
    Parse {
        /// Label of the document (file path or caller-supplied name)
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The classification document has no `generic` record.
    #[error("classification data has no generic fallback record")]
    MissingGeneric,

    /// No `generic` system bundle with an `en` mapping was supplied.
    #[error("language data has no generic English mapping")]
    MissingGenericLanguage,
}
