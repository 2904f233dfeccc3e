//! Fixed pattern families and text helpers shared by the flavor stages.
//!
//! The phrase dictionaries are data (see `registry`); what lives here is the
//! language-agnostic part: capture patterns that are validated against a
//! dictionary, the modifier scan, and small text utilities.

pub(crate) mod flavor;
