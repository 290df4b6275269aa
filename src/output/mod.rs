//! Writers for variant and depth tables.
//!
//! - [`tsv`]: Tab-separated tables, the default
//! - [`json`]: The same content as a single JSON document
//!
//! ## Positions
//!
//! Rows are keyed by locus index within the window: region-relative when a
//! region was given, absolute otherwise (the two coincide for whole-reference
//! windows). Callers may ask for absolute 0-based positions instead.

use crate::core::window::Window;

pub mod json;
pub mod tsv;

/// How loci are labelled in output rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PositionMode {
    /// Index within the window
    #[default]
    Relative,
    /// 0-based position on the reference
    Absolute,
}

impl PositionMode {
    #[must_use]
    pub fn position(self, window: &Window, locus: usize) -> usize {
        match self {
            Self::Relative => locus,
            Self::Absolute => window.position_of(locus),
        }
    }
}
