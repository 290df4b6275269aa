//! Centralized validation of run configuration.

use tracing::warn;

use crate::core::alphabet::AlphabetMode;

/// Fatal configuration errors, raised before any output is written
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Found {0} reference sequences; exactly one is supported (use --contig or a single-sequence reference)")]
    MultipleReferences(usize),

    #[error("No reference sequences found")]
    NoReferences,

    #[error("Reference '{0}' not found")]
    UnknownReference(String),

    #[error("Got {ids} sample identifiers for {inputs} input files")]
    SampleIdCountMismatch { ids: usize, inputs: usize },

    #[error("Duplicate sample identifier '{0}'")]
    DuplicateSampleId(String),

    #[error("A region start was given without an end")]
    StartWithoutEnd,

    #[error("Region [{start}, {end}) is empty")]
    EmptyRegion { start: usize, end: usize },

    #[error("Region end {end} exceeds length {length} of reference '{reference}'")]
    RegionOutOfBounds {
        reference: String,
        end: usize,
        length: u64,
    },

    #[error("The {0} alphabet is not implemented")]
    UnimplementedAlphabet(AlphabetMode),

    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("No input files given")]
    NoInputs,
}

/// Resolve an optional half-open region from user-supplied bounds.
///
/// A missing start with a given end defaults the start to 0 and logs a
/// warning. A start without an end is fatal.
///
/// # Errors
///
/// Returns `ConfigError::StartWithoutEnd` or `ConfigError::EmptyRegion`.
pub fn resolve_region(
    start: Option<usize>,
    end: Option<usize>,
) -> Result<Option<(usize, usize)>, ConfigError> {
    let (start, end) = match (start, end) {
        (None, None) => return Ok(None),
        (Some(_), None) => return Err(ConfigError::StartWithoutEnd),
        (None, Some(end)) => {
            warn!(end, "Region end given without a start, starting at 0");
            (0, end)
        }
        (Some(start), Some(end)) => (start, end),
    };

    if start >= end {
        return Err(ConfigError::EmptyRegion { start, end });
    }

    Ok(Some((start, end)))
}

/// Resolve sample identifiers, defaulting to `0, 1, 2, ...`.
///
/// # Errors
///
/// Returns `ConfigError::SampleIdCountMismatch` when the number of ids does
/// not match the number of inputs, or `ConfigError::DuplicateSampleId`.
pub fn resolve_sample_ids(ids: &[String], inputs: usize) -> Result<Vec<String>, ConfigError> {
    if inputs == 0 {
        return Err(ConfigError::NoInputs);
    }

    if ids.is_empty() {
        return Ok((0..inputs).map(|i| i.to_string()).collect());
    }

    if ids.len() != inputs {
        return Err(ConfigError::SampleIdCountMismatch {
            ids: ids.len(),
            inputs,
        });
    }

    for (i, id) in ids.iter().enumerate() {
        if ids[..i].contains(id) {
            return Err(ConfigError::DuplicateSampleId(id.clone()));
        }
    }

    Ok(ids.to_vec())
}
