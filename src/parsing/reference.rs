//! Resolving the reference dictionary and the window a run covers.

use std::path::Path;

use tracing::info;

use crate::core::contig::ReferenceDictionary;
use crate::core::window::Window;
use crate::parsing::alignment::{AlignmentFile, ParseError};
use crate::parsing::fasta::read_fasta_dictionary;
use crate::utils::validation::ConfigError;

/// Load reference names and lengths from a FASTA file, or from the header of
/// the first alignment file when no FASTA is given.
///
/// # Errors
///
/// Returns any error from reading the FASTA, its index, or the header.
pub fn load_dictionary(
    reference: Option<&Path>,
    first_input: &AlignmentFile,
) -> Result<ReferenceDictionary, ParseError> {
    let dict = match reference {
        Some(path) => read_fasta_dictionary(path)?,
        None => first_input.reference_dictionary()?,
    };

    info!(
        source = dict.source.as_deref().unwrap_or("unknown"),
        references = dict.len(),
        "Loaded reference dictionary"
    );

    Ok(dict)
}

/// Pick the single reference a run covers and bound it to a window.
///
/// Without `contig`, the dictionary must hold exactly one reference. A
/// `region` is validated against the reference length; without one the
/// window spans the whole reference.
///
/// # Errors
///
/// Returns `ConfigError::NoReferences`, `ConfigError::MultipleReferences`,
/// `ConfigError::UnknownReference`, or `ConfigError::RegionOutOfBounds`.
pub fn resolve_window(
    dict: &ReferenceDictionary,
    contig: Option<&str>,
    region: Option<(usize, usize)>,
) -> Result<Window, ConfigError> {
    let reference = match contig {
        Some(name) => dict
            .get(name)
            .ok_or_else(|| ConfigError::UnknownReference(name.to_string()))?,
        None => match dict.contigs.as_slice() {
            [] => return Err(ConfigError::NoReferences),
            [only] => only,
            many => return Err(ConfigError::MultipleReferences(many.len())),
        },
    };

    #[allow(clippy::cast_possible_truncation)] // Reference lengths fit in memory-sized windows
    let length = reference.length as usize;

    match region {
        None => Ok(Window::whole(reference.name.clone(), length)),
        Some((start, end)) => {
            if end > length {
                return Err(ConfigError::RegionOutOfBounds {
                    reference: reference.name.clone(),
                    end,
                    length: reference.length,
                });
            }
            Ok(Window::region(reference.name.clone(), start, end))
        }
    }
}
