//! Core data types for pileup construction.
//!
//! - [`Alphabet`]: Ordered symbol set with an index lookup; order is the majority tie-break
//! - [`CigarKind`], [`CigarOp`]: Alignment operations
//! - [`Read`]: One aligned read in 0-based half-open reference coordinates
//! - [`Window`]: The reference region a run covers
//! - [`Contig`], [`ReferenceDictionary`]: Reference sequence names and lengths
//!
//! ## Coordinates
//!
//! Everything inside the crate is 0-based and half-open. Conversion to and from
//! the 1-based positions used by SAM/BAM happens only in [`crate::parsing`].
//!
//! [`Alphabet`]: alphabet::Alphabet
//! [`CigarKind`]: cigar::CigarKind
//! [`CigarOp`]: cigar::CigarOp
//! [`Read`]: read::Read
//! [`Window`]: window::Window
//! [`Contig`]: contig::Contig
//! [`ReferenceDictionary`]: contig::ReferenceDictionary

pub mod alphabet;
pub mod cigar;
pub mod contig;
pub mod read;
pub mod window;
