//! Pileup construction and minority-variant classification.
//!
//! Data flows strictly forward through five stages:
//!
//! 1. [`AlignmentDecoder`]: a read's CIGAR walk becomes one symbol per reference position
//! 2. [`SampleCounts`] / [`CountTensor`]: symbols are counted per `(locus, symbol, sample)`
//! 3. [`CoverageMatrix`]: per `(locus, sample)` depth, masked below the minimum coverage
//! 4. [`FrequencyTensor`]: counts divided by (masked) depth
//! 5. [`VariantClassifier`]: per locus, the majority symbol and the minority records
//!
//! [`engine::run`] wires the stages together. Samples are accumulated in
//! parallel, each into a private [`SampleCounts`], and stacked into the
//! [`CountTensor`] once every sample has finished.
//!
//! ## Example
//!
//! ```rust
//! use minorvar::core::alphabet::Alphabet;
//! use minorvar::core::cigar::{CigarKind, CigarOp};
//! use minorvar::core::read::Read;
//! use minorvar::core::window::Window;
//! use minorvar::pileup::engine::{self, PileupConfig};
//!
//! let read = |bases: &[u8]| {
//!     Read::new("r", vec![CigarOp::new(CigarKind::AlignmentMatch, 3)], bases.to_vec(), 0)
//! };
//! let sources = vec![vec![read(b"ACG"), read(b"ACT")]];
//! let config = PileupConfig { min_coverage: 2, ..PileupConfig::default() };
//!
//! let result = engine::run(sources, &Window::whole("ref", 3), &Alphabet::nucleotide(), &config)?;
//! assert_eq!(result.variants.len(), 1);
//! assert_eq!(result.variants[0].symbol, b'T');
//! # Ok::<(), minorvar::pileup::PileupError>(())
//! ```
//!
//! [`AlignmentDecoder`]: decode::AlignmentDecoder
//! [`SampleCounts`]: accumulate::SampleCounts
//! [`CountTensor`]: accumulate::CountTensor
//! [`CoverageMatrix`]: coverage::CoverageMatrix
//! [`FrequencyTensor`]: frequency::FrequencyTensor
//! [`VariantClassifier`]: classify::VariantClassifier

use thiserror::Error;

use crate::parsing::alignment::ParseError;

pub mod accumulate;
pub mod classify;
pub mod coverage;
pub mod decode;
pub mod engine;
pub mod frequency;
pub mod source;

#[derive(Error, Debug)]
pub enum PileupError {
    #[error(transparent)]
    Decode(#[from] decode::DecodeError),

    #[error(transparent)]
    Source(#[from] ParseError),

    #[error("Count shapes differ: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}
