//! # minorvar
//!
//! A library for measuring low-frequency variation in aligned sequencing reads.
//!
//! Given one alignment file per sample against a common single-sequence
//! reference, `minorvar` builds a pileup of base calls per locus and sample,
//! masks sample/locus cells below a minimum depth, and reports the per-sample
//! frequency of every symbol other than the locus's majority symbol. Typical
//! uses are viral quasispecies and tumour heterogeneity.
//!
//! ## Features
//!
//! - **Deletion-aware pileup**: Deletions count as a gap symbol `-`
//! - **Coverage masking**: Low-depth cells become "no data", never a division by zero
//! - **Deterministic majority**: Ties go to the earliest symbol in alphabet order
//! - **Parallel samples**: Each sample is counted privately and merged once
//!
//! ## Example
//!
//! ```rust,no_run
//! use minorvar::core::alphabet::Alphabet;
//! use minorvar::parsing::alignment::AlignmentFile;
//! use minorvar::parsing::reference::{load_dictionary, resolve_window};
//! use minorvar::pileup::engine::{self, PileupConfig};
//! use std::path::Path;
//!
//! let sample = AlignmentFile::open(Path::new("sample.bam")).unwrap();
//! let dict = load_dictionary(None, &sample).unwrap();
//! let window = resolve_window(&dict, None, None).unwrap();
//!
//! let result = engine::run(vec![sample], &window, &Alphabet::nucleotide(), &PileupConfig::default()).unwrap();
//! for v in &result.variants {
//!     println!("{}\t{}\t{:?}", v.locus, char::from(v.symbol), v.frequencies);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Alphabet, CIGAR operations, reads, and windows
//! - [`pileup`]: Decoding, counting, masking, normalization, and classification
//! - [`parsing`]: SAM/BAM alignment source and FASTA reference dictionary
//! - [`output`]: TSV and JSON writers
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod output;
pub mod parsing;
pub mod pileup;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::alphabet::{Alphabet, AlphabetMode};
pub use crate::core::read::Read;
pub use crate::core::window::Window;
pub use crate::pileup::classify::VariantRecord;
pub use crate::pileup::engine::{PileupConfig, PileupResult};
pub use crate::pileup::PileupError;
