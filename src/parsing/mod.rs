//! Collaborators that feed the pileup engine.
//!
//! - **Alignments**: SAM/BAM files, one per sample, read with noodles
//! - **FASTA / FAI**: Reference names and lengths
//! - **Reference**: Choosing the single reference and region a run covers
//!
//! ## Example
//!
//! ```rust,no_run
//! use minorvar::parsing::alignment::AlignmentFile;
//! use minorvar::parsing::reference::{load_dictionary, resolve_window};
//! use std::path::Path;
//!
//! let sample = AlignmentFile::open(Path::new("sample.bam")).unwrap();
//! let dict = load_dictionary(Some(Path::new("hxb2.fa")), &sample).unwrap();
//! let window = resolve_window(&dict, None, Some((0, 1000))).unwrap();
//! ```

pub mod alignment;
pub mod fai;
pub mod fasta;
pub mod reference;
