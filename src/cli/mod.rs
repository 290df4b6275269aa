//! Command-line interface for minorvar.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **call**: Report minority-variant frequencies per locus and sample
//! - **depth**: Report per-locus, per-sample depth after coverage masking
//!
//! ## Usage
//!
//! ```text
//! # Call minority variants across three samples against a single-sequence reference
//! minorvar call -r hxb2.fa s1.bam s2.bam s3.bam --sample-ids s1,s2,s3
//!
//! # Restrict to a region and lower the coverage floor
//! minorvar call -r hxb2.fa --start 2000 --end 3000 --min-coverage 50 s1.bam
//!
//! # JSON output to stdout
//! minorvar --format json call -r hxb2.fa s1.bam -o -
//!
//! # Masked depth table
//! minorvar depth -r hxb2.fa s1.bam s2.bam -o depth.tsv
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::core::alphabet::{Alphabet, AlphabetMode};
use crate::core::window::Window;
use crate::parsing::alignment::AlignmentFile;
use crate::parsing::reference::{load_dictionary, resolve_window};
use crate::pileup::decode::HardClipPolicy;
use crate::pileup::engine::{PileupConfig, DEFAULT_MIN_COVERAGE};
use crate::utils::validation::{resolve_region, resolve_sample_ids, ConfigError};

pub mod call;
pub mod depth;

#[derive(Parser)]
#[command(name = "minorvar")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Per-sample minority variant frequencies from aligned reads")]
#[command(
    long_about = "minorvar builds a pileup of one or more samples aligned to a single reference and reports, for every locus, the frequency of each non-majority symbol in each sample.\n\nSamples whose depth at a locus is below --min-coverage are treated as having no data there."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "tsv")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report minority variant frequencies
    Call(call::CallArgs),

    /// Report per-locus depth after coverage masking
    Depth(depth::DepthArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Tsv,
    Json,
}

/// Options shared by every pileup-based command
#[derive(Args, Debug)]
pub struct PileupArgs {
    /// Aligned reads, one SAM or BAM file per sample
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Reference FASTA (defaults to the first input's header)
    #[arg(short, long)]
    pub reference: Option<PathBuf>,

    /// Reference sequence name (required when the reference has several sequences)
    #[arg(long)]
    pub contig: Option<String>,

    /// Region start, 0-based inclusive (requires --end)
    #[arg(long)]
    pub start: Option<usize>,

    /// Region end, 0-based exclusive
    #[arg(long)]
    pub end: Option<usize>,

    /// Symbol alphabet
    #[arg(long, value_enum, default_value_t = AlphabetMode::Nucleotide)]
    pub alphabet: AlphabetMode,

    /// Minimum depth for a sample to count as covered at a locus
    #[arg(long, default_value_t = DEFAULT_MIN_COVERAGE)]
    pub min_coverage: u64,

    /// Sample identifiers, one per input, comma-separated (default: 0,1,2,...)
    #[arg(long, value_delimiter = ',')]
    pub sample_ids: Vec<String>,

    /// How to treat hard-clipped reads
    #[arg(long, value_enum, default_value = "reject")]
    pub hard_clips: HardClipPolicy,

    /// Worker threads
    #[arg(short, long, default_value = "1")]
    pub threads: usize,
}

/// Everything a command needs once configuration has been validated
pub struct PreparedRun {
    pub alphabet: Alphabet,
    pub window: Window,
    pub sample_ids: Vec<String>,
    pub sources: Vec<AlignmentFile>,
    pub config: PileupConfig,
}

impl PileupArgs {
    /// Validate configuration and open inputs.
    ///
    /// Every fatal configuration error surfaces here, before any output is
    /// created.
    ///
    /// # Errors
    ///
    /// Returns configuration errors and errors opening inputs or the reference.
    pub fn prepare(&self) -> anyhow::Result<PreparedRun> {
        let alphabet = Alphabet::for_mode(self.alphabet)?;
        let sample_ids = resolve_sample_ids(&self.sample_ids, self.inputs.len())?;
        let region = resolve_region(self.start, self.end)?;

        let sources = self
            .inputs
            .iter()
            .map(|path| {
                AlignmentFile::open(path)
                    .with_context(|| format!("Failed to open {}", path.display()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let first = sources.first().ok_or(ConfigError::NoInputs)?;
        let dict = load_dictionary(self.reference.as_deref(), first)?;
        let window = resolve_window(&dict, self.contig.as_deref(), region)?;

        info!(
            window = %window,
            samples = sample_ids.len(),
            min_coverage = self.min_coverage,
            "Resolved run configuration"
        );

        Ok(PreparedRun {
            alphabet,
            window,
            sample_ids,
            sources,
            config: PileupConfig {
                min_coverage: self.min_coverage,
                hard_clips: self.hard_clips,
                threads: self.threads,
            },
        })
    }
}

/// Open the output destination; `-` writes to stdout
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn open_output(path: &Path) -> anyhow::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
