//! SAM/BAM alignment source using noodles.
//!
//! BAM files are queried through their `.bai` index when one sits next to
//! the file; SAM files and unindexed BAM files are scanned sequentially and
//! filtered to the window.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use noodles::core::{Position, Region};
use noodles::sam::alignment::RecordBuf;
use noodles::{bam, sam};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::cigar::{CigarKind, CigarOp};
use crate::core::contig::{Contig, ReferenceDictionary};
use crate::core::read::Read;
use crate::core::window::Window;
use crate::pileup::source::AlignmentSource;
use crate::pileup::PileupError;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Reference '{reference}' not found in {path}")]
    MissingReference { reference: String, path: String },
}

/// Alignment container formats accepted as sample inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    Sam,
    Bam,
}

impl AlignmentFormat {
    /// Detect the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnsupportedFormat` for extensions other than
    /// `.sam` and `.bam`. A missing extension is read as SAM.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("sam") | None => Ok(Self::Sam),
            Some("bam") => Ok(Self::Bam),
            Some(ext) => Err(ParseError::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// Records passed over while reading a sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub unmapped: u64,
    pub no_cigar: u64,
    pub no_sequence: u64,
    pub other_reference: u64,
}

impl SkipCounts {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.unmapped + self.no_cigar + self.no_sequence + self.other_reference
    }
}

/// Why a record did not become a [`Read`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    Unmapped,
    NoCigar,
    NoSequence,
}

/// One sample's SAM or BAM file
#[derive(Debug, Clone)]
pub struct AlignmentFile {
    path: PathBuf,
    format: AlignmentFormat,
    skipped: SkipCounts,
}

impl AlignmentFile {
    /// Check the format and that the file can be opened.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnsupportedFormat` for unknown extensions or
    /// `ParseError::Io` if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, ParseError> {
        let format = AlignmentFormat::from_path(path)?;
        File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            format,
            skipped: SkipCounts::default(),
        })
    }

    /// Records skipped by the last call to `visit_reads`
    #[must_use]
    pub fn skipped(&self) -> SkipCounts {
        self.skipped
    }

    /// Read the SAM header.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` or `ParseError::Noodles` if the header cannot be read.
    pub fn read_header(&self) -> Result<sam::Header, ParseError> {
        match self.format {
            AlignmentFormat::Sam => {
                let mut reader = File::open(&self.path)
                    .map(BufReader::new)
                    .map(sam::io::Reader::new)?;
                reader
                    .read_header()
                    .map_err(|e| ParseError::Noodles(e.to_string()))
            }
            AlignmentFormat::Bam => {
                let mut reader = File::open(&self.path).map(bam::io::Reader::new)?;
                reader
                    .read_header()
                    .map_err(|e| ParseError::Noodles(e.to_string()))
            }
        }
    }

    /// The `@SQ` entries of the header as a reference dictionary.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidFormat` if the header has no `@SQ` lines,
    /// or any error from reading the header.
    pub fn reference_dictionary(&self) -> Result<ReferenceDictionary, ParseError> {
        let header = self.read_header()?;
        header_to_dictionary(&header, &self.path)
    }

    fn bai_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.bai", self.path.display()))
    }

    fn visit_indexed<F>(&mut self, window: &Window, visit: &mut F) -> Result<(), PileupError>
    where
        F: FnMut(Read) -> Result<(), PileupError>,
    {
        let mut reader = bam::io::indexed_reader::Builder::default()
            .build_from_path(&self.path)
            .map_err(ParseError::Io)?;
        let header = reader
            .read_header()
            .map_err(|e| ParseError::Noodles(e.to_string()))?;

        if reference_id(&header, &window.reference).is_none() {
            return Err(self.missing_reference(window).into());
        }

        let region = window_to_region(window)?;
        let query = reader
            .query(&header, &region)
            .map_err(|e| ParseError::Noodles(e.to_string()))?;

        for result in query {
            let record = result.map_err(ParseError::Io)?;
            let record =
                RecordBuf::try_from_alignment_record(&header, &record).map_err(ParseError::Io)?;
            self.visit_record(&record, window, visit)?;
        }

        Ok(())
    }

    fn visit_sequential<I, F>(
        &mut self,
        header: &sam::Header,
        records: I,
        window: &Window,
        visit: &mut F,
    ) -> Result<(), PileupError>
    where
        I: Iterator<Item = io::Result<RecordBuf>>,
        F: FnMut(Read) -> Result<(), PileupError>,
    {
        let Some(id) = reference_id(header, &window.reference) else {
            return Err(self.missing_reference(window).into());
        };

        for result in records {
            let record = result.map_err(ParseError::Io)?;
            if record.flags().is_unmapped() {
                self.skipped.unmapped += 1;
                continue;
            }
            if record.reference_sequence_id() != Some(id) {
                self.skipped.other_reference += 1;
                continue;
            }
            self.visit_record(&record, window, visit)?;
        }

        Ok(())
    }

    fn visit_record<F>(
        &mut self,
        record: &RecordBuf,
        window: &Window,
        visit: &mut F,
    ) -> Result<(), PileupError>
    where
        F: FnMut(Read) -> Result<(), PileupError>,
    {
        match record_to_read(record) {
            Ok(read) => {
                if read.overlaps(window.start, window.end) {
                    visit(read)?;
                }
            }
            Err(Skip::Unmapped) => self.skipped.unmapped += 1,
            Err(Skip::NoCigar) => self.skipped.no_cigar += 1,
            Err(Skip::NoSequence) => self.skipped.no_sequence += 1,
        }
        Ok(())
    }

    fn missing_reference(&self, window: &Window) -> ParseError {
        ParseError::MissingReference {
            reference: window.reference.clone(),
            path: self.path.display().to_string(),
        }
    }
}

impl AlignmentSource for AlignmentFile {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    fn visit_reads<F>(&mut self, window: &Window, mut visit: F) -> Result<(), PileupError>
    where
        F: FnMut(Read) -> Result<(), PileupError>,
    {
        self.skipped = SkipCounts::default();

        match self.format {
            AlignmentFormat::Sam => {
                let mut reader = File::open(&self.path)
                    .map(BufReader::new)
                    .map(sam::io::Reader::new)
                    .map_err(ParseError::Io)?;
                let header = reader
                    .read_header()
                    .map_err(|e| ParseError::Noodles(e.to_string()))?;
                self.visit_sequential(&header, reader.record_bufs(&header), window, &mut visit)?;
            }
            AlignmentFormat::Bam if self.bai_path().exists() => {
                self.visit_indexed(window, &mut visit)?;
            }
            AlignmentFormat::Bam => {
                warn!(
                    path = %self.path.display(),
                    "No .bai index found, scanning the whole file"
                );
                let mut reader = File::open(&self.path)
                    .map(bam::io::Reader::new)
                    .map_err(ParseError::Io)?;
                let header = reader
                    .read_header()
                    .map_err(|e| ParseError::Noodles(e.to_string()))?;
                self.visit_sequential(&header, reader.record_bufs(&header), window, &mut visit)?;
            }
        }

        debug!(
            path = %self.path.display(),
            skipped = self.skipped.total(),
            unmapped = self.skipped.unmapped,
            no_cigar = self.skipped.no_cigar,
            no_sequence = self.skipped.no_sequence,
            other_reference = self.skipped.other_reference,
            "Skipped records"
        );

        Ok(())
    }
}

/// Convert a record into a [`Read`] in 0-based coordinates
fn record_to_read(record: &RecordBuf) -> Result<Read, Skip> {
    if record.flags().is_unmapped() {
        return Err(Skip::Unmapped);
    }
    let start = record.alignment_start().ok_or(Skip::Unmapped)?;

    let ops: Vec<CigarOp> = record
        .cigar()
        .as_ref()
        .iter()
        .map(|op| CigarOp::new(CigarKind::from(op.kind()), op.len()))
        .collect();
    if ops.is_empty() {
        return Err(Skip::NoCigar);
    }

    let sequence = record.sequence().as_ref().to_vec();
    if sequence.is_empty() {
        return Err(Skip::NoSequence);
    }

    let name = record
        .name()
        .map_or_else(|| "*".to_string(), ToString::to_string);

    Ok(Read::new(name, ops, sequence, usize::from(start) - 1))
}

/// Index of a reference sequence in the header
fn reference_id(header: &sam::Header, name: &str) -> Option<usize> {
    header
        .reference_sequences()
        .keys()
        .position(|n| n.to_string() == name)
}

/// Convert a 0-based half-open window to a 1-based inclusive noodles region
fn window_to_region(window: &Window) -> Result<Region, ParseError> {
    let start = Position::try_from(window.start + 1)
        .map_err(|e| ParseError::InvalidFormat(format!("Invalid region start: {e}")))?;
    let end = Position::try_from(window.end)
        .map_err(|e| ParseError::InvalidFormat(format!("Invalid region end: {e}")))?;
    Ok(Region::new(window.reference.as_str(), start..=end))
}

/// Convert a noodles header to a [`ReferenceDictionary`]
fn header_to_dictionary(
    header: &sam::Header,
    source: &Path,
) -> Result<ReferenceDictionary, ParseError> {
    let contigs: Vec<Contig> = header
        .reference_sequences()
        .iter()
        .map(|(name, map)| Contig::new(name.to_string(), map.length().get() as u64))
        .collect();

    if contigs.is_empty() {
        return Err(ParseError::InvalidFormat(format!(
            "No @SQ lines found in header of {}",
            source.display()
        )));
    }

    Ok(ReferenceDictionary::new(contigs).with_source(source.display().to_string()))
}
