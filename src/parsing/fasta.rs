//! Reference dictionary from FASTA files using noodles.
//!
//! Extracts contig names and lengths. A `.fai` index next to the FASTA is
//! used when present; otherwise the whole file is read.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tracing::debug;

use crate::core::contig::{Contig, ReferenceDictionary};
use crate::parsing::alignment::ParseError;
use crate::parsing::fai::parse_fai_file;

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for gzipped FASTA
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

fn fai_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.fai", path.display()))
}

/// Read the names and lengths of every sequence in a FASTA file.
///
/// # Errors
///
/// Returns `ParseError::UnsupportedFormat` for non-FASTA extensions,
/// `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, or `ParseError::InvalidFormat` if no sequences are found.
pub fn read_fasta_dictionary(path: &Path) -> Result<ReferenceDictionary, ParseError> {
    if !is_fasta_file(path) {
        return Err(ParseError::UnsupportedFormat(format!(
            "expected a FASTA reference, got {}",
            path.display()
        )));
    }

    let index = fai_path(path);
    let dict = if index.exists() {
        debug!(index = %index.display(), "Reading reference lengths from FASTA index");
        parse_fai_file(&index)?
    } else if is_gzipped(path) {
        let file = std::fs::File::open(path)?;
        let mut reader = fasta::io::Reader::new(BufReader::new(MultiGzDecoder::new(file)));
        parse_fasta_reader(&mut reader)?
    } else {
        let file = std::fs::File::open(path)?;
        let mut reader = fasta::io::Reader::new(BufReader::new(file));
        parse_fasta_reader(&mut reader)?
    };

    Ok(dict.with_source(path.display().to_string()))
}

/// Parse from a noodles FASTA reader
fn parse_fasta_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<ReferenceDictionary, ParseError> {
    let mut contigs = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let name = String::from_utf8_lossy(record.name()).to_string();
        let length = record.sequence().len() as u64;

        contigs.push(Contig::new(name, length));
    }

    if contigs.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(ReferenceDictionary::new(contigs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_fasta_file() {
        assert!(is_fasta_file(Path::new("test.fa")));
        assert!(is_fasta_file(Path::new("test.fasta")));
        assert!(is_fasta_file(Path::new("test.fna")));
        assert!(is_fasta_file(Path::new("test.fa.gz")));
        assert!(is_fasta_file(Path::new("test.fna.bgz")));
        assert!(is_fasta_file(Path::new("/path/to/Reference.FA")));

        assert!(!is_fasta_file(Path::new("test.bam")));
        assert!(!is_fasta_file(Path::new("test.fai")));
    }

    #[test]
    fn test_read_fasta_dictionary() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b">chr1 description\nACGTACGT\nACGT\n>chr2\nGGGG\n")
            .unwrap();
        temp.flush().unwrap();

        let dict = read_fasta_dictionary(temp.path()).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.contigs[0], Contig::new("chr1", 12));
        assert_eq!(dict.contigs[1], Contig::new("chr2", 4));
    }

    #[test]
    fn test_read_gzipped_fasta_dictionary() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">hiv\nACGTAC\n").unwrap();
        let compressed = encoder.finish().unwrap();

        let mut temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        temp.write_all(&compressed).unwrap();
        temp.flush().unwrap();

        let dict = read_fasta_dictionary(temp.path()).unwrap();
        assert_eq!(dict.contigs, vec![Contig::new("hiv", 6)]);
    }

    #[test]
    fn test_read_empty_fasta() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b"").unwrap();
        temp.flush().unwrap();

        assert!(read_fasta_dictionary(temp.path()).is_err());
    }

    #[test]
    fn test_rejects_non_fasta() {
        assert!(matches!(
            read_fasta_dictionary(Path::new("reads.bam")),
            Err(ParseError::UnsupportedFormat(_))
        ));
    }
}
