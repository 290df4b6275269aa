//! Parser for FASTA index (.fai) files using noodles.
//!
//! Format: `name\tlength\toffset\tline_bases\tline_width`

use std::io::BufReader;
use std::path::Path;

use crate::core::contig::{Contig, ReferenceDictionary};
use crate::parsing::alignment::ParseError;

/// Parse a FASTA index (.fai) file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, or `ParseError::InvalidFormat` if no contigs are found.
pub fn parse_fai_file(path: &Path) -> Result<ReferenceDictionary, ParseError> {
    use noodles::fasta;

    let reader = std::fs::File::open(path).map(BufReader::new)?;

    let index = fasta::fai::io::Reader::new(reader)
        .read_index()
        .map_err(|e| ParseError::Noodles(format!("Failed to parse FAI file: {e}")))?;

    let contigs: Vec<Contig> = index
        .as_ref()
        .iter()
        .map(|record| Contig::new(String::from_utf8_lossy(record.name()), record.length()))
        .collect();

    if contigs.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No contigs found in FAI file".to_string(),
        ));
    }

    Ok(ReferenceDictionary::new(contigs))
}
