use std::io::{self, Write};

use serde::Serialize;

use crate::core::window::Window;
use crate::output::PositionMode;
use crate::pileup::classify::VariantRecord;
use crate::pileup::coverage::CoverageMatrix;

#[derive(Debug, Serialize)]
struct VariantRow {
    pos: usize,
    variant: char,
    frequencies: Vec<f64>,
}

#[derive(Debug, Serialize)]
struct VariantReport<'a> {
    reference: &'a str,
    start: usize,
    end: usize,
    samples: &'a [String],
    variants: Vec<VariantRow>,
}

#[derive(Debug, Serialize)]
struct DepthRow<'a> {
    pos: usize,
    coverage: &'a [u64],
}

#[derive(Debug, Serialize)]
struct DepthReport<'a> {
    reference: &'a str,
    start: usize,
    end: usize,
    samples: &'a [String],
    depth: Vec<DepthRow<'a>>,
}

/// Write the variant table as a JSON document.
///
/// # Errors
///
/// Returns any error from serialization or the underlying writer.
pub fn write_variants<W: Write>(
    writer: &mut W,
    sample_ids: &[String],
    variants: &[VariantRecord],
    window: &Window,
    positions: PositionMode,
) -> io::Result<()> {
    let report = VariantReport {
        reference: &window.reference,
        start: window.start,
        end: window.end,
        samples: sample_ids,
        variants: variants
            .iter()
            .map(|v| VariantRow {
                pos: positions.position(window, v.locus),
                variant: char::from(v.symbol),
                frequencies: v.frequencies.clone(),
            })
            .collect(),
    };

    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)
}

/// Write the (masked) depth table as a JSON document.
///
/// # Errors
///
/// Returns any error from serialization or the underlying writer.
pub fn write_depth<W: Write>(
    writer: &mut W,
    sample_ids: &[String],
    coverage: &CoverageMatrix,
    window: &Window,
    positions: PositionMode,
) -> io::Result<()> {
    let report = DepthReport {
        reference: &window.reference,
        start: window.start,
        end: window.end,
        samples: sample_ids,
        depth: (0..coverage.loci())
            .map(|locus| DepthRow {
                pos: positions.position(window, locus),
                coverage: coverage.row(locus),
            })
            .collect(),
    };

    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)
}
