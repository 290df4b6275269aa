use std::io::{self, Write};

use crate::core::window::Window;
use crate::output::PositionMode;
use crate::pileup::classify::VariantRecord;
use crate::pileup::coverage::CoverageMatrix;

/// Write the variant table: `pos\tvariant\t<sample ids...>` then one row
/// per minority record.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_variants<W: Write>(
    writer: &mut W,
    sample_ids: &[String],
    variants: &[VariantRecord],
    window: &Window,
    positions: PositionMode,
) -> io::Result<()> {
    write!(writer, "pos\tvariant")?;
    for id in sample_ids {
        write!(writer, "\t{id}")?;
    }
    writeln!(writer)?;

    for variant in variants {
        write!(
            writer,
            "{}\t{}",
            positions.position(window, variant.locus),
            char::from(variant.symbol)
        )?;
        for freq in &variant.frequencies {
            write!(writer, "\t{freq}")?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Write the (masked) depth table: `pos\t<sample ids...>` then one row per locus.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_depth<W: Write>(
    writer: &mut W,
    sample_ids: &[String],
    coverage: &CoverageMatrix,
    window: &Window,
    positions: PositionMode,
) -> io::Result<()> {
    write!(writer, "pos")?;
    for id in sample_ids {
        write!(writer, "\t{id}")?;
    }
    writeln!(writer)?;

    for locus in 0..coverage.loci() {
        write!(writer, "{}", positions.position(window, locus))?;
        for depth in coverage.row(locus) {
            write!(writer, "\t{depth}")?;
        }
        writeln!(writer)?;
    }

    Ok(())
}
