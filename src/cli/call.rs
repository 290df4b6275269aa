use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::cli::{open_output, OutputFormat, PileupArgs};
use crate::output::{json, tsv, PositionMode};
use crate::pileup::engine;

#[derive(Args)]
pub struct CallArgs {
    #[command(flatten)]
    pub pileup: PileupArgs,

    /// Output file, '-' for stdout
    #[arg(short, long, default_value = "output.tsv")]
    pub output: PathBuf,

    /// Report absolute 0-based reference positions instead of region-relative ones
    #[arg(long)]
    pub absolute_positions: bool,
}

/// Execute call subcommand
///
/// # Errors
///
/// Returns an error if configuration is invalid, an input cannot be read,
/// or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CallArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let prepared = args.pileup.prepare()?;

    if verbose {
        eprintln!(
            "Calling {} sample(s) over {} ({} loci, min coverage {})",
            prepared.sample_ids.len(),
            prepared.window,
            prepared.window.len(),
            prepared.config.min_coverage,
        );
    }

    let result = engine::run(
        prepared.sources,
        &prepared.window,
        &prepared.alphabet,
        &prepared.config,
    )?;

    let positions = if args.absolute_positions {
        PositionMode::Absolute
    } else {
        PositionMode::Relative
    };

    let mut writer = open_output(&args.output)?;
    match format {
        OutputFormat::Tsv => tsv::write_variants(
            &mut writer,
            &prepared.sample_ids,
            &result.variants,
            &prepared.window,
            positions,
        )?,
        OutputFormat::Json => json::write_variants(
            &mut writer,
            &prepared.sample_ids,
            &result.variants,
            &prepared.window,
            positions,
        )?,
    }
    writer.flush()?;

    info!(
        variants = result.variants.len(),
        output = %args.output.display(),
        "Wrote variant table"
    );

    Ok(())
}
