use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::cli::{open_output, OutputFormat, PileupArgs};
use crate::output::{json, tsv, PositionMode};
use crate::pileup::engine;

#[derive(Args)]
pub struct DepthArgs {
    #[command(flatten)]
    pub pileup: PileupArgs,

    /// Output file, '-' for stdout
    #[arg(short, long, default_value = "depth.tsv")]
    pub output: PathBuf,

    /// Report absolute 0-based reference positions instead of region-relative ones
    #[arg(long)]
    pub absolute_positions: bool,
}

/// Execute depth subcommand
///
/// # Errors
///
/// Returns an error if configuration is invalid, an input cannot be read,
/// or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DepthArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let prepared = args.pileup.prepare()?;

    if verbose {
        eprintln!(
            "Computing depth for {} sample(s) over {}",
            prepared.sample_ids.len(),
            prepared.window,
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
        OutputFormat::Tsv => tsv::write_depth(
            &mut writer,
            &prepared.sample_ids,
            &result.coverage,
            &prepared.window,
            positions,
        )?,
        OutputFormat::Json => json::write_depth(
            &mut writer,
            &prepared.sample_ids,
            &result.coverage,
            &prepared.window,
            positions,
        )?,
    }
    writer.flush()?;

    info!(
        loci = result.coverage.loci(),
        output = %args.output.display(),
        "Wrote depth table"
    );

    Ok(())
}
