use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod output;
mod parsing;
mod pileup;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("minorvar=debug,info")
    } else {
        EnvFilter::new("minorvar=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Call(args) => {
            cli::call::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Depth(args) => {
            cli::depth::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
