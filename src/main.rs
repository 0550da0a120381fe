use clap::Parser;
use tracing_subscriber::EnvFilter;

use sequence_catalog::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("sequence_catalog=debug,info")
    } else {
        EnvFilter::new("sequence_catalog=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    cli::run(cli)
}
