mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use gazex_convert::Converter;
use gazex_core::ExtractorConfig;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ExtractorConfig {
        max_coordinate_offset: cli.pixel_threshold,
        max_time_offset: cli.time_gap,
    };
    let summary = Converter::new(config).run(&cli.input, &cli.out_dir)?;

    if let Some(path) = &cli.summary {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json)
            .with_context(|| format!("cannot write summary {}", path.display()))?;
    }

    println!(
        "{} blocks, {} files, {} fixations",
        summary.blocks, summary.files_written, summary.fixations
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
