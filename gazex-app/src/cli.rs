//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

/// Extract gaze fixations from trial-block logs into per-block CSV files.
#[derive(Parser, Debug)]
#[command(name = "gazex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Gaze log to process
    pub input: PathBuf,

    /// Directory receiving the fixation CSV files
    #[arg(short, long, default_value = "processed")]
    pub out_dir: PathBuf,

    /// Spatial merge threshold in pixels, applied per axis
    #[arg(long, default_value_t = 30)]
    pub pixel_threshold: i32,

    /// Temporal merge threshold in seconds
    #[arg(long, default_value_t = 10.0)]
    pub time_gap: f32,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
