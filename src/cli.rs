use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "luxbeat", about = "Beat-synchronous segmentation and mood-driven lighting synthesis")]
pub struct Cli {
    /// Analysis file: feature tracks, beat grid and hop geometry (JSON)
    pub analysis: Option<PathBuf>,

    /// Per-segment mood inference file (JSON array of model->score maps)
    #[arg(short, long)]
    pub moods: Option<PathBuf>,

    /// Output file for lighting frames, one comma-joined frame per line
    #[arg(short, long, default_value = "frames.txt")]
    pub output: PathBuf,

    /// Write segment boundaries and change scores to this JSON file
    #[arg(long)]
    pub segments_out: Option<PathBuf>,

    /// Stop after segmentation; no moods file needed
    #[arg(long)]
    pub segment_only: bool,

    /// Seed for animation selection (omit for OS entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Rolling comparison window in beats
    #[arg(long, default_value_t = 4)]
    pub window: usize,

    /// Peak-picking window in beats
    #[arg(long, default_value_t = 16)]
    pub peak_window: usize,

    /// Z-score a change score must exceed to become a boundary
    #[arg(long, default_value_t = 1.5)]
    pub z_threshold: f32,

    /// Boundaries at most this many beats apart collapse to the higher one
    #[arg(long, default_value_t = 4)]
    pub min_spacing: usize,

    /// Config file path (default: ./luxbeat.toml, then ~/.config/luxbeat/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
