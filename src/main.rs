mod cli;
mod config;

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use luxbeat::analysis::{FeatureMatrix, FeatureTrack};
use luxbeat::lighting::{synthesize, MoodVector};
use luxbeat::progress::Progress;
use luxbeat::segmentation::{segment, PeakParams, SegmentationParams};

/// On-disk shape of the external analysis collaborator's output.
#[derive(Deserialize)]
struct AnalysisFile {
    sample_rate: u32,
    hop_size: usize,
    #[serde(default)]
    frame_size: usize,
    features: Vec<FeatureTrack>,
    beats: Vec<f32>,
}

struct BarProgress(ProgressBar);

impl Progress for BarProgress {
    fn update(&mut self, percent: f32) {
        self.0.set_position(percent as u64);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = cli::Cli::parse();

    // Load config: explicit --config path, or auto-detect luxbeat.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = PathBuf::from("luxbeat.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("luxbeat").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            config::apply(&mut cli, cfg);
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    let analysis_path = cli.analysis.as_ref().context("Analysis file is required")?;
    if !analysis_path.exists() {
        anyhow::bail!("Analysis file not found: {}", analysis_path.display());
    }

    // 1. Load the analysis file
    log::info!("Loading analysis from {}", analysis_path.display());
    let content = std::fs::read_to_string(analysis_path)
        .with_context(|| format!("Failed to read {}", analysis_path.display()))?;
    let analysis: AnalysisFile =
        serde_json::from_str(&content).context("Failed to parse analysis JSON")?;

    let matrix = FeatureMatrix {
        tracks: analysis.features,
        sample_rate: analysis.sample_rate,
        hop_size: analysis.hop_size,
        frame_size: analysis.frame_size,
    };
    log::info!(
        "{} feature tracks x {} frames, {} beats",
        matrix.tracks.len(),
        matrix.len(),
        analysis.beats.len()
    );

    // 2. Segmentation, with a progress bar as the cooperative yield point
    let params = SegmentationParams {
        window: cli.window,
        peaks: PeakParams {
            window: cli.peak_window,
            z_threshold: cli.z_threshold,
            min_spacing: cli.min_spacing,
        },
    };

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}%")?
            .progress_chars("=>-"),
    );
    pb.set_message("Segmenting");
    let mut progress = BarProgress(pb.clone());
    let segmentation = segment(&matrix, &analysis.beats, &params, &mut progress)?;
    pb.finish_with_message("Segmentation complete");

    log::info!(
        "{} segment boundaries at beats {:?}",
        segmentation.num_segments(),
        segmentation.boundaries
    );

    // 3. Optional segmentation dump for the visualization side
    if let Some(ref path) = cli.segments_out {
        let out = serde_json::json!({
            "boundaries": segmentation.boundaries,
            "boundary_times": segmentation
                .boundaries
                .iter()
                .map(|&b| analysis.beats[b])
                .collect::<Vec<_>>(),
            "change_scores": segmentation.change_scores,
        });
        std::fs::write(path, serde_json::to_string_pretty(&out)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote segmentation to {}", path.display());
    }

    if cli.segment_only {
        return Ok(());
    }

    // 4. Load per-segment moods; inference for a segment must be complete
    //    before its frames are synthesized, so the file is one whole map per
    //    segment, in segment order
    let moods_path = cli
        .moods
        .as_ref()
        .context("Moods file is required (or pass --segment-only)")?;
    let content = std::fs::read_to_string(moods_path)
        .with_context(|| format!("Failed to read {}", moods_path.display()))?;
    let raw_moods: Vec<HashMap<String, f32>> =
        serde_json::from_str(&content).context("Failed to parse moods JSON")?;
    let moods = raw_moods
        .iter()
        .map(MoodVector::from_scores)
        .collect::<luxbeat::Result<Vec<_>>>()?;

    // 5. Synthesize the lighting timeline
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let timeline = synthesize(&analysis.beats, &segmentation.boundaries, &moods, &mut rng)?;

    // 6. Write one wire-format line per frame
    let file = std::fs::File::create(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    for frame in timeline.frames() {
        writeln!(writer, "{}", frame.to_wire())?;
    }
    writer.flush()?;

    log::info!(
        "Wrote {} frames ({:.1}s at 30 fps) to {}",
        timeline.len(),
        timeline.duration(),
        cli.output.display()
    );

    Ok(())
}
