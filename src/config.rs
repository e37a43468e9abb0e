use serde::Deserialize;
use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    #[serde(default)]
    pub lighting: LightingConfig,
}

#[derive(Debug, Deserialize)]
pub struct SegmentationConfig {
    #[serde(default = "default_window")]
    pub window: usize,
    #[serde(default = "default_peak_window")]
    pub peak_window: usize,
    #[serde(default = "default_z_threshold")]
    pub z_threshold: f32,
    #[serde(default = "default_min_spacing")]
    pub min_spacing: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct LightingConfig {
    /// Fixed seed for animation selection; omit for OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            peak_window: default_peak_window(),
            z_threshold: default_z_threshold(),
            min_spacing: default_min_spacing(),
        }
    }
}

fn default_window() -> usize { 4 }
fn default_peak_window() -> usize { 16 }
fn default_z_threshold() -> f32 { 1.5 }
fn default_min_spacing() -> usize { 4 }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge config into the CLI: config values apply only where the CLI flag
/// is still at its default.
pub fn apply(cli: &mut Cli, cfg: Config) {
    if cli.window == 4 {
        cli.window = cfg.segmentation.window;
    }
    if cli.peak_window == 16 {
        cli.peak_window = cfg.segmentation.peak_window;
    }
    if cli.z_threshold == 1.5 {
        cli.z_threshold = cfg.segmentation.z_threshold;
    }
    if cli.min_spacing == 4 {
        cli.min_spacing = cfg.segmentation.min_spacing;
    }
    if cli.seed.is_none() {
        cli.seed = cfg.lighting.seed;
    }
}
