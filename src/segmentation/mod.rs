//! Beat-synchronous change-point segmentation.
//!
//! Turns a frame-level feature matrix plus a beat grid into a per-beat
//! change-score series and a sparse set of segment boundaries (beat indices).
//! The whole pass is sequential and batch; a [`Progress`] sink gets called at
//! bounded intervals so a UI caller can repaint or cancel.

mod change_score;
mod peaks;
mod stats;

pub use peaks::PeakParams;

use crate::analysis::{validate_beat_grid, FeatureMatrix};
use crate::error::{EngineError, Result};
use crate::progress::Progress;

/// Tuning knobs for the segmentation pass.
#[derive(Clone, Copy, Debug)]
pub struct SegmentationParams {
    /// Rolling comparison window, in beats. Must be even.
    pub window: usize,
    pub peaks: PeakParams,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            window: 4,
            peaks: PeakParams::default(),
        }
    }
}

/// Output of the segmentation pass. Immutable once computed; the boundary
/// indices key both the visualization markers and lighting synthesis.
#[derive(Clone, Debug)]
pub struct Segmentation {
    /// One score per beat, in [0, 1].
    pub change_scores: Vec<f32>,
    /// Strictly increasing beat indices marking segment ends.
    pub boundaries: Vec<usize>,
}

impl Segmentation {
    pub fn num_segments(&self) -> usize {
        self.boundaries.len()
    }
}

/// Run the full segmentation pass: normalize, summarize each inter-beat
/// interval, score the rolling windows, pick peaks.
pub fn segment(
    matrix: &FeatureMatrix,
    beats: &[f32],
    params: &SegmentationParams,
    progress: &mut dyn Progress,
) -> Result<Segmentation> {
    matrix.validate()?;
    validate_beat_grid(beats)?;

    let intervals = beats.len().saturating_sub(1);
    if intervals < params.window {
        return Err(EngineError::InsufficientData {
            beats: beats.len(),
            needed: params.window + 1,
        });
    }

    let normalized = matrix.normalized();
    let beat_frames = change_score::beat_frames(beats, &normalized);

    log::debug!(
        "segmenting {} beats over {} feature frames ({} tracks)",
        beats.len(),
        normalized.len(),
        normalized.tracks.len()
    );

    let beat_stats = change_score::per_beat_stats(&normalized, &beat_frames, progress)?;
    let change_scores = change_score::change_scores(&beat_stats, params.window);
    let boundaries = peaks::pick_peaks(&change_scores, &params.peaks);

    log::info!(
        "segmentation: {} beats -> {} boundaries",
        beats.len(),
        boundaries.len()
    );

    Ok(Segmentation {
        change_scores,
        boundaries,
    })
}
