//! Per-beat statistics and the rolling change-score series.
//!
//! Each inter-beat interval is summarized as a (mean, variance) vector pair
//! over the feature tracks; the change score at beat i is the Euclidean
//! distance between the summed summaries of the half-window before and the
//! half-window after i.

use crate::analysis::FeatureMatrix;
use crate::error::{EngineError, Result};
use crate::progress::Progress;

use super::stats;

/// Summary statistics for one inter-beat interval: one mean and one
/// population variance per feature track.
#[derive(Clone, Debug)]
pub struct BeatStats {
    pub means: Vec<f32>,
    pub variances: Vec<f32>,
}

/// Map beat times to feature-frame indices via the hop geometry.
pub fn beat_frames(beats: &[f32], matrix: &FeatureMatrix) -> Vec<usize> {
    let fps = matrix.frames_per_second();
    beats.iter().map(|t| (t * fps) as usize).collect()
}

/// Per-interval feature statistics, with a progress yield each whole percent.
///
/// Intervals that fall outside the feature matrix (or are empty) produce NaN
/// summaries; the distance pass absorbs those into zero scores.
pub fn per_beat_stats(
    matrix: &FeatureMatrix,
    beat_frames: &[usize],
    progress: &mut dyn Progress,
) -> Result<Vec<BeatStats>> {
    let total_frames = matrix.len();
    let intervals = beat_frames.len().saturating_sub(1);
    let mut out = Vec::with_capacity(intervals);
    let mut last_percent = 0u32;

    for i in 0..intervals {
        let start = beat_frames[i].min(total_frames);
        let end = beat_frames[i + 1].min(total_frames).max(start);

        let mut means = Vec::with_capacity(matrix.tracks.len());
        let mut variances = Vec::with_capacity(matrix.tracks.len());
        for track in &matrix.tracks {
            let span = &track.values[start..end];
            let m = stats::mean(span);
            means.push(m);
            variances.push(stats::variance(span, m));
        }
        out.push(BeatStats { means, variances });

        let percent = ((i + 1) * 100 / intervals) as u32;
        if percent > last_percent {
            last_percent = percent;
            progress.update(percent as f32);
            if progress.is_cancelled() {
                return Err(EngineError::Cancelled);
            }
        }
    }

    Ok(out)
}

/// Rolling half-window comparison over the interval statistics.
///
/// Produces `intervals + 1 - window` raw scores, min-max normalized to
/// [0, 1] and zero-padded by `window / 2` on both ends so the series lines
/// up with the beat grid again.
pub fn change_scores(beat_stats: &[BeatStats], window: usize) -> Vec<f32> {
    let num_features = beat_stats.first().map_or(0, |s| s.means.len());
    let half = window / 2;
    // The rolling bound is counted in beats, one more than intervals.
    let positions = (beat_stats.len() + 1).saturating_sub(window);

    let mut scores = Vec::with_capacity(positions + window);
    for i in 0..positions {
        let mut left = vec![0.0f32; num_features * 2];
        let mut right = vec![0.0f32; num_features * 2];
        for j in 0..half {
            let a = &beat_stats[i + j];
            let b = &beat_stats[i + half + j];
            for f in 0..num_features {
                left[f] += a.means[f];
                left[num_features + f] += a.variances[f];
                right[f] += b.means[f];
                right[num_features + f] += b.variances[f];
            }
        }
        let score = stats::euclidean_distance(&left, &right);
        scores.push(if score.is_finite() { score } else { 0.0 });
    }

    stats::min_max_normalize(&mut scores);

    // Realign with the beat grid: the rolling window consumed half a window
    // of context at each end.
    let mut padded = vec![0.0; half];
    padded.extend_from_slice(&scores);
    padded.extend(std::iter::repeat(0.0).take(half));
    padded
}
