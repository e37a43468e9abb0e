//! Peak picking over the change-score series.
//!
//! A sliding z-score test proposes candidate boundaries; a single pass over
//! adjacent candidate pairs then thins out near-duplicates. The thinning is
//! deliberately single-pass: a pair is never re-examined after one member is
//! dropped, and the final candidate is never emitted. Segment boundaries
//! downstream depend on this exact behavior.

/// Parameters for the sliding z-score detector.
#[derive(Clone, Copy, Debug)]
pub struct PeakParams {
    /// Sliding window length in beats.
    pub window: usize,
    /// Z-score a window's center sample must exceed to become a candidate.
    pub z_threshold: f32,
    /// Candidates at most this many beats apart collapse to the higher one.
    pub min_spacing: usize,
}

impl Default for PeakParams {
    fn default() -> Self {
        Self {
            window: 16,
            z_threshold: 1.5,
            min_spacing: 4,
        }
    }
}

pub fn pick_peaks(scores: &[f32], params: &PeakParams) -> Vec<usize> {
    let candidates = candidate_peaks(scores, params);
    trim_peaks(&candidates, scores, params.min_spacing)
}

fn candidate_peaks(scores: &[f32], params: &PeakParams) -> Vec<usize> {
    let window = params.window;
    if scores.len() < window {
        return Vec::new();
    }

    let mid = window / 2;
    let mut peaks = Vec::new();
    for i in 0..=scores.len() - window {
        let samples = &scores[i..i + window];
        let mean: f32 = samples.iter().sum::<f32>() / window as f32;
        let std = (samples.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>()
            / window as f32)
            .sqrt();
        // Flat window: std 0, no candidate.
        let z = (samples[mid] - mean) / std;
        if z > params.z_threshold {
            peaks.push(i + mid);
        }
    }
    peaks
}

/// Single-pass pairwise thinning: keep a candidate when its successor is far
/// enough away or scores lower. The last candidate has no successor and is
/// always dropped.
fn trim_peaks(peaks: &[usize], scores: &[f32], min_spacing: usize) -> Vec<usize> {
    let mut trimmed = Vec::new();
    for i in 0..peaks.len().saturating_sub(1) {
        let peak = peaks[i];
        let next = peaks[i + 1];
        if next - peak > min_spacing || scores[peak] > scores[next] {
            trimmed.push(peak);
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores_with_spikes(len: usize, spikes: &[(usize, f32)]) -> Vec<f32> {
        let mut scores = vec![0.05; len];
        for &(idx, v) in spikes {
            scores[idx] = v;
        }
        scores
    }

    #[test]
    fn isolated_spikes_become_boundaries() {
        let scores = scores_with_spikes(64, &[(20, 1.0), (40, 0.9), (56, 0.8)]);
        let peaks = pick_peaks(&scores, &PeakParams::default());
        // 56 is the final candidate and falls to the trim pass.
        assert_eq!(peaks, vec![20, 40]);
    }

    #[test]
    fn flat_series_has_no_peaks() {
        let scores = vec![0.3; 64];
        assert!(pick_peaks(&scores, &PeakParams::default()).is_empty());
    }

    #[test]
    fn close_pair_keeps_the_higher_scorer() {
        // 30 and 33 are 3 apart (within min_spacing); 30 scores higher, so
        // the pairwise test keeps it anyway. 33 survives against 50.
        let scores = scores_with_spikes(64, &[(30, 1.0), (33, 0.9), (50, 0.8)]);
        let peaks = pick_peaks(&scores, &PeakParams::default());
        assert_eq!(peaks, vec![30, 33]);
    }

    #[test]
    fn close_pair_drops_the_lower_scorer() {
        let scores = scores_with_spikes(64, &[(30, 0.9), (33, 1.0), (50, 0.8)]);
        let peaks = pick_peaks(&scores, &PeakParams::default());
        assert_eq!(peaks, vec![33]);
    }

    #[test]
    fn final_candidate_is_always_dropped() {
        let scores = scores_with_spikes(64, &[(30, 1.0)]);
        let peaks = pick_peaks(&scores, &PeakParams::default());
        assert!(peaks.is_empty());
    }

    #[test]
    fn series_shorter_than_window_yields_nothing() {
        let scores = vec![0.9; 8];
        assert!(pick_peaks(&scores, &PeakParams::default()).is_empty());
    }

    #[test]
    fn boundaries_are_strictly_increasing() {
        let scores = scores_with_spikes(
            128,
            &[(20, 1.0), (23, 0.7), (40, 0.9), (44, 0.6), (70, 0.95), (100, 0.5)],
        );
        let peaks = pick_peaks(&scores, &PeakParams::default());
        assert!(peaks.windows(2).all(|w| w[1] > w[0]), "peaks {:?}", peaks);
    }
}
