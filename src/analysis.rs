use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One named feature track: scalar measurements at a fixed hop size.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeatureTrack {
    pub name: String,
    pub values: Vec<f32>,
}

/// Per-frame audio features plus the hop geometry needed to map beat times
/// onto frame indices. Produced once per track by the external analysis
/// collaborator; immutable from the core's point of view.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeatureMatrix {
    /// Named tracks, all of equal length.
    pub tracks: Vec<FeatureTrack>,
    pub sample_rate: u32,
    pub hop_size: usize,
    /// Analysis window size; carried for provenance, unused by segmentation.
    #[serde(default)]
    pub frame_size: usize,
}

impl FeatureMatrix {
    /// Frames of feature data per second of audio.
    pub fn frames_per_second(&self) -> f32 {
        self.sample_rate as f32 / self.hop_size as f32
    }

    /// Number of frames in each track.
    pub fn len(&self) -> usize {
        self.tracks.first().map_or(0, |t| t.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn validate(&self) -> Result<()> {
        if self.tracks.is_empty() {
            return Err(EngineError::invalid("feature matrix has no tracks"));
        }
        let len = self.tracks[0].values.len();
        if len == 0 {
            return Err(EngineError::invalid(format!(
                "feature track {:?} is empty",
                self.tracks[0].name
            )));
        }
        for track in &self.tracks[1..] {
            if track.values.len() != len {
                return Err(EngineError::invalid(format!(
                    "feature track {:?} has {} frames, expected {}",
                    track.name,
                    track.values.len(),
                    len
                )));
            }
        }
        if self.hop_size == 0 {
            return Err(EngineError::invalid("hop_size must be non-zero"));
        }
        Ok(())
    }

    /// Min-max rescale of every track independently to [0, 1].
    ///
    /// A zero-range track comes out all-zero rather than erroring; constant
    /// features simply carry no segmentation signal.
    pub fn normalized(&self) -> FeatureMatrix {
        let tracks = self
            .tracks
            .iter()
            .map(|track| {
                let min = track.values.iter().copied().fold(f32::INFINITY, f32::min);
                let max = track.values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                let range = max - min;
                let values = if range != 0.0 {
                    track.values.iter().map(|v| (v - min) / range).collect()
                } else {
                    vec![0.0; track.values.len()]
                };
                FeatureTrack {
                    name: track.name.clone(),
                    values,
                }
            })
            .collect();
        FeatureMatrix {
            tracks,
            sample_rate: self.sample_rate,
            hop_size: self.hop_size,
            frame_size: self.frame_size,
        }
    }
}

/// Validate a beat grid: strictly ascending times in seconds.
///
/// Beat 0 is conceptually the track start even when the first entry is
/// later; the synthesizer prefixes it where needed.
pub fn validate_beat_grid(beats: &[f32]) -> Result<()> {
    for pair in beats.windows(2) {
        if pair[1] <= pair[0] {
            return Err(EngineError::invalid(format!(
                "beat grid is not strictly ascending ({} then {})",
                pair[0], pair[1]
            )));
        }
    }
    if beats.iter().any(|b| !b.is_finite() || *b < 0.0) {
        return Err(EngineError::invalid("beat grid contains a negative or non-finite time"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(tracks: Vec<(&str, Vec<f32>)>) -> FeatureMatrix {
        FeatureMatrix {
            tracks: tracks
                .into_iter()
                .map(|(name, values)| FeatureTrack {
                    name: name.to_string(),
                    values,
                })
                .collect(),
            sample_rate: 44100,
            hop_size: 512,
            frame_size: 1024,
        }
    }

    #[test]
    fn normalization_rescales_to_unit_range() {
        let m = matrix(vec![("energy", vec![2.0, 4.0, 6.0])]).normalized();
        assert_eq!(m.tracks[0].values, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn constant_track_normalizes_to_zero() {
        let m = matrix(vec![("loudness", vec![3.3, 3.3, 3.3])]).normalized();
        assert_eq!(m.tracks[0].values, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn normalized_values_stay_in_unit_interval() {
        let m = matrix(vec![("zcr", vec![-5.0, 0.0, 1.0, 17.5])]).normalized();
        for v in &m.tracks[0].values {
            assert!((0.0..=1.0).contains(v), "value {} out of range", v);
        }
    }

    #[test]
    fn empty_matrix_is_invalid() {
        let m = matrix(vec![]);
        assert!(matches!(m.validate(), Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn mismatched_track_lengths_are_invalid() {
        let m = matrix(vec![("a", vec![1.0, 2.0]), ("b", vec![1.0])]);
        assert!(matches!(m.validate(), Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn beat_grid_must_ascend() {
        assert!(validate_beat_grid(&[0.0, 0.5, 0.5]).is_err());
        assert!(validate_beat_grid(&[0.0, 0.5, 1.0]).is_ok());
    }
}
