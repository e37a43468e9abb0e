use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Per-segment predictions from the external mood classifiers, in [0, 1].
///
/// Danceability, aggressiveness and relaxedness drive animation selection
/// and the generators; happy/sad are carried through for consumers that
/// want them but play no part in lighting.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoodVector {
    pub danceability: f32,
    pub aggressive: f32,
    pub relaxed: f32,
    #[serde(default)]
    pub happy: Option<f32>,
    #[serde(default)]
    pub sad: Option<f32>,
}

pub const MODEL_DANCEABILITY: &str = "danceability";
pub const MODEL_AGGRESSIVE: &str = "mood_aggressive";
pub const MODEL_RELAXED: &str = "mood_relaxed";
pub const MODEL_HAPPY: &str = "mood_happy";
pub const MODEL_SAD: &str = "mood_sad";

impl MoodVector {
    /// Build from a model-name -> prediction map. A missing required model
    /// is a hard error; lighting never substitutes a default score.
    pub fn from_scores(scores: &HashMap<String, f32>) -> Result<Self> {
        let require = |model: &str| {
            scores.get(model).copied().ok_or_else(|| {
                EngineError::invalid(format!("mood inference is missing model {:?}", model))
            })
        };
        Ok(MoodVector {
            danceability: require(MODEL_DANCEABILITY)?,
            aggressive: require(MODEL_AGGRESSIVE)?,
            relaxed: require(MODEL_RELAXED)?,
            happy: scores.get(MODEL_HAPPY).copied(),
            sad: scores.get(MODEL_SAD).copied(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(&str, f32)]) -> HashMap<String, f32> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn builds_from_complete_map() {
        let map = scores(&[
            (MODEL_DANCEABILITY, 0.8),
            (MODEL_AGGRESSIVE, 0.2),
            (MODEL_RELAXED, 0.1),
            (MODEL_HAPPY, 0.6),
        ]);
        let mood = MoodVector::from_scores(&map).unwrap();
        assert_eq!(mood.danceability, 0.8);
        assert_eq!(mood.happy, Some(0.6));
        assert_eq!(mood.sad, None);
    }

    #[test]
    fn missing_required_model_is_invalid_input() {
        let map = scores(&[(MODEL_DANCEABILITY, 0.8), (MODEL_AGGRESSIVE, 0.2)]);
        let err = MoodVector::from_scores(&map).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(ref m) if m.contains("mood_relaxed")));
    }
}
