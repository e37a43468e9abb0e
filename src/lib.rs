//! luxbeat: beat-synchronous music segmentation and mood-driven lighting
//! synthesis.
//!
//! Two engines make up the core. [`segmentation`] turns a frame-level audio
//! feature matrix and a beat grid into a per-beat change-score series and a
//! sparse set of segment boundaries. [`lighting`] turns those segments plus
//! per-segment mood predictions into a deterministic timeline of 512-channel
//! intensity frames at 30 fps, ready for an external playback clock.
//!
//! Feature extraction, mood inference and frame transport all live outside
//! this crate; their data crosses the boundary as plain inputs and outputs.

pub mod analysis;
pub mod error;
pub mod lighting;
pub mod progress;
pub mod segmentation;

pub use analysis::{FeatureMatrix, FeatureTrack};
pub use error::{EngineError, Result};
pub use lighting::{
    synthesize, Animation, LightingFrame, LightingTimeline, MoodVector, FRAME_RATE, UNIVERSE_SIZE,
};
pub use progress::{NoProgress, Progress};
pub use segmentation::{segment, PeakParams, Segmentation, SegmentationParams};
