//! Mood-driven lighting synthesis: a catalog of beat-locked frame
//! generators, a mood-to-animation policy, and the per-segment synthesizer
//! that concatenates them into one playback timeline.

pub mod animation;
pub mod mood;
pub mod select;
pub mod synth;
pub mod timeline;

pub use animation::Animation;
pub use mood::MoodVector;
pub use select::pick_animation;
pub use synth::synthesize;
pub use timeline::{LightingFrame, LightingTimeline, SegmentSpan, FRAME_RATE, UNIVERSE_SIZE};
