//! The animation catalog: pure per-segment frame generators.
//!
//! Every generator takes a segment-local beat sequence (first element 0.0,
//! later elements offsets in seconds from segment start) plus the segment's
//! mood vector, and returns exactly `floor(last_offset * FRAME_RATE)` frames
//! of `UNIVERSE_SIZE` channels. Randomness comes from the caller's Rng so a
//! seeded run replays bit-identically.

use rand::Rng;

use crate::lighting::mood::MoodVector;
use crate::lighting::timeline::{LightingFrame, FRAME_RATE, UNIVERSE_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Animation {
    Pulse,
    Strobe,
    Flicker,
    Flow,
    Burst,
}

impl Animation {
    pub fn name(&self) -> &'static str {
        match self {
            Animation::Pulse => "pulse",
            Animation::Strobe => "strobe",
            Animation::Flicker => "flicker",
            Animation::Flow => "flow",
            Animation::Burst => "burst",
        }
    }

    pub fn render<R: Rng + ?Sized>(
        &self,
        beats: &[f32],
        mood: &MoodVector,
        rng: &mut R,
    ) -> Vec<LightingFrame> {
        match self {
            Animation::Pulse => pulse(beats, mood),
            Animation::Strobe => strobe(beats),
            Animation::Flicker => flicker(beats, mood, rng),
            Animation::Flow => flow(beats, mood),
            Animation::Burst => burst(beats, mood),
        }
    }
}

fn time_to_frame(time: f32) -> usize {
    (time * FRAME_RATE as f32) as usize
}

/// Frame budget for a segment: floor of its beat-derived duration at the
/// playback rate. Every generator honors this exactly, so cumulative
/// rounding drift across segments is visible to callers rather than hidden
/// by resampling.
fn frame_count(beats: &[f32]) -> usize {
    beats.last().map_or(0, |&last| time_to_frame(last))
}

fn beat_frames(beats: &[f32]) -> Vec<usize> {
    beats.iter().map(|&b| time_to_frame(b)).collect()
}

/// Whole-universe triangular fade around 128, swinging `255 * danceability`
/// peak to peak. Direction alternates each beat interval, starting upward.
fn pulse(beats: &[f32], mood: &MoodVector) -> Vec<LightingFrame> {
    let mut frames = vec![LightingFrame::new(); frame_count(beats)];
    let fade_range = 255.0 * mood.danceability;

    let mut start_frame = 0;
    for (interval, pair) in beats.windows(2).enumerate() {
        let end_frame = time_to_frame(pair[1]);
        let span = end_frame.saturating_sub(start_frame);
        if span > 0 {
            let rising = interval % 2 == 0;
            let mut value = if rising {
                128.0 - fade_range / 2.0
            } else {
                128.0 + fade_range / 2.0
            };
            let step = (if rising { fade_range } else { -fade_range }) / span as f32;
            for frame in &mut frames[start_frame..end_frame] {
                *frame = LightingFrame::filled(value as u8);
                value += step;
            }
        }
        start_frame = end_frame;
    }
    frames
}

/// Full-on flash at every beat, linearly decaying to dark across the
/// interval.
fn strobe(beats: &[f32]) -> Vec<LightingFrame> {
    let mut frames = vec![LightingFrame::new(); frame_count(beats)];

    let mut start_frame = 0;
    for pair in beats.windows(2) {
        let end_frame = time_to_frame(pair[1]);
        let span = end_frame.saturating_sub(start_frame);
        if span > 0 {
            let mut value = 255.0f32;
            let step = -255.0 / span as f32;
            for frame in &mut frames[start_frame..end_frame] {
                *frame = LightingFrame::filled(value as u8);
                value += step;
            }
        }
        start_frame = end_frame;
    }
    frames
}

/// Random twinkles on each beat, decaying between beats. The decay runs in
/// the integer domain (truncating each frame), so a lit channel steps
/// 255 -> 247 -> 239 -> ... rather than fading smoothly.
fn flicker<R: Rng + ?Sized>(beats: &[f32], mood: &MoodVector, rng: &mut R) -> Vec<LightingFrame> {
    let total = frame_count(beats);
    let mut frames = Vec::with_capacity(total);
    let twinkle_chance = 1.0 - mood.relaxed;
    let beat_frames = beat_frames(beats);

    let mut previous = [0u8; UNIVERSE_SIZE];
    for i in 0..total {
        let mut current = [0u8; UNIVERSE_SIZE];
        let on_beat = beat_frames.contains(&i);
        for (c, &prev) in current.iter_mut().zip(previous.iter()) {
            let decayed = (prev as f32 * 0.97) as u8;
            *c = if on_beat && rng.random::<f32>() < twinkle_chance {
                255
            } else {
                decayed
            };
        }
        previous = current;
        let mut frame = LightingFrame::new();
        *frame.channels_mut() = current;
        frames.push(frame);
    }
    frames
}

/// A bright point chasing beat-derived target positions along the channel
/// line. Step size scales with `4 * (1 - danceability)`; emitted intensity
/// is `255 * (1 - aggressive) * relaxed`, attenuated by normalized distance
/// to the target. Writes land on the frame index implied by the current
/// position; out-of-range writes are dropped and overshoot snaps to the
/// target so the walk always terminates.
fn flow(beats: &[f32], mood: &MoodVector) -> Vec<LightingFrame> {
    let total = frame_count(beats);
    let mut frames = vec![LightingFrame::new(); total];

    let speed = 4.0 * (1.0 - mood.danceability);
    let brightness = 255.0 * (1.0 - mood.aggressive) * mood.relaxed;

    let mut position = 0.0f32;
    for pair in beats.windows(2) {
        let interval = pair[1] - pair[0];
        let target = (pair[1] * total as f32).floor();
        let distance = (target - position).abs();
        if distance == 0.0 || interval <= 0.0 {
            continue;
        }
        let direction = if target > position { 1.0 } else { -1.0 };
        let step = distance / interval * speed;
        if step <= 0.0 {
            position = target;
            continue;
        }
        while (target - position) * direction > 0.0 {
            let falloff = 1.0 - ((position - target).abs() / distance).min(1.0);
            let intensity = brightness * falloff;
            if let Some(frame) = frames.get_mut(time_to_frame(position)) {
                *frame = LightingFrame::filled(intensity as u8);
            }
            position += direction * step;
        }
        position = target;
    }
    frames
}

/// Symmetric expanding burst: a half-universe buffer decays by 0.98 each
/// frame and rotates outward five channels per frame (each rotation smears
/// the leading element); beats relight the leading element. The half-buffer
/// mirrors onto both halves of the universe around its center.
fn burst(beats: &[f32], _mood: &MoodVector) -> Vec<LightingFrame> {
    const HALF: usize = UNIVERSE_SIZE / 2;
    let total = frame_count(beats);
    let mut frames = Vec::with_capacity(total);
    let beat_frames = beat_frames(beats);

    let mut buffer = [0.0f32; HALF];
    for i in 0..total {
        for v in buffer.iter_mut() {
            *v *= 0.98;
        }
        for _ in 0..5 {
            buffer.rotate_right(1);
            buffer[0] = buffer[1];
        }
        if beat_frames.contains(&i) {
            buffer[0] = 255.0;
        }

        let mut frame = LightingFrame::new();
        let channels = frame.channels_mut();
        for (j, &v) in buffer.iter().enumerate() {
            let value = v as u8;
            channels[HALF - j - 1] = value;
            channels[HALF + j] = value;
        }
        frames.push(frame);
    }
    frames
}
