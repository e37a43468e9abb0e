use std::fmt::Write as _;

use crate::lighting::animation::Animation;

/// Number of intensity channels in one lighting frame (a full DMX universe).
pub const UNIVERSE_SIZE: usize = 512;

/// Playback rate of the synthesized timeline, frames per second.
pub const FRAME_RATE: u32 = 30;

/// One timestep of channel intensities.
#[derive(Clone, PartialEq, Eq)]
pub struct LightingFrame {
    channels: [u8; UNIVERSE_SIZE],
}

impl LightingFrame {
    pub fn new() -> Self {
        LightingFrame {
            channels: [0; UNIVERSE_SIZE],
        }
    }

    pub fn filled(value: u8) -> Self {
        LightingFrame {
            channels: [value; UNIVERSE_SIZE],
        }
    }

    pub fn channels(&self) -> &[u8; UNIVERSE_SIZE] {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut [u8; UNIVERSE_SIZE] {
        &mut self.channels
    }

    /// Transport line format: decimal byte values, comma-joined, no trailing
    /// delimiter. One frame per message on the distribution channel.
    pub fn to_wire(&self) -> String {
        let mut line = String::with_capacity(UNIVERSE_SIZE * 4);
        for (i, v) in self.channels.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            let _ = write!(line, "{}", v);
        }
        line
    }
}

impl Default for LightingFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LightingFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lit = self.channels.iter().filter(|&&c| c > 0).count();
        write!(f, "LightingFrame({} lit channels)", lit)
    }
}

/// The frame range and animation chosen for one segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentSpan {
    pub start: usize,
    pub end: usize,
    pub animation: Animation,
}

impl SegmentSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The fully synthesized show: every segment's frames concatenated in order.
/// Built once before playback, read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct LightingTimeline {
    frames: Vec<LightingFrame>,
    spans: Vec<SegmentSpan>,
}

impl LightingTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_segment(&mut self, animation: Animation, frames: Vec<LightingFrame>) {
        let start = self.frames.len();
        self.frames.extend(frames);
        self.spans.push(SegmentSpan {
            start,
            end: self.frames.len(),
            animation,
        });
    }

    /// Pure lookup for the external 30 Hz playback clock. Out-of-range
    /// indices are a no-op (`None`), never an error, so a clock that runs
    /// past the end simply goes dark.
    pub fn frame_at(&self, index: usize) -> Option<&LightingFrame> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Duration of the show in seconds at the fixed playback rate.
    pub fn duration(&self) -> f32 {
        self.frames.len() as f32 / FRAME_RATE as f32
    }

    pub fn spans(&self) -> &[SegmentSpan] {
        &self.spans
    }

    pub fn frames(&self) -> &[LightingFrame] {
        &self.frames
    }
}
