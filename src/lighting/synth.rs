//! Per-segment lighting synthesis.
//!
//! Walks the segment boundaries in order, carves the matching beat slice out
//! of the global grid, rebases it to segment-local time, picks an animation
//! for the segment's mood, and appends the rendered frames to the running
//! timeline. Segment durations come from beat timestamps alone; the total
//! frame count may drift from the audio duration by up to a frame per
//! segment, which callers observe rather than the synthesizer hiding it.

use rand::Rng;

use crate::error::{EngineError, Result};
use crate::lighting::mood::MoodVector;
use crate::lighting::select::pick_animation;
use crate::lighting::timeline::LightingTimeline;

/// Synthesize the full show. `moods[i]` must be the completed inference for
/// segment `i`; the caller owns the ordering contract with its inference
/// pipeline and hands vectors over only once they are whole.
pub fn synthesize<R: Rng + ?Sized>(
    beats: &[f32],
    boundaries: &[usize],
    moods: &[MoodVector],
    rng: &mut R,
) -> Result<LightingTimeline> {
    if moods.len() != boundaries.len() {
        return Err(EngineError::invalid(format!(
            "{} segment boundaries but {} mood vectors",
            boundaries.len(),
            moods.len()
        )));
    }
    for pair in boundaries.windows(2) {
        if pair[1] <= pair[0] {
            return Err(EngineError::invalid("segment boundaries must be strictly increasing"));
        }
    }
    if let Some(&last) = boundaries.last() {
        if last >= beats.len() {
            return Err(EngineError::invalid(format!(
                "boundary {} is outside the {}-beat grid",
                last,
                beats.len()
            )));
        }
    }

    let mut timeline = LightingTimeline::new();
    let mut start = 0usize;
    for (i, (&end, mood)) in boundaries.iter().zip(moods.iter()).enumerate() {
        let local = rebase(&beats[start..=end], start == 0);
        let animation = pick_animation(mood, rng);
        let frames = animation.render(&local, mood, rng);
        log::debug!(
            "segment {}: beats {}..={}, {} -> {} frames",
            i,
            start,
            end,
            animation.name(),
            frames.len()
        );
        timeline.push_segment(animation, frames);
        start = end;
    }

    log::info!(
        "synthesized {} segments, {} frames ({:.1}s)",
        timeline.spans().len(),
        timeline.len(),
        timeline.duration()
    );
    Ok(timeline)
}

/// Rebase a beat slice to segment-local time. The opening segment keeps its
/// absolute times and gains a synthetic leading 0.0 (the conceptual beat at
/// track start); later segments subtract their first beat.
fn rebase(slice: &[f32], is_first: bool) -> Vec<f32> {
    if is_first {
        std::iter::once(0.0).chain(slice.iter().copied()).collect()
    } else {
        let base = slice[0];
        slice.iter().map(|b| b - base).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mood() -> MoodVector {
        MoodVector {
            danceability: 0.5,
            aggressive: 0.5,
            relaxed: 0.5,
            happy: None,
            sad: None,
        }
    }

    fn grid(n: usize) -> Vec<f32> {
        (0..n).map(|i| 0.5 + i as f32 * 0.5).collect()
    }

    #[test]
    fn segment_frames_tile_the_timeline_exactly() {
        let beats = grid(24);
        let boundaries = vec![7, 15, 21];
        let moods = vec![mood(); 3];
        let timeline =
            synthesize(&beats, &boundaries, &moods, &mut StdRng::seed_from_u64(3)).unwrap();

        let total: usize = timeline.spans().iter().map(|s| s.len()).sum();
        assert_eq!(total, timeline.len());
        assert_eq!(timeline.spans()[0].start, 0);
        for pair in timeline.spans().windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn first_segment_keeps_absolute_times_behind_a_synthetic_zero() {
        // First beat at 0.5s, boundary at beat 3 (2.0s): the segment spans
        // [0.0, 0.5, 1.0, 1.5, 2.0] -> 60 frames.
        let beats = grid(24);
        let timeline =
            synthesize(&beats, &[3], &[mood()], &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(timeline.spans()[0].len(), 60);
    }

    #[test]
    fn later_segments_are_rebased_to_their_first_beat() {
        // Segment 2 covers beats 3..=9: offsets 0.0..3.0 -> 90 frames.
        let beats = grid(24);
        let timeline =
            synthesize(&beats, &[3, 9], &[mood(), mood()], &mut StdRng::seed_from_u64(3))
                .unwrap();
        assert_eq!(timeline.spans()[1].len(), 90);
    }

    #[test]
    fn beats_after_the_last_boundary_produce_no_frames() {
        let beats = grid(24);
        let a = synthesize(&beats, &[7], &[mood()], &mut StdRng::seed_from_u64(3)).unwrap();
        // Beat 7 at 4.0s; frames only cover the first segment.
        assert_eq!(a.len(), 120);
    }

    #[test]
    fn mood_count_must_match_boundary_count() {
        let beats = grid(24);
        let err = synthesize(&beats, &[7, 15], &[mood()], &mut StdRng::seed_from_u64(3))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn boundaries_must_fit_the_grid() {
        let beats = grid(8);
        let err = synthesize(&beats, &[9], &[mood()], &mut StdRng::seed_from_u64(3)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));

        let err = synthesize(&beats, &[5, 5], &[mood(), mood()], &mut StdRng::seed_from_u64(3))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn seeded_synthesis_replays_bit_identically() {
        let beats = grid(24);
        let boundaries = vec![7, 15, 21];
        let moods = vec![mood(); 3];
        let a = synthesize(&beats, &boundaries, &moods, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = synthesize(&beats, &boundaries, &moods, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.frames().iter().zip(b.frames().iter()) {
            assert_eq!(x, y);
        }
    }
}
