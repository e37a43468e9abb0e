//! Mood-to-animation policy.
//!
//! First matching rule wins; ties inside a rule are broken uniformly by the
//! caller's Rng so tests can pin outcomes with a seed. Flow sits in the
//! catalog but no rule selects it.

use rand::Rng;

use crate::lighting::animation::Animation;
use crate::lighting::mood::MoodVector;

pub fn pick_animation<R: Rng + ?Sized>(mood: &MoodVector, rng: &mut R) -> Animation {
    if mood.danceability > 0.6 || mood.aggressive > 0.6 {
        return *pick(&[Animation::Strobe, Animation::Burst], rng);
    }
    if mood.relaxed > 0.75 {
        return *pick(&[Animation::Pulse, Animation::Flicker], rng);
    }
    *pick(
        &[
            Animation::Pulse,
            Animation::Flicker,
            Animation::Strobe,
            Animation::Burst,
        ],
        rng,
    )
}

fn pick<'a, R: Rng + ?Sized>(choices: &'a [Animation], rng: &mut R) -> &'a Animation {
    &choices[rng.random_range(0..choices.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mood(danceability: f32, aggressive: f32, relaxed: f32) -> MoodVector {
        MoodVector {
            danceability,
            aggressive,
            relaxed,
            happy: None,
            sad: None,
        }
    }

    fn picks(mood: &MoodVector) -> Vec<Animation> {
        let mut rng = StdRng::seed_from_u64(99);
        (0..200).map(|_| pick_animation(mood, &mut rng)).collect()
    }

    #[test]
    fn danceable_tracks_get_hard_animations() {
        // danceability 0.8 trips rule 1: only strobe or burst, never
        // pulse or flicker.
        let picked = picks(&mood(0.8, 0.2, 0.1));
        assert!(picked
            .iter()
            .all(|a| matches!(a, Animation::Strobe | Animation::Burst)));
        assert!(picked.contains(&Animation::Strobe));
        assert!(picked.contains(&Animation::Burst));
    }

    #[test]
    fn aggression_alone_also_trips_rule_one() {
        let picked = picks(&mood(0.1, 0.9, 0.9));
        assert!(picked
            .iter()
            .all(|a| matches!(a, Animation::Strobe | Animation::Burst)));
    }

    #[test]
    fn relaxed_tracks_get_soft_animations() {
        let picked = picks(&mood(0.2, 0.1, 0.8));
        assert!(picked
            .iter()
            .all(|a| matches!(a, Animation::Pulse | Animation::Flicker)));
    }

    #[test]
    fn neutral_tracks_draw_from_the_full_pool() {
        let picked = picks(&mood(0.5, 0.5, 0.5));
        for expected in [
            Animation::Pulse,
            Animation::Flicker,
            Animation::Strobe,
            Animation::Burst,
        ] {
            assert!(picked.contains(&expected), "missing {:?}", expected);
        }
        assert!(!picked.contains(&Animation::Flow));
    }

    #[test]
    fn seeded_selection_is_deterministic() {
        let m = mood(0.5, 0.5, 0.5);
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(pick_animation(&m, &mut a), pick_animation(&m, &mut b));
        }
    }
}
