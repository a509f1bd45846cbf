//! Track geometry and the tick-by-tick position simulator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::id::ParticipantId;
use super::participant::RaceParticipant;

/// Distance of the standard track.
pub const RACE_DISTANCE: u32 = 100;
/// Smallest advance per tick.
pub const MIN_STRIDE: u32 = 5;
/// Largest advance per tick.
pub const MAX_STRIDE: u32 = 15;

/// Where one participant stands on the track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub participant: ParticipantId,
    pub position: u32,
}

/// Starting grid: every participant at zero, in race order.
#[must_use]
pub fn starting_grid(field: &[RaceParticipant]) -> Vec<Position> {
    field
        .iter()
        .map(|horse| Position {
            participant: horse.id().clone(),
            position: 0,
        })
        .collect()
}

/// Race distance and the inclusive per-tick stride range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    distance: u32,
    min_stride: u32,
    max_stride: u32,
}

impl Track {
    /// Create a track. Callers validate `0 < min_stride <= max_stride`.
    #[must_use]
    pub const fn new(distance: u32, min_stride: u32, max_stride: u32) -> Self {
        Self {
            distance,
            min_stride,
            max_stride,
        }
    }

    #[must_use]
    pub const fn distance(&self) -> u32 {
        self.distance
    }

    #[must_use]
    pub const fn min_stride(&self) -> u32 {
        self.min_stride
    }

    #[must_use]
    pub const fn max_stride(&self) -> u32 {
        self.max_stride
    }

    /// Upper bound on ticks before someone finishes: `ceil(distance / min_stride)`.
    #[must_use]
    pub const fn max_ticks(&self) -> u32 {
        self.distance.div_ceil(self.min_stride)
    }

    /// Advance every position by one tick.
    ///
    /// Each participant moves a uniformly random stride in
    /// `[min_stride, max_stride]`. Returns the first participant, in slice
    /// order, whose position reached the distance during this call. Later
    /// crossers in the same tick still move but do not win.
    pub fn advance<R: Rng>(
        &self,
        positions: &mut [Position],
        rng: &mut R,
    ) -> Option<ParticipantId> {
        let mut winner = None;
        for entry in positions.iter_mut() {
            let stride = rng.gen_range(self.min_stride..=self.max_stride);
            entry.position = entry.position.saturating_add(stride);
            if winner.is_none() && entry.position >= self.distance {
                winner = Some(entry.participant.clone());
            }
        }
        winner
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::new(RACE_DISTANCE, MIN_STRIDE, MAX_STRIDE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::participant::{enter_field, Participant};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(n: usize) -> Vec<Position> {
        let catalog: Vec<_> = (1..=n)
            .map(|i| Participant::new(i.to_string(), format!("horse-{i}")))
            .collect();
        starting_grid(&enter_field(&catalog))
    }

    #[test]
    fn starting_grid_is_all_zero_in_race_order() {
        let positions = grid(3);
        assert_eq!(positions.len(), 3);
        assert!(positions.iter().all(|p| p.position == 0));
        assert_eq!(positions[1].participant.as_str(), "2");
    }

    #[test]
    fn standard_track_finishes_within_twenty_ticks() {
        assert_eq!(Track::default().max_ticks(), 20);
        assert_eq!(Track::new(101, 5, 15).max_ticks(), 21);
    }

    #[test]
    fn simultaneous_crossing_goes_to_first_in_order() {
        // Fixed stride: everyone crosses on the same tick.
        let track = Track::new(30, 10, 10);
        let mut positions = grid(3);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(track.advance(&mut positions, &mut rng), None);
        assert_eq!(track.advance(&mut positions, &mut rng), None);
        let winner = track.advance(&mut positions, &mut rng);

        assert_eq!(winner, Some(ParticipantId::from("1")));
        assert!(positions.iter().all(|p| p.position == 30));
    }

    #[test]
    fn later_crosser_wins_when_earlier_entries_fall_short() {
        let track = Track::new(100, 5, 5);
        let mut positions = grid(3);
        positions[2].position = 96;
        let mut rng = StdRng::seed_from_u64(1);

        let winner = track.advance(&mut positions, &mut rng);
        assert_eq!(winner, Some(ParticipantId::from("3")));
    }

    proptest! {
        #[test]
        fn strides_stay_in_range_and_positions_never_drop(seed in any::<u64>(), field in 1usize..8) {
            let track = Track::default();
            let mut positions = grid(field);
            let mut rng = StdRng::seed_from_u64(seed);

            for _ in 0..track.max_ticks() {
                let before: Vec<u32> = positions.iter().map(|p| p.position).collect();
                track.advance(&mut positions, &mut rng);
                for (old, new) in before.iter().zip(positions.iter()) {
                    let stride = new.position - old;
                    prop_assert!((MIN_STRIDE..=MAX_STRIDE).contains(&stride));
                }
            }
        }

        #[test]
        fn race_always_produces_exactly_one_first_crosser(seed in any::<u64>(), field in 1usize..8) {
            let track = Track::default();
            let mut positions = grid(field);
            let mut rng = StdRng::seed_from_u64(seed);

            let mut ticks = 0;
            let winner = loop {
                ticks += 1;
                let before: Vec<u32> = positions.iter().map(|p| p.position).collect();
                if let Some(winner) = track.advance(&mut positions, &mut rng) {
                    let expected = positions
                        .iter()
                        .zip(before.iter())
                        .find(|(now, _)| now.position >= track.distance())
                        .map(|(now, _)| now.participant.clone());
                    prop_assert_eq!(Some(winner.clone()), expected);
                    prop_assert!(before.iter().all(|p| *p < track.distance()));
                    break winner;
                }
                prop_assert!(ticks < track.max_ticks());
            };

            prop_assert!(ticks <= track.max_ticks());
            prop_assert!(positions.iter().any(|p| p.participant == winner));
        }
    }
}
