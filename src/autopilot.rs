//! An input source that plays by itself.
//!
//! Picks a random cell it has not fired at, walks the cursor there one
//! step at a time and fires, the same presses a player would make.

use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::board::TargetGrid;
use crate::input::{Cursor, InputSource, Intent};

pub struct Autopilot {
    rng: SmallRng,
    target: Option<(usize, usize)>,
}

impl Autopilot {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng, target: None }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    fn pick_target<const N: usize>(&mut self, view: &TargetGrid<N>) -> Option<(usize, usize)> {
        let unknown: Vec<(usize, usize)> = (0..N)
            .flat_map(|y| (0..N).map(move |x| (x, y)))
            .filter(|&(x, y)| view.is_unknown(x, y).unwrap_or(false))
            .collect();
        unknown.choose(&mut self.rng).copied()
    }
}

impl<const N: usize> InputSource<N> for Autopilot {
    fn poll(&mut self, view: &TargetGrid<N>, cursor: Cursor) -> Option<Intent> {
        let still_open = self
            .target
            .map(|(x, y)| view.is_unknown(x, y).unwrap_or(false))
            .unwrap_or(false);
        if !still_open {
            self.target = self.pick_target(view);
        }
        let (tx, ty) = self.target?;

        let intent = if cursor.x < tx {
            Intent::Right
        } else if cursor.x > tx {
            Intent::Left
        } else if cursor.y < ty {
            Intent::Down
        } else if cursor.y > ty {
            Intent::Up
        } else {
            Intent::Fire
        };
        Some(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ShotOutcome;

    #[test]
    fn walks_to_target_then_fires() {
        let view = TargetGrid::<4>::new();
        let mut pilot = Autopilot::seeded(7);
        let mut cursor = Cursor::default();
        let mut presses = 0;
        loop {
            let intent = InputSource::<4>::poll(&mut pilot, &view, cursor).unwrap();
            if intent == Intent::Fire {
                break;
            }
            assert!(cursor.step::<4>(intent));
            presses += 1;
            assert!(presses <= 6, "should reach any cell of a 4x4 in six moves");
        }
        assert!(view.is_unknown(cursor.x, cursor.y).unwrap());
    }

    #[test]
    fn never_targets_resolved_cells() {
        let mut view = TargetGrid::<2>::new();
        view.mark_view(0, 0, ShotOutcome::Miss).unwrap();
        view.mark_view(1, 0, ShotOutcome::Hit).unwrap();
        view.mark_view(0, 1, ShotOutcome::Miss).unwrap();
        let mut pilot = Autopilot::seeded(1);
        let mut cursor = Cursor::default();
        while let Some(intent) = InputSource::<2>::poll(&mut pilot, &view, cursor) {
            if intent == Intent::Fire {
                break;
            }
            cursor.step::<2>(intent);
        }
        assert_eq!(cursor, Cursor::new(1, 1));

        view.mark_view(1, 1, ShotOutcome::Miss).unwrap();
        assert_eq!(InputSource::<2>::poll(&mut pilot, &view, cursor), None);
    }
}
