//! Exhaustive fleet packing.
//!
//! Cells are visited in row-major order. The first free cell is either left
//! empty, spending one cell of slack, or becomes the anchor of a ship
//! extending right or down. Ships of equal length are interchangeable, so
//! each distinct length is tried once per cell. Every arrangement is then
//! reached exactly once, which keeps even an impossible fleet quick to
//! reject.

use alloc::vec::Vec;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::common::ConfigError;
use crate::config::FleetConfig;
use crate::mask::GridMask;
use crate::ship::{Orientation, Placement, ShipId};

/// Search nodes visited before a fleet is given up on.
pub const PACKING_BUDGET: usize = 1 << 20;

/// Check that `fleet` can be laid out on an `N×N` grid without overlap.
pub(crate) fn check<const N: usize>(fleet: &FleetConfig) -> Result<(), ConfigError> {
    arrange::<N>(fleet, None).map(|_| ())
}

/// One non-overlapping arrangement of `fleet`.
///
/// With an `rng`, equal-length ships trade places, the search order is
/// shuffled and the finished layout is mirrored or transposed at random.
pub(crate) fn arrange<const N: usize>(
    fleet: &FleetConfig,
    mut rng: Option<&mut dyn RngCore>,
) -> Result<Vec<Placement<N>>, ConfigError> {
    let occupied = GridMask::<N>::try_new().map_err(ConfigError::GridTooLarge)?;
    let cells = fleet.total_cells();
    let slack = (N * N).checked_sub(cells).ok_or(ConfigError::FleetTooLarge {
        cells,
        capacity: N * N,
    })?;

    let mut groups: Vec<(usize, Vec<ShipId>)> = Vec::new();
    for (id, spec) in fleet.iter() {
        match groups.iter_mut().find(|(length, _)| *length == spec.length()) {
            Some((_, ids)) => ids.push(id),
            None => groups.push((spec.length(), alloc::vec![id])),
        }
    }
    groups.sort_unstable_by(|a, b| b.0.cmp(&a.0));
    if let Some(rng) = rng.as_deref_mut() {
        for (_, ids) in groups.iter_mut() {
            ids.shuffle(rng);
        }
    }

    let mut search = Search {
        groups,
        placed: Vec::with_capacity(fleet.len()),
        occupied,
        budget: PACKING_BUDGET,
        rng,
    };
    match search.step(0, slack) {
        Step::Found => {
            let placed = search.placed;
            Ok(match search.rng {
                Some(rng) => scramble(placed, rng),
                None => placed,
            })
        }
        Step::DeadEnd => Err(ConfigError::NoPacking),
        Step::OutOfBudget => Err(ConfigError::PackingUndecided {
            budget: PACKING_BUDGET,
        }),
    }
}

enum Step {
    Found,
    DeadEnd,
    OutOfBudget,
}

struct Search<'a, const N: usize> {
    /// Unplaced ships grouped by length, longest first.
    groups: Vec<(usize, Vec<ShipId>)>,
    placed: Vec<Placement<N>>,
    occupied: GridMask<N>,
    budget: usize,
    rng: Option<&'a mut dyn RngCore>,
}

impl<const N: usize> Search<'_, N> {
    fn step(&mut self, mut cell: usize, slack: usize) -> Step {
        if self.groups.iter().all(|(_, ids)| ids.is_empty()) {
            return Step::Found;
        }
        if self.budget == 0 {
            return Step::OutOfBudget;
        }
        self.budget -= 1;

        while cell < N * N && self.occupied.get(cell % N, cell / N).unwrap_or(true) {
            cell += 1;
        }
        if cell == N * N {
            return Step::DeadEnd;
        }
        let (x, y) = (cell % N, cell / N);

        // `None` leaves the cell empty.
        let mut moves: Vec<Option<(usize, Orientation)>> = Vec::new();
        for (group, (length, ids)) in self.groups.iter().enumerate() {
            if ids.is_empty() {
                continue;
            }
            moves.push(Some((group, Orientation::Horizontal)));
            if *length > 1 {
                moves.push(Some((group, Orientation::Vertical)));
            }
        }
        if slack > 0 {
            moves.push(None);
        }
        if let Some(rng) = self.rng.as_deref_mut() {
            moves.shuffle(rng);
        }

        for mv in moves {
            let result = match mv {
                None => self.step(cell + 1, slack - 1),
                Some((group, orientation)) => self.try_ship(group, x, y, orientation, cell, slack),
            };
            match result {
                Step::DeadEnd => continue,
                done => return done,
            }
        }
        Step::DeadEnd
    }

    fn try_ship(
        &mut self,
        group: usize,
        x: usize,
        y: usize,
        orientation: Orientation,
        cell: usize,
        slack: usize,
    ) -> Step {
        let (length, ids) = &self.groups[group];
        let Some(&id) = ids.last() else {
            return Step::DeadEnd;
        };
        let Ok(candidate) = Placement::<N>::new(id, *length, x, y, orientation) else {
            return Step::DeadEnd;
        };
        if self.occupied.overlaps(&candidate.footprint()) {
            return Step::DeadEnd;
        }

        let saved = self.occupied;
        self.occupied |= candidate.footprint();
        self.groups[group].1.pop();
        self.placed.push(candidate);

        let result = self.step(cell + 1, slack);
        if !matches!(result, Step::Found) {
            self.placed.pop();
            self.groups[group].1.push(id);
            self.occupied = saved;
        }
        result
    }
}

/// Apply one random symmetry of the square to a finished layout.
fn scramble<const N: usize>(placed: Vec<Placement<N>>, rng: &mut dyn RngCore) -> Vec<Placement<N>> {
    let transpose: bool = rng.random();
    let flip_x: bool = rng.random();
    let flip_y: bool = rng.random();
    let map = |x: usize, y: usize| {
        let (a, b) = if transpose { (y, x) } else { (x, y) };
        (
            if flip_x { N - 1 - a } else { a },
            if flip_y { N - 1 - b } else { b },
        )
    };

    let moved: Option<Vec<Placement<N>>> = placed
        .iter()
        .map(|p| {
            let (x0, y0) = p.origin();
            let (x1, y1) = match p.orientation() {
                Orientation::Horizontal => (x0 + p.length() - 1, y0),
                Orientation::Vertical => (x0, y0 + p.length() - 1),
            };
            let (ax, ay) = map(x0, y0);
            let (bx, by) = map(x1, y1);
            let orientation = match (p.orientation(), transpose) {
                (Orientation::Horizontal, false) | (Orientation::Vertical, true) => {
                    Orientation::Horizontal
                }
                _ => Orientation::Vertical,
            };
            Placement::new(p.id(), p.length(), ax.min(bx), ay.min(by), orientation).ok()
        })
        .collect();
    moved.unwrap_or(placed)
}
