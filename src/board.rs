//! Ground-truth and fog-of-war grids.
//!
//! [`OceanGrid`] holds our real ship placement and absorbs the opponent's
//! shots. [`TargetGrid`] records what we have learned about the opponent's
//! grid; it stores only hit and miss layers, so it can never hold a ship.

use alloc::vec::Vec;
use core::fmt;
use rand::{Rng, RngCore};

use crate::common::{BoardError, ShotOutcome};
use crate::config::FleetConfig;
use crate::mask::GridMask;
use crate::packing;
use crate::ship::{Orientation, Placement, ShipId};

/// Random anchors tried for one ship before the fleet placement restarts.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 256;

/// Fresh starts allowed before fleet placement is declared impossible.
pub const MAX_FLEET_RESTARTS: usize = 64;

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Empty,
    Ship(ShipId),
    Hit,
    Miss,
}

impl Cell {
    /// `Hit` and `Miss` are terminal.
    pub fn is_resolved(self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss)
    }
}

/// Our own board: real ship positions plus the opponent's shots.
#[derive(Clone, PartialEq, Eq)]
pub struct OceanGrid<const N: usize> {
    cells: [[Cell; N]; N],
    occupied: GridMask<N>,
    placements: Vec<Placement<N>>,
}

impl<const N: usize> OceanGrid<N> {
    /// All-`Empty` grid with no ships.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; N]; N],
            occupied: GridMask::new(),
            placements: Vec::new(),
        }
    }

    /// Back to all-`Empty`.
    pub fn clear(&mut self) {
        self.cells = [[Cell::Empty; N]; N];
        self.occupied.clear_all();
        self.placements.clear();
    }

    pub fn cell(&self, x: usize, y: usize) -> Result<Cell, BoardError> {
        check_bounds::<N>(x, y)?;
        Ok(self.cells[y][x])
    }

    /// Rows from top to bottom, indexed `[y][x]`.
    pub fn rows(&self) -> &[[Cell; N]; N] {
        &self.cells
    }

    /// Cells held by any ship at placement time.
    pub fn occupied(&self) -> GridMask<N> {
        self.occupied
    }

    pub fn placements(&self) -> &[Placement<N>] {
        &self.placements
    }

    pub fn placement(&self, id: ShipId) -> Option<&Placement<N>> {
        self.placements.iter().find(|p| p.id() == id)
    }

    /// Cells of ship `id` that have not been hit yet.
    pub fn intact_cells(&self, id: ShipId) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == Cell::Ship(id))
            .count()
    }

    /// Commit a placement, rejecting overlap and duplicate ids.
    pub fn place(&mut self, placement: Placement<N>) -> Result<(), BoardError> {
        let id = placement.id();
        if self.placement(id).is_some() {
            return Err(BoardError::ShipAlreadyPlaced { id });
        }
        if self.occupied.overlaps(&placement.footprint()) {
            return Err(BoardError::ShipOverlaps { id });
        }
        for (x, y) in placement.cells() {
            self.cells[y][x] = Cell::Ship(id);
        }
        self.occupied |= placement.footprint();
        self.placements.push(placement);
        Ok(())
    }

    /// Sample a random non-overlapping spot for a ship of `length`.
    ///
    /// Orientation is a fair coin; the anchor is drawn so that the ship
    /// always fits inside the grid for that orientation.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        id: ShipId,
        length: usize,
    ) -> Result<Placement<N>, BoardError> {
        if length == 0 || length > N {
            return Err(BoardError::ShipOutOfBounds { id, x: 0, y: 0 });
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_x, max_y) = match orientation {
                Orientation::Horizontal => (N - length, N - 1),
                Orientation::Vertical => (N - 1, N - length),
            };
            let x = rng.random_range(0..=max_x);
            let y = rng.random_range(0..=max_y);
            let candidate = Placement::new(id, length, x, y, orientation)?;
            if !self.occupied.overlaps(&candidate.footprint()) {
                return Ok(candidate);
            }
        }
        Err(BoardError::UnableToPlaceShip { id })
    }

    /// Build a grid with every ship of `fleet` placed at random, in fleet
    /// order.
    ///
    /// If one ship runs out of attempts the grid is wiped and placement
    /// starts over, up to [`MAX_FLEET_RESTARTS`] times. Fleets too tight for
    /// that are laid out by a randomised exhaustive search instead, so any
    /// fleet that passes [`FleetConfig::validate`] gets a grid.
    pub fn place_fleet_randomly<R: Rng>(
        rng: &mut R,
        fleet: &FleetConfig,
    ) -> Result<Self, BoardError> {
        let mut grid = Self::new();
        let mut placed = false;
        'restart: for restart in 0..MAX_FLEET_RESTARTS {
            grid.clear();
            for (id, spec) in fleet.iter() {
                match grid.random_placement(rng, id, spec.length()) {
                    Ok(placement) => grid.place(placement)?,
                    Err(BoardError::UnableToPlaceShip { .. }) => {
                        log::debug!("ship {} found no spot, restarting placement ({})", id, restart + 1);
                        continue 'restart;
                    }
                    Err(e) => return Err(e),
                }
            }
            placed = true;
            break;
        }

        if !placed {
            log::debug!("random placement gave up after {} restarts, searching", MAX_FLEET_RESTARTS);
            let mut layout = packing::arrange::<N>(fleet, Some(rng as &mut dyn RngCore)).map_err(|e| {
                log::warn!("fleet placement failed: {}", e);
                BoardError::UnableToPlaceFleet {
                    restarts: MAX_FLEET_RESTARTS,
                }
            })?;
            layout.sort_unstable_by_key(|p| p.id());
            grid.clear();
            for placement in layout {
                grid.place(placement)?;
            }
        }

        for p in &grid.placements {
            log::debug!(
                "placed ship {} len {} at {:?} {:?}",
                p.id(),
                p.length(),
                p.origin(),
                p.orientation()
            );
        }
        Ok(grid)
    }

    /// Resolve an opponent shot at `(x, y)`.
    ///
    /// A ship cell flips to `Hit`; the result is `Sunk` once that ship has
    /// no intact cells left. An empty cell flips to `Miss`. Cells already
    /// resolved are rejected without mutation.
    pub fn apply_incoming_shot(&mut self, x: usize, y: usize) -> Result<ShotOutcome, BoardError> {
        check_bounds::<N>(x, y)?;
        match self.cells[y][x] {
            Cell::Ship(id) => {
                self.cells[y][x] = Cell::Hit;
                let sunk = self
                    .placement(id)
                    .map(|p| p.cells().all(|(cx, cy)| self.cells[cy][cx] == Cell::Hit))
                    .unwrap_or(false);
                if sunk {
                    Ok(ShotOutcome::Sunk(id))
                } else {
                    Ok(ShotOutcome::Hit)
                }
            }
            Cell::Empty => {
                self.cells[y][x] = Cell::Miss;
                Ok(ShotOutcome::Miss)
            }
            Cell::Hit | Cell::Miss => Err(BoardError::AlreadyResolved { x, y }),
        }
    }
}

impl<const N: usize> Default for OceanGrid<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for OceanGrid<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OceanGrid<{}> [", N)?;
        for row in &self.cells {
            write!(f, "  ")?;
            for cell in row {
                match cell {
                    Cell::Empty => write!(f, ".")?,
                    Cell::Ship(id) => write!(f, "{}", id.get())?,
                    Cell::Hit => write!(f, "X")?,
                    Cell::Miss => write!(f, "o")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}

/// What we know of the opponent's grid: unknown, hit or miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetGrid<const N: usize> {
    hits: GridMask<N>,
    misses: GridMask<N>,
}

impl<const N: usize> TargetGrid<N> {
    pub fn new() -> Self {
        Self {
            hits: GridMask::new(),
            misses: GridMask::new(),
        }
    }

    pub fn clear(&mut self) {
        self.hits.clear_all();
        self.misses.clear_all();
    }

    /// `Empty` for unknown cells; never a ship.
    pub fn cell(&self, x: usize, y: usize) -> Result<Cell, BoardError> {
        if self.hits.get(x, y)? {
            Ok(Cell::Hit)
        } else if self.misses.get(x, y)? {
            Ok(Cell::Miss)
        } else {
            Ok(Cell::Empty)
        }
    }

    /// True if we have not fired at `(x, y)` yet.
    pub fn is_unknown(&self, x: usize, y: usize) -> Result<bool, BoardError> {
        Ok(self.cell(x, y)? == Cell::Empty)
    }

    pub fn hits(&self) -> GridMask<N> {
        self.hits
    }

    pub fn misses(&self) -> GridMask<N> {
        self.misses
    }

    /// Number of cells we have fired at.
    pub fn shots_fired(&self) -> usize {
        self.hits.count() + self.misses.count()
    }

    /// Record the result of our shot at `(x, y)`.
    pub fn mark_view(&mut self, x: usize, y: usize, outcome: ShotOutcome) -> Result<(), BoardError> {
        if !self.is_unknown(x, y)? {
            return Err(BoardError::AlreadyResolved { x, y });
        }
        if outcome.is_hit() {
            self.hits.set(x, y)?;
        } else {
            self.misses.set(x, y)?;
        }
        Ok(())
    }
}

fn check_bounds<const N: usize>(x: usize, y: usize) -> Result<(), BoardError> {
    if x >= N || y >= N {
        Err(BoardError::Mask(crate::mask::MaskError::OutOfBounds { x, y }))
    } else {
        Ok(())
    }
}
