//! What a shot means on each side of the link.
//!
//! [`resolve_incoming_shot`] answers the peer's shot against our grid and
//! produces the result code we send back. [`apply_shot_result`] records the
//! peer's answer to our own shot on the fog-of-war view.

use crate::board::{Cell, OceanGrid, TargetGrid};
use crate::common::{BoardError, FleetError, GameError, ShotOutcome};
use crate::fleet::Fleet;
use crate::ship::ShipId;

/// Resolve the peer's shot at `(x, y)` on our grid, damaging our fleet.
///
/// Fails without mutation if the cell was already fired at, or if the ship
/// there is unknown to `fleet` or already at zero health.
pub fn resolve_incoming_shot<const N: usize>(
    ocean: &mut OceanGrid<N>,
    fleet: &mut Fleet,
    x: usize,
    y: usize,
) -> Result<ShotOutcome, GameError> {
    let target = ocean.cell(x, y)?;
    if let Cell::Ship(id) = target {
        if fleet.health(id)? == 0 {
            return Err(FleetError::AlreadyDestroyed(id).into());
        }
    }
    let board_outcome = ocean.apply_incoming_shot(x, y)?;
    let outcome = match target {
        Cell::Ship(id) => {
            let remaining = fleet.damage(id)?;
            debug_assert_eq!(
                remaining == 0,
                board_outcome == ShotOutcome::Sunk(id),
                "fleet health and grid disagree on ship {}",
                id
            );
            if remaining == 0 {
                ShotOutcome::Sunk(id)
            } else {
                ShotOutcome::Hit
            }
        }
        _ => board_outcome,
    };
    log::debug!("incoming shot ({}, {}) -> {:?}", x, y, outcome);
    Ok(outcome)
}

/// Record the peer's answer to our shot at `(x, y)`.
///
/// Returns the ship that was newly sunk, if any. Delivering the same result
/// twice is a no-op; a result that contradicts what the view already holds
/// is rejected.
pub fn apply_shot_result<const N: usize>(
    view: &mut TargetGrid<N>,
    enemy: &mut Fleet,
    x: usize,
    y: usize,
    outcome: ShotOutcome,
) -> Result<Option<ShipId>, GameError> {
    if let ShotOutcome::Sunk(id) = outcome {
        // unknown ids are rejected before the view changes
        enemy.health(id)?;
    }

    let expected = if outcome.is_hit() { Cell::Hit } else { Cell::Miss };
    match view.cell(x, y)? {
        Cell::Empty => view.mark_view(x, y, outcome)?,
        current if current == expected => {
            log::debug!("duplicate result for ({}, {}) ignored", x, y);
        }
        _ => return Err(BoardError::AlreadyResolved { x, y }.into()),
    }

    if let ShotOutcome::Sunk(id) = outcome {
        if enemy.sink(id)? {
            return Ok(Some(id));
        }
    }
    Ok(None)
}

/// A shot may only be sent at a cell we have not fired at.
pub fn is_valid_target<const N: usize>(view: &TargetGrid<N>, x: usize, y: usize) -> bool {
    view.is_unknown(x, y).unwrap_or(false)
}
