//! Payloads exchanged between the two devices.

use crate::common::{FleetError, GameError, ShotOutcome};
use crate::mask::MaskError;

/// Version carried in the lobby handshake; peers must match exactly.
pub const PROTOCOL_VERSION: u8 = 1;

/// Messages carried over the peer link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    /// Lobby handshake: this device has pressed ready.
    Ready { version: u8 },
    /// The sender fires at `(x, y)` on the receiver's grid.
    ShotRequest { x: u8, y: u8 },
    /// Answer to the receiver's last `ShotRequest`.
    ShotResult { x: u8, y: u8, outcome: ShotOutcome },
    /// The sender's whole fleet is sunk; the receiver has won.
    FleetDestroyed,
}

impl Message {
    /// Reject coordinates outside an `N×N` grid and sunk ids outside a fleet
    /// of `fleet_size` ships.
    pub fn validate<const N: usize>(&self, fleet_size: usize) -> Result<(), GameError> {
        match *self {
            Message::Ready { version } if version != PROTOCOL_VERSION => {
                Err(GameError::VersionMismatch {
                    expected: PROTOCOL_VERSION,
                    got: version,
                })
            }
            Message::ShotRequest { x, y } => check_coord::<N>(x, y),
            Message::ShotResult { x, y, outcome } => {
                check_coord::<N>(x, y)?;
                match outcome {
                    ShotOutcome::Sunk(id) if id.index() >= fleet_size => {
                        Err(FleetError::UnknownShip(id).into())
                    }
                    _ => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }
}

fn check_coord<const N: usize>(x: u8, y: u8) -> Result<(), GameError> {
    if (x as usize) < N && (y as usize) < N {
        Ok(())
    } else {
        Err(MaskError::OutOfBounds {
            x: x as usize,
            y: y as usize,
        }
        .into())
    }
}
