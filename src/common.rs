//! Shot outcomes and the error types shared across the engine.

use core::fmt;

use crate::game::Phase;
use crate::mask::MaskError;
use crate::ship::ShipId;

/// What a shot did to the board it landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    Miss,
    /// A ship was struck and still has cells left.
    Hit,
    /// The last remaining cell of the ship was struck.
    Sunk(ShipId),
}

impl ShotOutcome {
    /// `Hit` and `Sunk` both mark the target cell as hit.
    pub fn is_hit(self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }
}

/// Errors raised by grid operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    Mask(MaskError),
    /// Ship would extend past the grid edge.
    ShipOutOfBounds { id: ShipId, x: usize, y: usize },
    /// Ship would cover a cell another ship already holds.
    ShipOverlaps { id: ShipId },
    ShipAlreadyPlaced { id: ShipId },
    /// Cell was already resolved to hit or miss.
    AlreadyResolved { x: usize, y: usize },
    /// No free spot found for the ship within the retry cap.
    UnableToPlaceShip { id: ShipId },
    /// Random placement gave up after the restart cap.
    UnableToPlaceFleet { restarts: usize },
}

impl From<MaskError> for BoardError {
    fn from(err: MaskError) -> Self {
        BoardError::Mask(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Mask(e) => write!(f, "{}", e),
            BoardError::ShipOutOfBounds { id, x, y } => {
                write!(f, "ship {} anchored at ({}, {}) leaves the grid", id, x, y)
            }
            BoardError::ShipOverlaps { id } => write!(f, "ship {} overlaps another ship", id),
            BoardError::ShipAlreadyPlaced { id } => write!(f, "ship {} is already placed", id),
            BoardError::AlreadyResolved { x, y } => {
                write!(f, "cell ({}, {}) has already been fired at", x, y)
            }
            BoardError::UnableToPlaceShip { id } => write!(f, "no free spot for ship {}", id),
            BoardError::UnableToPlaceFleet { restarts } => {
                write!(f, "unable to place fleet after {} restarts", restarts)
            }
        }
    }
}

/// Errors raised by fleet health bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetError {
    UnknownShip(ShipId),
    /// Damage applied to a ship with no health left.
    AlreadyDestroyed(ShipId),
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetError::UnknownShip(id) => write!(f, "ship {} is not part of the fleet", id),
            FleetError::AlreadyDestroyed(id) => write!(f, "ship {} is already destroyed", id),
        }
    }
}

/// Fleet/grid combinations rejected before a game may begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    GridTooLarge(MaskError),
    EmptyFleet,
    TooManyShips { count: usize, max: usize },
    InvalidLength { id: ShipId, length: usize, grid: usize },
    MissingName { id: ShipId },
    /// Ships cover more cells than the grid has.
    FleetTooLarge { cells: usize, capacity: usize },
    /// No non-overlapping arrangement of the fleet exists.
    NoPacking,
    /// The packing search gave up after `budget` steps without an answer.
    PackingUndecided { budget: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::GridTooLarge(e) => write!(f, "{}", e),
            ConfigError::EmptyFleet => write!(f, "fleet has no ships"),
            ConfigError::TooManyShips { count, max } => {
                write!(f, "fleet has {} ships, at most {} are supported", count, max)
            }
            ConfigError::InvalidLength { id, length, grid } => write!(
                f,
                "ship {} has length {}, must be between 1 and {}",
                id, length, grid
            ),
            ConfigError::MissingName { id } => write!(f, "ship {} has no name", id),
            ConfigError::FleetTooLarge { cells, capacity } => write!(
                f,
                "fleet needs {} cells but the grid only has {}",
                cells, capacity
            ),
            ConfigError::NoPacking => write!(f, "fleet cannot be arranged without overlap"),
            ConfigError::PackingUndecided { budget } => write!(
                f,
                "no arrangement of the fleet found within {} search steps",
                budget
            ),
        }
    }
}

/// Errors surfaced by the game state machine to its control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    Board(BoardError),
    Fleet(FleetError),
    Config(ConfigError),
    /// Operation not valid in the current phase.
    WrongPhase(Phase),
    /// Peer fired while the turn was ours.
    OutOfTurn,
    /// A result arrived with no shot in flight.
    NoShotOutstanding,
    /// A result arrived for a cell other than the one we fired at.
    ResultMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    /// Payload kind is not handled by the engine.
    UnexpectedMessage,
    VersionMismatch { expected: u8, got: u8 },
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl From<FleetError> for GameError {
    fn from(err: FleetError) -> Self {
        GameError::Fleet(err)
    }
}

impl From<ConfigError> for GameError {
    fn from(err: ConfigError) -> Self {
        GameError::Config(err)
    }
}

impl From<MaskError> for GameError {
    fn from(err: MaskError) -> Self {
        GameError::Board(BoardError::Mask(err))
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Board(e) => write!(f, "board: {}", e),
            GameError::Fleet(e) => write!(f, "fleet: {}", e),
            GameError::Config(e) => write!(f, "config: {}", e),
            GameError::WrongPhase(phase) => write!(f, "not allowed while {:?}", phase),
            GameError::OutOfTurn => write!(f, "peer fired out of turn"),
            GameError::NoShotOutstanding => write!(f, "result received with no shot outstanding"),
            GameError::ResultMismatch { expected, got } => write!(
                f,
                "result for ({}, {}) but our shot was at ({}, {})",
                got.0, got.1, expected.0, expected.1
            ),
            GameError::UnexpectedMessage => write!(f, "unexpected message"),
            GameError::VersionMismatch { expected, got } => write!(
                f,
                "protocol version mismatch: expected {}, got {}",
                expected, got
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for FleetError {}
#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
#[cfg(feature = "std")]
impl std::error::Error for GameError {}
