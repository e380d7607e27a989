//! Render events emitted by the game and the sink that paints them.
//!
//! The engine never draws. It reports what changed and a display driver
//! implementing [`RenderSink`] decides how that looks on screen.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::board::Cell;

/// Which of the two grids an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardKind {
    /// Our ground-truth grid, ships visible.
    Own,
    /// Fog-of-war view of the opponent.
    Enemy,
}

/// Screen half a grid is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Colour class of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Warning,
    Hit,
    Miss,
    Good,
}

/// Lobby progress shown under the title screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyStatus {
    WaitingForPeer,
    PeerReady,
    Starting,
}

impl fmt::Display for LobbyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LobbyStatus::WaitingForPeer => write!(f, "Waiting for opponent..."),
            LobbyStatus::PeerReady => write!(f, "Opponent ready!"),
            LobbyStatus::Starting => write!(f, "Starting game..."),
        }
    }
}

/// Status line text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    YourTurn,
    OpponentsTurn,
    AlreadyFiredHere,
    NotYourTurn,
    AwaitingResult,
    Hit,
    Miss,
    Sank(String),
    OpponentHit,
    OpponentMissed,
    OpponentSank(String),
}

impl Status {
    pub fn tone(&self) -> Tone {
        match self {
            Status::YourTurn => Tone::Good,
            Status::OpponentsTurn => Tone::Neutral,
            Status::AlreadyFiredHere | Status::NotYourTurn | Status::AwaitingResult => {
                Tone::Warning
            }
            Status::Hit | Status::Sank(_) | Status::OpponentHit | Status::OpponentSank(_) => {
                Tone::Hit
            }
            Status::Miss | Status::OpponentMissed => Tone::Miss,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::YourTurn => write!(f, "Your turn!"),
            Status::OpponentsTurn => write!(f, "Opponent's turn..."),
            Status::AlreadyFiredHere => write!(f, "Already fired here!"),
            Status::NotYourTurn => write!(f, "Wait for your turn!"),
            Status::AwaitingResult => write!(f, "Waiting for result..."),
            Status::Hit => write!(f, "It's a HIT!"),
            Status::Miss => write!(f, "It's a MISS!"),
            Status::Sank(name) => write!(f, "sank a {}!", name),
            Status::OpponentHit => write!(f, "Our ship was hit!"),
            Status::OpponentMissed => write!(f, "Opponent missed!"),
            Status::OpponentSank(name) => write!(f, "Opponent sank our {}!", name),
        }
    }
}

/// One row of the fleet status panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipLine {
    pub name: String,
    pub own: usize,
    pub enemy: usize,
}

/// A discrete change the display should reflect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// Title screen with the ready prompt.
    Lobby,
    LobbyText(LobbyStatus),
    /// Clear to the in-game layout: grid frames and titles.
    Layout { own: Side, enemy: Side },
    Cell {
        board: BoardKind,
        x: usize,
        y: usize,
        cell: Cell,
    },
    /// Cursor frame on the enemy grid, drawn or erased.
    Cursor { x: usize, y: usize, visible: bool },
    Status(Status),
    /// Remaining health of both fleets.
    FleetPanel(Vec<ShipLine>),
    Victory,
    Defeat,
}

/// Receives render events; implemented by display drivers.
pub trait RenderSink {
    fn render(&mut self, event: RenderEvent);
}

/// Records events, mostly for tests.
impl RenderSink for Vec<RenderEvent> {
    fn render(&mut self, event: RenderEvent) {
        self.push(event);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _event: RenderEvent) {}
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn render(&mut self, event: RenderEvent) {
        (**self).render(event);
    }
}
