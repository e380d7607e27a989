//! The per-device game state machine.
//!
//! `Standby -> Playing -> GameOver -> (reset) -> Standby`. Input intents and
//! peer payloads go in; render events go to a [`RenderSink`] and payloads for
//! the peer come back to the caller, which owns the transport.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::{OceanGrid, TargetGrid};
use crate::common::{ConfigError, GameError, ShotOutcome};
use crate::config::FleetConfig;
use crate::fleet::Fleet;
use crate::input::{Cursor, Intent};
use crate::protocol::Message;
use crate::render::{
    BoardKind, LobbyStatus, RenderEvent, RenderSink, ShipLine, Side, Status,
};
use crate::ship::ShipId;
use crate::turn;

/// Lifecycle phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Lobby; boards are empty.
    Standby,
    Playing,
    /// Terminal until reset.
    GameOver,
}

/// How a finished game ended for this device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Which of the two devices this is. Player one fires first and draws its
/// own grid on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    PlayerOne,
    PlayerTwo,
}

impl Seat {
    pub fn fires_first(self) -> bool {
        self == Seat::PlayerOne
    }

    /// Screen halves for `(own, enemy)` grids.
    pub fn layout(self) -> (Side, Side) {
        match self {
            Seat::PlayerOne => (Side::Left, Side::Right),
            Seat::PlayerTwo => (Side::Right, Side::Left),
        }
    }
}

/// Turn ownership while playing. Exactly one shot may be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// We may fire.
    Ours,
    /// Our shot at `(x, y)` is waiting for the peer's result.
    Awaiting { x: usize, y: usize },
    /// Waiting for the peer to fire.
    Theirs,
}

/// One device's complete game state.
#[derive(Debug, Clone)]
pub struct Game<const N: usize> {
    config: FleetConfig,
    seat: Seat,
    phase: Phase,
    outcome: Option<Outcome>,
    ocean: OceanGrid<N>,
    view: TargetGrid<N>,
    own_fleet: Fleet,
    enemy_fleet: Fleet,
    cursor: Cursor,
    turn: Turn,
}

impl<const N: usize> Game<N> {
    /// A game in `Standby`. The fleet is validated against the grid here so
    /// an impossible configuration never reaches placement.
    pub fn new(config: FleetConfig, seat: Seat) -> Result<Self, ConfigError> {
        config.validate::<N>()?;
        let ships = config.len();
        Ok(Self {
            config,
            seat,
            phase: Phase::Standby,
            outcome: None,
            ocean: OceanGrid::new(),
            view: TargetGrid::new(),
            own_fleet: Fleet::new(ships),
            enemy_fleet: Fleet::new(ships),
            cursor: Cursor::default(),
            turn: initial_turn(seat),
        })
    }

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Set once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn ocean(&self) -> &OceanGrid<N> {
        &self.ocean
    }

    pub fn view(&self) -> &TargetGrid<N> {
        &self.view
    }

    pub fn own_fleet(&self) -> &Fleet {
        &self.own_fleet
    }

    pub fn enemy_fleet(&self) -> &Fleet {
        &self.enemy_fleet
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Our shot still waiting for a result.
    pub fn pending_shot(&self) -> Option<(usize, usize)> {
        match self.turn {
            Turn::Awaiting { x, y } => Some((x, y)),
            _ => None,
        }
    }

    /// Draw the lobby screen.
    pub fn show_lobby(&self, sink: &mut impl RenderSink) {
        sink.render(RenderEvent::Lobby);
    }

    /// Update the lobby progress line. Ignored outside `Standby`.
    pub fn lobby_status(&self, status: LobbyStatus, sink: &mut impl RenderSink) {
        if self.phase == Phase::Standby {
            sink.render(RenderEvent::LobbyText(status));
        }
    }

    /// Leave the lobby: place our fleet, arm both fleet trackers and draw
    /// the game screen.
    pub fn start<R: Rng>(&mut self, rng: &mut R, sink: &mut impl RenderSink) -> Result<(), GameError> {
        if self.phase != Phase::Standby {
            return Err(GameError::WrongPhase(self.phase));
        }
        self.ocean = OceanGrid::place_fleet_randomly(rng, &self.config)?;
        self.view.clear();
        self.own_fleet.arm(&self.config);
        // Enemy ship lengths are public, their positions are not.
        self.enemy_fleet.arm(&self.config);
        self.cursor = Cursor::default();
        self.turn = initial_turn(self.seat);
        self.outcome = None;
        self.phase = Phase::Playing;
        log::info!("game started as {:?}", self.seat);

        let (own, enemy) = self.seat.layout();
        sink.render(RenderEvent::Layout { own, enemy });
        for (y, row) in self.ocean.rows().iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                sink.render(RenderEvent::Cell {
                    board: BoardKind::Own,
                    x,
                    y,
                    cell,
                });
            }
        }
        self.render_fleet_panel(sink);
        sink.render(RenderEvent::Cursor {
            x: self.cursor.x,
            y: self.cursor.y,
            visible: true,
        });
        sink.render(RenderEvent::Status(self.turn_status()));
        Ok(())
    }

    /// Apply a button press. Returns the shot to transmit when a fire
    /// intent latches one.
    ///
    /// Invalid fires are reported on the status line and change nothing.
    /// Intents outside `Playing` are ignored.
    pub fn handle_intent(&mut self, intent: Intent, sink: &mut impl RenderSink) -> Option<Message> {
        if self.phase != Phase::Playing {
            log::debug!("ignoring {:?} while {:?}", intent, self.phase);
            return None;
        }
        if intent != Intent::Fire {
            let old = self.cursor;
            if self.cursor.step::<N>(intent) {
                sink.render(RenderEvent::Cursor {
                    x: old.x,
                    y: old.y,
                    visible: false,
                });
                if let Ok(cell) = self.view.cell(old.x, old.y) {
                    sink.render(RenderEvent::Cell {
                        board: BoardKind::Enemy,
                        x: old.x,
                        y: old.y,
                        cell,
                    });
                }
                sink.render(RenderEvent::Cursor {
                    x: self.cursor.x,
                    y: self.cursor.y,
                    visible: true,
                });
            }
            return None;
        }

        let rejection = match self.turn {
            Turn::Awaiting { .. } => Some(Status::AwaitingResult),
            Turn::Theirs => Some(Status::NotYourTurn),
            Turn::Ours if !turn::is_valid_target(&self.view, self.cursor.x, self.cursor.y) => {
                Some(Status::AlreadyFiredHere)
            }
            Turn::Ours => None,
        };
        if let Some(status) = rejection {
            sink.render(RenderEvent::Status(status));
            return None;
        }

        let Cursor { x, y } = self.cursor;
        self.turn = Turn::Awaiting { x, y };
        log::debug!("firing at ({}, {})", x, y);
        Some(Message::ShotRequest {
            x: x as u8,
            y: y as u8,
        })
    }

    /// Apply a payload from the peer. Returns the payloads to send back.
    ///
    /// Malformed or out-of-turn payloads are rejected without touching any
    /// state.
    pub fn handle_message(
        &mut self,
        msg: Message,
        sink: &mut impl RenderSink,
    ) -> Result<Vec<Message>, GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::WrongPhase(self.phase));
        }
        msg.validate::<N>(self.config.len())?;
        let replies = match msg {
            Message::ShotRequest { x, y } => self.on_incoming_shot(x as usize, y as usize, sink)?,
            Message::ShotResult { x, y, outcome } => {
                self.on_shot_result(x as usize, y as usize, outcome, sink)?;
                Vec::new()
            }
            Message::FleetDestroyed => {
                // the concession follows the result of our last shot
                if self.turn != Turn::Theirs {
                    return Err(GameError::UnexpectedMessage);
                }
                if !self.enemy_fleet.is_destroyed() {
                    log::warn!(
                        "peer reports defeat with {} enemy ships still tracked afloat",
                        self.enemy_fleet.afloat()
                    );
                }
                self.finish(Outcome::Won, sink);
                Vec::new()
            }
            Message::Ready { .. } => return Err(GameError::UnexpectedMessage),
        };
        Ok(replies)
    }

    /// Back to the lobby from `GameOver` (or a no-op reset in `Standby`).
    /// Boards, fleets and cursor are wiped.
    pub fn reset(&mut self, sink: &mut impl RenderSink) -> Result<(), GameError> {
        if self.phase == Phase::Playing {
            return Err(GameError::WrongPhase(self.phase));
        }
        self.ocean.clear();
        self.view.clear();
        self.own_fleet.clear();
        self.enemy_fleet.clear();
        self.cursor = Cursor::default();
        self.turn = initial_turn(self.seat);
        self.outcome = None;
        self.phase = Phase::Standby;
        log::info!("game reset");
        self.show_lobby(sink);
        Ok(())
    }

    fn on_incoming_shot(
        &mut self,
        x: usize,
        y: usize,
        sink: &mut impl RenderSink,
    ) -> Result<Vec<Message>, GameError> {
        if self.turn != Turn::Theirs {
            return Err(GameError::OutOfTurn);
        }
        let outcome = turn::resolve_incoming_shot(&mut self.ocean, &mut self.own_fleet, x, y)?;

        sink.render(RenderEvent::Cell {
            board: BoardKind::Own,
            x,
            y,
            cell: self.ocean.cell(x, y)?,
        });
        let status = match outcome {
            ShotOutcome::Miss => Status::OpponentMissed,
            ShotOutcome::Hit => Status::OpponentHit,
            ShotOutcome::Sunk(id) => Status::OpponentSank(self.ship_name(id)),
        };
        sink.render(RenderEvent::Status(status));
        if outcome.is_hit() {
            self.render_fleet_panel(sink);
        }

        let mut replies = alloc::vec![Message::ShotResult {
            x: x as u8,
            y: y as u8,
            outcome,
        }];
        if self.own_fleet.is_destroyed() {
            replies.push(Message::FleetDestroyed);
            self.finish(Outcome::Lost, sink);
        } else {
            self.turn = Turn::Ours;
        }
        Ok(replies)
    }

    fn on_shot_result(
        &mut self,
        x: usize,
        y: usize,
        outcome: ShotOutcome,
        sink: &mut impl RenderSink,
    ) -> Result<(), GameError> {
        let (px, py) = self.pending_shot().ok_or(GameError::NoShotOutstanding)?;
        if (px, py) != (x, y) {
            return Err(GameError::ResultMismatch {
                expected: (px, py),
                got: (x, y),
            });
        }
        let newly_sunk = turn::apply_shot_result(&mut self.view, &mut self.enemy_fleet, x, y, outcome)?;
        self.turn = Turn::Theirs;

        sink.render(RenderEvent::Cell {
            board: BoardKind::Enemy,
            x,
            y,
            cell: self.view.cell(x, y)?,
        });
        let status = match (outcome, newly_sunk) {
            (_, Some(id)) => Status::Sank(self.ship_name(id)),
            (ShotOutcome::Miss, None) => Status::Miss,
            (_, None) => Status::Hit,
        };
        sink.render(RenderEvent::Status(status));
        if newly_sunk.is_some() {
            self.render_fleet_panel(sink);
        }
        sink.render(RenderEvent::Cursor {
            x: self.cursor.x,
            y: self.cursor.y,
            visible: true,
        });

        if self.own_fleet.is_destroyed() {
            self.finish(Outcome::Lost, sink);
        }
        Ok(())
    }

    fn finish(&mut self, outcome: Outcome, sink: &mut impl RenderSink) {
        self.phase = Phase::GameOver;
        self.outcome = Some(outcome);
        log::info!("game over: {:?}", outcome);
        sink.render(match outcome {
            Outcome::Won => RenderEvent::Victory,
            Outcome::Lost => RenderEvent::Defeat,
        });
    }

    fn turn_status(&self) -> Status {
        match self.turn {
            Turn::Ours => Status::YourTurn,
            Turn::Awaiting { .. } => Status::AwaitingResult,
            Turn::Theirs => Status::OpponentsTurn,
        }
    }

    fn ship_name(&self, id: ShipId) -> alloc::string::String {
        self.config
            .get(id)
            .map(|spec| spec.name().into())
            .unwrap_or_else(|| alloc::format!("ship {}", id))
    }

    fn render_fleet_panel(&self, sink: &mut impl RenderSink) {
        let lines = self
            .config
            .iter()
            .map(|(id, spec)| ShipLine {
                name: spec.name().into(),
                own: self.own_fleet.health(id).unwrap_or(0),
                enemy: self.enemy_fleet.health(id).unwrap_or(0),
            })
            .collect();
        sink.render(RenderEvent::FleetPanel(lines));
    }
}

fn initial_turn(seat: Seat) -> Turn {
    if seat.fires_first() {
        Turn::Ours
    } else {
        Turn::Theirs
    }
}
