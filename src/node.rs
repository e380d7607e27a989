//! The device control loop.
//!
//! A [`Device`] owns one game and drives it from its input source and its
//! peer link, one event at a time, until the game is over.

use std::time::Duration;

use anyhow::anyhow;
use rand::rngs::SmallRng;
use tokio::time::Instant;

use crate::game::{Game, Outcome, Phase, Turn};
use crate::input::{Debouncer, InputSource, Intent};
use crate::protocol::{Message, PROTOCOL_VERSION};
use crate::render::{LobbyStatus, RenderSink};
use crate::transport::Transport;

pub struct Device<const N: usize, I, T, S> {
    game: Game<N>,
    input: I,
    transport: T,
    sink: S,
    rng: SmallRng,
    debouncer: Debouncer,
    epoch: Instant,
    shots_fired: usize,
}

impl<const N: usize, I, T, S> Device<N, I, T, S>
where
    I: InputSource<N>,
    T: Transport,
    S: RenderSink,
{
    pub fn new(game: Game<N>, input: I, transport: T, sink: S, rng: SmallRng) -> Self {
        Self {
            game,
            input,
            transport,
            sink,
            rng,
            debouncer: Debouncer::new(0),
            epoch: Instant::now(),
            shots_fired: 0,
        }
    }

    /// Minimum spacing enforced between accepted presses.
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debouncer = Debouncer::new(delay.as_millis() as u64);
        self
    }

    pub fn game(&self) -> &Game<N> {
        &self.game
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Shots this device fired in the current game.
    pub fn shots_fired(&self) -> usize {
        self.shots_fired
    }

    /// Play one game from the lobby to the end.
    pub async fn run(&mut self) -> anyhow::Result<Outcome> {
        if self.game.phase() != Phase::Standby {
            return Err(anyhow!("device must be in the lobby to start, not {:?}", self.game.phase()));
        }
        self.shots_fired = 0;
        self.lobby().await?;
        self.game
            .start(&mut self.rng, &mut self.sink)
            .map_err(|e| anyhow!(e))?;

        loop {
            if let Some(outcome) = self.game.outcome() {
                return Ok(outcome);
            }
            if self.game.turn() == Turn::Ours {
                self.press().await?;
            } else {
                let msg = self.transport.recv().await?;
                let replies = self.game.handle_message(msg, &mut self.sink).map_err(|e| {
                    log::warn!("rejected {:?} from peer: {}", msg, e);
                    anyhow!(e)
                })?;
                for reply in replies {
                    self.transport.send(reply).await?;
                }
            }
        }
    }

    /// Return to the lobby after a finished game.
    pub fn reset(&mut self) -> anyhow::Result<()> {
        self.game.reset(&mut self.sink).map_err(|e| anyhow!(e))
    }

    /// Ready handshake: announce ourselves and wait for the peer to do the
    /// same.
    async fn lobby(&mut self) -> anyhow::Result<()> {
        self.game.show_lobby(&mut self.sink);
        self.game
            .lobby_status(LobbyStatus::WaitingForPeer, &mut self.sink);
        self.transport
            .send(Message::Ready {
                version: PROTOCOL_VERSION,
            })
            .await?;
        match self.transport.recv().await? {
            msg @ Message::Ready { .. } => {
                msg.validate::<N>(self.game.config().len())
                    .map_err(|e| anyhow!(e))?;
            }
            other => return Err(anyhow!("expected Ready from peer, got {:?}", other)),
        }
        self.game.lobby_status(LobbyStatus::PeerReady, &mut self.sink);
        self.game.lobby_status(LobbyStatus::Starting, &mut self.sink);
        Ok(())
    }

    /// Take one press from the input source and apply it.
    ///
    /// A press inside the debounce window is dropped; the loop then waits
    /// out the window before polling again. Moves that shift the cursor and
    /// every fire attempt restart the window.
    async fn press(&mut self) -> anyhow::Result<()> {
        let Some(intent) = self.input.poll(self.game.view(), self.game.cursor()) else {
            tokio::task::yield_now().await;
            return Ok(());
        };

        let now = self.now_ms();
        if !self.debouncer.ready(now) {
            log::trace!("dropped {:?} inside debounce window", intent);
            let wait = self.debouncer.wait_ms(now);
            tokio::time::sleep(Duration::from_millis(wait)).await;
            return Ok(());
        }

        let before = self.game.cursor();
        let shot = self.game.handle_intent(intent, &mut self.sink);
        if intent == Intent::Fire || self.game.cursor() != before {
            self.debouncer.register(now);
        }
        if let Some(shot) = shot {
            self.shots_fired += 1;
            self.transport.send(shot).await?;
        }
        Ok(())
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}
