//! Text output for terminals: a board printer and a logging render sink.

use std::fmt::Write;

use crate::board::Cell;
use crate::game::Game;
use crate::render::{RenderEvent, RenderSink};

/// Both grids side by side, own fleet first, columns lettered and rows
/// numbered from one.
pub fn render_boards<const N: usize>(game: &Game<N>) -> String {
    let mut out = String::new();
    let header: String = (0..N).map(|x| (b'A' + x as u8) as char).flat_map(|c| [c, ' ']).collect();
    let _ = writeln!(out, "{:<w$}   {}", "YOUR FLEET", "ENEMY FLEET", w = 2 * N + 3);
    let _ = writeln!(out, "   {}    {}", header, header);
    for y in 0..N {
        let _ = write!(out, "{:>2} ", y + 1);
        for x in 0..N {
            let cell = game.ocean().cell(x, y).unwrap_or(Cell::Empty);
            let _ = write!(out, "{} ", glyph(cell));
        }
        let _ = write!(out, "   ");
        for x in 0..N {
            let cell = game.view().cell(x, y).unwrap_or(Cell::Empty);
            let _ = write!(out, "{} ", glyph(cell));
        }
        out.push('\n');
    }
    for (id, spec) in game.config().iter() {
        let _ = writeln!(
            out,
            "{:<10} [{}]   {:<10} [{}]",
            spec.name(),
            game.own_fleet().health(id).unwrap_or(0),
            spec.name(),
            game.enemy_fleet().health(id).unwrap_or(0)
        );
    }
    out
}

fn glyph(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Ship(id) => (b'0' + id.get()) as char,
        Cell::Hit => 'X',
        Cell::Miss => 'o',
    }
}

/// Render sink that writes status changes to the log, tagged with a device
/// label. Per-cell redraws go to `trace`.
pub struct LogSink {
    label: &'static str,
}

impl LogSink {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl RenderSink for LogSink {
    fn render(&mut self, event: RenderEvent) {
        match event {
            RenderEvent::Status(status) => {
                log::info!("[{}] {} ({:?})", self.label, status, status.tone())
            }
            RenderEvent::LobbyText(text) => log::info!("[{}] {}", self.label, text),
            RenderEvent::Victory => log::info!("[{}] YOU WIN!", self.label),
            RenderEvent::Defeat => log::info!("[{}] YOU LOSE!", self.label),
            RenderEvent::FleetPanel(lines) => {
                for line in lines {
                    log::debug!(
                        "[{}] {}: own [{}] enemy [{}]",
                        self.label,
                        line.name,
                        line.own,
                        line.enemy
                    );
                }
            }
            other => log::trace!("[{}] {:?}", self.label, other),
        }
    }
}
