#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

mod board;
mod common;
mod config;
mod fleet;
mod game;
mod input;
mod mask;
mod packing;
pub mod protocol;
pub mod render;
mod ship;
pub mod turn;

#[cfg(feature = "std")]
pub mod autopilot;
#[cfg(feature = "std")]
pub mod codec;
#[cfg(feature = "std")]
pub mod display;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod node;
#[cfg(feature = "std")]
pub mod transport;

pub use board::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
pub use input::*;
pub use mask::{CellMask, GridMask, MaskError};
pub use packing::PACKING_BUDGET;
pub use protocol::{Message, PROTOCOL_VERSION};
pub use render::{NullSink, RenderEvent, RenderSink};
pub use ship::*;

#[cfg(feature = "std")]
pub use autopilot::Autopilot;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use node::Device;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, Transport};
