//! Byte framing for the radio link.
//!
//! Each [`Message`] travels as one bincode-encoded frame that must fit in a
//! single radio packet.

use anyhow::{anyhow, Context};

use crate::protocol::Message;

/// Largest payload the radio carries in one packet.
pub const MAX_FRAME_LEN: usize = 250;

/// Encode a message into one frame.
pub fn encode(msg: &Message) -> anyhow::Result<Vec<u8>> {
    let bytes = bincode::serialize(msg).context("encoding frame")?;
    if bytes.len() > MAX_FRAME_LEN {
        return Err(anyhow!(
            "frame of {} bytes exceeds the {} byte limit",
            bytes.len(),
            MAX_FRAME_LEN
        ));
    }
    Ok(bytes)
}

/// Decode one frame. Range checks against the grid happen in the game.
pub fn decode(bytes: &[u8]) -> anyhow::Result<Message> {
    if bytes.is_empty() {
        return Err(anyhow!("empty frame"));
    }
    if bytes.len() > MAX_FRAME_LEN {
        return Err(anyhow!(
            "frame of {} bytes exceeds the {} byte limit",
            bytes.len(),
            MAX_FRAME_LEN
        ));
    }
    bincode::deserialize(bytes).context("decoding frame")
}
