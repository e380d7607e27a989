//! Loopback link between two devices in one process.
//!
//! Messages are framed with [`crate::codec`] on send and decoded on receive,
//! so both ends see exactly what a radio link would deliver.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use tokio::task::yield_now;

use crate::codec;
use crate::protocol::Message;
use crate::transport::Transport;

type Queue = Arc<Mutex<VecDeque<Vec<u8>>>>;

pub struct InMemoryTransport {
    inbox: Queue,
    outbox: Queue,
}

impl InMemoryTransport {
    /// Two connected ends.
    pub fn pair() -> (Self, Self) {
        let a = Arc::new(Mutex::new(VecDeque::new()));
        let b = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                inbox: a.clone(),
                outbox: b.clone(),
            },
            Self {
                inbox: b,
                outbox: a,
            },
        )
    }

    /// Push raw bytes at the peer, bypassing the encoder.
    pub fn send_raw(&mut self, frame: Vec<u8>) -> anyhow::Result<()> {
        self.outbox
            .lock()
            .map_err(|_| anyhow!("link poisoned"))?
            .push_back(frame);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let frame = codec::encode(&msg)?;
        self.send_raw(frame)
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        loop {
            let frame = self
                .inbox
                .lock()
                .map_err(|_| anyhow!("link poisoned"))?
                .pop_front();
            if let Some(frame) = frame {
                return codec::decode(&frame);
            }
            if Arc::strong_count(&self.inbox) == 1 {
                return Err(anyhow!("link closed"));
            }
            yield_now().await;
        }
    }
}
