use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::document::Document;
use crate::engine::{LayoutEngine, LayoutEvent};
use crate::random::RandomSource;

/// Message accepted by [`ChannelDriver`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostMessage {
    Event(LayoutEvent),
    Shutdown,
}

impl From<LayoutEvent> for HostMessage {
    fn from(event: LayoutEvent) -> Self {
        Self::Event(event)
    }
}

/// Single-threaded event loop over a std channel.
///
/// Host callbacks (image loads, resizes) send messages from anywhere; the
/// driver blocks until the next message or the pending resize deadline,
/// whichever comes first, and advances the engine clock by real elapsed time.
/// `Tick` messages from the host are ignored since the driver owns time.
pub struct ChannelDriver<D, R> {
    engine: LayoutEngine<D, R>,
    events: Receiver<HostMessage>,
}

impl<D, R> ChannelDriver<D, R>
where
    D: Document,
    R: RandomSource,
{
    pub fn new(engine: LayoutEngine<D, R>, events: Receiver<HostMessage>) -> Self {
        Self { engine, events }
    }

    pub fn engine(&self) -> &LayoutEngine<D, R> {
        &self.engine
    }

    /// Run until `Shutdown` arrives or every sender is dropped, then hand the
    /// engine back. Events the engine rejects are logged and skipped.
    pub fn run(mut self) -> LayoutEngine<D, R> {
        let mut last = Instant::now();

        loop {
            let received = match self.engine.next_deadline() {
                Some(timeout) => self.events.recv_timeout(timeout),
                None => self
                    .events
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };

            let now = Instant::now();
            self.engine.advance(now.duration_since(last));
            last = now;

            match received {
                Ok(HostMessage::Event(LayoutEvent::Tick { .. })) => {}
                Ok(HostMessage::Event(event)) => {
                    self.engine.dispatch(event);
                }
                Ok(HostMessage::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }

        self.engine.emit_metrics();
        self.engine
    }
}
