//! Broadcaster backed by a tokio broadcast channel.
//!
//! Each subscriber gets its own receiver. Slow subscribers lag and lose old
//! events rather than slowing the engine down.

use tokio::sync::broadcast;
use tracing::trace;

use crate::port::outbound::{Broadcaster, RaceEvent};

/// Fan-out of race events to any number of subscribers.
#[derive(Debug, Clone)]
pub struct ChannelBroadcaster {
    sender: broadcast::Sender<RaceEvent>,
}

impl ChannelBroadcaster {
    /// Create a channel buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Receive every event announced from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RaceEvent> {
        self.sender.subscribe()
    }
}

impl Broadcaster for ChannelBroadcaster {
    fn announce(&self, event: RaceEvent) {
        if self.sender.send(event).is_err() {
            trace!("No subscribers for race event");
        }
    }
}
