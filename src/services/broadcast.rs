/// Push channel for engine output
///
/// Thin typed wrapper over a tokio broadcast channel. The engine publishes
/// `{type, payload}` updates; any number of presentation-side subscribers
/// consume them. Transport beyond this channel is someone else's problem.
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::models::EngineUpdate;

pub struct UpdateBroadcaster {
    tx: broadcast::Sender<EngineUpdate>,
}

impl UpdateBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineUpdate> {
        self.tx.subscribe()
    }

    /// Send an update to all subscribers. A send with no receivers is not
    /// an error; the update is simply dropped.
    pub fn publish(&self, update: EngineUpdate) {
        match self.tx.send(update) {
            Ok(receivers) => trace!(receivers, "update published"),
            Err(_) => debug!("no subscribers, update dropped"),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
