//! System notifications the face reacts to.
//!
//! The platform publishes [`SystemEvent`]s on a [`SystemEventBus`]. The
//! engine holds a [`Subscription`] only while the face is visible and drains
//! it at the start of every frame, so events never interrupt a draw.

use chrono_tz::Tz;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Events buffered per subscriber before the oldest are dropped.
const BUS_CAPACITY: usize = 16;

/// A notification from the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemEvent {
    /// The wearer's time zone changed.
    TimeZoneChanged(Tz),
    /// The battery reported a new charge level.
    BatteryChanged { level: u32, scale: u32 },
}

/// Fan-out channel for system events.
#[derive(Debug, Clone)]
pub struct SystemEventBus {
    tx: broadcast::Sender<SystemEvent>,
}

impl Default for SystemEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemEventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Publishes an event and returns how many subscribers will see it.
    ///
    /// Publishing with no subscribers is not an error; the event is dropped.
    pub fn publish(&self, event: SystemEvent) -> usize {
        match self.tx.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                debug!(?event, "no subscribers for system event");
                0
            }
        }
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A live registration on a [`SystemEventBus`]. Dropping it unregisters.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<SystemEvent>,
}

impl Subscription {
    /// Returns every event received since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<SystemEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "system events dropped before drain");
                }
                Err(broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed) => {
                    break;
                }
            }
        }
        events
    }

    /// Waits for the next event. Returns `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<SystemEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "system events dropped before recv");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
