//! Progress Bus - Broadcast Update Channel
//!
//! Any producer may publish an [`UpdateEvent`]; every subscribed widget
//! receives every event. There is no per-widget addressing, so two stepped
//! widgets on the same bus react to the same events identically.
//!
//! # Architecture
//!
//! ```text
//!                        ProgressBus
//!               ┌────────────────────────────────────────┐
//!               │ HashMap<SubscriberId, mpsc::Sender>    │
//!               │   - wrapped in Arc<RwLock<>>           │
//!               └───────────────┬────────────────────────┘
//!                               │ publish() = send to all
//!              ┌────────────────┼────────────────┐
//!              │                │                │
//!       ┌──────▼──────┐  ┌──────▼──────┐  ┌──────▼──────┐
//!       │  widget #1  │  │  widget #2  │  │  widget #3  │
//!       └─────────────┘  └─────────────┘  └─────────────┘
//! ```
//!
//! Publishing never blocks and never loses an event: each subscriber has its
//! own unbounded queue, so a widget that drains late still sees the whole
//! sequence in publish order.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use parking_lot::RwLock;
use tokio::sync::mpsc;

use crate::events::UpdateEvent;

/// Unique identifier for a bus subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    /// Raw numeric value
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

type Registry = RwLock<HashMap<SubscriberId, mpsc::UnboundedSender<UpdateEvent>>>;

/// Outcome of a publish
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishResult {
    /// Subscribers that queued the event
    pub delivered: usize,
    /// Subscribers found closed and removed
    pub pruned: usize,
}

/// Broadcast channel for [`UpdateEvent`]s
#[derive(Clone)]
pub struct ProgressBus {
    inner: Arc<Registry>,
}

impl ProgressBus {
    /// Create an empty bus
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The process-wide bus, created on first use
    pub fn global() -> &'static ProgressBus {
        static GLOBAL: OnceLock<ProgressBus> = OnceLock::new();
        GLOBAL.get_or_init(ProgressBus::new)
    }

    /// Attach a new listener
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = SubscriberId::next();
        self.inner.write().insert(id, tx);
        tracing::debug!(subscriber = %id, "Progress bus subscriber added");

        Subscription {
            id,
            rx,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Detach a listener
    ///
    /// Returns whether the subscriber was registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.inner.write().remove(&id).is_some()
    }

    /// Number of attached listeners
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.read().len()
    }

    /// Send `event` to every subscriber without waiting
    pub fn publish(&self, event: UpdateEvent) -> PublishResult {
        let mut result = PublishResult::default();
        let mut closed = Vec::new();

        {
            let inner = self.inner.read();
            for (id, tx) in inner.iter() {
                if tx.send(event.clone()).is_ok() {
                    result.delivered += 1;
                } else {
                    closed.push(*id);
                }
            }
        }

        if !closed.is_empty() {
            let mut inner = self.inner.write();
            for id in &closed {
                inner.remove(id);
            }
            result.pruned = closed.len();
        }

        tracing::trace!(?event, delivered = result.delivered, "Published update event");
        result
    }
}

impl Default for ProgressBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProgressBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// One listener's end of the bus
///
/// Dropping it removes the listener from the bus.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    rx: mpsc::UnboundedReceiver<UpdateEvent>,
    registry: Weak<Registry>,
}

impl Subscription {
    /// This listener's id
    #[must_use]
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Next queued event, if any
    pub fn try_recv(&mut self) -> Option<UpdateEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next event
    ///
    /// Returns `None` once the bus is gone and the queue is drained.
    pub async fn recv(&mut self) -> Option<UpdateEvent> {
        self.rx.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.write().remove(&self.id);
            tracing::debug!(subscriber = %self.id, "Progress bus subscriber removed");
        }
    }
}
