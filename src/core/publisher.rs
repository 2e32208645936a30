//! # State Publisher
//!
//! Holds the current [`Envelope`] for one resource and pushes every
//! replacement to all subscribers, in order.
//!
//! ```text
//! StatePublisher (Arc<Mutex<Slot>>)
//! ├── current: Envelope<T>        // readable synchronously
//! ├── generation: u64             // bumped by every begin()
//! ├── settled: bool               // terminal value already published?
//! └── subscribers: Vec<Sender>    // one unbounded queue per observer
//! ```
//!
//! Queues are unbounded on purpose: a subscriber must see `Loading` *and* the
//! terminal value, even when they are published back to back. A `watch`
//! channel would coalesce them.
//!
//! The generation check and the write happen under the same lock, so a stale
//! completion can never slip in between "is this still current?" and "publish".

use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures::Stream;
use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::core::envelope::Envelope;

struct Slot<T> {
    current: Envelope<T>,
    generation: u64,
    settled: bool,
    subscribers: Vec<UnboundedSender<Envelope<T>>>,
}

impl<T: Clone> Slot<T> {
    fn replace(&mut self, envelope: Envelope<T>) {
        // Dropped receivers are pruned here rather than on unsubscribe.
        self.subscribers
            .retain(|subscriber| subscriber.send(envelope.clone()).is_ok());
        self.current = envelope;
    }
}

/// Observable holder of one resource's envelope. Clones share the same slot.
pub struct StatePublisher<T> {
    name: &'static str,
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> Clone for StatePublisher<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: Clone> StatePublisher<T> {
    /// Creates a publisher whose initial value is `Loading`.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: Arc::new(Mutex::new(Slot {
                current: Envelope::Loading,
                generation: 0,
                settled: false,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current envelope.
    pub fn current(&self) -> Envelope<T> {
        self.lock().current.clone()
    }

    /// Latest generation handed out by [`begin`](Self::begin).
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Registers an observer. The current value is queued immediately, so a
    /// late subscriber never waits for the next change.
    pub fn subscribe(&self) -> Subscription<T> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut slot = self.lock();
        // Receiver is alive; this cannot fail.
        let _ = sender.send(slot.current.clone());
        slot.subscribers.push(sender);
        Subscription { receiver }
    }

    pub fn subscriber_count(&self) -> usize {
        let mut slot = self.lock();
        slot.subscribers.retain(|subscriber| !subscriber.is_closed());
        slot.subscribers.len()
    }

    /// Starts a new fetch: supersedes any in-flight one, publishes `Loading`
    /// and returns the generation the fetch must present to [`settle`](Self::settle).
    pub fn begin(&self) -> u64 {
        let mut slot = self.lock();
        slot.generation += 1;
        slot.settled = false;
        slot.replace(Envelope::Loading);
        debug!("{}: generation {} loading", self.name, slot.generation);
        slot.generation
    }

    /// Publishes the terminal value of fetch `generation`, unless a newer fetch
    /// has begun since or this generation already settled. Returns whether the
    /// value was published.
    ///
    /// A blank `Error` message is replaced by the fallback, however the
    /// envelope was built.
    pub fn settle(&self, generation: u64, envelope: Envelope<T>) -> bool {
        let envelope = match envelope {
            Envelope::Error(message) => Envelope::error(message),
            other => other,
        };
        let mut slot = self.lock();
        if generation != slot.generation || slot.settled {
            debug!(
                "{}: dropping completion of generation {} (latest {}, settled {})",
                self.name, generation, slot.generation, slot.settled
            );
            return false;
        }
        slot.settled = true;
        slot.replace(envelope);
        debug!("{}: generation {} settled", self.name, generation);
        true
    }

    /// Settles the latest generation with an error if it is still loading.
    /// Used when its fetch will never complete. Returns whether anything was published.
    pub fn abandon(&self, message: &str) -> bool {
        let generation = {
            let slot = self.lock();
            if slot.generation == 0 || slot.settled {
                return false;
            }
            slot.generation
        };
        self.settle(generation, Envelope::error(message))
    }
}

/// One observer's view of a publisher: the value at subscribe time, then every
/// replacement in emission order. Ends when the publisher is dropped.
pub struct Subscription<T> {
    receiver: UnboundedReceiver<Envelope<T>>,
}

impl<T> Subscription<T> {
    pub async fn recv(&mut self) -> Option<Envelope<T>> {
        self.receiver.recv().await
    }

    /// Next queued value without waiting.
    pub fn try_recv(&mut self) -> Option<Envelope<T>> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next terminal value, skipping `Loading`.
    pub async fn settled(&mut self) -> Option<Envelope<T>> {
        while let Some(envelope) = self.recv().await {
            if envelope.is_settled() {
                return Some(envelope);
            }
        }
        None
    }
}

impl<T> Stream for Subscription<T> {
    type Item = Envelope<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}
