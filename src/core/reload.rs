// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Catalogue reload notifications
//!
//! A `ReloadBus` fans a reload event out to every live subscription.
//! Subscriptions are drained without blocking, the same way the config
//! file watcher is polled, and deregister themselves when dropped.

use std::{
    collections::HashMap,
    sync::{
        mpsc::{channel, Receiver, Sender},
        Arc, Mutex, PoisonError, Weak,
    },
};

/// Published after the binding table has been replaced
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReloadEvent {
    /// Monotonic load counter of the catalogue store
    pub generation: u64,
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    senders: HashMap<u64, Sender<ReloadEvent>>,
}

/// Broadcasts reload events to subscribers
#[derive(Clone, Default)]
pub struct ReloadBus {
    inner: Arc<Mutex<Subscribers>>,
}

impl ReloadBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscription
    pub fn subscribe(&self) -> ReloadSubscription {
        let (tx, rx) = channel();
        let mut subscribers = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.senders.insert(id, tx);

        ReloadSubscription {
            id,
            rx,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Sends `event` to every subscriber, returns how many received it
    ///
    /// Senders whose receiving end has gone away are pruned.
    pub fn publish(&self, event: ReloadEvent) -> usize {
        let mut subscribers = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        subscribers
            .senders
            .retain(|_, tx| tx.send(event).is_ok());
        subscribers.senders.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .senders
            .len()
    }
}

/// Receiving end of a reload subscription
///
/// Dropping it removes the subscriber from its bus.
pub struct ReloadSubscription {
    id: u64,
    rx: Receiver<ReloadEvent>,
    bus: Weak<Mutex<Subscribers>>,
}

impl ReloadSubscription {
    /// Checks for pending reload events (non-blocking)
    ///
    /// Drains the queue so bursts of reloads collapse into one rebuild.
    pub fn check_for_reload(&self) -> Option<ReloadEvent> {
        let mut latest = None;
        while let Ok(event) = self.rx.try_recv() {
            latest = Some(event);
        }
        latest
    }
}

impl Drop for ReloadSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .senders
                .remove(&self.id);
        }
    }
}
