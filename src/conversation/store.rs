//! Conversation store — append-only timeline plus the busy gate.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, warn};
use uuid::Uuid;

use super::model::{Sender, TimelineEntry};

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 256;

/// Change notifications for subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    EntryAppended { entry: TimelineEntry },
    BusyChanged { busy: bool },
}

/// Ordered log of timeline entries for one session.
///
/// Insertion order is display order. The busy flag is the only concurrency
/// control: while it is set, the dispatcher accepts no new action.
pub struct ConversationStore {
    session_id: Uuid,
    entries: RwLock<Vec<TimelineEntry>>,
    busy: AtomicBool,
    tx: broadcast::Sender<StoreEvent>,
}

impl ConversationStore {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        Self {
            session_id: Uuid::new_v4(),
            entries: RwLock::new(Vec::new()),
            busy: AtomicBool::new(false),
            tx,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Append an entry to the end of the log.
    ///
    /// User entries with blank text are rejected and `false` is returned.
    pub async fn append(&self, entry: TimelineEntry) -> bool {
        if entry.sender == Sender::User && entry.text.trim().is_empty() {
            warn!(session_id = %self.session_id, "Rejected blank user entry");
            return false;
        }

        let position = {
            let mut entries = self.entries.write().await;
            entries.push(entry.clone());
            entries.len() - 1
        };
        debug!(
            session_id = %self.session_id,
            position,
            sender = ?entry.sender,
            "Timeline entry appended"
        );

        let _ = self.tx.send(StoreEvent::EntryAppended { entry });
        true
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Force the busy flag. Dispatch code should prefer [`try_begin`](Self::try_begin).
    pub fn set_busy(&self, busy: bool) {
        let previous = self.busy.swap(busy, Ordering::SeqCst);
        if previous != busy {
            let _ = self.tx.send(StoreEvent::BusyChanged { busy });
        }
    }

    /// Claim the busy flag if it is free.
    ///
    /// The returned guard clears the flag when dropped, on every exit path
    /// including cancellation of the owning future.
    pub fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        let _ = self.tx.send(StoreEvent::BusyChanged { busy: true });
        Some(BusyGuard { store: self })
    }

    /// Every entry, oldest first.
    pub async fn entries(&self) -> Vec<TimelineEntry> {
        self.entries.read().await.clone()
    }

    pub async fn last(&self) -> Option<TimelineEntry> {
        self.entries.read().await.last().cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the busy flag for the lifetime of one action.
#[must_use = "dropping the guard releases the busy flag immediately"]
pub struct BusyGuard<'a> {
    store: &'a ConversationStore,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.store.set_busy(false);
    }
}
