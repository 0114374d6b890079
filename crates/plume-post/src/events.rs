use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use plume_store::Credits;
use plume_types::{AuthorId, PostAddress, Timestamp};

/// Lifecycle event emitted after a committed state transition.
///
/// Events describe what happened, never what was rejected: a failed
/// operation emits nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostEvent {
    Created {
        address: PostAddress,
        owner: AuthorId,
        title: String,
        created_at: Timestamp,
    },
    Updated {
        address: PostAddress,
        owner: AuthorId,
        title: String,
        updated_at: Timestamp,
    },
    Deleted {
        address: PostAddress,
        owner: AuthorId,
        refund: Credits,
    },
}

/// Consumer of committed lifecycle events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: PostEvent);
}

/// Sink that discards every event. The default.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: PostEvent) {}
}

/// Sink that records events in order, for tests and embedding.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Mutex<Vec<PostEvent>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all recorded events.
    pub fn drain(&self) -> Vec<PostEvent> {
        std::mem::take(&mut *self.events.lock().expect("lock poisoned"))
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn emit(&self, event: PostEvent) {
        self.events.lock().expect("lock poisoned").push(event);
    }
}

impl<S: EventSink> EventSink for std::sync::Arc<S> {
    fn emit(&self, event: PostEvent) {
        (**self).emit(event);
    }
}
