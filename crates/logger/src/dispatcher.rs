//! In-order fan-out of records to registered handlers

use crate::{Logger, Record};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Handle returned by [`Dispatcher::subscribe`], used to unsubscribe again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Publish/subscribe primitive for log records.
///
/// Publishing is synchronous: by the time [`Dispatcher::publish`] returns,
/// every handler registered at that moment has been handed the record, in the
/// order the handlers were subscribed.
pub struct Dispatcher {
    handlers: RwLock<Vec<(SubscriptionId, Arc<dyn Logger>)>>,
    next_id: AtomicU64,
}

impl Dispatcher {
    /// Create a dispatcher with no handlers
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a handler. It receives every record published from now on.
    pub fn subscribe(&self, handler: Arc<dyn Logger>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.write().push((id, handler));
        id
    }

    /// Remove a handler. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Deliver a record to all handlers in registration order
    pub fn publish(&self, record: Record) {
        // Handlers may subscribe from inside `log`, so don't hold the lock
        let handlers = self.snapshot();

        if let Some(((_, last), rest)) = handlers.split_last() {
            for (_, handler) in rest {
                handler.log(record.clone());
            }
            last.log(record);
        }
    }

    fn snapshot(&self) -> Vec<(SubscriptionId, Arc<dyn Logger>)> {
        self.handlers.read().clone()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handler_count())
            .finish_non_exhaustive()
    }
}

impl Logger for Dispatcher {
    fn log(&self, record: Record) {
        self.publish(record);
    }

    fn flush(&self) {
        for (_, handler) in self.snapshot() {
            handler.flush();
        }
    }
}
