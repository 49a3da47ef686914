//! Outward-facing hooks the details view calls into after a mutation lands.

use std::sync::{Mutex, MutexGuard};

use shared::domain::EventId;

/// Owner of the canonical event list.
pub trait EventRegistry: Send + Sync {
    fn remove_event(&self, event_id: EventId);
}

pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}

/// Whatever presents the details view (modal, page, pane).
pub trait DetailViewHost: Send + Sync {
    fn close(&self);
}

// A push never leaves the list half-written, so a poisoned lock is still usable.
fn recover<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Registry kept in process memory, used by the CLI.
#[derive(Debug, Default)]
pub struct InMemoryEventRegistry {
    removed: Mutex<Vec<EventId>>,
}

impl InMemoryEventRegistry {
    pub fn removed(&self) -> Vec<EventId> {
        recover(&self.removed).clone()
    }
}

impl EventRegistry for InMemoryEventRegistry {
    fn remove_event(&self, event_id: EventId) {
        recover(&self.removed).push(event_id);
    }
}

/// Navigator that only records where the user was sent.
#[derive(Debug, Default)]
pub struct LoggingNavigator {
    visited: Mutex<Vec<String>>,
}

impl LoggingNavigator {
    pub fn visited(&self) -> Vec<String> {
        recover(&self.visited).clone()
    }
}

impl Navigator for LoggingNavigator {
    fn navigate_to(&self, path: &str) {
        tracing::info!(path, "navigate");
        recover(&self.visited).push(path.to_string());
    }
}

pub struct NoopHost;

impl DetailViewHost for NoopHost {
    fn close(&self) {}
}

#[cfg(test)]
#[path = "tests/collaborators_tests.rs"]
mod tests;
