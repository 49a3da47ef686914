use std::sync::Arc;

use shared::domain::EventId;
use tracing::{error, info, warn};

use crate::{
    api::EventsApi,
    collaborators::{DetailViewHost, EventRegistry, Navigator},
    error::ClientError,
};

#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted,
    Failed(ClientError),
}

pub struct EventDeletion {
    api: Arc<dyn EventsApi>,
    registry: Arc<dyn EventRegistry>,
    navigator: Arc<dyn Navigator>,
    host: Arc<dyn DetailViewHost>,
    listing_path: String,
}

impl EventDeletion {
    pub fn new(
        api: Arc<dyn EventsApi>,
        registry: Arc<dyn EventRegistry>,
        navigator: Arc<dyn Navigator>,
        host: Arc<dyn DetailViewHost>,
        listing_path: impl Into<String>,
    ) -> Self {
        Self {
            api,
            registry,
            navigator,
            host,
            listing_path: listing_path.into(),
        }
    }

    /// Deletes the event remotely and, once accepted, drops it from the
    /// registry, closes the view and returns to the listing.
    ///
    /// `is_owner` is advisory only: the service decides whether the caller
    /// may delete, so the request goes out either way.
    pub async fn delete(&self, event_id: EventId, is_owner: bool) -> DeleteOutcome {
        if !is_owner {
            warn!(%event_id, "deleting event without owner flag");
        }

        match self.api.delete_event(event_id).await {
            Ok(()) => {
                info!(%event_id, "event deleted");
                self.registry.remove_event(event_id);
                self.host.close();
                self.navigator.navigate_to(&self.listing_path);
                DeleteOutcome::Deleted
            }
            Err(err) => {
                error!(%event_id, status = ?err.status(), "Error deleting event: {err}");
                DeleteOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/deletion_tests.rs"]
mod tests;
