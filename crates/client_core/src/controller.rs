use std::sync::{Arc, Mutex};

use shared::domain::{Event, EventId, Session};
use tracing::warn;

use crate::{
    api::EventsApi,
    collaborators::{DetailViewHost, EventRegistry, Navigator},
    config::ClientSettings,
    deletion::{DeleteOutcome, EventDeletion},
    error::ClientError,
    participation::{lock_state, ParticipationSynchronizer, SharedViewState, ToggleOutcome},
    presentation::EventDetailsView,
    view_state::{EventViewState, ViewAction},
};

#[derive(Clone)]
pub struct Collaborators {
    pub registry: Arc<dyn EventRegistry>,
    pub navigator: Arc<dyn Navigator>,
    pub host: Arc<dyn DetailViewHost>,
}

/// One mounted event details view: its local state plus the handlers that
/// mutate it.
pub struct EventDetailsController {
    state: SharedViewState,
    is_owner: bool,
    participation: ParticipationSynchronizer,
    deletion: EventDeletion,
    navigator: Arc<dyn Navigator>,
    host: Arc<dyn DetailViewHost>,
}

impl EventDetailsController {
    /// Copies `event` into local state. With no event there is nothing to
    /// show and the caller renders the `MissingEvent` notice instead.
    pub fn mount(
        event: Option<Event>,
        is_owner: bool,
        api: Arc<dyn EventsApi>,
        collaborators: Collaborators,
        settings: &ClientSettings,
    ) -> Result<Self, ClientError> {
        let event = event.ok_or(ClientError::MissingEvent)?;
        let state = Arc::new(Mutex::new(EventViewState::mount(event)));
        let deletion = EventDeletion::new(
            api.clone(),
            collaborators.registry,
            collaborators.navigator.clone(),
            collaborators.host.clone(),
            settings.listing_path.clone(),
        );
        Ok(Self {
            participation: ParticipationSynchronizer::new(api, state.clone()),
            state,
            is_owner,
            deletion,
            navigator: collaborators.navigator,
            host: collaborators.host,
        })
    }

    pub fn event_id(&self) -> EventId {
        lock_state(&self.state).event_id()
    }

    pub fn is_owner(&self) -> bool {
        self.is_owner
    }

    pub fn snapshot(&self) -> EventViewState {
        lock_state(&self.state).clone()
    }

    pub fn view(&self, session: &Session) -> EventDetailsView {
        let viewer = session.authenticated_user().map(|u| u.id);
        EventDetailsView::from_state(&lock_state(&self.state), viewer, self.is_owner)
    }

    pub async fn toggle(&self, session: &Session) -> ToggleOutcome {
        self.participation.toggle(session).await
    }

    pub async fn delete(&self) -> DeleteOutcome {
        self.deletion.delete(self.event_id(), self.is_owner).await
    }

    pub fn close(&self) {
        self.host.close();
    }

    pub fn edit(&self) -> Result<(), ClientError> {
        if !self.is_owner {
            warn!(event_id = %self.event_id(), "edit requested by non-owner");
            return Err(ClientError::NotOwner);
        }
        self.navigator
            .navigate_to(&format!("/edit_event/{}", self.event_id()));
        Ok(())
    }

    /// Replaces local state with an authoritative copy, e.g. after a full
    /// re-fetch. Any toggle still in flight is treated as stale.
    pub fn reconcile(&self, event: Event) {
        lock_state(&self.state).apply(ViewAction::Replaced(event));
    }

    pub fn unmount(&self) {
        lock_state(&self.state).apply(ViewAction::Unmounted);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
