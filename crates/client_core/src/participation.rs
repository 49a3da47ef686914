//! Join/leave handling for a mounted event details view.

use std::sync::{Arc, Mutex, MutexGuard};

use shared::{
    domain::{Session, SessionUser},
    protocol::ParticipantOperation,
};
use tracing::{error, info, warn};

use crate::{
    api::EventsApi,
    error::ClientError,
    view_state::{EventViewState, RequestToken, ViewAction},
};

pub(crate) type SharedViewState = Arc<Mutex<EventViewState>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    Unauthenticated,
    Busy,
    Unmounted,
}

#[derive(Debug)]
pub enum ToggleOutcome {
    Joined,
    Left,
    Refused(RefusalReason),
    Failed(ClientError),
    /// The view was unmounted or replaced while the request was in flight.
    Stale,
}

impl ToggleOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ToggleOutcome::Joined | ToggleOutcome::Left)
    }
}

pub(crate) fn lock_state(state: &Mutex<EventViewState>) -> MutexGuard<'_, EventViewState> {
    // Every transition leaves the state consistent, so a poisoned lock still
    // holds usable data.
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Clears the busy flag for its token when dropped, whether the request
/// settled, failed, or the future was dropped mid-flight.
struct InFlightGuard {
    state: SharedViewState,
    token: RequestToken,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock_state(&self.state).apply(ViewAction::ToggleSettled(self.token));
    }
}

#[derive(Clone)]
pub struct ParticipationSynchronizer {
    api: Arc<dyn EventsApi>,
    state: SharedViewState,
}

impl ParticipationSynchronizer {
    pub(crate) fn new(api: Arc<dyn EventsApi>, state: SharedViewState) -> Self {
        Self { api, state }
    }

    /// Adds the session user to the event when absent, removes them when
    /// present. Local state changes only after the service accepts the
    /// mutation; nothing is re-fetched.
    pub async fn toggle(&self, session: &Session) -> ToggleOutcome {
        let Some(user) = session.authenticated_user() else {
            error!("You must first log in");
            return ToggleOutcome::Refused(RefusalReason::Unauthenticated);
        };

        let (token, operation) = match self.begin(user) {
            Ok(started) => started,
            Err(reason) => return ToggleOutcome::Refused(reason),
        };
        let _guard = InFlightGuard {
            state: self.state.clone(),
            token,
        };

        let result = self
            .api
            .update_participants(token.event_id, operation, vec![user.id])
            .await;

        let mut state = lock_state(&self.state);
        if !state.is_current(token) {
            info!(
                event_id = %token.event_id,
                operation = operation.as_str(),
                "ignoring participation response for stale view"
            );
            return ToggleOutcome::Stale;
        }

        match result {
            Ok(()) => match operation {
                ParticipantOperation::Add => {
                    state.apply(ViewAction::ParticipantAdded(user.as_participant()));
                    info!(event_id = %token.event_id, user_id = %user.id, "joined event");
                    ToggleOutcome::Joined
                }
                ParticipantOperation::Remove => {
                    state.apply(ViewAction::ParticipantRemoved(user.id));
                    info!(event_id = %token.event_id, user_id = %user.id, "left event");
                    ToggleOutcome::Left
                }
            },
            Err(err) => {
                error!(
                    event_id = %token.event_id,
                    operation = operation.as_str(),
                    status = ?err.status(),
                    message = err.server_message().unwrap_or_default(),
                    "Failed to update participation: {err}"
                );
                ToggleOutcome::Failed(err)
            }
        }
    }

    fn begin(
        &self,
        user: &SessionUser,
    ) -> Result<(RequestToken, ParticipantOperation), RefusalReason> {
        let mut state = lock_state(&self.state);
        if !state.mounted {
            return Err(RefusalReason::Unmounted);
        }
        if state.busy {
            warn!(event_id = %state.event_id(), "participation update already in flight");
            return Err(RefusalReason::Busy);
        }

        let operation = if state.event.has_participant(user.id) {
            ParticipantOperation::Remove
        } else {
            ParticipantOperation::Add
        };
        let token = state.next_token();
        state.apply(ViewAction::ToggleStarted(token));
        Ok((token, operation))
    }
}

#[cfg(test)]
#[path = "tests/participation_tests.rs"]
mod tests;
