//! Local view state for one mounted event details view and the pure
//! transitions that mutate it.

use shared::domain::{Event, EventId, Participant, UserId};

/// Identifies one participation request. A settling request only touches
/// state while its token is still the one in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken {
    pub event_id: EventId,
    pub serial: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventViewState {
    pub event: Event,
    pub busy: bool,
    pub in_flight: Option<RequestToken>,
    pub mounted: bool,
    serial: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    ToggleStarted(RequestToken),
    ParticipantAdded(Participant),
    ParticipantRemoved(UserId),
    ToggleSettled(RequestToken),
    Replaced(Event),
    Unmounted,
}

impl EventViewState {
    pub fn mount(event: Event) -> Self {
        Self {
            event,
            busy: false,
            in_flight: None,
            mounted: true,
            serial: 0,
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event.id
    }

    /// Token for the next request; does not mark the state busy.
    pub fn next_token(&mut self) -> RequestToken {
        self.serial += 1;
        RequestToken {
            event_id: self.event.id,
            serial: self.serial,
        }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.mounted && self.in_flight == Some(token)
    }

    pub fn reduce(self, action: ViewAction) -> Self {
        let mut next = self;
        next.apply(action);
        next
    }

    pub fn apply(&mut self, action: ViewAction) {
        match action {
            ViewAction::ToggleStarted(token) => {
                self.busy = true;
                self.in_flight = Some(token);
            }
            ViewAction::ParticipantAdded(participant) => {
                let list = self.event.participants.get_or_insert_with(Vec::new);
                if !list.iter().any(|p| p.id == participant.id) {
                    list.push(participant);
                }
                self.sync_count();
            }
            ViewAction::ParticipantRemoved(user_id) => {
                let list = self.event.participants.get_or_insert_with(Vec::new);
                list.retain(|p| p.id != user_id);
                self.sync_count();
            }
            ViewAction::ToggleSettled(token) => {
                if self.in_flight == Some(token) {
                    self.busy = false;
                    self.in_flight = None;
                }
            }
            ViewAction::Replaced(event) => {
                self.event = event;
                self.busy = false;
                self.in_flight = None;
            }
            ViewAction::Unmounted => {
                self.mounted = false;
                self.busy = false;
                self.in_flight = None;
            }
        }
    }

    fn sync_count(&mut self) {
        let len = self.event.participants.as_ref().map_or(0, Vec::len);
        self.event.participant_count = Some(len as u64);
    }
}

#[cfg(test)]
#[path = "tests/view_state_tests.rs"]
mod tests;
