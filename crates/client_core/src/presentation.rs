//! Layout-agnostic view model for the event details screen and the two
//! text layouts built from it.

use std::fmt::Write as _;

use shared::domain::{Participant, UserId};

use crate::view_state::EventViewState;

pub const EMPTY_ROSTER_NOTICE: &str = "No participants yet. Be the first to join!";
pub const LOADING_LABEL: &str = "Loading...";
pub const JOIN_LABEL: &str = "Join Event";
pub const LEAVE_LABEL: &str = "Leave Event";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Desktop,
    Mobile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub initial: char,
    pub name: String,
    pub is_viewer: bool,
}

impl ParticipantRow {
    fn new(participant: &Participant, viewer: Option<UserId>) -> Self {
        let name = participant.name.clone().unwrap_or_default();
        let initial = name
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('U');
        Self {
            initial,
            name,
            is_viewer: viewer == Some(participant.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetailsView {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub category: String,
    pub image_path: Option<String>,
    pub participant_count: u64,
    pub participants: Vec<ParticipantRow>,
    pub action_label: &'static str,
    pub join_enabled: bool,
    pub owner_actions: bool,
}

impl EventDetailsView {
    /// `viewer` is the authenticated user only; a session that carries a user
    /// record without being authenticated renders as anonymous.
    pub fn from_state(state: &EventViewState, viewer: Option<UserId>, is_owner: bool) -> Self {
        let event = &state.event;
        let is_member = viewer.is_some_and(|id| event.has_participant(id));
        let action_label = if state.busy {
            LOADING_LABEL
        } else if is_member {
            LEAVE_LABEL
        } else {
            JOIN_LABEL
        };

        Self {
            title: event.event_title.clone(),
            description: event.event_description.clone(),
            location: event.event_location.clone(),
            date: event.event_date.clone(),
            category: event.event_category.clone(),
            image_path: event.image_path.clone(),
            participant_count: event.displayed_participant_count(),
            participants: event
                .participants
                .iter()
                .flatten()
                .map(|p| ParticipantRow::new(p, viewer))
                .collect(),
            action_label,
            join_enabled: !state.busy,
            owner_actions: is_owner,
        }
    }
}

pub fn render(view: &EventDetailsView, layout: Layout) -> String {
    let mut out = String::new();
    match layout {
        Layout::Desktop => {
            if let Some(image) = &view.image_path {
                let _ = writeln!(out, "[image: {image}]");
            }
            let _ = writeln!(out, "{}", view.title);
            let _ = writeln!(
                out,
                "Location: {} | Date: {} | Category: {}",
                view.location, view.date, view.category
            );
            let _ = writeln!(out, "\nDescription\n{}", view.description);
        }
        Layout::Mobile => {
            if let Some(image) = &view.image_path {
                let _ = writeln!(out, "[image: {image}]");
            }
            let _ = writeln!(out, "{}", view.title);
            let _ = writeln!(out, "{}", view.description);
            if !view.location.is_empty() {
                let _ = writeln!(
                    out,
                    "{} · {} · {}",
                    view.location, view.date, view.category
                );
            }
        }
    }

    let _ = writeln!(out, "\nParticipants ({})", view.participant_count);
    if view.participants.is_empty() {
        let _ = writeln!(out, "  {EMPTY_ROSTER_NOTICE}");
    }
    for row in &view.participants {
        let badge = if row.is_viewer { " (You)" } else { "" };
        let _ = writeln!(out, "  [{}] {}{badge}", row.initial, row.name);
    }

    out.push('\n');
    if view.owner_actions {
        out.push_str("[Delete] [Edit Event] ");
    }
    if view.join_enabled {
        let _ = writeln!(out, "[{}]", view.action_label);
    } else {
        let _ = writeln!(out, "[{}] (disabled)", view.action_label);
    }
    out
}

#[cfg(test)]
#[path = "tests/presentation_tests.rs"]
mod tests;
