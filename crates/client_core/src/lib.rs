//! Client-side core of the event details view: participation toggling,
//! event deletion, and the local state they reconcile.

pub mod api;
pub mod collaborators;
pub mod config;
pub mod controller;
pub mod deletion;
pub mod error;
pub mod participation;
pub mod presentation;
pub mod view_state;

pub use api::{EventsApi, HttpEventsApi};
pub use collaborators::{
    DetailViewHost, EventRegistry, InMemoryEventRegistry, LoggingNavigator, Navigator, NoopHost,
};
pub use config::{load_settings, ClientSettings};
pub use controller::{Collaborators, EventDetailsController};
pub use deletion::{DeleteOutcome, EventDeletion};
pub use error::ClientError;
pub use participation::{ParticipationSynchronizer, RefusalReason, ToggleOutcome};
pub use presentation::{render, EventDetailsView, Layout};
pub use view_state::{EventViewState, RequestToken, ViewAction};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
