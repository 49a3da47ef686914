//! Throwaway events service for client tests.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, patch},
    Json, Router,
};
use serde_json::{json, Value};
use shared::{
    domain::{Event, EventId, Participant, Session, SessionUser, UserId},
    protocol::UpdateParticipantsRequest,
};
use tokio::{
    net::TcpListener,
    sync::{Mutex, Notify},
};

use crate::{
    api::HttpEventsApi,
    collaborators::{DetailViewHost, EventRegistry, Navigator},
    config::ClientSettings,
    controller::{Collaborators, EventDetailsController},
};

#[derive(Debug, Clone)]
pub struct RecordedPatch {
    pub event_id: i64,
    pub body: UpdateParticipantsRequest,
}

struct MockConfig {
    patch_status: StatusCode,
    patch_body: Value,
    delete_status: StatusCode,
    hold_patches: bool,
    patches: Vec<RecordedPatch>,
    deletes: Vec<i64>,
}

#[derive(Clone)]
pub struct MockEventsServer {
    inner: Arc<Mutex<MockConfig>>,
    release: Arc<Notify>,
}

impl MockEventsServer {
    pub async fn respond_to_patch(&self, status: StatusCode, body: Value) {
        let mut inner = self.inner.lock().await;
        inner.patch_status = status;
        inner.patch_body = body;
    }

    pub async fn respond_to_delete(&self, status: StatusCode) {
        self.inner.lock().await.delete_status = status;
    }

    /// Patches block until `release_patch` is called.
    pub async fn hold_patches(&self) {
        self.inner.lock().await.hold_patches = true;
    }

    pub fn release_patch(&self) {
        self.release.notify_one();
    }

    pub async fn patches(&self) -> Vec<RecordedPatch> {
        self.inner.lock().await.patches.clone()
    }

    pub async fn deletes(&self) -> Vec<i64> {
        self.inner.lock().await.deletes.clone()
    }

    pub async fn wait_for_patches(&self, count: usize) {
        for _ in 0..200 {
            if self.inner.lock().await.patches.len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("server never saw {count} patch request(s)");
    }
}

async fn handle_patch(
    State(server): State<MockEventsServer>,
    Path(event_id): Path<i64>,
    Json(body): Json<UpdateParticipantsRequest>,
) -> (StatusCode, Json<Value>) {
    let hold = {
        let mut inner = server.inner.lock().await;
        inner.patches.push(RecordedPatch { event_id, body });
        inner.hold_patches
    };
    if hold {
        server.release.notified().await;
    }
    let inner = server.inner.lock().await;
    (inner.patch_status, Json(inner.patch_body.clone()))
}

async fn handle_delete(
    State(server): State<MockEventsServer>,
    Path(event_id): Path<i64>,
) -> StatusCode {
    let mut inner = server.inner.lock().await;
    inner.deletes.push(event_id);
    inner.delete_status
}

pub async fn spawn_events_server() -> (String, MockEventsServer) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let server = MockEventsServer {
        inner: Arc::new(Mutex::new(MockConfig {
            patch_status: StatusCode::OK,
            patch_body: json!({"message": "ok"}),
            delete_status: StatusCode::OK,
            hold_patches: false,
            patches: Vec::new(),
            deletes: Vec::new(),
        })),
        release: Arc::new(Notify::new()),
    };
    let app = Router::new()
        .route("/update_participants/:event_id", patch(handle_patch))
        .route("/delete_event/:event_id", delete(handle_delete))
        .with_state(server.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), server)
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_server_url() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn http_api(server_url: &str) -> Arc<HttpEventsApi> {
    Arc::new(HttpEventsApi::new(&ClientSettings::with_api_base_url(server_url)).expect("client"))
}

#[derive(Default)]
pub struct Recorder {
    pub removed: std::sync::Mutex<Vec<EventId>>,
    pub visited: std::sync::Mutex<Vec<String>>,
    pub closes: std::sync::Mutex<u32>,
}

impl Recorder {
    pub fn removed(&self) -> Vec<EventId> {
        self.removed.lock().expect("lock").clone()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().expect("lock").clone()
    }

    pub fn closes(&self) -> u32 {
        *self.closes.lock().expect("lock")
    }
}

impl EventRegistry for Recorder {
    fn remove_event(&self, event_id: EventId) {
        self.removed.lock().expect("lock").push(event_id);
    }
}

impl Navigator for Recorder {
    fn navigate_to(&self, path: &str) {
        self.visited.lock().expect("lock").push(path.to_string());
    }
}

impl DetailViewHost for Recorder {
    fn close(&self) {
        *self.closes.lock().expect("lock") += 1;
    }
}

pub fn collaborators(recorder: &Arc<Recorder>) -> Collaborators {
    Collaborators {
        registry: recorder.clone(),
        navigator: recorder.clone(),
        host: recorder.clone(),
    }
}

pub fn mount(
    server_url: &str,
    event: Event,
    is_owner: bool,
) -> (EventDetailsController, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let controller = EventDetailsController::mount(
        Some(event),
        is_owner,
        http_api(server_url),
        collaborators(&recorder),
        &ClientSettings::with_api_base_url(server_url),
    )
    .expect("mount");
    (controller, recorder)
}

pub fn sample_event(id: i64, participants: Vec<Participant>) -> Event {
    Event {
        id: EventId(id),
        event_title: "Sunset hike".into(),
        event_description: "Meet at the trailhead.".into(),
        event_location: "Vodno".into(),
        event_date: "2026-10-20".into(),
        event_category: "Outdoors".into(),
        image_path: None,
        participant_count: Some(participants.len() as u64),
        participants: Some(participants),
    }
}

pub fn user_a_b() -> SessionUser {
    SessionUser {
        id: UserId(9),
        user_name: "A".into(),
        user_surname: "B".into(),
    }
}

pub fn signed_in() -> Session {
    Session::signed_in(user_a_b())
}

pub fn participant(id: i64, name: &str) -> Participant {
    Participant {
        id: UserId(id),
        name: Some(name.to_string()),
    }
}
