use super::*;
use crate::{
    collaborators::NoopHost,
    presentation::{JOIN_LABEL, LEAVE_LABEL},
    test_support::{
        collaborators, http_api, mount, participant, sample_event, signed_in,
        spawn_events_server, user_a_b, Recorder,
    },
    RefusalReason,
};

#[test]
fn mounting_without_event_reports_not_found() {
    let recorder = Arc::new(Recorder::default());
    let result = EventDetailsController::mount(
        None,
        false,
        http_api("http://127.0.0.1:1"),
        collaborators(&recorder),
        &ClientSettings::default(),
    );
    let Err(err) = result else {
        panic!("mount must fail without an event");
    };
    assert!(matches!(err, ClientError::MissingEvent));
    assert_eq!(err.to_string(), "Event not found");
}

#[tokio::test]
async fn view_follows_membership() {
    let (server_url, _server) = spawn_events_server().await;
    let (controller, _) = mount(&server_url, sample_event(1, vec![]), false);
    let session = signed_in();

    assert_eq!(controller.view(&session).action_label, JOIN_LABEL);
    assert!(controller.toggle(&session).await.is_applied());
    let view = controller.view(&session);
    assert_eq!(view.action_label, LEAVE_LABEL);
    assert_eq!(view.participant_count, 1);
    assert!(view.participants[0].is_viewer);
}

#[tokio::test]
async fn unauthenticated_session_renders_as_anonymous() {
    let (server_url, _server) = spawn_events_server().await;
    let (controller, _) = mount(&server_url, sample_event(1, vec![participant(9, "A B")]), false);
    let half_signed_in = Session {
        is_authenticated: false,
        user: Some(user_a_b()),
    };

    let view = controller.view(&half_signed_in);
    assert_eq!(view.action_label, JOIN_LABEL);
    assert!(!view.participants[0].is_viewer);
    assert_eq!(controller.view(&signed_in()).action_label, LEAVE_LABEL);
}

#[tokio::test]
async fn close_notifies_host() {
    let (server_url, _server) = spawn_events_server().await;
    let (controller, recorder) = mount(&server_url, sample_event(1, vec![]), false);
    controller.close();
    assert_eq!(recorder.closes(), 1);
    assert!(recorder.removed().is_empty());
}

#[tokio::test]
async fn edit_is_owner_only() {
    let (server_url, _server) = spawn_events_server().await;
    let (owner, owner_log) = mount(&server_url, sample_event(6, vec![]), true);
    owner.edit().expect("owner may edit");
    assert_eq!(owner_log.visited(), vec!["/edit_event/6".to_string()]);

    let (guest, guest_log) = mount(&server_url, sample_event(6, vec![]), false);
    assert!(matches!(guest.edit(), Err(ClientError::NotOwner)));
    assert!(guest_log.visited().is_empty());
}

#[tokio::test]
async fn reconcile_replaces_local_copy_and_frees_toggle() {
    let (server_url, server) = spawn_events_server().await;
    server.hold_patches().await;
    let (controller, _) = mount(&server_url, sample_event(1, vec![]), false);
    let controller = Arc::new(controller);

    let pending = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.toggle(&signed_in()).await })
    };
    server.wait_for_patches(1).await;

    let authoritative = sample_event(1, vec![participant(9, "A B"), participant(2, "Ana")]);
    controller.reconcile(authoritative.clone());
    server.release_patch();

    let outcome = pending.await.expect("join");
    assert!(matches!(outcome, ToggleOutcome::Stale), "{outcome:?}");
    assert_eq!(controller.snapshot().event, authoritative);
    assert!(!controller.snapshot().busy);
}

#[tokio::test]
async fn unmounted_controller_refuses_toggle_without_request() {
    let (server_url, server) = spawn_events_server().await;
    let recorder = Arc::new(Recorder::default());
    let controller = EventDetailsController::mount(
        Some(sample_event(1, vec![])),
        false,
        http_api(&server_url),
        Collaborators {
            registry: recorder.clone(),
            navigator: recorder.clone(),
            host: Arc::new(NoopHost),
        },
        &ClientSettings::with_api_base_url(&server_url),
    )
    .expect("mount");

    controller.unmount();
    assert!(matches!(
        controller.toggle(&signed_in()).await,
        ToggleOutcome::Refused(RefusalReason::Unmounted)
    ));
    assert!(server.patches().await.is_empty());
}
