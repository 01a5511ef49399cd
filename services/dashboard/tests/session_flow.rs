
use std::sync::Arc;
use std::time::Duration;

use fleet_dashboard::client::FleetClient;
use fleet_dashboard::controller::OverrideController;
use fleet_dashboard::input::Command;
use fleet_dashboard::session::Session;
use fleet_view::Variant;
use harness::{snapshot, test_config, RecordingSurface};
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn make_session(base_url: &str) -> (Session<RecordingSurface>, mpsc::Receiver<()>) {
    let config = test_config(base_url, Variant::Operator);
    let client = Arc::new(FleetClient::new(&config).unwrap());
    let (repoll_tx, repoll_rx) = mpsc::channel(4);
    let (events_tx, _events_rx) = mpsc::channel(4);
    let controller = OverrideController::new(Arc::clone(&client), repoll_tx);
    let session = Session::new(
        Variant::Operator,
        config.join_port,
        RecordingSurface::new(),
        controller,
        client,
        events_tx,
    );
    (session, repoll_rx)
}

#[tokio::test]
async fn stale_poll_responses_are_dropped() {
    let (mut session, _repoll) = make_session("http://localhost:9");

    session.apply_batch(2, vec![snapshot("worker-1", Some(45), false)]);
    assert!(session.registry().contains("worker-1"));

    // An older in-flight response lands after a newer one.
    session.apply_batch(1, vec![snapshot("worker-9", Some(10), false)]);

    assert!(session.registry().contains("worker-1"));
    assert!(!session.registry().contains("worker-9"));
    assert_eq!(session.view_count(), 1);
}

#[tokio::test]
async fn equal_sequence_reapplies_idempotently() {
    let (mut session, _repoll) = make_session("http://localhost:9");

    let batch = vec![snapshot("worker-1", Some(45), false)];
    session.apply_batch(1, batch.clone());
    session.apply_batch(1, batch);

    assert_eq!(session.view_count(), 1);
}

#[tokio::test]
async fn start_notice_persists_until_instances_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/startup"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let (mut session, _repoll) = make_session(&server.uri());

    session.handle_command(Command::StartFleet);
    assert_eq!(session.notices().active_text(), Some("Fleet starting..."));

    // Empty fleet keeps the notice up.
    session.apply_batch(1, Vec::new());
    assert!(session.notices().is_active());

    session.apply_batch(2, vec![snapshot("worker-1", Some(5), false)]);
    assert!(!session.notices().is_active());
}

#[tokio::test]
async fn override_for_vanished_host_is_discarded() {
    let (mut session, mut repoll) = make_session("http://localhost:9");

    session.apply_batch(1, vec![snapshot("worker-1", Some(45), false)]);
    session.handle_command(Command::ForceSet {
        host: "worker-gone".to_string(),
        load: 50,
    });

    // No command was posted, so no follow-up poll was requested.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(repoll.try_recv().is_err());
}

#[tokio::test]
async fn override_completion_requests_follow_up_poll() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/load"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (mut session, mut repoll) = make_session(&server.uri());

    session.apply_batch(1, vec![snapshot("worker-1", Some(45), false)]);
    session.handle_command(Command::ForceSet {
        host: "worker-1".to_string(),
        load: 50,
    });

    // The spawned command completes and schedules exactly one repoll.
    tokio::time::timeout(Duration::from_secs(2), repoll.recv())
        .await
        .expect("no repoll requested")
        .expect("repoll channel closed");
}

#[tokio::test]
async fn failed_override_still_requests_follow_up_poll() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/load"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (mut session, mut repoll) = make_session(&server.uri());

    session.apply_batch(1, vec![snapshot("worker-1", Some(45), false)]);
    session.handle_command(Command::Reset {
        host: "worker-1".to_string(),
    });

    tokio::time::timeout(Duration::from_secs(2), repoll.recv())
        .await
        .expect("no repoll requested")
        .expect("repoll channel closed");

    // The registry is untouched; the next poll is the source of truth.
    assert!(session.registry().contains("worker-1"));
}
