
use fleet_dashboard::client::FleetClient;
use fleet_model::OverrideCommand;
use fleet_view::Variant;
use harness::test_config;
use serde_json::json;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetch_decodes_batch_and_drops_unkeyed_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"host": "worker-1", "ipaddress": "10.0.0.4", "status": "RUNNING", "load": 45, "force_set": false},
            {"ipaddress": "10.0.0.5", "status": "RUNNING", "load": 10},
            {"host": "worker-2", "ipaddress": "10.0.0.6", "status": "STAGING"},
        ])))
        .mount(&server)
        .await;

    let client = FleetClient::new(&test_config(&server.uri(), Variant::Operator)).unwrap();
    let snapshots = client.fetch_snapshots().await.unwrap();

    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].host, "worker-1");
    assert_eq!(snapshots[0].load, Some(45));
    assert_eq!(snapshots[1].host, "worker-2");
    assert!(snapshots[1].load.is_none());
}

#[tokio::test]
async fn player_variant_polls_its_own_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats-user.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = FleetClient::new(&test_config(&server.uri(), Variant::Player)).unwrap();
    let snapshots = client.fetch_snapshots().await.unwrap();
    assert!(snapshots.is_empty());
}

#[tokio::test]
async fn fetch_maps_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats.json"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = FleetClient::new(&test_config(&server.uri(), Variant::Operator)).unwrap();
    let err = client.fetch_snapshots().await.unwrap_err();
    assert!(err.to_string().contains("502"));
}

#[tokio::test]
async fn override_posts_exact_form_encoding() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/load"))
        .and(body_string("name=worker-1&load=40&force=1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = FleetClient::new(&test_config(&server.uri(), Variant::Operator)).unwrap();
    client
        .send_override(&OverrideCommand::force_set("worker-1", 40))
        .await
        .unwrap();
}

#[tokio::test]
async fn reset_form_omits_load() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/load"))
        .and(body_string("name=worker-1&force=0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = FleetClient::new(&test_config(&server.uri(), Variant::Operator)).unwrap();
    client
        .send_override(&OverrideCommand::reset("worker-1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn lifecycle_triggers_hit_their_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/startup"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/teardown"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = FleetClient::new(&test_config(&server.uri(), Variant::Operator)).unwrap();
    client.start_fleet().await.unwrap();
    client.stop_fleet().await.unwrap();
}

#[tokio::test]
async fn join_lookup_distinguishes_no_capacity_from_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/getip.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = FleetClient::new(&test_config(&server.uri(), Variant::Player)).unwrap();
    let target = client.fetch_join_target().await.unwrap();
    assert!(!target.has_capacity());

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/getip.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ipaddress": "10.0.0.9"})))
        .mount(&server)
        .await;

    let target = client.fetch_join_target().await.unwrap();
    assert_eq!(target.ipaddress.as_deref(), Some("10.0.0.9"));
}
