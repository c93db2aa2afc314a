//! Integration tests for the JSON-RPC client against a fake Zabbix frontend.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{start_fake_zabbix, zabbix_config, FakeZabbix};
use zabbix_map::config::model::AuthMode;
use zabbix_map::error::ZabbixMapError;
use zabbix_map::server::build_http_client;
use zabbix_map::zabbix::model::HostStatus;
use zabbix_map::zabbix::{HostSource, ZabbixClient};

fn client(endpoint: &str, auth_mode: AuthMode, timeout_ms: u64) -> ZabbixClient {
    ZabbixClient::from_config(
        &zabbix_config(endpoint, auth_mode, timeout_ms),
        build_http_client(true),
    )
    .unwrap()
}

#[tokio::test]
async fn hosts_are_fetched_and_decoded() {
    let fake = start_fake_zabbix(FakeZabbix::default()).await;
    let client = client(&fake.endpoint(), AuthMode::Envelope, 2_000);

    let hosts = client.hosts().await.unwrap();
    assert_eq!(hosts.len(), 3);

    let router = &hosts[0];
    assert_eq!(router.host_id, "10101");
    assert_eq!(router.groups[0].name, "Routers");
    assert_eq!(router.available.as_deref(), Some("1"));
    assert_eq!(router.inventory.location_lat.as_deref(), Some("-23.55"));

    assert_eq!(hosts[1].status, HostStatus::Disabled);
    assert!(hosts[2].inventory.location.is_none());
    assert_eq!(hosts[2].available.as_deref(), Some("0"));

    fake.stop();
}

#[tokio::test]
async fn envelope_mode_sends_auth_member() {
    let fake = start_fake_zabbix(FakeZabbix::default()).await;
    let client = client(&fake.endpoint(), AuthMode::Envelope, 2_000);
    client.hosts().await.unwrap();

    let seen = fake.seen();
    assert_eq!(seen.len(), 2);

    let version_call = &seen[0];
    assert_eq!(version_call.body["method"], "apiinfo.version");
    assert!(version_call.body.get("auth").is_none());
    assert_eq!(version_call.content_type.as_deref(), Some("application/json-rpc"));

    let host_call = &seen[1];
    assert_eq!(host_call.body["jsonrpc"], "2.0");
    assert_eq!(host_call.body["auth"], "test-token");
    assert!(host_call.authorization.is_none());
    assert_eq!(host_call.body["params"]["output"], "extend");
    assert!(host_call.body["params"]["selectHostGroups"].is_array());
    assert!(host_call.body["params"].get("selectGroups").is_none());
    assert_ne!(version_call.body["id"], host_call.body["id"]);

    fake.stop();
}

#[tokio::test]
async fn header_mode_sends_bearer_token() {
    let fake = start_fake_zabbix(FakeZabbix::default()).await;
    let client = client(&fake.endpoint(), AuthMode::Header, 2_000);
    client.hosts().await.unwrap();

    let seen = fake.seen();
    assert!(seen[0].authorization.is_none());
    let host_call = &seen[1];
    assert_eq!(host_call.authorization.as_deref(), Some("Bearer test-token"));
    assert!(host_call.body.get("auth").is_none());

    fake.stop();
}

#[tokio::test]
async fn old_frontends_get_select_groups() {
    let fake = start_fake_zabbix(FakeZabbix {
        version: "6.0.30",
        ..FakeZabbix::default()
    })
    .await;
    let client = client(&fake.endpoint(), AuthMode::Envelope, 2_000);
    client.hosts().await.unwrap();

    let params = &fake.seen()[1].body["params"];
    assert!(params["selectGroups"].is_array());
    assert!(params.get("selectHostGroups").is_none());

    fake.stop();
}

#[tokio::test]
async fn version_is_cached() {
    let fake = start_fake_zabbix(FakeZabbix::default()).await;
    let client = client(&fake.endpoint(), AuthMode::Envelope, 2_000);

    assert_eq!(client.api_version().await.unwrap(), "7.0.5");
    client.hosts().await.unwrap();
    client.hosts().await.unwrap();

    let version_calls = fake
        .seen()
        .iter()
        .filter(|s| s.body["method"] == "apiinfo.version")
        .count();
    assert_eq!(version_calls, 1);

    fake.stop();
}

#[tokio::test]
async fn host_count_parses_string_result() {
    let fake = start_fake_zabbix(FakeZabbix::default()).await;
    let client = client(&fake.endpoint(), AuthMode::Envelope, 2_000);
    assert_eq!(client.host_count().await.unwrap(), 3);
    fake.stop();
}

#[tokio::test]
async fn rpc_error_object_is_reported() {
    let fake = start_fake_zabbix(FakeZabbix {
        reject_token: true,
        ..FakeZabbix::default()
    })
    .await;
    let client = client(&fake.endpoint(), AuthMode::Envelope, 2_000);

    let err = client.hosts().await.unwrap_err();
    match err {
        ZabbixMapError::ZabbixRpc { code, ref data, .. } => {
            assert_eq!(code, -32602);
            assert_eq!(data, "Not authorized.");
        }
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.kind(), "rpc_error");

    fake.stop();
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let fake = start_fake_zabbix(FakeZabbix {
        fail_status: Some(StatusCode::INTERNAL_SERVER_ERROR),
        ..FakeZabbix::default()
    })
    .await;
    let client = client(&fake.endpoint(), AuthMode::Envelope, 2_000);

    let err = client.api_version().await.unwrap_err();
    assert!(matches!(
        err,
        ZabbixMapError::ZabbixStatus(status) if status == StatusCode::INTERNAL_SERVER_ERROR
    ));

    fake.stop();
}

#[tokio::test]
async fn envelope_without_result_is_malformed() {
    let fake = start_fake_zabbix(FakeZabbix {
        drop_result: true,
        ..FakeZabbix::default()
    })
    .await;
    let client = client(&fake.endpoint(), AuthMode::Envelope, 2_000);

    let err = client.api_version().await.unwrap_err();
    assert_eq!(err.kind(), "malformed_response");

    fake.stop();
}

#[tokio::test]
async fn slow_frontend_times_out() {
    let fake = start_fake_zabbix(FakeZabbix {
        delay: Some(Duration::from_secs(3)),
        ..FakeZabbix::default()
    })
    .await;
    let client = client(&fake.endpoint(), AuthMode::Envelope, 150);

    let started = std::time::Instant::now();
    let err = client.api_version().await.unwrap_err();
    assert!(matches!(err, ZabbixMapError::ZabbixTimeout { timeout_ms: 150 }));
    assert!(started.elapsed() < Duration::from_secs(2));

    fake.stop();
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(
        &format!("http://{addr}/api_jsonrpc.php"),
        AuthMode::Envelope,
        2_000,
    );
    let err = client.api_version().await.unwrap_err();
    assert_eq!(err.kind(), "transport");
}
