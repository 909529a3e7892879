//! Subscription operation tests: paths, bodies, query filters, pre-flight
//! validation, and the classification cascade.

use sellhub_api::{Environment, QueryParam};
use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn list_subscriptions_returns_the_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"subscriber_code": "s1", "status": "ACTIVE"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let envelope = client.list_subscriptions(&[]).await.unwrap();

    assert_eq!(envelope.http_code, 200);
    assert_eq!(
        envelope.body.get("items").unwrap()[0]["subscriber_code"],
        "s1"
    );
    assert!(envelope.info.is_none());
}

#[tokio::test]
async fn list_subscriptions_encodes_filters_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .and(query_param("status", "ACTIVE"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let filters = vec![
        QueryParam::new("status", "ACTIVE"),
        // Literal zero survives the emptiness rule.
        QueryParam::new("page", 0),
        // Empty value is dropped.
        QueryParam::new("plan", ""),
    ];
    client.list_subscriptions(&filters).await.unwrap();

    let received = &server.received_requests().await.unwrap()[0];
    let query = received.url.query().unwrap();
    assert_eq!(query, "status=ACTIVE&page=0");
}

#[tokio::test]
async fn list_purchases_hits_the_subscriber_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions/sub-1/purchases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"transaction": "tx-9"}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let envelope = client.list_purchases("sub-1").await.unwrap();
    assert_eq!(envelope.http_code, 200);
}

#[tokio::test]
async fn list_purchases_requires_a_code() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let client = common::client_for(&server);
    let err = client.list_purchases("").await.unwrap_err();

    assert!(err.is_validation());
    server.verify().await;
}

#[tokio::test]
async fn cancel_subscription_posts_send_mail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/subscriptions/sub-1/cancel"))
        .and(body_json(json!({"send_mail": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "CANCELLED"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    client.cancel_subscription("sub-1", true).await.unwrap();
}

#[tokio::test]
async fn cancel_subscriptions_posts_the_code_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/subscriptions/cancel"))
        .and(body_json(json!({
            "subscriber_code": ["s1", "s2"],
            "send_mail": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "CANCELLED"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    client
        .cancel_subscriptions(&["s1", "s2"], false)
        .await
        .unwrap();
}

#[tokio::test]
async fn reactivate_subscription_posts_charge() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/subscriptions/sub-1/reactivate"))
        .and(body_json(json!({"charge": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ACTIVE"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    client.reactivate_subscription("sub-1", true).await.unwrap();
}

#[tokio::test]
async fn reactivate_subscriptions_posts_the_code_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/subscriptions/reactivate"))
        .and(body_json(json!({
            "subscriber_code": ["s1"],
            "charge": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ACTIVE"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    client
        .reactivate_subscriptions(&["s1"], false)
        .await
        .unwrap();
}

#[tokio::test]
async fn change_billing_due_day_patches_the_subscription() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/subscriptions/sub-1"))
        .and(body_json(json!({"due_day": 12})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"due_day": 12})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    client.change_billing_due_day("sub-1", 12).await.unwrap();
}

#[tokio::test]
async fn change_billing_due_day_validates_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let client = common::client_for(&server);

    for due_day in [0, 32] {
        let err = client
            .change_billing_due_day("sub-1", due_day)
            .await
            .unwrap_err();
        assert!(err.is_validation(), "due_day={due_day} must fail fast");
    }

    server.verify().await;
}

#[tokio::test]
async fn message_field_becomes_the_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = client.list_subscriptions(&[]).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.api_message(), Some("not found"));
}

#[tokio::test]
async fn errors_list_is_joined_with_line_breaks() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/subscriptions/sub-1"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": ["due_day already set", "billing cycle closed"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = client
        .change_billing_due_day("sub-1", 15)
        .await
        .unwrap_err();

    assert_eq!(
        err.api_message(),
        Some("due_day already set\nbilling cycle closed")
    );
}

#[tokio::test]
async fn unrecognized_error_shape_dumps_the_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = client.list_subscriptions(&[]).await.unwrap_err();

    let message = err.api_message().unwrap();
    assert!(message.contains("\"httpCode\":500"));
    assert!(message.contains("upstream exploded"));
}

#[tokio::test]
async fn decode_mode_off_keeps_200_bodies_raw() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"items":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    client.set_decode_mode(false);

    let envelope = client.list_subscriptions(&[]).await.unwrap();
    assert_eq!(envelope.body.as_raw(), Some(r#"{"items":[]}"#));
}

#[tokio::test]
async fn decode_mode_off_still_decodes_error_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    client.set_decode_mode(false);

    // The classifier sees the decoded body, so the message cascade applies.
    let err = client.list_subscriptions(&[]).await.unwrap_err();
    assert_eq!(err.api_message(), Some("boom"));
}

#[tokio::test]
async fn debug_mode_attaches_diagnostics() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    client.set_debug(true);

    let envelope = client.list_subscriptions(&[]).await.unwrap();
    let info = envelope.info.unwrap();
    assert_eq!(info["method"], "GET");
    assert_eq!(info["status"], 200);
}

#[tokio::test]
async fn upload_mode_flattens_the_bulk_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/subscriptions/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    client.set_upload_mode(true);
    client
        .cancel_subscriptions(&["s1", "s2"], true)
        .await
        .unwrap();

    let received = &server.received_requests().await.unwrap()[0];
    let content_type = received.headers.get("content-type").unwrap();
    assert!(content_type
        .to_str()
        .unwrap()
        .starts_with("multipart/form-data"));

    let payload = String::from_utf8_lossy(&received.body).to_string();
    assert!(payload.contains("name=\"subscriber_code[0]\""));
    assert!(payload.contains("name=\"send_mail\""));
}

#[tokio::test]
async fn environment_code_selects_the_sandbox_base() {
    let production = MockServer::start().await;
    let sandbox = MockServer::start().await;

    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&production).await;
    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&sandbox)
        .await;

    let client = common::client_with_endpoints(sellhub_api::client::Endpoints {
        production: production.uri(),
        sandbox: sandbox.uri(),
        auth: production.uri(),
    });

    client.set_environment_code(2);
    assert_eq!(client.environment(), Environment::Sandbox);

    // An unknown code leaves sandbox selected.
    client.set_environment_code(9);
    assert_eq!(client.environment(), Environment::Sandbox);

    client.list_subscriptions(&[]).await.unwrap();
    production.verify().await;
}
