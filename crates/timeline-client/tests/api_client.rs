//! ApiClient against a mock server

use pretty_assertions::assert_eq;
use serde_json::json;
use timeline_client::{ApiClient, ClientConfig, DeleteError, Deleter, FetchError, RecordFetcher};
use timeline_types::{EditRecord, ExperimentRecord, FieldSet, ItemId, ItemKind, Record};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::new().with_base_url(server.uri())).unwrap()
}

fn id(raw: &str) -> ItemId {
    ItemId::new(raw).unwrap()
}

#[tokio::test]
async fn fetches_edit_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/edit/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "curr": {"title": "A", "description": "d", "ingredients": "i", "instructions": "s"},
            "prev": {"title": "B", "description": "d", "ingredients": "i", "instructions": "s"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client_for(&server).fetch(ItemKind::Edit, &id("5")).await.unwrap();

    assert_eq!(
        record,
        Record::Edit(EditRecord::new(
            FieldSet::new("A", "d", "i", "s"),
            FieldSet::new("B", "d", "i", "s"),
        ))
    );
}

#[tokio::test]
async fn creation_edit_reads_edit_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/edit/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "curr": {"title": "Bread", "description": null, "ingredients": "flour", "instructions": "bake"},
            "prev": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client_for(&server)
        .fetch(ItemKind::CreationEdit, &id("1"))
        .await
        .unwrap();

    assert_eq!(
        record,
        Record::Edit(EditRecord::creation(FieldSet::new("Bread", "", "flour", "bake")))
    );
}

#[tokio::test]
async fn fetches_experiment_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiment/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "commit_msg": "less salt",
            "commit_date": "Tue, 03 Jan 2023",
            "notes": "better"
        })))
        .mount(&server)
        .await;

    let record = client_for(&server)
        .fetch(ItemKind::Experiment, &id("9"))
        .await
        .unwrap();

    assert_eq!(
        record,
        Record::Experiment(ExperimentRecord::new("less salt", "Tue, 03 Jan 2023", "better"))
    );
}

#[tokio::test]
async fn sends_bearer_token_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiment/2"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "commit_msg": "m", "commit_date": "d", "notes": "n"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(
        ClientConfig::new()
            .with_base_url(server.uri())
            .with_bearer_token("s3cret"),
    )
    .unwrap();

    assert!(client.fetch(ItemKind::Experiment, &id("2")).await.is_ok());
}

#[tokio::test]
async fn non_success_status_is_a_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/edit/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Not Found"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(ItemKind::Edit, &id("404"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, FetchError::Status { message: Some(ref m), .. } if m == "Not Found"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/edit/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(ItemKind::Edit, &id("3"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    let client = ApiClient::new(
        ClientConfig::new()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout_secs(2),
    )
    .unwrap();

    let err = client.fetch(ItemKind::Edit, &id("1")).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn delete_succeeds_on_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/experiment/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Experiment successfully deleted"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete("/api/experiment/4")
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/edit/1"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "Conflict",
            "message": "Cannot delete creation edit"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).delete("/api/edit/1").await.unwrap_err();

    assert_eq!(
        err,
        DeleteError::Status {
            url: format!("{}/api/edit/1", server.uri()),
            status: 409,
            message: Some("Cannot delete creation edit".to_string()),
        }
    );
}
