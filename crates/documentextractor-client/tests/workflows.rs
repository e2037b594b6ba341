//! Integration tests for the workflows endpoint.

mod common;

use documentextractor_client::Error;
use documentextractor_client::types::{
    ExtractionSchema, ValueType, WorkflowCreate, WorkflowUpdate,
};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn invoice_workflow() -> WorkflowCreate {
    let schema = ExtractionSchema::new("Invoice Schema", ValueType::Text).with_children([
        ExtractionSchema::field("invoice_number", "Invoice Number", ValueType::Text),
        ExtractionSchema::field("total", "Total", ValueType::Number),
    ]);
    WorkflowCreate::new("Invoices", schema).with_description("Extract invoice details")
}

#[tokio::test]
async fn test_create_workflow_sends_full_payload() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/v1/workflows/"))
        .and(body_json(json!({
            "name": "Invoices",
            "description": "Extract invoice details",
            "extraction_schema": {
                "name": "Invoice Schema",
                "type": "Text",
                "is_array": false,
                "children": [
                    {"key": "invoice_number", "name": "Invoice Number", "type": "Text", "is_array": false},
                    {"key": "total", "name": "Total", "type": "Number", "is_array": false}
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(common::workflow_json(id, "Invoices")))
        .expect(1)
        .mount(&server)
        .await;

    let workflow = common::client(&server)
        .workflows()
        .create(&invoice_workflow())
        .await
        .unwrap();

    assert_eq!(workflow.id, id);
    assert_eq!(workflow.name, "Invoices");
    assert!(workflow.created_at.is_some());
}

#[tokio::test]
async fn test_list_workflows_keeps_order() {
    let server = MockServer::start().await;
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/v1/workflows/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            common::workflow_json(first, "First"),
            common::workflow_json(second, "Second"),
        ])))
        .mount(&server)
        .await;

    let workflows = common::client(&server).workflows().list().await.unwrap();
    let ids: Vec<_> = workflows.iter().map(|w| w.id).collect();
    assert_eq!(ids, [first, second]);
}

#[tokio::test]
async fn test_replace_workflow_uses_put() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("PUT"))
        .and(path(format!("/v1/workflows/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::workflow_json(id, "Invoices")))
        .expect(1)
        .mount(&server)
        .await;

    let workflow = common::client(&server)
        .workflows()
        .replace(id, &invoice_workflow())
        .await
        .unwrap();
    assert_eq!(workflow.id, id);
}

#[tokio::test]
async fn test_update_workflow_sends_only_set_fields() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("PATCH"))
        .and(path(format!("/v1/workflows/{id}")))
        .and(body_json(json!({"name": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::workflow_json(id, "Renamed")))
        .expect(1)
        .mount(&server)
        .await;

    let update = WorkflowUpdate::default().with_name("Renamed");
    let workflow = common::client(&server)
        .workflows()
        .update(id, &update)
        .await
        .unwrap();
    assert_eq!(workflow.name, "Renamed");
}

#[tokio::test]
async fn test_delete_workflow() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("DELETE"))
        .and(path(format!("/v1/workflows/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    common::client(&server).workflows().delete(id).await.unwrap();
}

#[tokio::test]
async fn test_get_with_no_content_is_invalid_response() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/v1/workflows/{id}")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let err = common::client(&server)
        .workflows()
        .get(id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_get_with_wrong_shape_is_invalid_response() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/v1/workflows/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "no id here"})))
        .mount(&server)
        .await;

    let err = common::client(&server)
        .workflows()
        .get(id)
        .await
        .unwrap_err();

    let Error::InvalidResponse { body, .. } = err else {
        panic!("expected InvalidResponse, got {err:?}");
    };
    assert!(body.unwrap().contains("no id here"));
}
