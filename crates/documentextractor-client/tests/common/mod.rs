//! Shared helpers for the integration tests.

#![allow(dead_code)]

use documentextractor_client::{ExtractorClient, ExtractorConfig};
use serde_json::{Value, json};
use uuid::Uuid;
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";

/// Builds a client pointed at the mock server.
pub fn client(server: &MockServer) -> ExtractorClient {
    ExtractorClient::new(ExtractorConfig::new(server.uri(), API_KEY))
        .expect("client should build against the mock server")
}

pub fn file_json(id: Uuid, filename: &str, mime_type: &str, size: u64) -> Value {
    json!({
        "id": id,
        "filename": filename,
        "mime_type": mime_type,
        "size": size,
        "created_at": "2024-05-01T10:30:00Z"
    })
}

pub fn workflow_json(id: Uuid, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "Extract invoice details",
        "extraction_schema": {
            "name": "Invoice Schema",
            "type": "Text",
            "is_array": false,
            "children": [
                {"key": "invoice_number", "name": "Invoice Number", "type": "Text", "is_array": false}
            ]
        },
        "created_at": "2024-05-01T10:30:00",
        "updated_at": "2024-05-01T10:30:00"
    })
}

pub fn run_json(workflow_id: Uuid, run_num: u32, file_ids: &[Uuid], status: &str) -> Value {
    json!({
        "run_num": run_num,
        "workflow_id": workflow_id,
        "file_ids": file_ids,
        "status": status,
        "created_at": "2024-05-01T10:31:00Z"
    })
}
