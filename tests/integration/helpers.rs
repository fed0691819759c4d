//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use wedplan_core::config::AppConfig;
use wedplan_seating::MemorySeatLedger;
use wedplan_service::SeatingAudit;

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
}

/// A decoded test response
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// JSON body, `Value::Null` when empty
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error` code of an error envelope.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application over a fresh in-memory ledger
    pub fn new() -> Self {
        let config = AppConfig::from_toml(include_str!("../../config/test.toml"))
            .expect("Failed to load test config");

        let state = wedplan_api::AppState::new(
            config,
            Arc::new(MemorySeatLedger::new()),
            "memory",
            SeatingAudit::log_only(),
        );

        Self {
            router: wedplan_api::build_app(state),
        }
    }

    /// Send a request and decode the JSON response
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).expect("Failed to encode body"))
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("Failed to build request"))
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response is not JSON")
        };

        TestResponse { status, body }
    }

    /// Create a table and return its ID
    pub async fn create_table(&self, name: &str, seats: i32) -> String {
        let response = self
            .request(
                "POST",
                "/api/tables",
                Some(serde_json::json!({ "name": name, "seat_count": seats })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.data()["id"].as_str().unwrap().to_string()
    }

    /// Create a guest with the given RSVP status and return its ID
    pub async fn create_guest(&self, name: &str, rsvp: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/guests",
                Some(serde_json::json!({ "name": name, "rsvp_status": rsvp })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.data()["id"].as_str().unwrap().to_string()
    }

    /// Assign a guest to a specific seat
    pub async fn assign_seat(&self, guest: &str, table: &str, seat: i32) -> TestResponse {
        self.request(
            "POST",
            "/api/seating/assign-seat",
            Some(serde_json::json!({
                "guest_id": guest,
                "table_id": table,
                "seat_index": seat,
            })),
        )
        .await
    }

    /// Assign a guest to the first free seat of a table
    pub async fn assign_table(&self, guest: &str, table: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/seating/assign",
            Some(serde_json::json!({ "guest_id": guest, "table_id": table })),
        )
        .await
    }
}
