//! Integration tests for the guest list.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["ledger"], "memory");
}

#[tokio::test]
async fn test_create_and_fetch_guest() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/guests",
            Some(serde_json::json!({
                "name": "  Grace Hopper ",
                "email": "grace@example.com",
                "dietary_notes": "vegetarian",
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["name"], "Grace Hopper");
    assert_eq!(response.data()["rsvp_status"], "pending");

    let id = response.data()["id"].as_str().unwrap().to_string();
    let response = app.request("GET", &format!("/api/guests/{id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["dietary_notes"], "vegetarian");
}

#[tokio::test]
async fn test_create_guest_validation() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/guests", Some(serde_json::json!({ "name": "   " })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/guests",
            Some(serde_json::json!({ "name": "Bad Mail", "email": "nope" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/guests",
            Some(serde_json::json!({ "name": "Odd", "rsvp_status": "maybe" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rsvp_update_and_summary() {
    let app = TestApp::new();
    let a = app.create_guest("Guest A", "pending").await;
    let b = app.create_guest("Guest B", "pending").await;
    app.create_guest("Guest C", "pending").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/guests/{a}/rsvp"),
            Some(serde_json::json!({ "rsvp_status": "confirmed" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["rsvp_status"], "confirmed");

    app.request(
        "PUT",
        &format!("/api/guests/{b}/rsvp"),
        Some(serde_json::json!({ "rsvp_status": "Declined" })),
    )
    .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/guests/{b}/rsvp"),
            Some(serde_json::json!({ "rsvp_status": "maybe" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.request("GET", "/api/guests/summary", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["pending"], 1);
    assert_eq!(response.data()["confirmed"], 1);
    assert_eq!(response.data()["declined"], 1);
    assert_eq!(response.data()["total"], 3);
}

#[tokio::test]
async fn test_declining_keeps_existing_seat() {
    let app = TestApp::new();
    let table = app.create_table("Table 9", 4).await;
    let guest = app.create_guest("Late Decline", "confirmed").await;
    app.assign_seat(&guest, &table, 1).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/guests/{guest}/rsvp"),
            Some(serde_json::json!({ "rsvp_status": "declined" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["seat_index"], 1);
}

#[tokio::test]
async fn test_delete_guest() {
    let app = TestApp::new();
    let guest = app.create_guest("Short Stay", "pending").await;

    let response = app
        .request("DELETE", &format!("/api/guests/{guest}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/guests/{guest}"), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");
}
