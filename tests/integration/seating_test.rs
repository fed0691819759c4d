//! Integration tests for seat assignment.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_seating_walkthrough() {
    let app = TestApp::new();
    let table = app.create_table("Table 1", 4).await;
    let ada = app.create_guest("Ada Lovelace", "confirmed").await;
    let bob = app.create_guest("Bob Stone", "pending").await;
    let cy = app.create_guest("Cy Young", "confirmed").await;

    let response = app.assign_seat(&ada, &table, 0).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["seat_index"], 0);

    let response = app.assign_table(&bob, &table).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["seat_index"], 1);

    let response = app.assign_seat(&cy, &table, 0).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "SEAT_TAKEN");
    assert_eq!(response.body["success"], false);

    let response = app.assign_seat(&cy, &table, 4).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.error_code(), "OUT_OF_RANGE");

    let response = app
        .request("GET", &format!("/api/tables/{table}/occupancy"), None)
        .await;
    assert_eq!(response.data()["assigned_count"], 2);
    assert_eq!(response.data()["free_seats"], 2);
    assert_eq!(response.data()["is_full"], false);

    let response = app
        .request("GET", &format!("/api/tables/{table}/first-free-seat"), None)
        .await;
    assert_eq!(response.data()["seat_index"], 2);
}

#[tokio::test]
async fn test_declined_guest_is_rejected() {
    let app = TestApp::new();
    let table = app.create_table("Table 2", 2).await;
    let guest = app.create_guest("Dee Clined", "declined").await;

    let response = app.assign_seat(&guest, &table, 0).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.error_code(), "GUEST_DECLINED");

    let response = app.assign_table(&guest, &table).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_guest_declining_after_seating_cannot_be_reassigned() {
    let app = TestApp::new();
    let table = app.create_table("Table 3", 4).await;
    let guest = app.create_guest("Late Regrets", "confirmed").await;

    assert_eq!(app.assign_seat(&guest, &table, 2).await.status, StatusCode::OK);
    app.request(
        "PUT",
        &format!("/api/guests/{guest}/rsvp"),
        Some(serde_json::json!({ "rsvp_status": "declined" })),
    )
    .await;

    let response = app.assign_table(&guest, &table).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.error_code(), "GUEST_DECLINED");

    let response = app.assign_seat(&guest, &table, 2).await;
    assert_eq!(response.error_code(), "GUEST_DECLINED");
}

#[tokio::test]
async fn test_full_table_rejects_auto_assignment() {
    let app = TestApp::new();
    let table = app.create_table("Sweetheart", 1).await;
    let first = app.create_guest("First Guest", "confirmed").await;
    let second = app.create_guest("Second Guest", "confirmed").await;

    assert_eq!(app.assign_table(&first, &table).await.status, StatusCode::OK);

    let response = app.assign_table(&second, &table).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "TABLE_FULL");

    let response = app
        .request("GET", &format!("/api/tables/{table}/first-free-seat"), None)
        .await;
    assert_eq!(response.data()["seat_index"], serde_json::Value::Null);
    assert_eq!(response.data()["is_full"], true);
}

#[tokio::test]
async fn test_unassign_is_idempotent() {
    let app = TestApp::new();
    let table = app.create_table("Table 3", 4).await;
    let guest = app.create_guest("Ida Empotent", "confirmed").await;
    app.assign_seat(&guest, &table, 2).await;

    for _ in 0..2 {
        let response = app
            .request(
                "POST",
                "/api/seating/unassign",
                Some(serde_json::json!({ "guest_id": guest })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.data()["table_id"], serde_json::Value::Null);
        assert_eq!(response.data()["seat_index"], serde_json::Value::Null);
    }

    let response = app
        .request(
            "POST",
            "/api/seating/unassign",
            Some(serde_json::json!({ "guest_id": "00000000-0000-0000-0000-000000000001" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_assign_to_unknown_table() {
    let app = TestApp::new();
    let guest = app.create_guest("Lost Guest", "confirmed").await;

    let response = app
        .assign_seat(&guest, "00000000-0000-0000-0000-000000000002", 0)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chart_lists_seats_and_waiting_guests() {
    let app = TestApp::new();
    let table = app.create_table("Table 4", 3).await;
    let seated = app.create_guest("Sat Down", "confirmed").await;
    app.create_guest("Still Waiting", "pending").await;
    app.create_guest("Not Coming", "declined").await;
    app.assign_seat(&seated, &table, 1).await;

    let response = app.request("GET", "/api/seating/chart", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let tables = response.data()["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 1);
    let seats = tables[0]["seats"].as_array().unwrap();
    assert_eq!(seats.len(), 3);
    assert_eq!(seats[0]["guest"], serde_json::Value::Null);
    assert_eq!(seats[1]["guest"]["name"], "Sat Down");

    let waiting = response.data()["unassigned"].as_array().unwrap();
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0]["name"], "Still Waiting");
}
