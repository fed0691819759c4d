//! Integration tests for reception tables.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_delete_table_unassigns_guests() {
    let app = TestApp::new();
    let table = app.create_table("Doomed", 4).await;
    let a = app.create_guest("Guest A", "confirmed").await;
    let b = app.create_guest("Guest B", "confirmed").await;
    app.assign_seat(&a, &table, 0).await;
    app.assign_seat(&b, &table, 3).await;

    let response = app
        .request("DELETE", &format!("/api/tables/{table}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["unassigned_guests"], 2);

    for guest in [&a, &b] {
        let response = app
            .request("GET", &format!("/api/guests/{guest}"), None)
            .await;
        assert_eq!(response.data()["table_id"], serde_json::Value::Null);
        assert_eq!(response.data()["seat_index"], serde_json::Value::Null);
    }

    let response = app
        .request("DELETE", &format!("/api/tables/{table}"), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shrink_below_occupied_seat_conflicts() {
    let app = TestApp::new();
    let table = app.create_table("Shrinking", 6).await;
    let guest = app.create_guest("Far End", "confirmed").await;
    app.assign_seat(&guest, &table, 5).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/tables/{table}"),
            Some(serde_json::json!({ "seat_count": 4 })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "PUT",
            &format!("/api/tables/{table}"),
            Some(serde_json::json!({ "seat_count": 8, "name": "Growing" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["seat_count"], 8);
    assert_eq!(response.data()["name"], "Growing");
}

#[tokio::test]
async fn test_single_head_table() {
    let app = TestApp::new();
    for name in ["Head A", "Head B"] {
        let response = app
            .request(
                "POST",
                "/api/tables",
                Some(serde_json::json!({ "name": name, "seat_count": 10, "is_head": true })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let response = app.request("GET", "/api/tables", None).await;
    let tables = response.data().as_array().unwrap();
    let heads: Vec<_> = tables.iter().filter(|t| t["is_head"] == true).collect();
    assert_eq!(heads.len(), 1);
    assert_eq!(heads[0]["name"], "Head B");
    assert_eq!(tables[0]["name"], "Head B");
}

#[tokio::test]
async fn test_create_table_validation() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/tables",
            Some(serde_json::json!({ "name": "Empty", "seat_count": 0 })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");

    let response = app.request("GET", "/api/tables/not-a-uuid", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "GET",
            "/api/tables/00000000-0000-0000-0000-000000000003",
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_table_listing_includes_occupancy() {
    let app = TestApp::new();
    let table = app.create_table("Counted", 2).await;
    let guest = app.create_guest("Counter", "confirmed").await;
    app.assign_table(&guest, &table).await;

    let response = app
        .request("GET", &format!("/api/tables/{table}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Counted");
    assert_eq!(response.data()["occupancy"]["assigned_count"], 1);
    assert_eq!(response.data()["occupancy"]["free_seats"], 1);
}
