mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

async fn booked(app: &TestApp) -> String {
    let room = app.seed_standard_room().await;
    let (status, body) = app.book(&room.id, "jane@example.com", app.day(10), app.day(12)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_cancel_confirmed_booking() {
    let app = TestApp::new().await;
    let id = booked(&app).await;

    let (status, body) = app.cancel(&id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["status"], "cancelled");
    assert_eq!(body["can_be_cancelled"], false);

    let (_, fetched) = app.get(&format!("/bookings/{}", id)).await;
    assert_eq!(fetched["status"], "cancelled");
}

#[tokio::test]
async fn test_cancel_pending_booking() {
    let app = TestApp::new().await;
    let id = booked(&app).await;
    app.set_booking_status(&id, "pending").await;

    let (status, body) = app.cancel(&id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");
}

#[tokio::test]
async fn test_terminal_and_in_house_bookings_cannot_be_cancelled() {
    let app = TestApp::new().await;
    let id = booked(&app).await;

    for status in ["checked_in", "checked_out"] {
        app.set_booking_status(&id, status).await;

        let (code, body) = app.cancel(&id).await;
        assert_eq!(code, StatusCode::BAD_REQUEST, "status {}", status);
        assert_eq!(body["error"], "Booking cannot be cancelled in current status");
    }

    let (_, fetched) = app.get(&format!("/bookings/{}", id)).await;
    assert_eq!(fetched["status"], "checked_out");
}

#[tokio::test]
async fn test_second_cancellation_is_rejected() {
    let app = TestApp::new().await;
    let id = booked(&app).await;

    let (status, _) = app.cancel(&id).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.cancel(&id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Booking cannot be cancelled in current status");
}

#[tokio::test]
async fn test_only_cancellation_is_supported() {
    let app = TestApp::new().await;
    let id = booked(&app).await;
    let uri = format!("/bookings/{}/update", id);

    for payload in [json!({"status": "checked_in"}), json!({"status": "confirmed"}), json!({"status": "bogus"}), json!({})] {
        let (status, body) = app.request("PATCH", &uri, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Only cancellation is allowed");
    }

    let (_, fetched) = app.get(&format!("/bookings/{}", id)).await;
    assert_eq!(fetched["status"], "confirmed");
}

#[tokio::test]
async fn test_update_unknown_booking_is_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.cancel("missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Booking not found");

    // Lookup happens before the requested status is inspected.
    let (status, _) = app.request("PATCH", "/bookings/missing/update", Some(json!({"status": "confirmed"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checked_in_blocks_but_checked_out_releases() {
    let app = TestApp::new().await;
    let room = app.seed_standard_room().await;

    let (_, body) = app.book(&room.id, "first@example.com", app.day(10), app.day(12)).await;
    let id = body["id"].as_str().unwrap().to_string();

    app.set_booking_status(&id, "checked_in").await;
    let (status, _) = app.book(&room.id, "second@example.com", app.day(11), app.day(13)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.set_booking_status(&id, "checked_out").await;
    let (status, _) = app.book(&room.id, "second@example.com", app.day(11), app.day(13)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_pending_bookings_do_not_block() {
    let app = TestApp::new().await;
    let room = app.seed_standard_room().await;

    let (_, body) = app.book(&room.id, "first@example.com", app.day(10), app.day(12)).await;
    app.set_booking_status(body["id"].as_str().unwrap(), "pending").await;

    let (status, _) = app.book(&room.id, "second@example.com", app.day(10), app.day(12)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_cancelled_dates_can_be_rebooked() {
    let app = TestApp::new().await;
    let room = app.seed_standard_room().await;

    let (_, body) = app.book(&room.id, "first@example.com", app.day(10), app.day(12)).await;
    app.cancel(body["id"].as_str().unwrap()).await;

    let (status, _) = app.book(&room.id, "second@example.com", app.day(10), app.day(12)).await;
    assert_eq!(status, StatusCode::CREATED);
}
