mod common;

use axum::http::StatusCode;
use common::{send, setup_app};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_create_order_keeps_free_text_book() {
    let app = setup_app().await;
    // No matching book row is required.
    let (status, created) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({"book": "Some Unlisted Title", "quantity": 2, "status": "Pending"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        created,
        json!({"id": 1, "book": "Some Unlisted Title", "quantity": 2, "status": "Pending"})
    );

    let (_, list) = send(&app, "GET", "/api/orders", None).await;
    assert_eq!(list, json!([created]));
}

#[tokio::test]
async fn test_patch_status_moves_freely() {
    let app = setup_app().await;
    send(&app, "POST", "/api/orders", Some(json!({"book": "Dune", "quantity": 1, "status": "Completed"}))).await;

    for next in ["Cancelled", "Pending", "Completed"] {
        let (status, patched) = send(&app, "PATCH", "/api/orders/1", Some(json!({"status": next}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["status"], json!(next));
        assert_eq!(patched["book"], json!("Dune"));
    }
}

#[tokio::test]
async fn test_patch_ignores_non_status_fields() {
    let app = setup_app().await;
    send(&app, "POST", "/api/orders", Some(json!({"book": "Dune", "quantity": 1, "status": "Pending"}))).await;

    let (status, body) = send(&app, "PATCH", "/api/orders/1", Some(json!({"quantity": 9}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "No fields to update"}));

    let (status, patched) = send(
        &app,
        "PATCH",
        "/api/orders/1",
        Some(json!({"quantity": 9, "status": "Completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["quantity"], json!(1));
    assert_eq!(patched["status"], json!("Completed"));
}

#[tokio::test]
async fn test_unknown_status_is_rejected() {
    let app = setup_app().await;
    let (status, _) = send(&app, "POST", "/api/orders", Some(json!({"book": "Dune", "quantity": 1, "status": "Lost"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(&app, "POST", "/api/orders", Some(json!({"book": "Dune", "quantity": 1, "status": "Pending"}))).await;
    let (status, _) = send(&app, "PATCH", "/api/orders/1", Some(json!({"status": "Lost"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_negative_quantity_is_rejected() {
    let app = setup_app().await;
    let (status, body) = send(&app, "POST", "/api/orders", Some(json!({"book": "Dune", "quantity": -3, "status": "Pending"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("quantity must be at least 0"));
}

#[tokio::test]
async fn test_replace_order() {
    let app = setup_app().await;
    send(&app, "POST", "/api/orders", Some(json!({"book": "Dune", "quantity": 1, "status": "Pending"}))).await;

    let (status, replaced) = send(
        &app,
        "PUT",
        "/api/orders/1",
        Some(json!({"book": "Emma", "quantity": 4, "status": "Cancelled"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced, json!({"id": 1, "book": "Emma", "quantity": 4, "status": "Cancelled"}));

    let (status, body) = send(
        &app,
        "PUT",
        "/api/orders/2",
        Some(json!({"book": "Emma", "quantity": 4, "status": "Cancelled"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Order not found"}));
}

#[tokio::test]
async fn test_delete_order() {
    let app = setup_app().await;
    send(&app, "POST", "/api/orders", Some(json!({"book": "Dune", "quantity": 1, "status": "Pending"}))).await;

    let (status, _) = send(&app, "DELETE", "/api/orders/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", "/api/orders/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
