mod common;

use axum::http::StatusCode;
use common::{send, setup_app};
use pretty_assertions::assert_eq;
use serde_json::json;

fn sample_customer() -> serde_json::Value {
    json!({
        "name": "Ann Reader",
        "email": "not-validated",
        "phone": "555-0100",
        "registrationDate": "2024-01-15",
        "lastPurchaseDate": "2024-03-02"
    })
}

#[tokio::test]
async fn test_create_customer_without_notes() {
    let app = setup_app().await;
    let (status, created) = send(&app, "POST", "/api/customers", Some(sample_customer())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], json!(1));
    assert_eq!(created["email"], json!("not-validated"));
    assert_eq!(created["notes"], serde_json::Value::Null);

    let (status, fetched) = send(&app, "GET", "/api/customers/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_missing_required_date_is_rejected() {
    let app = setup_app().await;
    let mut customer = sample_customer();
    customer.as_object_mut().unwrap().remove("lastPurchaseDate");
    let (status, body) = send(&app, "POST", "/api/customers", Some(customer)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "lastPurchaseDate is required"}));
}

#[tokio::test]
async fn test_duplicate_emails_are_allowed() {
    let app = setup_app().await;
    let (a, _) = send(&app, "POST", "/api/customers", Some(sample_customer())).await;
    let (b, _) = send(&app, "POST", "/api/customers", Some(sample_customer())).await;
    assert_eq!((a, b), (StatusCode::CREATED, StatusCode::CREATED));
}

#[tokio::test]
async fn test_replace_clears_omitted_notes() {
    let app = setup_app().await;
    let mut customer = sample_customer();
    customer["notes"] = json!("prefers hardcovers");
    send(&app, "POST", "/api/customers", Some(customer)).await;

    let (status, replaced) = send(&app, "PUT", "/api/customers/1", Some(sample_customer())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["notes"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_patch_notes_and_email() {
    let app = setup_app().await;
    send(&app, "POST", "/api/customers", Some(sample_customer())).await;

    let (status, patched) = send(
        &app,
        "PATCH",
        "/api/customers/1",
        Some(json!({"notes": "VIP", "email": "ann@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["notes"], json!("VIP"));
    assert_eq!(patched["email"], json!("ann@example.com"));
    assert_eq!(patched["name"], json!("Ann Reader"));

    let (status, patched) = send(&app, "PATCH", "/api/customers/1", Some(json!({"notes": null}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["notes"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_patch_empty_name_is_rejected() {
    let app = setup_app().await;
    send(&app, "POST", "/api/customers", Some(sample_customer())).await;

    let (status, body) = send(&app, "PATCH", "/api/customers/1", Some(json!({"name": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "name is required"}));
}

#[tokio::test]
async fn test_delete_customer() {
    let app = setup_app().await;
    send(&app, "POST", "/api/customers", Some(sample_customer())).await;

    let (status, _) = send(&app, "DELETE", "/api/customers/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(&app, "GET", "/api/customers/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Customer not found"}));
}
