use axum::http::{header, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::office::billing::BillingDeskService;

#[tokio::test]
async fn record_payment_route_returns_a_created_envelope() {
    let (service, _, _, _) = build_desk();
    let charge = service.create_charge(charge_form()).expect("charge accepted");
    let router = billing_router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/transactions")
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&payment_form(charge.id, 500)).expect("serializable"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(true));
    assert_eq!(payload["data"]["amount"], json!(500));
    assert_eq!(payload["data"]["payer_name"], json!("Lucia Mercado"));
}

#[tokio::test]
async fn receipt_route_serves_printable_html() {
    let (service, billing, transactions, broadcast) = build_desk();
    let charge = service.create_charge(charge_form()).expect("charge accepted");
    let payment = service
        .record_payment(payment_form(charge.id, 1180), fixed_now())
        .expect("payment accepted");

    let router = billing_router_with_service(BillingDeskService::new(
        billing,
        transactions,
        broadcast,
        office(),
    ));
    let response = router
        .oneshot(
            axum::http::Request::get(format!("/api/transactions/{}/receipt", payment.id.0))
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let html = read_text_body(response).await;
    assert!(html.contains("Lucia Mercado"));
    assert!(html.contains("Official Receipt"));
}

#[tokio::test]
async fn missing_receipt_is_not_found() {
    let (service, _, _, _) = build_desk();
    let router = billing_router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/transactions/pay-999999/receipt")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(false));
}

#[tokio::test]
async fn delete_route_answers_with_the_deleted_id() {
    let (service, billing, transactions, broadcast) = build_desk();
    let charge = service.create_charge(charge_form()).expect("charge accepted");

    let router = billing_router_with_service(BillingDeskService::new(
        billing,
        transactions,
        broadcast,
        office(),
    ));
    let response = router
        .oneshot(
            axum::http::Request::delete(format!("/api/billing/{}", charge.id.0))
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(true));
    assert_eq!(payload["data"]["id"], json!(charge.id.0));
}

#[tokio::test]
async fn unknown_status_filter_is_unprocessable() {
    let (service, _, _, _) = build_desk();
    let router = billing_router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/billing?status=weird")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(false));
}
