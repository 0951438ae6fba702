mod common;

use axum::http::StatusCode;
use base64::{engine::general_purpose, Engine as _};

#[tokio::test]
async fn payment_qr_returns_link_and_png() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/api/payment-qr"))
        .json(&serde_json::json!({
            "upi": "acme@okhdfc",
            "payeeName": "Acme Corp",
            "amount": 212,
            "note": "Invoice INV-42"
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::OK, response.status());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");

    let link = body["upiLink"].as_str().unwrap();
    assert!(link.starts_with("upi://pay?pa=acme@okhdfc&pn=Acme%20Corp&am=212.00&cu=INR"));
    assert!(link.contains("&tn=Invoice%20INV-42"));

    let png = general_purpose::STANDARD
        .decode(body["qrImageBase64"].as_str().unwrap())
        .expect("QR image is not valid base64");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn whatsapp_link_carries_invoice_details() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/api/whatsapp-link"))
        .json(&serde_json::json!({
            "phone": "+91 98765-43210",
            "invoiceNumber": "INV-42",
            "amount": 212
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::OK, response.status());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");

    let link = body["link"].as_str().unwrap();
    assert!(link.starts_with("https://wa.me/919876543210?text="));
    assert!(link.contains("INV-42"));
}
