use invoice_service::config::{Config, ServerConfig, StorageConfig};
use invoice_service::startup::Application;
use tempfile::TempDir;

pub struct TestApp {
    pub port: u16,
    pub uploads_dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }
}

pub async fn spawn_app() -> TestApp {
    let uploads_dir = tempfile::tempdir().expect("Failed to create uploads dir");
    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
        },
        storage: StorageConfig {
            uploads_dir: uploads_dir.path().to_string_lossy().into_owned(),
        },
        service_name: "invoice-service".to_string(),
    };

    let app = Application::build(config)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(app.run_until_stopped());

    TestApp { port, uploads_dir }
}

/// One item at quantity 2, rate 100, 10% discount, 9% CGST + 9% SGST:
/// taxable 180, tax 32.40, grand total 212.40 (rounds to 212).
pub fn sample_invoice_data() -> serde_json::Value {
    serde_json::json!({
        "businessDetails": {
            "name": "Acme Corp",
            "address": "12 MG Road, Bengaluru",
            "contact": "+91 98765 43210",
            "gstin": "29AAAAA0000A1Z5",
            "email": "billing@acme.example"
        },
        "customerDetails": {
            "billTo": {
                "name": "Globex Traders",
                "address": "7 Park Street, Kolkata",
                "gstin": "19BBBBB1111B2Z6"
            }
        },
        "invoiceDetails": {
            "type": "Tax Invoice",
            "number": "INV-42",
            "date": "01/04/2026"
        },
        "items": [{
            "name": "Widget",
            "hsn": "8471",
            "quantity": 2,
            "unit": "pcs",
            "rate": 100,
            "discount": 10,
            "cgst": 9,
            "sgst": 9
        }],
        "bankDetails": {
            "name": "State Bank",
            "accountNumber": "1234567890",
            "ifsc": "SBIN0000001",
            "upi": "acme@okhdfc"
        },
        "terms": "Payment due within 15 days.",
        "generateQr": true
    })
}
