//! Invoice document model.
//!
//! The document arrives fully assembled from the form client as the
//! `invoiceData` multipart field. Every field defaults when absent; nothing is
//! validated or persisted. The client echoes its own `summary`, which the
//! service recomputes rather than trusts.

use serde::{Deserialize, Serialize};

use super::{LineItem, Summary};

/// The complete invoice description for one generation call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceDocument {
    pub business_details: BusinessDetails,
    pub customer_details: CustomerDetails,
    pub invoice_details: InvoiceDetails,
    pub items: Vec<LineItem>,
    pub summary: Summary,
    pub bank_details: BankDetails,
    pub terms: String,
    pub generate_qr: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessDetails {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub gstin: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerDetails {
    pub bill_to: BillTo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillTo {
    pub name: String,
    pub address: String,
    pub gstin: String,
    pub contact: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceDetails {
    /// Document kind shown as the title, e.g. "Tax Invoice" or "Proforma Invoice".
    #[serde(rename = "type")]
    pub kind: String,
    pub number: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankDetails {
    pub name: String,
    pub account_number: String,
    pub ifsc: String,
    pub upi: String,
}

impl InvoiceDocument {
    /// Title rendered at the top of the generated documents.
    pub fn title(&self) -> String {
        let kind = self.invoice_details.kind.trim();
        if kind.is_empty() {
            "TAX INVOICE".to_string()
        } else {
            kind.to_uppercase()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_payload() {
        let json = r#"{
            "businessDetails": {"name": "Acme Corp", "gstin": "27AAAAA0000A1Z5"},
            "customerDetails": {"billTo": {"name": "Globex"}},
            "invoiceDetails": {"type": "Tax Invoice", "number": "INV-42", "date": "01/04/2026"},
            "items": [{"name": "Widget", "quantity": 2, "rate": 100, "discount": 10, "cgst": 9, "sgst": 9}],
            "bankDetails": {"upi": "acme@okhdfc"},
            "generateQr": true
        }"#;

        let doc: InvoiceDocument = serde_json::from_str(json).unwrap();

        assert_eq!(doc.business_details.name, "Acme Corp");
        assert_eq!(doc.customer_details.bill_to.name, "Globex");
        assert_eq!(doc.invoice_details.number, "INV-42");
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.bank_details.upi, "acme@okhdfc");
        assert!(doc.generate_qr);
        assert_eq!(doc.terms, "");
    }

    #[test]
    fn title_falls_back_when_type_missing() {
        let doc = InvoiceDocument::default();
        assert_eq!(doc.title(), "TAX INVOICE");

        let mut doc = InvoiceDocument::default();
        doc.invoice_details.kind = "Proforma Invoice".to_string();
        assert_eq!(doc.title(), "PROFORMA INVOICE");
    }
}
