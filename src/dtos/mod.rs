use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{LineItem, LineItemAmounts, Summary};

/// Requested download kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Excel,
}

impl OutputFormat {
    /// Strict parse; anything but `pdf`/`excel` is a client error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pdf" => Some(OutputFormat::Pdf),
            "excel" => Some(OutputFormat::Excel),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Excel => "xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// Preview response: the posted items with their derived amounts, plus the
/// recomputed summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub items: Vec<PreviewLine>,
    pub summary: Summary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewLine {
    #[serde(flatten)]
    pub item: LineItem,
    #[serde(flatten)]
    pub amounts: LineItemAmounts,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrGenerateRequest {
    pub upi: String,
    pub payee_name: String,
    pub amount: Decimal,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrGenerateResponse {
    pub upi_link: String,
    pub qr_image_base64: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsappLinkRequest {
    pub phone: String,
    pub invoice_number: String,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsappLinkResponse {
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats_only() {
        assert_eq!(OutputFormat::parse("pdf"), Some(OutputFormat::Pdf));
        assert_eq!(OutputFormat::parse("excel"), Some(OutputFormat::Excel));
        assert_eq!(OutputFormat::parse("docx"), None);
        assert_eq!(OutputFormat::parse("PDF"), None);
        assert_eq!(OutputFormat::parse(""), None);
    }
}
