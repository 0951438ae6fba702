use crate::dtos::OutputFormat;
use crate::error::AppError;
use crate::models::InvoiceDocument;
use crate::render;
use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};

/// Accept one invoice description plus up to two optional images and stream
/// back the generated file.
///
/// Multipart fields: `invoiceData` (JSON document), `format` (`pdf`|`excel`),
/// optional file parts `logo` and `signature`. Uploaded images are also
/// written to the uploads directory under distinct timestamped names.
pub async fn generate_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut invoice_json: Option<String> = None;
    let mut format: Option<String> = None;
    let mut logo: Option<Vec<u8>> = None;
    let mut signature: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "invoiceData" => {
                invoice_json = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read invoiceData: {}", e))
                })?);
            }
            "format" => {
                format = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read format: {}", e))
                })?);
            }
            "logo" | "signature" => {
                let original_name = field.file_name().unwrap_or(&name).to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e))
                    })?
                    .to_vec();

                let key = state.uploads.save(&original_name, &data).await?;
                tracing::debug!(field = %name, key = %key, size = data.len(), "Stored uploaded image");

                if name == "logo" {
                    logo = Some(data);
                } else {
                    signature = Some(data);
                }
            }
            _ => {}
        }
    }

    let invoice_json = invoice_json
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Missing invoiceData field")))?;
    let invoice: InvoiceDocument = serde_json::from_str(&invoice_json)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Malformed invoiceData: {}", e)))?;

    let format = format.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Missing format field")))?;
    let format = OutputFormat::parse(&format)
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Invalid format requested: {}", format)))?;

    tracing::info!(
        invoice_number = %invoice.invoice_details.number,
        format = format.extension(),
        items = invoice.items.len(),
        "Generating invoice document"
    );

    let bytes = match format {
        OutputFormat::Pdf => {
            render::pdf::render_invoice(&invoice, logo.as_deref(), signature.as_deref())?
        }
        OutputFormat::Excel => render::excel::render_invoice(&invoice)?,
    };

    let number = invoice.invoice_details.number.trim();
    let number = if number.is_empty() { "invoice" } else { number };
    let disposition = format!(
        "attachment; filename=invoice-{}.{}",
        number,
        format.extension()
    );

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
