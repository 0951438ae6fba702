use crate::dtos::{PreviewLine, PreviewResponse};
use crate::models::{InvoiceDocument, Summary};
use axum::Json;

/// Recompute the derived per-item amounts and the summary so a form client
/// can mirror the exact arithmetic used in the generated files.
pub async fn preview_document(Json(invoice): Json<InvoiceDocument>) -> Json<PreviewResponse> {
    let items = invoice
        .items
        .iter()
        .map(|item| PreviewLine {
            amounts: item.amounts(),
            item: item.clone(),
        })
        .collect();
    let summary = Summary::compute(&invoice.items);

    Json(PreviewResponse { items, summary })
}
