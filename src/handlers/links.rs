use crate::dtos::{
    QrGenerateRequest, QrGenerateResponse, WhatsappLinkRequest, WhatsappLinkResponse,
};
use crate::error::AppError;
use crate::services::{upi, whatsapp};
use axum::Json;

pub async fn payment_qr(
    Json(payload): Json<QrGenerateRequest>,
) -> Result<Json<QrGenerateResponse>, AppError> {
    let upi_link = upi::payment_link(
        &payload.upi,
        &payload.payee_name,
        payload.amount,
        payload.note.as_deref(),
    );

    let qr_image_base64 = upi::qr_base64(&upi_link).map_err(|e| {
        tracing::error!("Failed to generate QR code: {}", e);
        AppError::RenderError(e)
    })?;

    Ok(Json(QrGenerateResponse {
        upi_link,
        qr_image_base64,
    }))
}

pub async fn whatsapp_link(Json(payload): Json<WhatsappLinkRequest>) -> Json<WhatsappLinkResponse> {
    let link = whatsapp::share_link(&payload.phone, &payload.invoice_number, payload.amount);

    Json(WhatsappLinkResponse { link })
}
