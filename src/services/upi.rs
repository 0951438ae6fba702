//! UPI payment link construction and QR rendering.

use anyhow::Result;
use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, Luma};
use qrcode::QrCode;
use rust_decimal::Decimal;
use std::io::Cursor;

/// Build a UPI intent link: `upi://pay?pa=...&pn=...&am=...&cu=INR&tn=...`.
///
/// The amount is fixed to two decimals, matching what payment apps display.
pub fn payment_link(vpa: &str, payee_name: &str, amount: Decimal, note: Option<&str>) -> String {
    let mut link = format!(
        "upi://pay?pa={}&pn={}&am={:.2}&cu=INR",
        vpa.trim(),
        urlencoding::encode(payee_name.trim()),
        amount,
    );

    if let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) {
        link.push_str(&format!("&tn={}", urlencoding::encode(note)));
    }

    link
}

/// Render the link as a PNG QR code.
pub fn qr_png(link: &str) -> Result<Vec<u8>> {
    let code = QrCode::new(link)?;
    let image = code.render::<Luma<u8>>().build();

    let dynamic_image = DynamicImage::ImageLuma8(image);
    let mut buffer = Cursor::new(Vec::new());
    dynamic_image.write_to(&mut buffer, image::ImageOutputFormat::Png)?;

    Ok(buffer.into_inner())
}

/// Render the link as a base64-encoded PNG QR code.
pub fn qr_base64(link: &str) -> Result<String> {
    Ok(general_purpose::STANDARD.encode(qr_png(link)?))
}
