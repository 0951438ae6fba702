//! Fixed-position PDF layout.
//!
//! A4 portrait, millimetre coordinates with a flowing y cursor from the top of
//! the page. Built-in Helvetica faces; item rows that would cross the bounded
//! page area continue on a fresh page.

use anyhow::anyhow;
use printpdf::{
    path::PaintMode, BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Rect, Rgb,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::io::BufWriter;

use crate::error::AppError;
use crate::models::{InvoiceDocument, Summary};
use crate::render::words::rupees_in_words;
use crate::services::upi;

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const PAGE_MARGIN_X: f32 = 15.0;
const PAGE_MARGIN_TOP: f32 = 14.0;

const CONTENT_RIGHT_X: f32 = PAGE_W - PAGE_MARGIN_X;

// Item table grid. Widths sum to the 180mm content width.
const COL_WIDTHS: [f32; 9] = [43.0, 19.0, 11.0, 12.0, 21.0, 14.0, 19.0, 19.0, 22.0];
const COL_HEADERS: [&str; 9] = [
    "Item", "HSN", "Qty", "Unit", "Rate", "Disc %", "CGST", "SGST", "Amount",
];
const TABLE_HEADER_H: f32 = 7.0;
const CELL_PAD_X: f32 = 1.5;
const LINE_H: f32 = 4.2;
// Rows reaching this bound flow onto a new page.
const TABLE_BOTTOM_BOUND: f32 = 40.0;

/// Lay the invoice out as a PDF and return the file bytes.
pub fn render_invoice(
    invoice: &InvoiceDocument,
    logo: Option<&[u8]>,
    signature: Option<&[u8]>,
) -> Result<Vec<u8>, AppError> {
    render(invoice, logo, signature).map_err(AppError::RenderError)
}

fn render(
    invoice: &InvoiceDocument,
    logo: Option<&[u8]>,
    signature: Option<&[u8]>,
) -> anyhow::Result<Vec<u8>> {
    let summary = Summary::compute(&invoice.items);

    let (doc, page1, layer1) = PdfDocument::new(invoice.title(), Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    let mut layer = doc.get_page(page1).get_layer(layer1);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow!("{e}"))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| anyhow!("{e}"))?;

    let mut y = PAGE_H - PAGE_MARGIN_TOP;

    // Title, centered.
    push_line_center(&layer, &font_bold, &invoice.title(), 20.0, PAGE_W / 2.0, y);
    y -= 12.0;

    // Header: logo at left, business identity centered.
    let header_top = y;
    let logo_h = logo
        .and_then(|bytes| embed_image(&layer, bytes, PAGE_MARGIN_X, header_top, 40.0, 24.0))
        .map(|(_, h)| h)
        .unwrap_or(0.0);

    let business = &invoice.business_details;
    let mut text_y = header_top;
    if !business.name.trim().is_empty() {
        push_line_center(&layer, &font_bold, business.name.trim(), 13.0, PAGE_W / 2.0, text_y);
        text_y -= 5.5;
    }
    for line in split_and_wrap_lines(&business.address, 60) {
        push_line_center(&layer, &font, &line, 9.0, PAGE_W / 2.0, text_y);
        text_y -= LINE_H;
    }
    let contact_line = [
        labeled("GSTIN", &business.gstin),
        labeled("Contact", &business.contact),
        labeled("Email", &business.email),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" | ");
    if !contact_line.is_empty() {
        push_line_center(&layer, &font, &contact_line, 9.0, PAGE_W / 2.0, text_y);
        text_y -= LINE_H;
    }

    y = (header_top - logo_h).min(text_y) - 6.0;

    // Bill-to block at left, invoice metadata at right.
    let sub_top = y;
    let bill_to = &invoice.customer_details.bill_to;
    let mut left_y = sub_top;
    push_line(&layer, &font_bold, "Bill To:", 10.0, PAGE_MARGIN_X, left_y);
    left_y -= 5.0;
    if !bill_to.name.trim().is_empty() {
        push_line(&layer, &font, bill_to.name.trim(), 9.0, PAGE_MARGIN_X, left_y);
        left_y -= LINE_H;
    }
    for line in split_and_wrap_lines(&bill_to.address, 42) {
        push_line(&layer, &font, &line, 9.0, PAGE_MARGIN_X, left_y);
        left_y -= LINE_H;
    }
    if let Some(gstin) = labeled("GSTIN", &bill_to.gstin) {
        push_line(&layer, &font, &gstin, 9.0, PAGE_MARGIN_X, left_y);
        left_y -= LINE_H;
    }
    if let Some(contact) = labeled("Contact", &bill_to.contact) {
        push_line(&layer, &font, &contact, 9.0, PAGE_MARGIN_X, left_y);
        left_y -= LINE_H;
    }

    let meta_x = 130.0;
    push_line(&layer, &font_bold, "Invoice #:", 9.0, meta_x, sub_top);
    push_line(&layer, &font, invoice.invoice_details.number.trim(), 9.0, meta_x + 26.0, sub_top);
    push_line(&layer, &font_bold, "Invoice Date:", 9.0, meta_x, sub_top - 5.0);
    push_line(&layer, &font, invoice.invoice_details.date.trim(), 9.0, meta_x + 26.0, sub_top - 5.0);

    y = left_y.min(sub_top - 10.0) - 8.0;

    // Item table.
    y = draw_table_header(&layer, &font_bold, y);
    for item in &invoice.items {
        let amounts = item.amounts();
        let name_lines = {
            let lines = split_and_wrap_lines(&item.name, 26);
            if lines.is_empty() {
                vec![String::new()]
            } else {
                lines
            }
        };
        let row_h = (3.0 + name_lines.len() as f32 * LINE_H).max(TABLE_HEADER_H);

        if y - row_h < TABLE_BOTTOM_BOUND {
            layer = new_page(&doc);
            y = PAGE_H - PAGE_MARGIN_TOP;
            y = draw_table_header(&layer, &font_bold, y);
        }

        let mut x = PAGE_MARGIN_X;
        for width in COL_WIDTHS {
            stroke_rect(&layer, x, y, width, row_h);
            x += width;
        }

        let col_x = column_edges();
        let baseline = y - 4.8;
        for (idx, line) in name_lines.iter().enumerate() {
            push_line(&layer, &font, line, 9.0, col_x[0] + CELL_PAD_X, baseline - idx as f32 * LINE_H);
        }
        push_line(&layer, &font, item.hsn.trim(), 9.0, col_x[1] + CELL_PAD_X, baseline);
        push_line_right(&layer, &font, &plain(item.quantity), 9.0, col_x[3] - CELL_PAD_X, baseline);
        push_line(&layer, &font, item.unit.trim(), 9.0, col_x[3] + CELL_PAD_X, baseline);
        push_line_right(&layer, &font, &money(item.rate), 9.0, col_x[5] - CELL_PAD_X, baseline);
        push_line_right(&layer, &font, &percent(item.discount), 9.0, col_x[6] - CELL_PAD_X, baseline);
        push_line_right(&layer, &font, &percent(item.cgst), 9.0, col_x[7] - CELL_PAD_X, baseline);
        push_line_right(&layer, &font, &percent(item.sgst), 9.0, col_x[8] - CELL_PAD_X, baseline);
        push_line_right(&layer, &font, &money(amounts.amount), 9.0, col_x[9] - CELL_PAD_X, baseline);

        y -= row_h;
    }
    y -= 6.0;

    // Summary at right, amount in words at left.
    if y < 72.0 {
        layer = new_page(&doc);
        y = PAGE_H - PAGE_MARGIN_TOP;
    }
    let summary_top = y;

    push_line(&layer, &font_bold, "Amount in Words (INR):", 10.0, PAGE_MARGIN_X, summary_top);
    let rupees = summary.rounded_grand_total.to_u64().unwrap_or(0);
    let mut words_y = summary_top - 5.0;
    for line in split_and_wrap_lines(&rupees_in_words(rupees), 45) {
        push_line(&layer, &font, &line, 9.0, PAGE_MARGIN_X, words_y);
        words_y -= LINE_H;
    }

    let summary_x = 120.0;
    let value_right = CONTENT_RIGHT_X;
    let mut summary_y = summary_top;
    for (label, value) in [
        ("Subtotal:", summary.subtotal),
        ("CGST:", summary.cgst_total),
        ("SGST:", summary.sgst_total),
    ] {
        push_line(&layer, &font_bold, label, 10.0, summary_x, summary_y);
        push_line_right(&layer, &font, &money(value), 10.0, value_right, summary_y);
        summary_y -= 5.2;
    }
    if summary.round_off != Decimal::ZERO {
        push_line(&layer, &font_bold, "Round Off:", 10.0, summary_x, summary_y);
        push_line_right(&layer, &font, &money(summary.round_off), 10.0, value_right, summary_y);
        summary_y -= 5.2;
    }
    draw_rule(&layer, summary_x, value_right, summary_y + 3.4, 0.4);
    push_line(&layer, &font_bold, "Grand Total:", 12.0, summary_x, summary_y - 1.0);
    push_line_right(&layer, &font_bold, &money(summary.rounded_grand_total), 12.0, value_right, summary_y - 1.0);
    summary_y -= 8.0;

    y = words_y.min(summary_y) - 8.0;

    // Footer: bank details and terms at left, payment QR at center,
    // signatory at right.
    if y < 78.0 {
        layer = new_page(&doc);
        y = PAGE_H - PAGE_MARGIN_TOP;
    }
    let footer_top = y;
    let bank = &invoice.bank_details;

    push_line(&layer, &font_bold, "Bank Details:", 10.0, PAGE_MARGIN_X, footer_top);
    let mut bank_y = footer_top - 5.0;
    for (label, value) in [
        ("Bank", bank.name.as_str()),
        ("A/C No", bank.account_number.as_str()),
        ("IFSC", bank.ifsc.as_str()),
        ("UPI", bank.upi.as_str()),
    ] {
        if let Some(line) = labeled(label, value) {
            push_line(&layer, &font, &line, 9.0, PAGE_MARGIN_X, bank_y);
            bank_y -= LINE_H;
        }
    }

    bank_y -= 4.0;
    push_line(&layer, &font_bold, "Terms & Conditions:", 10.0, PAGE_MARGIN_X, bank_y);
    bank_y -= 5.0;
    for line in split_and_wrap_lines(&invoice.terms, 48) {
        push_line(&layer, &font, &line, 9.0, PAGE_MARGIN_X, bank_y);
        bank_y -= LINE_H;
    }

    if invoice.generate_qr && !bank.upi.trim().is_empty() {
        let note = format!("Invoice {}", invoice.invoice_details.number.trim());
        let link = upi::payment_link(
            &bank.upi,
            &invoice.business_details.name,
            summary.rounded_grand_total,
            Some(&note),
        );
        let qr = upi::qr_png(&link)?;
        if let Some((w, h)) = embed_image(&layer, &qr, 96.0, footer_top, 30.0, 30.0) {
            push_line_center(&layer, &font, "Scan to Pay", 8.0, 96.0 + w / 2.0, footer_top - h - 4.0);
        }
    }

    let signature_h = signature
        .and_then(|bytes| embed_image(&layer, bytes, 158.0, footer_top, 36.0, 16.0))
        .map(|(_, h)| h)
        .unwrap_or(0.0);
    push_line_right(
        &layer,
        &font_bold,
        "Authorised Signatory",
        10.0,
        CONTENT_RIGHT_X,
        footer_top - signature_h.max(16.0) - 5.0,
    );

    push_line_center(
        &layer,
        &font,
        "This is a computer generated invoice.",
        8.0,
        PAGE_W / 2.0,
        10.0,
    );

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer).map_err(|e| anyhow!("{e}"))?;
    let bytes = writer.into_inner()?;
    Ok(bytes)
}

fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    doc.get_page(page).get_layer(layer)
}

/// Left x edge of each table column, plus the table's right edge.
fn column_edges() -> [f32; 10] {
    let mut edges = [0.0; 10];
    let mut x = PAGE_MARGIN_X;
    for (idx, width) in COL_WIDTHS.iter().enumerate() {
        edges[idx] = x;
        x += width;
    }
    edges[9] = x;
    edges
}

fn draw_table_header(layer: &PdfLayerReference, font_bold: &IndirectFontRef, y: f32) -> f32 {
    let table_w: f32 = COL_WIDTHS.iter().sum();
    fill_rect_gray(layer, PAGE_MARGIN_X, y, table_w, TABLE_HEADER_H, 0.92);

    let mut x = PAGE_MARGIN_X;
    for (width, header) in COL_WIDTHS.iter().zip(COL_HEADERS) {
        stroke_rect(layer, x, y, *width, TABLE_HEADER_H);
        push_line(layer, font_bold, header, 9.0, x + CELL_PAD_X, y - 4.8);
        x += width;
    }

    y - TABLE_HEADER_H
}

fn push_line(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    font_size: f32,
    x: f32,
    y: f32,
) {
    layer.use_text(text, font_size, Mm(x), Mm(y), font);
}

// printpdf doesn't expose text metrics for built-in fonts; a character-count
// estimate is good enough for right-aligned numeric columns and centering.
fn text_width_mm(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.19
}

fn push_line_right(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    font_size: f32,
    x_right: f32,
    y: f32,
) {
    let x = (x_right - text_width_mm(text, font_size)).max(0.0);
    push_line(layer, font, text, font_size, x, y);
}

fn push_line_center(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    font_size: f32,
    center_x: f32,
    y: f32,
) {
    let x = (center_x - text_width_mm(text, font_size) / 2.0).max(0.0);
    push_line(layer, font, text, font_size, x, y);
}

fn draw_rule(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32, thickness: f32) {
    layer.set_outline_thickness(thickness);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    });
}

fn stroke_rect(layer: &PdfLayerReference, x: f32, y_top: f32, w: f32, h: f32) {
    layer.set_outline_thickness(0.25);
    let rect =
        Rect::new(Mm(x), Mm(y_top - h), Mm(x + w), Mm(y_top)).with_mode(PaintMode::Stroke);
    layer.add_rect(rect);
}

fn fill_rect_gray(layer: &PdfLayerReference, x: f32, y_top: f32, w: f32, h: f32, gray: f32) {
    layer.set_fill_color(Color::Rgb(Rgb::new(gray, gray, gray, None)));
    let rect = Rect::new(Mm(x), Mm(y_top - h), Mm(x + w), Mm(y_top)).with_mode(PaintMode::Fill);
    layer.add_rect(rect);
    // reset fill to black
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
}

/// Decode and place an image, top-left anchored, contained within
/// `max_w` x `max_h`. Returns the placed size; undecodable bytes are skipped
/// rather than failing the whole document.
fn embed_image(
    layer: &PdfLayerReference,
    bytes: &[u8],
    x: f32,
    y_top: f32,
    max_w: f32,
    max_h: f32,
) -> Option<(f32, f32)> {
    const DPI: f32 = 150.0;

    let img = printpdf::image_crate::load_from_memory(bytes).ok()?;
    let natural_w = img.width().max(1) as f32 / DPI * 25.4;
    let natural_h = img.height().max(1) as f32 / DPI * 25.4;
    let scale = (max_w / natural_w).min(max_h / natural_h).min(1.0);
    let w = natural_w * scale;
    let h = natural_h * scale;

    let image = Image::from_dynamic_image(&img);
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(y_top - h)),
            rotate: None,
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(DPI),
        },
    );

    Some((w, h))
}

fn wrap_text_lines(input: &str, max_chars: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in input.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        if current.len() + 1 + word.len() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            out.push(current);
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        out.push(current);
    }

    out
}

fn split_and_wrap_lines(input: &str, max_chars: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for raw in input.lines() {
        let s = raw.trim();
        if s.is_empty() {
            continue;
        }
        for line in wrap_text_lines(s, max_chars) {
            out.push(line);
        }
    }
    out
}

fn labeled(label: &str, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(format!("{}: {}", label, value))
    }
}

fn money(value: Decimal) -> String {
    format!("Rs {:.2}", value)
}

fn percent(value: Decimal) -> String {
    format!("{}%", value.normalize())
}

fn plain(value: Decimal) -> String {
    value.normalize().to_string()
}
