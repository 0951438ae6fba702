//! Single-sheet XLSX layout.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, FormatAlign, Workbook, XlsxError};

use crate::error::AppError;
use crate::models::{InvoiceDocument, Summary};

const HEADERS: [&str; 9] = [
    "Item Name",
    "HSN Code",
    "Quantity",
    "Unit",
    "Rate",
    "Discount (%)",
    "CGST (%)",
    "SGST (%)",
    "Total",
];

/// Lay the invoice out as a single-sheet workbook and return the file bytes.
pub fn render_invoice(invoice: &InvoiceDocument) -> Result<Vec<u8>, AppError> {
    build_workbook(invoice).map_err(|e| AppError::RenderError(anyhow::anyhow!(e)))
}

fn build_workbook(invoice: &InvoiceDocument) -> Result<Vec<u8>, XlsxError> {
    let summary = Summary::compute(&invoice.items);

    let mut workbook = Workbook::new();
    // Pin the creation timestamp so the same document produces byte-identical
    // output on every call.
    let properties =
        DocProperties::new().set_creation_datetime(&ExcelDateTime::from_ymd(2024, 1, 1)?);
    workbook.set_properties(&properties);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Invoice")?;

    let title_format = Format::new()
        .set_bold()
        .set_font_size(20)
        .set_align(FormatAlign::Center);
    let bold = Format::new().set_bold();

    worksheet.merge_range(0, 0, 0, 8, &invoice.business_details.name, &title_format)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(4, col as u16, *header, &bold)?;
    }

    let mut row = 5;
    for item in &invoice.items {
        let amounts = item.amounts();
        worksheet.write_string(row, 0, &item.name)?;
        worksheet.write_string(row, 1, &item.hsn)?;
        worksheet.write_number(row, 2, to_f64(item.quantity))?;
        worksheet.write_string(row, 3, &item.unit)?;
        worksheet.write_number(row, 4, to_f64(item.rate))?;
        worksheet.write_number(row, 5, to_f64(item.discount))?;
        worksheet.write_number(row, 6, to_f64(item.cgst))?;
        worksheet.write_number(row, 7, to_f64(item.sgst))?;
        worksheet.write_number(row, 8, to_f64(amounts.amount))?;
        row += 1;
    }

    // Labeled summary block, one blank row below the items.
    let mut summary_row = row + 1;
    worksheet.write_string(summary_row, 7, "Subtotal")?;
    worksheet.write_number(summary_row, 8, to_f64(summary.subtotal))?;
    summary_row += 1;
    worksheet.write_string(summary_row, 7, "CGST")?;
    worksheet.write_number(summary_row, 8, to_f64(summary.cgst_total))?;
    summary_row += 1;
    worksheet.write_string(summary_row, 7, "SGST")?;
    worksheet.write_number(summary_row, 8, to_f64(summary.sgst_total))?;
    summary_row += 1;
    if summary.round_off != Decimal::ZERO {
        worksheet.write_string(summary_row, 7, "Round Off")?;
        worksheet.write_number(summary_row, 8, to_f64(summary.round_off))?;
        summary_row += 1;
    }
    worksheet.write_string_with_format(summary_row, 7, "Grand Total", &bold)?;
    worksheet.write_number_with_format(summary_row, 8, to_f64(summary.rounded_grand_total), &bold)?;

    workbook.save_to_buffer()
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
