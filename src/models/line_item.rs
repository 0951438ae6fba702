//! Line item model and per-item derived amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product or service row on the invoice. All numeric fields default to
/// zero when absent from the payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    pub name: String,
    pub hsn: String,
    pub quantity: Decimal,
    pub unit: String,
    pub rate: Decimal,
    /// Discount percent, applied to quantity x rate before tax.
    pub discount: Decimal,
    /// CGST percent.
    pub cgst: Decimal,
    /// SGST percent.
    pub sgst: Decimal,
}

/// Amounts derived from a [`LineItem`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItemAmounts {
    pub taxable_value: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub amount: Decimal,
}

impl LineItem {
    /// Derive the taxable value, tax components and gross amount for this item.
    ///
    /// Discount applies before tax; CGST and SGST are each computed off the
    /// same discounted taxable value, never off a combined rate then split.
    pub fn amounts(&self) -> LineItemAmounts {
        let hundred = Decimal::ONE_HUNDRED;
        let taxable_value = self.quantity * self.rate * (Decimal::ONE - self.discount / hundred);
        let cgst_amount = taxable_value * self.cgst / hundred;
        let sgst_amount = taxable_value * self.sgst / hundred;
        let amount = taxable_value + cgst_amount + sgst_amount;

        LineItemAmounts {
            taxable_value,
            cgst_amount,
            sgst_amount,
            amount,
        }
    }
}
