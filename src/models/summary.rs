//! Aggregate invoice totals.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::LineItem;

/// Invoice-level totals derived from the line items.
///
/// The grand total is additionally rounded to the whole rupee (half away from
/// zero, matching how the amount is displayed and encoded into the payment
/// QR), with the signed difference reported as the round-off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Summary {
    pub subtotal: Decimal,
    pub cgst_total: Decimal,
    pub sgst_total: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
    pub rounded_grand_total: Decimal,
    pub round_off: Decimal,
}

impl Summary {
    /// Recompute all totals from the items. Deriving twice from the same
    /// items yields the same summary; an empty list yields all zeros.
    pub fn compute(items: &[LineItem]) -> Self {
        let mut subtotal = Decimal::ZERO;
        let mut cgst_total = Decimal::ZERO;
        let mut sgst_total = Decimal::ZERO;

        for item in items {
            let amounts = item.amounts();
            subtotal += amounts.taxable_value;
            cgst_total += amounts.cgst_amount;
            sgst_total += amounts.sgst_amount;
        }

        let tax_amount = cgst_total + sgst_total;
        let grand_total = subtotal + tax_amount;
        let rounded_grand_total =
            grand_total.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let round_off = rounded_grand_total - grand_total;

        Self {
            subtotal,
            cgst_total,
            sgst_total,
            tax_amount,
            grand_total,
            rounded_grand_total,
            round_off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(quantity: Decimal, rate: Decimal, discount: Decimal, cgst: Decimal, sgst: Decimal) -> LineItem {
        LineItem {
            quantity,
            rate,
            discount,
            cgst,
            sgst,
            ..LineItem::default()
        }
    }

    #[test]
    fn empty_items_yield_zero_summary() {
        let summary = Summary::compute(&[]);

        assert_eq!(summary.subtotal, Decimal::ZERO);
        assert_eq!(summary.tax_amount, Decimal::ZERO);
        assert_eq!(summary.grand_total, Decimal::ZERO);
        assert_eq!(summary.rounded_grand_total, Decimal::ZERO);
        assert_eq!(summary.round_off, Decimal::ZERO);
    }

    #[test]
    fn single_item_with_discount_and_split_gst() {
        let summary = Summary::compute(&[item(dec!(2), dec!(100), dec!(10), dec!(9), dec!(9))]);

        assert_eq!(summary.subtotal, dec!(180));
        assert_eq!(summary.cgst_total, dec!(16.2));
        assert_eq!(summary.sgst_total, dec!(16.2));
        assert_eq!(summary.tax_amount, dec!(32.4));
        assert_eq!(summary.grand_total, dec!(212.4));
        assert_eq!(summary.rounded_grand_total, dec!(212));
        assert_eq!(summary.round_off, dec!(-0.4));
    }

    #[test]
    fn subtotal_is_order_independent() {
        let a = item(dec!(2), dec!(100), dec!(10), dec!(9), dec!(9));
        let b = item(dec!(3), dec!(49.5), dec!(0), dec!(2.5), dec!(2.5));
        let c = item(dec!(1), dec!(999), dec!(5), dec!(14), dec!(14));

        let forward = Summary::compute(&[a.clone(), b.clone(), c.clone()]);
        let reverse = Summary::compute(&[c, b, a]);

        assert_eq!(forward.subtotal, reverse.subtotal);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn round_off_is_negated_difference() {
        let cases = [
            vec![item(dec!(2), dec!(100), dec!(10), dec!(9), dec!(9))],
            vec![item(dec!(1), dec!(100.5), dec!(0), dec!(0), dec!(0))],
            vec![item(dec!(7), dec!(3.33), dec!(1.5), dec!(6), dec!(6))],
            vec![],
        ];

        for items in cases {
            let summary = Summary::compute(&items);
            assert_eq!(
                summary.grand_total - summary.rounded_grand_total,
                -summary.round_off
            );
        }
    }

    #[test]
    fn half_rupee_rounds_up() {
        let summary = Summary::compute(&[item(dec!(1), dec!(100.5), dec!(0), dec!(0), dec!(0))]);

        assert_eq!(summary.rounded_grand_total, dec!(101));
        assert_eq!(summary.round_off, dec!(0.5));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let items = vec![
            item(dec!(2), dec!(100), dec!(10), dec!(9), dec!(9)),
            item(dec!(5), dec!(20), dec!(0), dec!(2.5), dec!(2.5)),
        ];

        assert_eq!(Summary::compute(&items), Summary::compute(&items));
    }
}
