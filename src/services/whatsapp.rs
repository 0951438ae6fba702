//! WhatsApp deep link with a prefilled invoice message.

use rust_decimal::Decimal;

/// Build a `https://wa.me/<digits>?text=...` link. Everything but digits is
/// stripped from the phone number, so "+91 98765-43210" works as-is.
pub fn share_link(phone: &str, invoice_number: &str, amount: Decimal) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let message = format!(
        "Hello! Your invoice {} for Rs {:.2} is ready. Thank you for your business!",
        invoice_number.trim(),
        amount,
    );

    format!("https://wa.me/{}?text={}", digits, urlencoding::encode(&message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn strips_non_digits_from_phone() {
        let link = share_link("+91 98765-43210", "INV-42", dec!(212));

        assert!(link.starts_with("https://wa.me/919876543210?text="));
    }

    #[test]
    fn message_carries_number_and_amount() {
        let link = share_link("919876543210", "INV-42", dec!(212));

        assert!(link.contains("INV-42"));
        assert!(link.contains("Rs%20212.00"));
    }
}
