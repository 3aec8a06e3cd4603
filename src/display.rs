//! Price formatting for CLI output.
//!
//! Unit prices render as "£ 0.12 / 100ml" (the multiplier is dropped when
//! the denominator is 1) and shelf prices as "£1.20". Integer parts are
//! grouped with commas so large amounts stay readable.

use price_tally_core::models::PriceRecord;

/// Format a unit price with its per-amount suffix, e.g. "£ 0.12 / 100ml".
pub fn format_unit_price(currency: &str, record: &PriceRecord) -> String {
    let per = if record.denominator() == 1 {
        record.unit().to_string()
    } else {
        format!("{}{}", record.denominator(), record.unit())
    };
    format!(
        "{} {} / {}",
        currency,
        format_amount(record.unit_price()),
        per
    )
}

/// Format a shelf price, e.g. "£1.20".
pub fn format_price(currency: &str, price: f64) -> String {
    format!("{}{}", currency, format_amount(price))
}

/// Describe one observation: tags, pack size, and shelf price.
pub fn format_detail(currency: &str, record: &PriceRecord) -> String {
    let pack = format!(
        "{} {} {}",
        record.size(),
        record.unit(),
        format_price(currency, record.price())
    );
    if record.tags().is_empty() {
        pack
    } else {
        format!("{} {}", record.tags().join(", "), pack)
    }
}

/// Format a monetary amount with two decimals and comma-grouped thousands.
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (formatted.as_str(), "00"),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    format!("{}{}.{}", sign, group_thousands(digits), frac_part)
}

fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}
