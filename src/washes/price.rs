//! Parsing of Brazilian-real currency strings such as `"R$ 1.234,56"`.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::QueueError;

const CURRENCY_PREFIX: &str = "R$";

/// Parse a localized price: optional `R$` prefix, `.` as thousands
/// separator, `,` as decimal separator. Absent or blank input is zero.
pub fn parse_price(text: Option<&str>) -> Result<Decimal, QueueError> {
    let raw = match text.map(str::trim) {
        None | Some("") => return Ok(Decimal::ZERO),
        Some(raw) => raw,
    };

    let digits = raw.strip_prefix(CURRENCY_PREFIX).unwrap_or(raw).trim();
    if digits.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let normalized: String = digits
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let price = Decimal::from_str(&normalized).map_err(|_| {
        QueueError::validation("washPrice", format!("'{}' is not a valid amount", raw))
    })?;

    if price.is_sign_negative() {
        return Err(QueueError::validation("washPrice", "must not be negative"));
    }
    Ok(price)
}
