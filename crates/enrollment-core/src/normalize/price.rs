use std::fmt;

use crate::error::ValidationError;

/// Non-negative amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    cents: i64,
}

impl Price {
    pub fn from_cents(cents: i64) -> Option<Self> {
        if cents < 0 {
            return None;
        }
        Some(Self { cents })
    }

    /// Converts a backend number, rounding to the nearest cent.
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        let cents = (amount * 100.0).round();
        if cents > i64::MAX as f64 {
            return None;
        }
        Self::from_cents(cents as i64)
    }

    pub const fn cents(self) -> i64 {
        self.cents
    }

    pub fn as_decimal(self) -> f64 {
        (self.cents as f64) / 100.0
    }

    /// Renders `R$ 1.234,56`.
    pub fn format_brl(self) -> String {
        let units = (self.cents / 100).to_string();
        let mut grouped = String::new();
        for (index, digit) in units.chars().enumerate() {
            if index > 0 && (units.len() - index) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }
        format!("R$ {grouped},{:02}", self.cents % 100)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_brl())
    }
}

/// Parses a localized currency string such as `R$ 1.234,56`.
///
/// A comma is the decimal separator and dots group thousands. Without a comma,
/// a single dot followed by one or two digits is read as a decimal point.
pub fn parse_price(value: &str) -> Result<Price, ValidationError> {
    let without_symbol = value.trim().trim_start_matches("R$");
    let compact = without_symbol
        .chars()
        .filter(|character| !character.is_whitespace())
        .collect::<String>();
    if compact.is_empty() {
        return Err(ValidationError::InvalidPrice);
    }

    let (integer_part, fraction_part) = split_decimal(&compact)?;
    let integer_digits = strip_thousands(integer_part)?;
    let fraction_digits = fraction_part.unwrap_or("");
    if fraction_digits.len() > 2 || !fraction_digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPrice);
    }

    let units = integer_digits
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidPrice)?;
    let fraction = match fraction_digits.len() {
        0 => 0,
        1 => fraction_digits
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidPrice)?
            * 10,
        _ => fraction_digits
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidPrice)?,
    };

    units
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(fraction))
        .and_then(Price::from_cents)
        .ok_or(ValidationError::InvalidPrice)
}

fn split_decimal(value: &str) -> Result<(&str, Option<&str>), ValidationError> {
    let comma_count = value.matches(',').count();
    if comma_count > 1 {
        return Err(ValidationError::InvalidPrice);
    }
    if let Some((integer, fraction)) = value.split_once(',') {
        return Ok((integer, Some(fraction)));
    }

    if value.matches('.').count() == 1
        && let Some((integer, fraction)) = value.split_once('.')
        && (1..=2).contains(&fraction.len())
    {
        return Ok((integer, Some(fraction)));
    }
    Ok((value, None))
}

fn strip_thousands(value: &str) -> Result<String, ValidationError> {
    let groups = value.split('.').collect::<Vec<&str>>();
    let valid_shape = groups.iter().enumerate().all(|(index, group)| {
        let digits_only = !group.is_empty() && group.chars().all(|c| c.is_ascii_digit());
        if index == 0 {
            digits_only && (group.len() <= 3 || groups.len() == 1)
        } else {
            digits_only && group.len() == 3
        }
    });
    if !valid_shape {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(groups.concat())
}

#[cfg(test)]
mod tests {
    use super::{Price, parse_price};
    use crate::error::ValidationError;

    fn cents(value: &str) -> Option<i64> {
        parse_price(value).ok().map(Price::cents)
    }

    #[test]
    fn brazilian_currency_strings_are_parsed_to_cents() {
        assert_eq!(cents("R$ 1.234,56"), Some(123_456));
        assert_eq!(cents("R$\u{a0}150,00"), Some(15_000));
        assert_eq!(cents("99,9"), Some(9_990));
        assert_eq!(cents("1.000"), Some(100_000));
        assert_eq!(cents("2500"), Some(250_000));
        assert_eq!(cents("0,50"), Some(50));
    }

    #[test]
    fn single_dot_with_cents_is_a_decimal_point() {
        assert_eq!(cents("12.50"), Some(1_250));
        assert_eq!(cents("12.5"), Some(1_250));
    }

    #[test]
    fn malformed_amounts_are_rejected() {
        for value in [
            "", "R$", "abc", "-10,00", "1,234,56", "12,345", "1.23.4", "1.2345,00", ",50",
        ] {
            assert_eq!(
                parse_price(value),
                Err(ValidationError::InvalidPrice),
                "{value}"
            );
        }
    }

    #[test]
    fn prices_format_back_to_brazilian_currency() {
        let price = Price::from_cents(123_456);
        assert_eq!(
            price.map(Price::format_brl),
            Some("R$ 1.234,56".to_string())
        );
        assert_eq!(
            Price::from_cents(5).map(|value| value.to_string()),
            Some("R$ 0,05".to_string())
        );
        assert_eq!(
            Price::from_decimal(1_000_000.1).map(Price::format_brl),
            Some("R$ 1.000.000,10".to_string())
        );
        assert_eq!(Price::from_decimal(-1.0), None);
    }
}
