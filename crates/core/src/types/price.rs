//! Price representation using decimal arithmetic.
//!
//! Backend rows carry a numeric amount and a free-form ISO 4217 code. Codes
//! without a known symbol are displayed verbatim in front of the amount.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code as stored by the backend.
    pub currency_code: String,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub fn new(amount: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
        }
    }

    /// Card display: symbol plus the amount rounded to a whole unit, grouped
    /// in threes (`₹129,999`).
    #[must_use]
    pub fn display_rounded(&self) -> String {
        let whole = self
            .amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        format!(
            "{}{}",
            currency_symbol(&self.currency_code),
            group_thousands(&whole.to_string())
        )
    }

    /// Detail display: symbol plus the full amount without trailing zeros.
    #[must_use]
    pub fn display_exact(&self) -> String {
        let normalized = self.amount.normalize().to_string();
        let (int_part, frac_part) = normalized
            .split_once('.')
            .map_or((normalized.as_str(), None), |(i, f)| (i, Some(f)));

        let mut out = format!(
            "{}{}",
            currency_symbol(&self.currency_code),
            group_thousands(int_part)
        );
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        out
    }
}

/// Display symbol for a currency code, falling back to the code itself.
#[must_use]
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "USD" => "$",
        "INR" => "₹",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "AUD" => "A$",
        "CAD" => "C$",
        other => other,
    }
}

/// Insert `,` between groups of three digits of an integer string.
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = digits
        .strip_prefix('-')
        .map_or(("", digits), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}")
}
