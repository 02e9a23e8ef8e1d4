//! Currency display for monetary metrics
//!
//! Rupee amounts follow Indian conventions (lakh/crore digit grouping, large
//! figures in crores); dollar amounts follow US conventions (thousands
//! grouping, large figures in millions).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const CRORE: f64 = 10_000_000.0;
const MILLION: f64 = 1_000_000.0;

/// Display currency for monetary metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// Indian rupee
    #[default]
    Inr,
    /// US dollar
    Usd,
}

impl Currency {
    /// Tag accepted by [`format_currency`]
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Inr => "inr",
            Self::Usd => "usd",
        }
    }

    /// Format an amount in this currency
    pub fn format(self, amount: f64) -> String {
        if !amount.is_finite() {
            return amount.to_string();
        }

        let magnitude = amount.abs();
        let body = match self {
            Self::Inr if magnitude >= CRORE => {
                format!("₹{:.0} crores", (magnitude / CRORE).round())
            }
            Self::Inr => format!("₹{}", full_value(magnitude, group_indian)),
            Self::Usd if magnitude >= MILLION => {
                format!("${:.0}M", (magnitude / MILLION).round())
            }
            Self::Usd => format!("${}", full_value(magnitude, group_thousands)),
        };

        // A negative amount that displays as zero loses its sign
        if amount < 0.0 && body.bytes().any(|b| matches!(b, b'1'..=b'9')) {
            format!("-{body}")
        } else {
            body
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("inr") {
            Ok(Self::Inr)
        } else if s.eq_ignore_ascii_case("usd") {
            Ok(Self::Usd)
        } else {
            Err(format!("unknown currency tag: {s}"))
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Format a raw monetary amount for display
///
/// `"inr"` and `"usd"` (any ASCII case) get locale formatting; any other tag
/// yields the plain number. Below a crore (INR) or a million (USD) the full
/// value is shown with up to two decimal places.
///
/// ```
/// use newsletter_assembler::format_currency;
///
/// assert_eq!(format_currency(5_000_000_000.0, "inr"), "₹500 crores");
/// assert_eq!(format_currency(1_234_567.0, "inr"), "₹12,34,567");
/// assert_eq!(format_currency(25_000_000.0, "usd"), "$25M");
/// assert_eq!(format_currency(123_456.0, "usd"), "$123,456");
/// assert_eq!(format_currency(1_234.56, "usd"), "$1,234.56");
/// assert_eq!(format_currency(5000.0, "eur"), "5000");
/// ```
pub fn format_currency(amount: f64, currency: &str) -> String {
    match currency.parse::<Currency>() {
        Ok(currency) => currency.format(amount),
        Err(_) => amount.to_string(),
    }
}

/// Grouped integer part plus at most two decimals, trailing zeros dropped
///
/// The fraction is capped at `.99` so a sub-threshold amount never reads as
/// the threshold itself.
fn full_value(magnitude: f64, group: fn(&str) -> String) -> String {
    let whole = magnitude.trunc();
    let cents = (((magnitude - whole) * 100.0).round() as u8).min(99);

    let mut out = group(&format!("{whole:.0}"));
    if cents > 0 {
        let fraction = format!("{cents:02}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

/// `1234567` -> `1,234,567`
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234567` -> `12,34,567`
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, last_three) = digits.split_at(digits.len() - 3);

    let head_len = head.len();
    let mut out = String::with_capacity(digits.len() + head_len / 2 + 1);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head_len - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(last_three);
    out
}
