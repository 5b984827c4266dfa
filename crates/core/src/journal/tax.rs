//! Per-line tax calculation.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// How a tax code computes its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxKind {
    /// Tax is a percentage of the line's base amount (e.g. GST).
    Percentage,
    /// Tax is a fixed amount entered on the source document; the grid
    /// never derives it from the line amount.
    Fixed,
}

impl TaxKind {
    /// Returns the string representation of the tax kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }

    /// Parses a tax kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "percentage" => Some(Self::Percentage),
            "fixed" => Some(Self::Fixed),
            _ => None,
        }
    }
}

/// A tax code from the reference cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCode {
    /// Unique code (e.g. "SR", "ZR").
    pub code: String,
    /// Display description.
    pub description: String,
    /// How the tax amount is computed.
    pub kind: TaxKind,
    /// Rate in percent for percentage-kind codes (e.g. 7 for 7%).
    pub rate: Decimal,
}

/// Computes the tax amount for a line.
///
/// Tax is `base_amount x rate / 100`, rounded half-up to 2 decimal
/// places, and only applies to percentage-kind tax codes. Fixed-kind
/// codes and zero base amounts yield zero.
#[must_use]
pub fn compute_line_tax(base_amount: Decimal, tax_code: Option<&TaxCode>) -> Decimal {
    let Some(tax_code) = tax_code else {
        return Decimal::ZERO;
    };
    if tax_code.kind != TaxKind::Percentage || base_amount.is_zero() {
        return Decimal::ZERO;
    }

    (base_amount * tax_code.rate / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
