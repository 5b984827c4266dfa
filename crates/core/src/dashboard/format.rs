//! Display formatting for KPI values.
//!
//! Null or non-finite values always render as "N/A" rather than
//! failing the whole dashboard refresh.

use rust_decimal::Decimal;

use super::types::AgingSummary;

/// Formats a currency amount as "SYM 1,234.56".
///
/// `None` renders as "N/A"; an empty currency symbol omits the prefix.
#[must_use]
pub fn format_amount(value: Option<Decimal>, currency_symbol: &str) -> String {
    let Some(value) = value else {
        return "N/A".to_string();
    };
    let grouped = group_thousands(value);
    if currency_symbol.is_empty() {
        grouped
    } else {
        format!("{currency_symbol} {grouped}")
    }
}

/// Formats a liquidity ratio as "X.XX : 1", or "N/A" when undefined.
#[must_use]
pub fn format_ratio(value: Option<Decimal>) -> String {
    match value {
        Some(value) => format!("{:.2} : 1", value.round_dp(2)),
        None => "N/A".to_string(),
    }
}

/// Rounds to 2 decimal places and inserts thousands separators.
fn group_thousands(value: Decimal) -> String {
    let rounded = value.round_dp(2).abs();
    let text = format!("{rounded:.2}");
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}

/// Data for a 5-bar categorical aging chart.
///
/// The value axis is linear and scaled to 115% of the observed maximum
/// so the tallest bar never touches the chart frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgingChart {
    /// Chart title (e.g. "AR Aging Summary").
    pub title: String,
    /// Category labels, in display order.
    pub categories: [&'static str; 5],
    /// Bar values, in display order.
    pub values: [Decimal; 5],
    /// Upper bound of the value axis.
    pub axis_max: Decimal,
}

impl AgingChart {
    /// Axis upper bound when every bucket is zero.
    const EMPTY_AXIS_MAX: Decimal = Decimal::ONE_HUNDRED;

    /// Builds the chart data for an aging summary.
    #[must_use]
    pub fn from_summary(title: impl Into<String>, summary: &AgingSummary) -> Self {
        let values = summary.values();
        let max = values.iter().copied().max().unwrap_or(Decimal::ZERO);
        let axis_max = if max.is_zero() {
            Self::EMPTY_AXIS_MAX
        } else {
            max * Decimal::new(115, 2)
        };

        Self {
            title: title.into(),
            categories: AgingSummary::LABELS,
            values,
            axis_max,
        }
    }
}
