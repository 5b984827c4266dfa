//! Dashboard KPI snapshot types.
//!
//! A snapshot is computed for an as-of date and base currency by the
//! dashboard manager, and is immutable once produced. Ratios that are
//! undefined (zero denominators) are `None` and render as "N/A".

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Time-since-due aging buckets for receivables/payables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgingSummary {
    /// Not yet due.
    pub current: Decimal,
    /// Overdue by 1-30 days.
    pub days_1_30: Decimal,
    /// Overdue by 31-60 days.
    pub days_31_60: Decimal,
    /// Overdue by 61-90 days.
    pub days_61_90: Decimal,
    /// Overdue by 91 or more days.
    pub days_91_plus: Decimal,
}

impl AgingSummary {
    /// Bucket labels in display order.
    pub const LABELS: [&'static str; 5] = ["Current", "1-30", "31-60", "61-90", "91+"];

    /// Adds an amount to the bucket for the given days overdue.
    /// Non-positive values are "Current".
    pub fn add(&mut self, days_overdue: i64, amount: Decimal) {
        match days_overdue {
            i64::MIN..=0 => self.current += amount,
            1..=30 => self.days_1_30 += amount,
            31..=60 => self.days_31_60 += amount,
            61..=90 => self.days_61_90 += amount,
            _ => self.days_91_plus += amount,
        }
    }

    /// The bucket values in display order.
    #[must_use]
    pub const fn values(&self) -> [Decimal; 5] {
        [
            self.current,
            self.days_1_30,
            self.days_31_60,
            self.days_61_90,
            self.days_91_plus,
        ]
    }

    /// The total across all buckets.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.current + self.days_1_30 + self.days_31_60 + self.days_61_90 + self.days_91_plus
    }

    /// The total of the overdue buckets (everything past "Current").
    #[must_use]
    pub fn overdue(&self) -> Decimal {
        self.total() - self.current
    }
}

/// A flat snapshot of computed financial metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardKpi {
    /// The as-of date the snapshot was computed for.
    pub as_of_date: NaiveDate,
    /// Human-readable period label (e.g. "YTD 2026 as of 29 Aug 2026").
    pub period_label: String,
    /// Base currency code all amounts are stated in.
    pub base_currency: String,
    /// Year-to-date revenue.
    pub ytd_revenue: Decimal,
    /// Year-to-date expenses.
    pub ytd_expenses: Decimal,
    /// Year-to-date net profit (revenue minus expenses).
    pub ytd_net_profit: Decimal,
    /// Current cash balance across bank accounts.
    pub cash_balance: Decimal,
    /// Total outstanding accounts receivable.
    pub ar_total: Decimal,
    /// Total overdue accounts receivable.
    pub ar_overdue: Decimal,
    /// AR aging buckets.
    pub ar_aging: AgingSummary,
    /// Total outstanding accounts payable.
    pub ap_total: Decimal,
    /// Total overdue accounts payable.
    pub ap_overdue: Decimal,
    /// AP aging buckets.
    pub ap_aging: AgingSummary,
    /// Current ratio (current assets / current liabilities), if defined.
    pub current_ratio: Option<Decimal>,
    /// Quick ratio (liquid assets / current liabilities), if defined.
    pub quick_ratio: Option<Decimal>,
    /// Debt-to-equity ratio (total liabilities / equity), if defined.
    pub debt_to_equity: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(-5, "current")]
    #[case(0, "current")]
    #[case(1, "1_30")]
    #[case(30, "1_30")]
    #[case(31, "31_60")]
    #[case(60, "31_60")]
    #[case(61, "61_90")]
    #[case(90, "61_90")]
    #[case(91, "91_plus")]
    #[case(400, "91_plus")]
    fn test_bucket_boundaries(#[case] days: i64, #[case] expected: &str) {
        let mut aging = AgingSummary::default();
        aging.add(days, dec!(10));
        let hit = match expected {
            "current" => aging.current,
            "1_30" => aging.days_1_30,
            "31_60" => aging.days_31_60,
            "61_90" => aging.days_61_90,
            _ => aging.days_91_plus,
        };
        assert_eq!(hit, dec!(10));
        assert_eq!(aging.total(), dec!(10));
    }

    #[test]
    fn test_overdue_excludes_current() {
        let mut aging = AgingSummary::default();
        aging.add(0, dec!(100));
        aging.add(15, dec!(40));
        aging.add(120, dec!(60));
        assert_eq!(aging.total(), dec!(200));
        assert_eq!(aging.overdue(), dec!(100));
    }

    #[test]
    fn test_values_order_matches_labels() {
        let mut aging = AgingSummary::default();
        aging.add(0, dec!(1));
        aging.add(10, dec!(2));
        aging.add(40, dec!(3));
        aging.add(70, dec!(4));
        aging.add(100, dec!(5));
        assert_eq!(
            aging.values(),
            [dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)]
        );
        assert_eq!(AgingSummary::LABELS.len(), aging.values().len());
    }
}
