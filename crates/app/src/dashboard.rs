//! View model for the dashboard screen.
//!
//! Holds the latest KPI snapshot and renders every label through the
//! formatting helpers. An absent snapshot (startup, or a failed
//! refresh) renders "N/A" placeholders and empty charts instead of
//! crashing the screen.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use tallybook_core::dashboard::{
    format_amount, format_ratio, AgingChart, AgingSummary, DashboardKpi,
};
use tallybook_shared::Outcome;

use crate::gateway::DashboardGateway;

/// View model for the dashboard screen.
pub struct DashboardModel {
    gateway: Arc<dyn DashboardGateway>,
    snapshot: Option<DashboardKpi>,
}

impl DashboardModel {
    /// Creates the model with no snapshot loaded yet.
    #[must_use]
    pub fn new(gateway: Arc<dyn DashboardGateway>) -> Self {
        Self {
            gateway,
            snapshot: None,
        }
    }

    /// Recomputes the snapshot for the as-of date.
    ///
    /// On failure the stale snapshot is discarded so the screen shows
    /// placeholders instead of out-of-date figures.
    pub async fn refresh(&mut self, as_of: NaiveDate) -> Outcome<()> {
        match self.gateway.get_dashboard_kpis(as_of).await {
            Outcome::Success(kpi) => {
                self.snapshot = Some(kpi);
                Outcome::ok(())
            }
            Outcome::Failure(errors) => {
                self.snapshot = None;
                Outcome::Failure(errors)
            }
        }
    }

    /// The last-loaded snapshot, if any.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&DashboardKpi> {
        self.snapshot.as_ref()
    }

    /// The period heading, or a placeholder before the first load.
    #[must_use]
    pub fn period_label(&self) -> String {
        self.snapshot
            .as_ref()
            .map_or_else(|| "N/A".to_string(), |kpi| kpi.period_label.clone())
    }

    /// Formatted year-to-date revenue.
    #[must_use]
    pub fn ytd_revenue_label(&self) -> String {
        self.amount_label(|kpi| kpi.ytd_revenue)
    }

    /// Formatted year-to-date expenses.
    #[must_use]
    pub fn ytd_expenses_label(&self) -> String {
        self.amount_label(|kpi| kpi.ytd_expenses)
    }

    /// Formatted year-to-date net profit.
    #[must_use]
    pub fn ytd_net_profit_label(&self) -> String {
        self.amount_label(|kpi| kpi.ytd_net_profit)
    }

    /// Formatted cash balance.
    #[must_use]
    pub fn cash_balance_label(&self) -> String {
        self.amount_label(|kpi| kpi.cash_balance)
    }

    /// Formatted accounts receivable total.
    #[must_use]
    pub fn ar_total_label(&self) -> String {
        self.amount_label(|kpi| kpi.ar_total)
    }

    /// Formatted overdue accounts receivable.
    #[must_use]
    pub fn ar_overdue_label(&self) -> String {
        self.amount_label(|kpi| kpi.ar_overdue)
    }

    /// Formatted accounts payable total.
    #[must_use]
    pub fn ap_total_label(&self) -> String {
        self.amount_label(|kpi| kpi.ap_total)
    }

    /// Formatted overdue accounts payable.
    #[must_use]
    pub fn ap_overdue_label(&self) -> String {
        self.amount_label(|kpi| kpi.ap_overdue)
    }

    /// Formatted current ratio.
    #[must_use]
    pub fn current_ratio_label(&self) -> String {
        self.ratio_label(|kpi| kpi.current_ratio)
    }

    /// Formatted quick ratio.
    #[must_use]
    pub fn quick_ratio_label(&self) -> String {
        self.ratio_label(|kpi| kpi.quick_ratio)
    }

    /// Formatted debt-to-equity ratio.
    #[must_use]
    pub fn debt_to_equity_label(&self) -> String {
        self.ratio_label(|kpi| kpi.debt_to_equity)
    }

    /// Chart data for the AR aging bars.
    #[must_use]
    pub fn ar_chart(&self) -> AgingChart {
        self.aging_chart("AR Aging Summary", |kpi| kpi.ar_aging)
    }

    /// Chart data for the AP aging bars.
    #[must_use]
    pub fn ap_chart(&self) -> AgingChart {
        self.aging_chart("AP Aging Summary", |kpi| kpi.ap_aging)
    }

    fn amount_label(&self, pick: impl Fn(&DashboardKpi) -> Decimal) -> String {
        match &self.snapshot {
            Some(kpi) => format_amount(Some(pick(kpi)), &kpi.base_currency),
            None => format_amount(None, ""),
        }
    }

    fn ratio_label(&self, pick: impl Fn(&DashboardKpi) -> Option<Decimal>) -> String {
        format_ratio(self.snapshot.as_ref().and_then(pick))
    }

    fn aging_chart(&self, title: &str, pick: impl Fn(&DashboardKpi) -> AgingSummary) -> AgingChart {
        let summary = self.snapshot.as_ref().map(pick).unwrap_or_default();
        AgingChart::from_summary(title, &summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockDashboardGateway;
    use rust_decimal_macros::dec;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    fn sample_kpi() -> DashboardKpi {
        let mut ar_aging = AgingSummary::default();
        ar_aging.add(0, dec!(1000));
        ar_aging.add(45, dec!(250));
        DashboardKpi {
            as_of_date: as_of(),
            period_label: "YTD 2026 as of 29 Aug 2026".to_string(),
            base_currency: "MYR".to_string(),
            ytd_revenue: dec!(125000),
            ytd_expenses: dec!(80000),
            ytd_net_profit: dec!(45000),
            cash_balance: dec!(30250.5),
            ar_total: dec!(1250),
            ar_overdue: dec!(250),
            ar_aging,
            ap_total: dec!(600),
            ap_overdue: Decimal::ZERO,
            ap_aging: AgingSummary::default(),
            current_ratio: Some(dec!(2.345)),
            quick_ratio: None,
            debt_to_equity: Some(dec!(0.25)),
        }
    }

    #[tokio::test]
    async fn test_refresh_renders_formatted_labels() {
        let mut gateway = MockDashboardGateway::new();
        gateway
            .expect_get_dashboard_kpis()
            .returning(|_| Outcome::ok(sample_kpi()));

        let mut model = DashboardModel::new(Arc::new(gateway));
        assert!(model.refresh(as_of()).await.is_success());

        assert_eq!(model.period_label(), "YTD 2026 as of 29 Aug 2026");
        assert_eq!(model.ytd_revenue_label(), "MYR 125,000.00");
        assert_eq!(model.cash_balance_label(), "MYR 30,250.50");
        assert_eq!(model.current_ratio_label(), "2.35 : 1");
        assert_eq!(model.quick_ratio_label(), "N/A");
        assert_eq!(model.debt_to_equity_label(), "0.25 : 1");
    }

    #[tokio::test]
    async fn test_charts_reflect_snapshot_buckets() {
        let mut gateway = MockDashboardGateway::new();
        gateway
            .expect_get_dashboard_kpis()
            .returning(|_| Outcome::ok(sample_kpi()));

        let mut model = DashboardModel::new(Arc::new(gateway));
        model.refresh(as_of()).await;

        let ar = model.ar_chart();
        assert_eq!(ar.title, "AR Aging Summary");
        assert_eq!(ar.values[0], dec!(1000));
        assert_eq!(ar.values[2], dec!(250));
        assert_eq!(ar.axis_max, dec!(1150.00));

        // All-zero AP buckets still produce a usable axis.
        let ap = model.ap_chart();
        assert_eq!(ap.axis_max, Decimal::ONE_HUNDRED);
    }

    #[tokio::test]
    async fn test_before_first_load_everything_is_placeholder() {
        let gateway = MockDashboardGateway::new();
        let model = DashboardModel::new(Arc::new(gateway));

        assert!(model.snapshot().is_none());
        assert_eq!(model.period_label(), "N/A");
        assert_eq!(model.ytd_net_profit_label(), "N/A");
        assert_eq!(model.current_ratio_label(), "N/A");
        assert_eq!(model.ar_chart().axis_max, Decimal::ONE_HUNDRED);
    }

    #[tokio::test]
    async fn test_failed_refresh_discards_stale_snapshot() {
        let mut gateway = MockDashboardGateway::new();
        let mut calls = 0;
        gateway.expect_get_dashboard_kpis().returning(move |_| {
            calls += 1;
            if calls == 1 {
                Outcome::ok(sample_kpi())
            } else {
                Outcome::fail("database is locked")
            }
        });

        let mut model = DashboardModel::new(Arc::new(gateway));
        model.refresh(as_of()).await;
        assert!(model.snapshot().is_some());

        let outcome = model.refresh(as_of()).await;
        assert!(!outcome.is_success());
        assert!(model.snapshot().is_none());
        assert_eq!(model.ar_total_label(), "N/A");
    }
}
