//! Dashboard repository computing the KPI snapshot.
//!
//! All figures come from posted entries only. Aging buckets are keyed
//! by days outstanding from the entry date relative to the as-of date;
//! there is no separate invoice ledger with due dates.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QuerySelect, RelationTrait,
};
use uuid::Uuid;

use tallybook_core::dashboard::{AgingSummary, DashboardKpi};
use tallybook_core::workflow::EntryStatus;

use crate::entities::{account_types, accounts, journal_entries, journal_entry_lines};

/// Account type names treated as receivable/payable control accounts.
const ACCOUNTS_RECEIVABLE: &str = "Accounts Receivable";
const ACCOUNTS_PAYABLE: &str = "Accounts Payable";

/// Account type names contributing to the current ratio.
const CURRENT_ASSET_TYPES: [&str; 3] = ["Current Asset", "Cash and Bank", ACCOUNTS_RECEIVABLE];
const CURRENT_LIABILITY_TYPES: [&str; 2] = ["Current Liability", ACCOUNTS_PAYABLE];

/// Error types for dashboard operations.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// One posted line with its entry date, the unit of KPI aggregation.
#[derive(Debug, Clone, FromQueryResult)]
struct PostedLine {
    account_id: Uuid,
    debit: Decimal,
    credit: Decimal,
    entry_date: NaiveDate,
}

/// Classification of an account for KPI bucketing.
#[derive(Debug, Clone)]
struct AccountClass {
    category: String,
    type_name: String,
    is_bank: bool,
}

/// Dashboard repository for KPI queries.
#[derive(Debug)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes the KPI snapshot as of the given date.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn get_dashboard_kpis(
        &self,
        as_of: NaiveDate,
        base_currency: &str,
    ) -> Result<DashboardKpi, DashboardError> {
        let types: HashMap<i32, String> = account_types::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect();

        let classes: HashMap<Uuid, AccountClass> = accounts::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|account| {
                let type_name = types
                    .get(&account.account_type_id)
                    .cloned()
                    .unwrap_or_default();
                (
                    account.id,
                    AccountClass {
                        category: account.category,
                        type_name,
                        is_bank: account.is_bank_account,
                    },
                )
            })
            .collect();

        let rows = journal_entry_lines::Entity::find()
            .select_only()
            .column(journal_entry_lines::Column::AccountId)
            .column(journal_entry_lines::Column::Debit)
            .column(journal_entry_lines::Column::Credit)
            .column_as(journal_entries::Column::EntryDate, "entry_date")
            .join(
                JoinType::InnerJoin,
                journal_entry_lines::Relation::JournalEntries.def(),
            )
            .filter(journal_entries::Column::Status.eq(EntryStatus::Posted.as_str()))
            .filter(journal_entries::Column::EntryDate.lte(as_of))
            .into_model::<PostedLine>()
            .all(&self.db)
            .await?;

        Ok(aggregate(&classes, &rows, as_of, base_currency))
    }
}

/// Folds posted lines into the KPI snapshot.
fn aggregate(
    classes: &HashMap<Uuid, AccountClass>,
    rows: &[PostedLine],
    as_of: NaiveDate,
    base_currency: &str,
) -> DashboardKpi {
    let year_start = NaiveDate::from_ymd_opt(as_of.year(), 1, 1).unwrap_or(as_of);

    let mut ytd_revenue = Decimal::ZERO;
    let mut ytd_expenses = Decimal::ZERO;
    let mut cash_balance = Decimal::ZERO;
    let mut ar_aging = AgingSummary::default();
    let mut ap_aging = AgingSummary::default();
    let mut current_assets = Decimal::ZERO;
    let mut current_liabilities = Decimal::ZERO;
    let mut total_liabilities = Decimal::ZERO;
    let mut total_equity = Decimal::ZERO;

    for row in rows {
        let Some(class) = classes.get(&row.account_id) else {
            tracing::warn!(account_id = %row.account_id, "posted line references unknown account");
            continue;
        };
        let debit_net = row.debit - row.credit;
        let credit_net = row.credit - row.debit;
        let days_outstanding = (as_of - row.entry_date).num_days();

        match class.category.as_str() {
            "revenue" => {
                if row.entry_date >= year_start {
                    ytd_revenue += credit_net;
                }
            }
            "expense" => {
                if row.entry_date >= year_start {
                    ytd_expenses += debit_net;
                }
            }
            "asset" => {
                if class.is_bank {
                    cash_balance += debit_net;
                }
                if class.type_name == ACCOUNTS_RECEIVABLE {
                    ar_aging.add(days_outstanding, debit_net);
                }
                if class.is_bank || CURRENT_ASSET_TYPES.contains(&class.type_name.as_str()) {
                    current_assets += debit_net;
                }
            }
            "liability" => {
                total_liabilities += credit_net;
                if class.type_name == ACCOUNTS_PAYABLE {
                    ap_aging.add(days_outstanding, credit_net);
                }
                if CURRENT_LIABILITY_TYPES.contains(&class.type_name.as_str()) {
                    current_liabilities += credit_net;
                }
            }
            "equity" => total_equity += credit_net,
            other => {
                tracing::warn!(account_id = %row.account_id, category = other, "unknown account category");
            }
        }
    }

    DashboardKpi {
        as_of_date: as_of,
        period_label: format!("YTD {} as of {}", as_of.year(), as_of.format("%d %b %Y")),
        base_currency: base_currency.to_string(),
        ytd_revenue,
        ytd_expenses,
        ytd_net_profit: ytd_revenue - ytd_expenses,
        cash_balance,
        ar_total: ar_aging.total(),
        ar_overdue: ar_aging.overdue(),
        ar_aging,
        ap_total: ap_aging.total(),
        ap_overdue: ap_aging.overdue(),
        ap_aging,
        current_ratio: ratio(current_assets, current_liabilities),
        quick_ratio: ratio(cash_balance + ar_aging.total(), current_liabilities),
        debt_to_equity: ratio(total_liabilities, total_equity),
    }
}

/// A ratio, or `None` when the denominator is zero.
fn ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        None
    } else {
        Some(numerator / denominator)
    }
}
