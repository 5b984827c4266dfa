//! KPI snapshot types and display formatting.

pub mod format;
pub mod types;

pub use format::{format_amount, format_ratio, AgingChart};
pub use types::{AgingSummary, DashboardKpi};
