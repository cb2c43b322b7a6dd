//! Core sheet computation and business logic
//!
//! A monthly sheet flows through four pure, stateless stages:
//!
//! 1. normalization — canonicalize person labels and charge-type codes
//! 2. metrics — income/expense/budget/balance totals
//! 3. distribution — common fixed charges allocated by income share
//! 4. balances — the final per-member snapshot, budgets split equally
//!
//! Data flows strictly top-down; no stage mutates another's output.
//! The engine performs no I/O and is safe to call concurrently.

pub mod balances;
pub mod distribution;
pub mod error;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod reports;
pub mod types;
pub mod validate;

pub use balances::{compute_member_balances, BalanceCard, MemberBalances};
pub use distribution::{
    compute_income_distribution, IncomeDistribution, IncomeDistributionItem,
};
pub use error::{CoreError, CoreErrorCode, CoreResult};
pub use metrics::{aggregate_sheet_metrics, compute_sheet_metrics, SheetMetrics};
pub use models::{Budget, Charge, NormalizedCharge, Salary, Sheet};
pub use normalize::{
    normalize_charge_type, normalize_charges, normalize_person_label, slugify,
};
pub use reports::{
    charge_type_summary, compute_dashboard_summary, compute_sheet_overview,
    DashboardSummary, SheetOverview,
};
pub use types::{month_name, ChargeType, Period, MONTH_NAMES};
pub use validate::validate_sheet;
