//! Core data models for monthly budget sheets

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{ChargeType, Period};

/// One family's budget record for a given (year, month) pair.
///
/// Salaries, charges, and budgets keep their insertion order; the
/// engine never reorders input collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    /// Storage identifier (0 for a sheet not yet persisted)
    pub id: i64,
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub salaries: Vec<Salary>,
    pub charges: Vec<Charge>,
    pub budgets: Vec<Budget>,
}

impl Sheet {
    /// The sheet's period
    pub fn period(&self) -> Period {
        Period::new(self.year, self.month)
    }

    /// French display label, e.g. "Janvier 2026"
    pub fn period_label(&self) -> String {
        self.period().label()
    }
}

/// A single income line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salary {
    /// Display label of the earning member
    pub person: String,
    /// Free-text income category ("Salaire", "Prime", ...)
    pub category: String,
    pub label: String,
    /// Non-negative
    pub amount: Decimal,
}

/// A single expense line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charge {
    #[serde(rename = "type")]
    pub charge_type: ChargeType,
    /// None/empty means the charge belongs to the whole household
    pub person: Option<String>,
    /// Free-text expense category ("Logement", "Transport", ...)
    pub category: String,
    pub label: String,
    /// Non-negative
    pub amount: Decimal,
}

/// A single envelope line. Budgets carry no member at creation; they
/// are divided equally across household members at computation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub label: String,
    /// Non-negative
    pub amount: Decimal,
}

/// A charge with its person label resolved to a canonical form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedCharge {
    #[serde(rename = "type")]
    pub charge_type: ChargeType,
    /// Never empty; "Commun" when the charge is unattributed
    pub person: String,
    pub label: String,
    pub amount: Decimal,
}
