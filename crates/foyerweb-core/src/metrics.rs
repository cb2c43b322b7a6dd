//! Sheet metrics aggregation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Sheet;

/// Summary totals for one sheet or a set of sheets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMetrics {
    /// Sum of all salary amounts
    pub income: Decimal,
    /// Sum of all charge amounts, common and individual alike
    pub expenses: Decimal,
    /// Sum of all envelope amounts
    pub budgets: Decimal,
    /// income − expenses − budgets
    pub balance: Decimal,
}

/// Compute the summary totals of a single sheet.
///
/// The balance subtracts budget envelopes as well as charges:
/// `balance = income − expenses − budgets`. An older revision of the
/// data excluded budgets from the balance; this formula is the
/// canonical one and is pinned by tests.
pub fn compute_sheet_metrics(sheet: &Sheet) -> SheetMetrics {
    let income: Decimal = sheet.salaries.iter().map(|s| s.amount).sum();
    let expenses: Decimal = sheet.charges.iter().map(|c| c.amount).sum();
    let budgets: Decimal = sheet.budgets.iter().map(|b| b.amount).sum();
    SheetMetrics {
        income,
        expenses,
        budgets,
        balance: income - expenses - budgets,
    }
}

/// Element-wise sum of per-sheet metrics over a collection of sheets.
/// Commutative; an empty collection yields all zeros.
pub fn aggregate_sheet_metrics(sheets: &[Sheet]) -> SheetMetrics {
    sheets.iter().fold(SheetMetrics::default(), |totals, sheet| {
        let metrics = compute_sheet_metrics(sheet);
        SheetMetrics {
            income: totals.income + metrics.income,
            expenses: totals.expenses + metrics.expenses,
            budgets: totals.budgets + metrics.budgets,
            balance: totals.balance + metrics.balance,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Charge, Salary};
    use crate::types::ChargeType;
    use rust_decimal_macros::dec;

    fn salary(person: &str, amount: Decimal) -> Salary {
        Salary {
            person: person.to_string(),
            category: "Salaire".to_string(),
            label: "Salaire".to_string(),
            amount,
        }
    }

    fn charge(charge_type: ChargeType, person: Option<&str>, amount: Decimal) -> Charge {
        Charge {
            charge_type,
            person: person.map(|p| p.to_string()),
            category: "Fixes".to_string(),
            label: "Charge".to_string(),
            amount,
        }
    }

    fn budget(amount: Decimal) -> Budget {
        Budget {
            label: "Courses".to_string(),
            amount,
        }
    }

    fn sheet(salaries: Vec<Salary>, charges: Vec<Charge>, budgets: Vec<Budget>) -> Sheet {
        Sheet {
            id: 0,
            year: 2026,
            month: 1,
            salaries,
            charges,
            budgets,
        }
    }

    #[test]
    fn test_balance_formula_pinned() {
        // Scenario A from the product brief: one salary, one common
        // charge, one budget
        let s = sheet(
            vec![salary("Moi", dec!(2000))],
            vec![charge(ChargeType::FixedCommon, None, dec!(600))],
            vec![budget(dec!(300))],
        );
        let metrics = compute_sheet_metrics(&s);
        assert_eq!(metrics.income, dec!(2000));
        assert_eq!(metrics.expenses, dec!(600));
        assert_eq!(metrics.budgets, dec!(300));
        // balance = income − expenses − budgets, budgets included
        assert_eq!(metrics.balance, dec!(1100));
        assert_eq!(
            metrics.balance,
            metrics.income - metrics.expenses - metrics.budgets
        );
    }

    #[test]
    fn test_all_charge_types_count_as_expenses() {
        let s = sheet(
            vec![],
            vec![
                charge(ChargeType::FixedCommon, None, dec!(100)),
                charge(ChargeType::FixedIndividual, Some("Moi"), dec!(50)),
                charge(ChargeType::ExceptionalCommon, None, dec!(25)),
                charge(ChargeType::ExceptionalIndividual, Some("Elle"), dec!(10)),
            ],
            vec![],
        );
        assert_eq!(compute_sheet_metrics(&s).expenses, dec!(185));
    }

    #[test]
    fn test_empty_sheet_is_all_zero() {
        let metrics = compute_sheet_metrics(&sheet(vec![], vec![], vec![]));
        assert_eq!(metrics, SheetMetrics::default());
    }

    #[test]
    fn test_aggregate_empty_is_zero() {
        assert_eq!(aggregate_sheet_metrics(&[]), SheetMetrics::default());
    }

    #[test]
    fn test_aggregate_is_elementwise_and_commutative() {
        let a = sheet(
            vec![salary("Moi", dec!(2000))],
            vec![charge(ChargeType::FixedCommon, None, dec!(600))],
            vec![budget(dec!(300))],
        );
        let b = sheet(
            vec![salary("Elle", dec!(1500))],
            vec![charge(ChargeType::FixedIndividual, Some("Elle"), dec!(200))],
            vec![],
        );

        let forward = aggregate_sheet_metrics(&[a.clone(), b.clone()]);
        let backward = aggregate_sheet_metrics(&[b.clone(), a.clone()]);
        assert_eq!(forward, backward);

        let ma = compute_sheet_metrics(&a);
        let mb = compute_sheet_metrics(&b);
        assert_eq!(forward.income, ma.income + mb.income);
        assert_eq!(forward.expenses, ma.expenses + mb.expenses);
        assert_eq!(forward.budgets, ma.budgets + mb.budgets);
        assert_eq!(forward.balance, ma.balance + mb.balance);
    }
}
