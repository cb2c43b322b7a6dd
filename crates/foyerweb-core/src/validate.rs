//! Sheet payload validation
//!
//! Mirrors the bounds enforced by the entry forms: year 2000-2100,
//! month 1-12, non-empty labels, non-negative amounts. Runs before a
//! payload reaches the store; the computation pipeline itself accepts
//! anything.

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::models::Sheet;

const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;

/// Validate a sheet payload before persistence.
pub fn validate_sheet(sheet: &Sheet) -> CoreResult<()> {
    if sheet.year < MIN_YEAR || sheet.year > MAX_YEAR {
        return Err(CoreError::InvalidYear { year: sheet.year });
    }
    if sheet.month < 1 || sheet.month > 12 {
        return Err(CoreError::InvalidMonth { month: sheet.month });
    }

    for (i, salary) in sheet.salaries.iter().enumerate() {
        let line = format!("salaries[{}]", i);
        check_label(&salary.label, &line)?;
        check_amount(salary.amount, &line)?;
    }
    for (i, charge) in sheet.charges.iter().enumerate() {
        let line = format!("charges[{}]", i);
        check_label(&charge.label, &line)?;
        check_amount(charge.amount, &line)?;
    }
    for (i, budget) in sheet.budgets.iter().enumerate() {
        let line = format!("budgets[{}]", i);
        check_label(&budget.label, &line)?;
        check_amount(budget.amount, &line)?;
    }

    Ok(())
}

fn check_label(label: &str, line: &str) -> CoreResult<()> {
    if label.trim().is_empty() {
        return Err(CoreError::EmptyLabel {
            line: line.to_string(),
        });
    }
    Ok(())
}

fn check_amount(amount: Decimal, line: &str) -> CoreResult<()> {
    if amount < Decimal::ZERO {
        return Err(CoreError::NegativeAmount {
            line: line.to_string(),
            amount: amount.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Charge, Salary};
    use crate::types::ChargeType;
    use crate::CoreErrorCode;
    use rust_decimal_macros::dec;

    fn valid_sheet() -> Sheet {
        Sheet {
            id: 0,
            year: 2026,
            month: 6,
            salaries: vec![Salary {
                person: "Moi".to_string(),
                category: "Salaire".to_string(),
                label: "Salaire".to_string(),
                amount: dec!(2000),
            }],
            charges: vec![Charge {
                charge_type: ChargeType::FixedCommon,
                person: None,
                category: "Logement".to_string(),
                label: "Loyer".to_string(),
                amount: dec!(800),
            }],
            budgets: vec![Budget {
                label: "Courses".to_string(),
                amount: dec!(300),
            }],
        }
    }

    #[test]
    fn test_valid_sheet_passes() {
        assert!(validate_sheet(&valid_sheet()).is_ok());
    }

    #[test]
    fn test_empty_sheet_passes() {
        let mut sheet = valid_sheet();
        sheet.salaries.clear();
        sheet.charges.clear();
        sheet.budgets.clear();
        assert!(validate_sheet(&sheet).is_ok());
    }

    #[test]
    fn test_month_bounds() {
        let mut sheet = valid_sheet();
        sheet.month = 0;
        assert_eq!(
            validate_sheet(&sheet).unwrap_err().code(),
            CoreErrorCode::InvalidMonth
        );
        sheet.month = 13;
        assert_eq!(
            validate_sheet(&sheet).unwrap_err().code(),
            CoreErrorCode::InvalidMonth
        );
    }

    #[test]
    fn test_year_bounds() {
        let mut sheet = valid_sheet();
        sheet.year = 1999;
        assert_eq!(
            validate_sheet(&sheet).unwrap_err().code(),
            CoreErrorCode::InvalidYear
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut sheet = valid_sheet();
        sheet.charges[0].amount = dec!(-5);
        assert_eq!(
            validate_sheet(&sheet).unwrap_err().code(),
            CoreErrorCode::NegativeAmount
        );
    }

    #[test]
    fn test_blank_label_rejected() {
        let mut sheet = valid_sheet();
        sheet.budgets[0].label = "   ".to_string();
        assert_eq!(
            validate_sheet(&sheet).unwrap_err().code(),
            CoreErrorCode::EmptyLabel
        );
    }
}
