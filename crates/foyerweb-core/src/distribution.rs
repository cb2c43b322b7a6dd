//! Income distribution across household members
//!
//! Allocates the common fixed-charge pool across income earners
//! proportionally to each member's share of total household income.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Sheet;
use crate::normalize::{normalize_person_label, MEMBER_FALLBACK};
use crate::types::ChargeType;

/// One member's slice of household income and common charges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeDistributionItem {
    pub person: String,
    /// The member's total income on the sheet
    pub amount: Decimal,
    /// Fraction of total household income, 0..1 (0 when total is 0)
    pub percentage: Decimal,
    /// fixed_common_charges × percentage
    pub fixed_charge_share: Decimal,
}

/// Full distribution result for one sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeDistribution {
    pub total_income: Decimal,
    /// Sum of FixedCommon charge amounts
    pub fixed_common_charges: Decimal,
    /// Sorted descending by income; ties keep salary insertion order
    pub distribution: Vec<IncomeDistributionItem>,
}

/// Compute the income distribution of a sheet.
///
/// Salaries are grouped by normalized person label ("Membre" when
/// empty). A member with a zero salary entry still appears, with share
/// 0. When total income is zero every share is 0, which leaves the
/// common-charge pool allocated to no one; that gap is intentional and
/// pinned by tests.
pub fn compute_income_distribution(sheet: &Sheet) -> IncomeDistribution {
    // Insertion-ordered grouping; sheets hold tens of rows at most
    let mut totals_by_person: Vec<(String, Decimal)> = Vec::new();
    for salary in &sheet.salaries {
        let mut person = normalize_person_label(Some(&salary.person));
        if person.is_empty() {
            person = MEMBER_FALLBACK.to_string();
        }
        match totals_by_person.iter_mut().find(|(p, _)| *p == person) {
            Some((_, total)) => *total += salary.amount,
            None => totals_by_person.push((person, salary.amount)),
        }
    }

    let total_income: Decimal = totals_by_person.iter().map(|(_, amount)| *amount).sum();

    let fixed_common_charges: Decimal = sheet
        .charges
        .iter()
        .filter(|charge| charge.charge_type == ChargeType::FixedCommon)
        .map(|charge| charge.amount)
        .sum();

    let mut distribution: Vec<IncomeDistributionItem> = totals_by_person
        .into_iter()
        .map(|(person, amount)| {
            let percentage = if total_income > Decimal::ZERO {
                amount / total_income
            } else {
                Decimal::ZERO
            };
            IncomeDistributionItem {
                person,
                amount,
                percentage,
                fixed_charge_share: fixed_common_charges * percentage,
            }
        })
        .collect();

    // Stable sort: equal incomes stay in insertion order
    distribution.sort_by(|a, b| b.amount.cmp(&a.amount));

    IncomeDistribution {
        total_income,
        fixed_common_charges,
        distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Charge, Salary};
    use rust_decimal_macros::dec;

    fn salary(person: &str, amount: Decimal) -> Salary {
        Salary {
            person: person.to_string(),
            category: "Salaire".to_string(),
            label: "Salaire".to_string(),
            amount,
        }
    }

    fn common_charge(amount: Decimal) -> Charge {
        Charge {
            charge_type: ChargeType::FixedCommon,
            person: None,
            category: "Fixes".to_string(),
            label: "Loyer".to_string(),
            amount,
        }
    }

    fn sheet(salaries: Vec<Salary>, charges: Vec<Charge>) -> Sheet {
        Sheet {
            id: 0,
            year: 2026,
            month: 1,
            salaries,
            charges,
            budgets: vec![],
        }
    }

    #[test]
    fn test_single_earner_takes_full_pool() {
        // Scenario A
        let result = compute_income_distribution(&sheet(
            vec![salary("Moi", dec!(2000))],
            vec![common_charge(dec!(600))],
        ));

        assert_eq!(result.total_income, dec!(2000));
        assert_eq!(result.fixed_common_charges, dec!(600));
        assert_eq!(result.distribution.len(), 1);
        let item = &result.distribution[0];
        assert_eq!(item.person, "Moi");
        assert_eq!(item.amount, dec!(2000));
        assert_eq!(item.percentage, dec!(1));
        assert_eq!(item.fixed_charge_share, dec!(600));
    }

    #[test]
    fn test_proportional_split() {
        // Scenario B: 3000/1000 split of an 800 pool
        let result = compute_income_distribution(&sheet(
            vec![salary("Moi", dec!(3000)), salary("Elle", dec!(1000))],
            vec![common_charge(dec!(800))],
        ));

        let moi = &result.distribution[0];
        assert_eq!(moi.person, "Moi");
        assert_eq!(moi.percentage, dec!(0.75));
        assert_eq!(moi.fixed_charge_share, dec!(600));

        let elle = &result.distribution[1];
        assert_eq!(elle.person, "Elle");
        assert_eq!(elle.percentage, dec!(0.25));
        assert_eq!(elle.fixed_charge_share, dec!(200));
    }

    #[test]
    fn test_shares_sum_to_pool() {
        let result = compute_income_distribution(&sheet(
            vec![
                salary("Moi", dec!(2100)),
                salary("Elle", dec!(1700)),
                salary("Paul", dec!(350)),
            ],
            vec![common_charge(dec!(911.37))],
        ));

        let share_sum: Decimal = result
            .distribution
            .iter()
            .map(|item| item.fixed_charge_share)
            .sum();
        let pct_sum: Decimal = result.distribution.iter().map(|item| item.percentage).sum();

        // Decimal division leaves at most a hair of rounding
        assert!((share_sum - result.fixed_common_charges).abs() < dec!(0.000001));
        assert!((pct_sum - dec!(1)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_salaries_grouped_by_normalized_person() {
        // "ME" and "Moi" are the same member after normalization
        let result = compute_income_distribution(&sheet(
            vec![salary("ME", dec!(1200)), salary("Moi", dec!(800))],
            vec![],
        ));
        assert_eq!(result.distribution.len(), 1);
        assert_eq!(result.distribution[0].person, "Moi");
        assert_eq!(result.distribution[0].amount, dec!(2000));
    }

    #[test]
    fn test_empty_person_falls_back_to_membre() {
        let result =
            compute_income_distribution(&sheet(vec![salary("  ", dec!(500))], vec![]));
        assert_eq!(result.distribution[0].person, "Membre");
    }

    #[test]
    fn test_zero_total_income_all_shares_zero() {
        // Known gap: the whole pool goes unallocated
        let result = compute_income_distribution(&sheet(
            vec![salary("Moi", dec!(0))],
            vec![common_charge(dec!(400))],
        ));

        assert_eq!(result.total_income, dec!(0));
        assert_eq!(result.fixed_common_charges, dec!(400));
        assert_eq!(result.distribution.len(), 1);
        assert_eq!(result.distribution[0].percentage, dec!(0));
        assert_eq!(result.distribution[0].fixed_charge_share, dec!(0));
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let result = compute_income_distribution(&sheet(
            vec![
                salary("Paul", dec!(1000)),
                salary("Anna", dec!(1000)),
                salary("Zoe", dec!(3000)),
            ],
            vec![],
        ));
        let people: Vec<&str> = result
            .distribution
            .iter()
            .map(|item| item.person.as_str())
            .collect();
        assert_eq!(people, vec!["Zoe", "Paul", "Anna"]);
    }

    #[test]
    fn test_only_fixed_common_feeds_the_pool() {
        let mut charges = vec![common_charge(dec!(500))];
        charges.push(Charge {
            charge_type: ChargeType::ExceptionalCommon,
            person: None,
            category: "Fixes".to_string(),
            label: "Réparation".to_string(),
            amount: dec!(300),
        });
        charges.push(Charge {
            charge_type: ChargeType::FixedIndividual,
            person: Some("Moi".to_string()),
            category: "Transport".to_string(),
            label: "Essence".to_string(),
            amount: dec!(100),
        });

        let result =
            compute_income_distribution(&sheet(vec![salary("Moi", dec!(1000))], charges));
        assert_eq!(result.fixed_common_charges, dec!(500));
    }
}
