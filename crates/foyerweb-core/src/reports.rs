//! Computed report payloads for API responses

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balances::{compute_member_balances, MemberBalances};
use crate::distribution::{compute_income_distribution, IncomeDistribution};
use crate::metrics::{aggregate_sheet_metrics, compute_sheet_metrics, SheetMetrics};
use crate::models::{NormalizedCharge, Sheet};
use crate::normalize::normalize_charges;
use crate::types::{ChargeType, Period};

/// Per-person slice of an individual charge-type total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeBreakdownEntry {
    pub person: String,
    pub amount: Decimal,
}

/// Total for one charge type across a sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeTypeSummary {
    #[serde(rename = "type")]
    pub charge_type: ChargeType,
    pub label: String,
    pub amount: Decimal,
    /// Per-person split, only for the individual charge types; sorted
    /// descending by amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<ChargeBreakdownEntry>>,
}

/// The full computed payload for one sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetOverview {
    pub metrics: SheetMetrics,
    pub distribution: IncomeDistribution,
    pub balances: MemberBalances,
    pub charges: Vec<NormalizedCharge>,
    pub charge_summary: Vec<ChargeTypeSummary>,
    pub total_charges: Decimal,
}

/// One entry of the dashboard's sheet history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDigest {
    pub id: i64,
    pub year: i32,
    pub month: u32,
    pub period_label: String,
    pub metrics: SheetMetrics,
}

/// Aggregated view across a family's sheets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub current_period: Period,
    /// Metrics of the current period's sheet, all zero when absent
    pub current: SheetMetrics,
    /// Member balances of the current period's sheet, empty when absent
    pub balances: MemberBalances,
    /// Element-wise totals over the current year's sheets
    pub yearly: SheetMetrics,
    /// Most recent sheets, newest first
    pub recent: Vec<SheetDigest>,
}

/// Sum charges per type, with a per-person breakdown for the
/// individual types. Types absent from the sheet are omitted.
pub fn charge_type_summary(charges: &[NormalizedCharge]) -> Vec<ChargeTypeSummary> {
    let mut summaries: Vec<ChargeTypeSummary> = Vec::new();
    for charge in charges {
        let idx = match summaries
            .iter()
            .position(|s| s.charge_type == charge.charge_type)
        {
            Some(idx) => idx,
            None => {
                summaries.push(ChargeTypeSummary {
                    charge_type: charge.charge_type,
                    label: charge.charge_type.label().to_string(),
                    amount: Decimal::ZERO,
                    breakdown: if charge.charge_type.is_individual() {
                        Some(Vec::new())
                    } else {
                        None
                    },
                });
                summaries.len() - 1
            }
        };
        let summary = &mut summaries[idx];
        summary.amount += charge.amount;

        if charge.charge_type.is_individual() && charge.person != crate::normalize::COMMON_LABEL {
            if let Some(breakdown) = summary.breakdown.as_mut() {
                match breakdown.iter_mut().find(|e| e.person == charge.person) {
                    Some(entry) => entry.amount += charge.amount,
                    None => breakdown.push(ChargeBreakdownEntry {
                        person: charge.person.clone(),
                        amount: charge.amount,
                    }),
                }
            }
        }
    }

    for summary in &mut summaries {
        if let Some(breakdown) = summary.breakdown.as_mut() {
            breakdown.sort_by(|a, b| b.amount.cmp(&a.amount));
        }
    }
    summaries
}

/// Run the whole pipeline over one sheet:
/// normalization → metrics → distribution → balances → summaries.
pub fn compute_sheet_overview(sheet: &Sheet, member_labels: &[String]) -> SheetOverview {
    let metrics = compute_sheet_metrics(sheet);
    let distribution = compute_income_distribution(sheet);
    let charges = normalize_charges(sheet);
    let balances =
        compute_member_balances(&charges, &distribution, metrics.budgets, member_labels);
    let charge_summary = charge_type_summary(&charges);
    let total_charges = metrics.expenses;

    SheetOverview {
        metrics,
        distribution,
        balances,
        charges,
        charge_summary,
        total_charges,
    }
}

/// Build the dashboard summary from a family's sheets (any order).
pub fn compute_dashboard_summary(
    sheets: &[Sheet],
    member_labels: &[String],
    recent_limit: usize,
) -> DashboardSummary {
    let current_period = Period::current();

    let current_sheet = sheets
        .iter()
        .find(|sheet| sheet.year == current_period.year && sheet.month == current_period.month);
    let current = current_sheet.map(compute_sheet_metrics).unwrap_or_default();
    let balances = current_sheet
        .map(|sheet| {
            let distribution = compute_income_distribution(sheet);
            let charges = normalize_charges(sheet);
            compute_member_balances(&charges, &distribution, current.budgets, member_labels)
        })
        .unwrap_or_default();

    let yearly_sheets: Vec<Sheet> = sheets
        .iter()
        .filter(|sheet| sheet.year == current_period.year)
        .cloned()
        .collect();
    let yearly = aggregate_sheet_metrics(&yearly_sheets);

    let mut recent: Vec<SheetDigest> = sheets
        .iter()
        .map(|sheet| SheetDigest {
            id: sheet.id,
            year: sheet.year,
            month: sheet.month,
            period_label: sheet.period_label(),
            metrics: compute_sheet_metrics(sheet),
        })
        .collect();
    recent.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
    recent.truncate(recent_limit);

    DashboardSummary {
        current_period,
        current,
        balances,
        yearly,
        recent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Charge, Salary};
    use rust_decimal_macros::dec;

    fn sample_sheet() -> Sheet {
        Sheet {
            id: 7,
            year: 2026,
            month: 2,
            salaries: vec![
                Salary {
                    person: "Moi".to_string(),
                    category: "Salaire".to_string(),
                    label: "Salaire".to_string(),
                    amount: dec!(3000),
                },
                Salary {
                    person: "Elle".to_string(),
                    category: "Salaire".to_string(),
                    label: "Salaire".to_string(),
                    amount: dec!(1000),
                },
            ],
            charges: vec![
                Charge {
                    charge_type: ChargeType::FixedCommon,
                    person: None,
                    category: "Logement".to_string(),
                    label: "Loyer".to_string(),
                    amount: dec!(800),
                },
                Charge {
                    charge_type: ChargeType::FixedIndividual,
                    person: Some("Elle".to_string()),
                    category: "Transport".to_string(),
                    label: "Essence".to_string(),
                    amount: dec!(120),
                },
                Charge {
                    charge_type: ChargeType::FixedIndividual,
                    person: Some("Moi".to_string()),
                    category: "Transport".to_string(),
                    label: "Métro".to_string(),
                    amount: dec!(75),
                },
            ],
            budgets: vec![Budget {
                label: "Courses".to_string(),
                amount: dec!(400),
            }],
        }
    }

    #[test]
    fn test_charge_summary_totals_and_breakdown() {
        let charges = normalize_charges(&sample_sheet());
        let summary = charge_type_summary(&charges);

        assert_eq!(summary.len(), 2);

        let common = summary
            .iter()
            .find(|s| s.charge_type == ChargeType::FixedCommon)
            .unwrap();
        assert_eq!(common.amount, dec!(800));
        assert!(common.breakdown.is_none());

        let individual = summary
            .iter()
            .find(|s| s.charge_type == ChargeType::FixedIndividual)
            .unwrap();
        assert_eq!(individual.amount, dec!(195));
        let breakdown = individual.breakdown.as_ref().unwrap();
        assert_eq!(breakdown[0].person, "Elle");
        assert_eq!(breakdown[0].amount, dec!(120));
        assert_eq!(breakdown[1].person, "Moi");
        assert_eq!(breakdown[1].amount, dec!(75));
    }

    #[test]
    fn test_overview_stages_agree() {
        let sheet = sample_sheet();
        let overview =
            compute_sheet_overview(&sheet, &["Moi".to_string(), "Elle".to_string()]);

        assert_eq!(overview.metrics.income, dec!(4000));
        assert_eq!(overview.metrics.expenses, dec!(995));
        assert_eq!(overview.metrics.budgets, dec!(400));
        assert_eq!(overview.total_charges, overview.metrics.expenses);
        assert_eq!(overview.distribution.fixed_common_charges, dec!(800));
        assert_eq!(overview.balances.budget_per_member, dec!(200));
        assert_eq!(overview.balances.cards.len(), 2);
    }

    #[test]
    fn test_dashboard_recent_sorted_and_limited() {
        let mut sheets = vec![];
        for (id, year, month) in [(1, 2025, 11), (2, 2025, 12), (3, 2026, 1)] {
            let mut sheet = sample_sheet();
            sheet.id = id;
            sheet.year = year;
            sheet.month = month;
            sheets.push(sheet);
        }

        let summary = compute_dashboard_summary(&sheets, &[], 2);
        assert_eq!(summary.recent.len(), 2);
        assert_eq!(summary.recent[0].id, 3);
        assert_eq!(summary.recent[1].id, 2);
    }

    #[test]
    fn test_dashboard_current_sheet_balances() {
        let period = Period::current();
        let mut sheet = sample_sheet();
        sheet.year = period.year;
        sheet.month = period.month;

        let summary = compute_dashboard_summary(
            &[sheet],
            &["Moi".to_string(), "Elle".to_string()],
            5,
        );
        assert_eq!(summary.current.income, dec!(4000));
        assert_eq!(summary.balances.cards.len(), 2);
        assert_eq!(summary.balances.cards[0].person, "Moi");
        assert_eq!(summary.balances.budget_per_member, dec!(200));
    }

    #[test]
    fn test_dashboard_empty_family() {
        let summary = compute_dashboard_summary(&[], &[], 5);
        assert_eq!(summary.current, SheetMetrics::default());
        assert_eq!(summary.yearly, SheetMetrics::default());
        assert!(summary.balances.cards.is_empty());
        assert!(summary.recent.is_empty());
    }
}
