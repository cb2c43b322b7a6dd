//! Per-member balance computation
//!
//! The final stage of the pipeline: merges income, individual charges,
//! the common-charge allocation, and equal-split budget envelopes into
//! one card per household member.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::distribution::IncomeDistribution;
use crate::models::NormalizedCharge;
use crate::normalize::{COMMON_LABEL, HOUSEHOLD_LABEL};

/// One member's full financial snapshot for a sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceCard {
    pub person: String,
    pub income: Decimal,
    /// Fraction of household income, 0..1
    pub percentage: Decimal,
    /// Allocated slice of the common fixed-charge pool
    pub fixed_share: Decimal,
    /// Sum of this member's individual charges
    pub individual_charges: Decimal,
    /// individual_charges + fixed_share
    pub total_charges: Decimal,
    /// income − total_charges
    pub net_after_charges: Decimal,
    /// Equal slice of the budget envelopes (0 for members outside the
    /// budget-sharing population)
    pub budget_share: Decimal,
    /// net_after_charges − budget_share
    pub net_after_budgets: Decimal,
}

/// Balance cards for a whole sheet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberBalances {
    /// Sorted descending by income, ties ascending by person name
    pub cards: Vec<BalanceCard>,
    pub budget_per_member: Decimal,
    pub total_budgets: Decimal,
}

/// Compute the per-member balance cards.
///
/// `member_labels` is the household's member list; it may exceed or be
/// disjoint from the set of income earners. When it is empty the
/// budget-sharing population falls back to the people already holding
/// a card, and, when budgets exist but nobody is known at all, to a
/// single synthetic "Foyer" entry so the envelope total is never
/// silently dropped. Every division is guarded; the function is total.
pub fn compute_member_balances(
    charges: &[NormalizedCharge],
    distribution: &IncomeDistribution,
    total_budgets: Decimal,
    member_labels: &[String],
) -> MemberBalances {
    // Step 1: individual charge totals per named person
    let mut individual_by_person: Vec<(String, Decimal)> = Vec::new();
    for charge in charges {
        if charge.charge_type.is_common() {
            continue;
        }
        if charge.person.is_empty() || charge.person == COMMON_LABEL {
            continue;
        }
        match individual_by_person
            .iter_mut()
            .find(|(p, _)| *p == charge.person)
        {
            Some((_, total)) => *total += charge.amount,
            None => individual_by_person.push((charge.person.clone(), charge.amount)),
        }
    }

    let individual_for = |person: &str| -> Decimal {
        individual_by_person
            .iter()
            .find(|(p, _)| p == person)
            .map(|(_, total)| *total)
            .unwrap_or(Decimal::ZERO)
    };

    // Step 2: one card per income earner, seeded from the distribution
    let mut cards: Vec<BalanceCard> = distribution
        .distribution
        .iter()
        .map(|item| {
            let individual_charges = individual_for(&item.person);
            let total_charges = individual_charges + item.fixed_charge_share;
            BalanceCard {
                person: item.person.clone(),
                income: item.amount,
                percentage: item.percentage,
                fixed_share: item.fixed_charge_share,
                individual_charges,
                total_charges,
                net_after_charges: item.amount - total_charges,
                budget_share: Decimal::ZERO,
                net_after_budgets: Decimal::ZERO,
            }
        })
        .collect();

    // Step 3: members with individual charges but no income entry
    for (person, individual_charges) in &individual_by_person {
        if cards.iter().any(|card| card.person == *person) {
            continue;
        }
        cards.push(BalanceCard {
            person: person.clone(),
            income: Decimal::ZERO,
            percentage: Decimal::ZERO,
            fixed_share: Decimal::ZERO,
            individual_charges: *individual_charges,
            total_charges: *individual_charges,
            net_after_charges: -*individual_charges,
            budget_share: Decimal::ZERO,
            net_after_budgets: Decimal::ZERO,
        });
    }

    // Step 4: the budget-sharing population
    let population: Vec<String> = if !member_labels.is_empty() {
        member_labels.to_vec()
    } else if !cards.is_empty() {
        cards.iter().map(|card| card.person.clone()).collect()
    } else if total_budgets > Decimal::ZERO {
        vec![HOUSEHOLD_LABEL.to_string()]
    } else {
        vec![]
    };

    // Step 5: equal split; members without any other line still draw
    let budget_per_member = if population.is_empty() {
        Decimal::ZERO
    } else {
        total_budgets / Decimal::from(population.len() as u64)
    };
    for person in &population {
        if cards.iter().any(|card| card.person == *person) {
            continue;
        }
        cards.push(BalanceCard {
            person: person.clone(),
            income: Decimal::ZERO,
            percentage: Decimal::ZERO,
            fixed_share: Decimal::ZERO,
            individual_charges: Decimal::ZERO,
            total_charges: Decimal::ZERO,
            net_after_charges: Decimal::ZERO,
            budget_share: Decimal::ZERO,
            net_after_budgets: Decimal::ZERO,
        });
    }

    // Step 6: apply the budget draw
    for card in &mut cards {
        card.budget_share = if population.iter().any(|p| *p == card.person) {
            budget_per_member
        } else {
            Decimal::ZERO
        };
        card.net_after_budgets = card.net_after_charges - card.budget_share;
    }

    cards.sort_by(|a, b| b.income.cmp(&a.income).then(a.person.cmp(&b.person)));

    MemberBalances {
        cards,
        budget_per_member,
        total_budgets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::compute_income_distribution;
    use crate::models::{Charge, Salary, Sheet};
    use crate::normalize::normalize_charges;
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

    fn balances_for(
        sheet: &Sheet,
        total_budgets: Decimal,
        member_labels: &[String],
    ) -> MemberBalances {
        let distribution = compute_income_distribution(sheet);
        let charges = normalize_charges(sheet);
        compute_member_balances(&charges, &distribution, total_budgets, member_labels)
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_single_member_full_pipeline() {
        // Scenario A: one salary (2000), one common charge (600), one
        // budget (300), one member
        let s = sheet(
            vec![salary("Moi", dec!(2000))],
            vec![charge(ChargeType::FixedCommon, None, dec!(600))],
        );
        let result = balances_for(&s, dec!(300), &labels(&["Moi"]));

        assert_eq!(result.cards.len(), 1);
        let card = &result.cards[0];
        assert_eq!(card.person, "Moi");
        assert_eq!(card.income, dec!(2000));
        assert_eq!(card.fixed_share, dec!(600));
        assert_eq!(card.net_after_charges, dec!(1400));
        assert_eq!(card.budget_share, dec!(300));
        assert_eq!(card.net_after_budgets, dec!(1100));
        assert_eq!(result.budget_per_member, dec!(300));
    }

    #[test]
    fn test_individual_charges_attributed_to_named_member() {
        let s = sheet(
            vec![salary("Moi", dec!(3000)), salary("Elle", dec!(1000))],
            vec![
                charge(ChargeType::FixedCommon, None, dec!(800)),
                charge(ChargeType::FixedIndividual, Some("Elle"), dec!(150)),
                charge(ChargeType::ExceptionalIndividual, Some("Elle"), dec!(50)),
            ],
        );
        let result = balances_for(&s, dec!(0), &[]);

        let elle = result
            .cards
            .iter()
            .find(|card| card.person == "Elle")
            .unwrap();
        assert_eq!(elle.individual_charges, dec!(200));
        assert_eq!(elle.fixed_share, dec!(200));
        assert_eq!(elle.total_charges, dec!(400));
        assert_eq!(elle.net_after_charges, dec!(600));

        let moi = result.cards.iter().find(|card| card.person == "Moi").unwrap();
        assert_eq!(moi.individual_charges, dec!(0));
        assert_eq!(moi.fixed_share, dec!(600));
    }

    #[test]
    fn test_charge_only_member_gets_negative_card() {
        // Scenario C: no salaries, one individual charge for Paul
        let s = sheet(
            vec![],
            vec![charge(
                ChargeType::ExceptionalIndividual,
                Some("Paul"),
                dec!(150),
            )],
        );
        let result = balances_for(&s, dec!(0), &[]);

        assert_eq!(result.cards.len(), 1);
        let paul = &result.cards[0];
        assert_eq!(paul.person, "Paul");
        assert_eq!(paul.income, dec!(0));
        assert_eq!(paul.fixed_share, dec!(0));
        assert_eq!(paul.individual_charges, dec!(150));
        assert_eq!(paul.net_after_charges, dec!(-150));
    }

    #[test]
    fn test_unattributed_individual_charge_not_counted() {
        // An individual-type charge with no person resolves to
        // "Commun" and is attributed to nobody
        let s = sheet(
            vec![salary("Moi", dec!(1000))],
            vec![charge(ChargeType::FixedIndividual, None, dec!(80))],
        );
        let result = balances_for(&s, dec!(0), &[]);
        assert_eq!(result.cards[0].individual_charges, dec!(0));
    }

    #[test]
    fn test_member_without_income_or_charges_draws_budget() {
        let s = sheet(vec![salary("Moi", dec!(2000))], vec![]);
        let result = balances_for(&s, dec!(600), &labels(&["Moi", "Elle", "Paul"]));

        assert_eq!(result.budget_per_member, dec!(200));
        assert_eq!(result.cards.len(), 3);

        let paul = result
            .cards
            .iter()
            .find(|card| card.person == "Paul")
            .unwrap();
        assert_eq!(paul.income, dec!(0));
        assert_eq!(paul.budget_share, dec!(200));
        assert_eq!(paul.net_after_budgets, dec!(-200));
    }

    #[test]
    fn test_budget_share_sum_matches_total() {
        let s = sheet(
            vec![salary("Moi", dec!(1800)), salary("Elle", dec!(1400))],
            vec![],
        );
        let result = balances_for(&s, dec!(500), &labels(&["Moi", "Elle"]));

        let total: Decimal = result.cards.iter().map(|card| card.budget_share).sum();
        assert!((total - dec!(500)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_population_falls_back_to_card_persons() {
        // Empty member list: budgets split across the people who
        // already hold a card
        let s = sheet(
            vec![salary("Moi", dec!(2000)), salary("Elle", dec!(1000))],
            vec![],
        );
        let result = balances_for(&s, dec!(400), &[]);

        assert_eq!(result.budget_per_member, dec!(200));
        for card in &result.cards {
            assert_eq!(card.budget_share, dec!(200));
        }
    }

    #[test]
    fn test_synthetic_household_card_when_nobody_known() {
        // Budgets exist but there are no members, earners, or charges:
        // a synthetic "Foyer" card absorbs the total
        let s = sheet(vec![], vec![]);
        let result = balances_for(&s, dec!(250), &[]);

        assert_eq!(result.cards.len(), 1);
        assert_eq!(result.cards[0].person, "Foyer");
        assert_eq!(result.cards[0].budget_share, dec!(250));
        assert_eq!(result.cards[0].net_after_budgets, dec!(-250));
    }

    #[test]
    fn test_no_budgets_no_population_is_empty() {
        let result = balances_for(&sheet(vec![], vec![]), dec!(0), &[]);
        assert!(result.cards.is_empty());
        assert_eq!(result.budget_per_member, dec!(0));
    }

    #[test]
    fn test_sorted_by_income_then_name() {
        let s = sheet(
            vec![
                salary("Zoe", dec!(1000)),
                salary("Anna", dec!(1000)),
                salary("Max", dec!(2500)),
            ],
            vec![],
        );
        let result = balances_for(&s, dec!(0), &[]);
        let people: Vec<&str> = result
            .cards
            .iter()
            .map(|card| card.person.as_str())
            .collect();
        // Ties on income break ascending by name
        assert_eq!(people, vec!["Max", "Anna", "Zoe"]);
    }

    #[test]
    fn test_zero_income_member_bears_no_common_charge() {
        // Open product question, current behavior pinned: a member
        // with zero income has share 0 and bears none of the pool
        let s = sheet(
            vec![salary("Moi", dec!(2000)), salary("Elle", dec!(0))],
            vec![charge(ChargeType::FixedCommon, None, dec!(600))],
        );
        let result = balances_for(&s, dec!(0), &[]);

        let elle = result
            .cards
            .iter()
            .find(|card| card.person == "Elle")
            .unwrap();
        assert_eq!(elle.fixed_share, dec!(0));
        assert_eq!(elle.net_after_charges, dec!(0));
    }
}
