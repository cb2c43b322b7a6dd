//! Shared types: charge categories and monthly periods

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// French month names, indexed by month - 1
pub const MONTH_NAMES: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

/// Charge category enumeration
///
/// "Common" variants are split across income earners proportionally to
/// income share; "Individual" variants are attributed to the named
/// member only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargeType {
    /// Recurring shared expense (rent, utilities)
    #[serde(rename = "FIXE_COMMUN")]
    FixedCommon,
    /// Recurring personal expense
    #[serde(rename = "FIXE_INDIVIDUEL")]
    FixedIndividual,
    /// One-off shared expense
    #[serde(rename = "EXCEPTIONNEL_COMMUN")]
    ExceptionalCommon,
    /// One-off personal expense
    #[serde(rename = "EXCEPTIONNEL_INDIVIDUEL")]
    ExceptionalIndividual,
}

impl ChargeType {
    /// All variants, in display order
    pub const ALL: [ChargeType; 4] = [
        ChargeType::FixedCommon,
        ChargeType::FixedIndividual,
        ChargeType::ExceptionalCommon,
        ChargeType::ExceptionalIndividual,
    ];

    /// Canonical persisted code
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeType::FixedCommon => "FIXE_COMMUN",
            ChargeType::FixedIndividual => "FIXE_INDIVIDUEL",
            ChargeType::ExceptionalCommon => "EXCEPTIONNEL_COMMUN",
            ChargeType::ExceptionalIndividual => "EXCEPTIONNEL_INDIVIDUEL",
        }
    }

    /// French display label
    pub fn label(&self) -> &'static str {
        match self {
            ChargeType::FixedCommon => "Charges fixes communes",
            ChargeType::FixedIndividual => "Charges fixes individuelles",
            ChargeType::ExceptionalCommon => "Charges exceptionnelles communes",
            ChargeType::ExceptionalIndividual => "Charges exceptionnelles individuelles",
        }
    }

    /// Whether this charge is split across the household by income share
    pub fn is_common(&self) -> bool {
        matches!(self, ChargeType::FixedCommon | ChargeType::ExceptionalCommon)
    }

    /// Whether this charge is attributed to a single member
    pub fn is_individual(&self) -> bool {
        !self.is_common()
    }

    /// Parse a persisted code, accepting the legacy English variants.
    ///
    /// Unrecognized values fall back to `FixedCommon` so that a typo'd
    /// row degrades instead of breaking the whole sheet; the fallback
    /// is logged because it changes displayed totals.
    pub fn parse_lossy(value: &str) -> ChargeType {
        match value.parse::<ChargeType>() {
            Ok(charge_type) => charge_type,
            Err(_) => {
                log::warn!(
                    "unrecognized charge type '{}', falling back to FIXE_COMMUN",
                    value
                );
                ChargeType::FixedCommon
            }
        }
    }
}

impl std::str::FromStr for ChargeType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FIXE_COMMUN" | "FIXED_COMMON" => Ok(ChargeType::FixedCommon),
            "FIXE_INDIVIDUEL" | "FIXED_INDIVIDUAL" => Ok(ChargeType::FixedIndividual),
            "EXCEPTIONNEL_COMMUN" | "EXCEPTIONAL_COMMON" => Ok(ChargeType::ExceptionalCommon),
            "EXCEPTIONNEL_INDIVIDUEL" | "EXCEPTIONAL_INDIVIDUAL" => {
                Ok(ChargeType::ExceptionalIndividual)
            }
            _ => Err(format!("Invalid charge type: {}", s)),
        }
    }
}

impl std::fmt::Display for ChargeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A (year, month) pair identifying one sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The current calendar period
    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// French label, e.g. "Janvier 2026"
    pub fn label(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// French name for a month number; out-of-range input degrades to "Mois"
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("Mois")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_type_from_str() {
        assert_eq!(
            "FIXE_COMMUN".parse::<ChargeType>().unwrap(),
            ChargeType::FixedCommon
        );
        assert_eq!(
            "FIXE_INDIVIDUEL".parse::<ChargeType>().unwrap(),
            ChargeType::FixedIndividual
        );
        assert_eq!(
            "EXCEPTIONNEL_COMMUN".parse::<ChargeType>().unwrap(),
            ChargeType::ExceptionalCommon
        );
        assert_eq!(
            "EXCEPTIONNEL_INDIVIDUEL".parse::<ChargeType>().unwrap(),
            ChargeType::ExceptionalIndividual
        );
    }

    #[test]
    fn test_charge_type_legacy_codes() {
        assert_eq!(
            "FIXED_COMMON".parse::<ChargeType>().unwrap(),
            ChargeType::FixedCommon
        );
        assert_eq!(
            "exceptional_individual".parse::<ChargeType>().unwrap(),
            ChargeType::ExceptionalIndividual
        );
    }

    #[test]
    fn test_charge_type_lossy_fallback() {
        // Documented fallback, not an error
        assert_eq!(ChargeType::parse_lossy("MISC"), ChargeType::FixedCommon);
        assert_eq!(ChargeType::parse_lossy(""), ChargeType::FixedCommon);
    }

    #[test]
    fn test_charge_type_common_split() {
        assert!(ChargeType::FixedCommon.is_common());
        assert!(ChargeType::ExceptionalCommon.is_common());
        assert!(ChargeType::FixedIndividual.is_individual());
        assert!(ChargeType::ExceptionalIndividual.is_individual());
    }

    #[test]
    fn test_charge_type_roundtrip() {
        for charge_type in ChargeType::ALL {
            assert_eq!(
                charge_type.as_str().parse::<ChargeType>().unwrap(),
                charge_type
            );
        }
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "Janvier");
        assert_eq!(month_name(12), "Décembre");
        assert_eq!(month_name(0), "Mois");
        assert_eq!(month_name(13), "Mois");
    }

    #[test]
    fn test_period_label() {
        let period = Period::new(2026, 3);
        assert_eq!(period.label(), "Mars 2026");
        assert_eq!(period.to_string(), "2026-03");
    }
}
