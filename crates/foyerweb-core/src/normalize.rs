//! Label and charge-type normalization
//!
//! Persisted rows may carry legacy codes or inconsistent free text;
//! everything is canonicalized here before any arithmetic. All
//! functions are total: invalid input degrades to a documented default
//! instead of erroring.

use crate::models::{NormalizedCharge, Sheet};
use crate::types::ChargeType;

/// Fallback person label for a salary without an attributed member
pub const MEMBER_FALLBACK: &str = "Membre";

/// Person label for charges belonging to the whole household
pub const COMMON_LABEL: &str = "Commun";

/// Synthetic label used when budgets exist but no member is known
pub const HOUSEHOLD_LABEL: &str = "Foyer";

/// Canonicalize a person label.
///
/// Trims whitespace; empty/missing input yields an empty string (the
/// caller substitutes "Membre" or "Commun" depending on context). The
/// legacy codes "ME" and "HER" map, case-insensitively, to the display
/// labels "Moi" and "Elle"; anything else passes through trimmed.
pub fn normalize_person_label(value: Option<&str>) -> String {
    let trimmed = match value {
        Some(v) => v.trim(),
        None => return String::new(),
    };
    if trimmed.is_empty() {
        return String::new();
    }
    match trimmed.to_uppercase().as_str() {
        "ME" => "Moi".to_string(),
        "HER" => "Elle".to_string(),
        _ => trimmed.to_string(),
    }
}

/// Canonicalize a persisted charge-type code. Unrecognized values fall
/// back to `FixedCommon` with a logged warning.
pub fn normalize_charge_type(value: &str) -> ChargeType {
    ChargeType::parse_lossy(value)
}

/// Resolve every charge's person label, substituting "Commun" for
/// unattributed charges.
pub fn normalize_charges(sheet: &Sheet) -> Vec<NormalizedCharge> {
    sheet
        .charges
        .iter()
        .map(|charge| {
            let person = normalize_person_label(charge.person.as_deref());
            NormalizedCharge {
                charge_type: charge.charge_type,
                person: if person.is_empty() {
                    COMMON_LABEL.to_string()
                } else {
                    person
                },
                label: charge.label.clone(),
                amount: charge.amount,
            }
        })
        .collect()
}

/// Lowercase ASCII slug for member lookups; accents are stripped so
/// "Héloïse" and "Heloise" collide. Empty input degrades to "famille".
pub fn slugify(value: &str) -> String {
    let mut slug = String::new();
    let mut last_dash = true;
    for c in value.chars() {
        let c = fold_accent(c);
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "famille".to_string()
    } else {
        slug
    }
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' | 'á' | 'À' | 'Â' | 'Ä' | 'Á' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
        'î' | 'ï' | 'Î' | 'Ï' | 'í' | 'Í' => 'i',
        'ô' | 'ö' | 'Ô' | 'Ö' | 'ó' | 'Ó' => 'o',
        'ù' | 'û' | 'ü' | 'Ù' | 'Û' | 'Ü' | 'ú' | 'Ú' => 'u',
        'ç' | 'Ç' => 'c',
        _ => c,
    }
}
