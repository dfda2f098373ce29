use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::{Result, StorageError};
use crate::models::Criterion;

/// Reject criteria lists that scoring cannot work with.
///
/// Every problem is reported at once so organizers can fix the whole list in
/// one round trip. The weight sum is deliberately not checked here, see
/// [`weights_balanced`].
pub fn validate_criteria(items: &[Criterion]) -> Result<()> {
    let mut errors = Vec::new();
    let mut keys = HashSet::new();

    for criterion in items {
        if criterion.key.trim().is_empty() {
            errors.push("Criterion key cannot be empty".to_string());
        }
        if !keys.insert(criterion.key.as_str()) {
            errors.push(format!("Duplicate criterion key: '{}'", criterion.key));
        }
        if criterion.max_score <= Decimal::ZERO {
            errors.push(format!(
                "Criterion '{}' has max_score {}. max_score must be > 0",
                criterion.key, criterion.max_score
            ));
        }
        if criterion.weight < Decimal::ZERO {
            errors.push(format!(
                "Criterion '{}' has negative weight {}",
                criterion.key, criterion.weight
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(StorageError::Validation(format!(
            "{} invalid criteria: {}",
            errors.len(),
            errors.join("; ")
        )))
    }
}

/// Keys already used by evaluations must survive a replacement unchanged.
pub fn check_referenced_keys(items: &[Criterion], referenced: &[String]) -> Result<()> {
    let keys: HashSet<&str> = items.iter().map(|c| c.key.as_str()).collect();
    let missing: Vec<&str> = referenced
        .iter()
        .map(String::as_str)
        .filter(|key| !keys.contains(key))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(StorageError::Validation(format!(
            "Criteria referenced by existing evaluations cannot be removed or renamed: {}",
            missing.join(", ")
        )))
    }
}

pub fn total_weight(items: &[Criterion]) -> Decimal {
    items.iter().map(|c| c.weight).sum()
}

/// Scores land on a 0-100 scale only when the weights add up to 100.
pub fn weights_balanced(items: &[Criterion]) -> bool {
    total_weight(items) == Decimal::ONE_HUNDRED
}
