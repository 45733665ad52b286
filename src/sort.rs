//! Evaluation order of rule entries.
//!
//! Entries with parsing errors come first (fewer errors first), so they
//! never shadow a valid entry. Clean entries follow, grouped by plan and
//! ordered from least to most specific, which lets the matcher keep the
//! last match as the winner.

use std::cmp::Ordering;

use crate::ParsingOutcome;

/// Total order over outcomes.
#[must_use]
pub fn compare(a: &ParsingOutcome, b: &ParsingOutcome) -> Ordering {
    match (a.compiled_rule(), b.compiled_rule()) {
        (None, None) => a.parsing_errors().len().cmp(&b.parsing_errors().len()),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x
            .plan()
            .cmp(y.plan())
            .then_with(|| x.specificity().cmp(&y.specificity())),
    }
}

/// Stable sort into evaluation order. Equal entries keep their input order.
pub fn sort_outcomes(outcomes: &mut [ParsingOutcome]) {
    outcomes.sort_by(compare);
}
