//! Per-step completeness predicates.
//!
//! Each validator takes the whole [`AnswerSet`] (not just the fields of its
//! own step) and is pure: the same answers always give the same verdict.
//! Out-of-range and wrong-typed values are simply reported as incomplete.

use std::ops::RangeInclusive;

use crate::models::{AnswerSet, Field};

pub const AGE_RANGE: RangeInclusive<i64> = 0..=120;
pub const MONTHLY_EXPENSES_RANGE: RangeInclusive<i64> = 0..=10_000_000;
pub const TOTAL_ASSETS_RANGE: RangeInclusive<i64> = 0..=10_000_000_000;
pub const MONTHLY_SUPPORT_RANGE: RangeInclusive<i64> = 0..=1_000_000;

/// Signature shared by every step validator.
pub type StepValidator = fn(&AnswerSet) -> bool;

/// Validators indexed by `step - 1`.
pub const STEP_VALIDATORS: [StepValidator; 4] = [
    validate_age,
    validate_monthly_expenses,
    validate_total_assets,
    validate_support,
];

/// Accepted range for an integer field; `None` for the support type.
pub fn field_range(field: Field) -> Option<RangeInclusive<i64>> {
    match field {
        Field::Age => Some(AGE_RANGE),
        Field::MonthlyExpenses => Some(MONTHLY_EXPENSES_RANGE),
        Field::TotalAssets => Some(TOTAL_ASSETS_RANGE),
        Field::MonthlySupport => Some(MONTHLY_SUPPORT_RANGE),
        Field::SupportType => None,
    }
}

fn integer_in_range(
    answers: &AnswerSet,
    field: Field,
    range: RangeInclusive<i64>,
) -> bool {
    answers
        .integer(field)
        .is_some_and(|value| range.contains(&value))
}

/// Step 1: age is present and within 0..=120.
pub fn validate_age(answers: &AnswerSet) -> bool {
    integer_in_range(answers, Field::Age, AGE_RANGE)
}

/// Step 2: monthly expenses are present and within 0..=10,000,000.
pub fn validate_monthly_expenses(answers: &AnswerSet) -> bool {
    integer_in_range(answers, Field::MonthlyExpenses, MONTHLY_EXPENSES_RANGE)
}

/// Step 3: total assets are present and within 0..=10,000,000,000.
pub fn validate_total_assets(answers: &AnswerSet) -> bool {
    integer_in_range(answers, Field::TotalAssets, TOTAL_ASSETS_RANGE)
}

/// Step 4 is optional; defaults are filled in at hand-off.
pub fn validate_support(_answers: &AnswerSet) -> bool {
    true
}

/// Runs the validator for `step`. Unknown step numbers are never valid.
pub fn validate_step(
    step: u8,
    answers: &AnswerSet,
) -> bool {
    match step {
        1..=4 => STEP_VALIDATORS[usize::from(step - 1)](answers),
        _ => false,
    }
}
