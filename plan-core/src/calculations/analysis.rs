//! Rule-based commentary on a projection.
//!
//! | Rule | Trigger | Output |
//! |------|---------|--------|
//! | depletion | assets run out within the horizon | risk, advice |
//! | deficit | monthly support below monthly expenses | risk, 10% cut suggestion |
//! | no support | monthly support is zero | risk, suggestion |
//! | thin buffer | assets below one year of expenses | risk |
//! | high costs | expenses above 100,000 | suggestion |
//! | low income | support below 50,000 | suggestion |

use chrono::Utc;
use rust_decimal::Decimal;

use super::common::{format_amount, round_half_up, truncate_to_i64};
use super::projection::Projection;
use crate::models::{Analysis, SimulationInput};

pub const MODEL_VERSION: &str = "simple_calculator_v1";

const HIGH_EXPENSES_THRESHOLD: i64 = 100_000;
const LOW_SUPPORT_THRESHOLD: i64 = 50_000;

/// Share of expenses kept in the "cut by 10%" suggestion.
const REDUCED_EXPENSE_FACTOR: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

pub struct PlanAnalyzer<'a> {
    input: &'a SimulationInput,
    projection: &'a Projection,
}

impl<'a> PlanAnalyzer<'a> {
    pub fn new(
        input: &'a SimulationInput,
        projection: &'a Projection,
    ) -> Self {
        Self { input, projection }
    }

    pub fn analyze(&self) -> Analysis {
        Analysis {
            risk_factors: self.risk_factors(),
            suggestions: self.suggestions(),
            advice_message: self.advice_message(),
            generated_at: Utc::now(),
            model_version: MODEL_VERSION.to_string(),
        }
    }

    fn monthly_balance(&self) -> i64 {
        self.input.monthly_support - self.input.monthly_expenses
    }

    pub fn risk_factors(&self) -> Vec<String> {
        let mut risks = Vec::new();

        if let Some(years) = self.projection.years_until_depletion {
            risks.push(format!(
                "At the current pace your assets may run out in about {years} years."
            ));
        }

        let monthly_balance = self.monthly_balance();
        if monthly_balance < 0 {
            risks.push(format!(
                "Your monthly balance is {} short; your assets shrink every month.",
                format_amount(monthly_balance.abs())
            ));
        }

        if self.input.monthly_support == 0 {
            risks.push(
                "You are not receiving public support; check whether any programme applies to you."
                    .to_string(),
            );
        }

        if self.input.total_assets < self.input.monthly_expenses * 12 {
            risks.push(
                "Your assets are below one year of living expenses; act soon.".to_string(),
            );
        }

        risks
    }

    pub fn suggestions(&self) -> Vec<String> {
        let mut suggestions = Vec::new();

        if let Some(suggestion) = self.expense_cut_suggestion() {
            suggestions.push(suggestion);
        }

        if self.input.monthly_support == 0 {
            suggestions.push(
                "Consider public support such as a disability pension or public assistance."
                    .to_string(),
            );
        }

        if self.input.monthly_expenses > HIGH_EXPENSES_THRESHOLD {
            suggestions.push(
                "Start by reviewing fixed costs such as phone and utility bills.".to_string(),
            );
        }

        if self.input.monthly_support < LOW_SUPPORT_THRESHOLD {
            suggestions.push(
                "Consider a small, manageable source of income such as light work from home."
                    .to_string(),
            );
        }

        suggestions
    }

    /// How much longer the money lasts if expenses drop by 10%.
    fn expense_cut_suggestion(&self) -> Option<String> {
        let monthly_balance = self.monthly_balance();
        if monthly_balance >= 0 || self.projection.depletion_year.is_none() {
            return None;
        }

        let expenses = self.input.monthly_expenses;
        let reduced = truncate_to_i64(Decimal::from(expenses) * REDUCED_EXPENSE_FACTOR);
        let monthly_saving = expenses - reduced;

        let current_deficit = -monthly_balance;
        let new_deficit = current_deficit - monthly_saving;
        if new_deficit <= 0 {
            return None;
        }

        let current_months = self.input.total_assets / current_deficit;
        let new_months = self.input.total_assets / new_deficit;
        let extended_years = round_half_up(
            Decimal::from(new_months - current_months) / Decimal::from(12),
            1,
        );

        Some(format!(
            "Cutting monthly living costs by 10% ({}) would make your funds last about {:.1} years longer.",
            format_amount(monthly_saving),
            extended_years
        ))
    }

    pub fn advice_message(&self) -> String {
        match self.projection.years_until_depletion {
            Some(years) => format!(
                "At the current pace your funds may fall short in about {years} years. \
                 That is not the end of the story: small changes add up. \
                 Start by looking back over your spending once a month."
            ),
            None => "At the current pace your funds should last the whole simulated period. \
                     Even so, building a small buffer for unexpected costs is a good idea."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculations::ProjectionCalculator;
    use crate::models::SupportType;

    fn input(
        monthly_expenses: i64,
        total_assets: i64,
        monthly_support: i64,
    ) -> SimulationInput {
        SimulationInput {
            age: 45,
            monthly_expenses,
            total_assets,
            monthly_support,
            support_type: SupportType::Other,
        }
    }

    fn project(input: &SimulationInput) -> Projection {
        ProjectionCalculator::new(input, 2025).calculate(50).unwrap()
    }

    #[test]
    fn reduced_expense_factor_is_ninety_percent() {
        assert_eq!(REDUCED_EXPENSE_FACTOR, rust_decimal_macros::dec!(0.9));
    }

    // =========================================================================
    // risk factors
    // =========================================================================

    #[test]
    fn depleting_deficit_without_support_raises_every_risk() {
        let input = input(150_000, 1_000_000, 0);
        let projection = project(&input);

        let risks = PlanAnalyzer::new(&input, &projection).risk_factors();

        assert_eq!(
            risks,
            vec![
                "At the current pace your assets may run out in about 0 years.".to_string(),
                "Your monthly balance is 150,000 short; your assets shrink every month."
                    .to_string(),
                "You are not receiving public support; check whether any programme applies to you."
                    .to_string(),
                "Your assets are below one year of living expenses; act soon.".to_string(),
            ]
        );
    }

    #[test]
    fn comfortable_plan_has_no_risks() {
        let input = input(80_000, 5_000_000, 100_000);
        let projection = project(&input);

        let risks = PlanAnalyzer::new(&input, &projection).risk_factors();

        assert!(risks.is_empty(), "got {risks:?}");
    }

    // =========================================================================
    // suggestions
    // =========================================================================

    #[test]
    fn expense_cut_reports_extended_years() {
        // deficit 100,000/month; a 10% cut saves 10,000 -> deficit 90,000
        // 12,000,000 / 100,000 = 120 months, / 90,000 = 133 months -> 1.1 years
        let input = input(100_000, 12_000_000, 0);
        let projection = project(&input);

        let suggestions = PlanAnalyzer::new(&input, &projection).suggestions();

        assert_eq!(
            suggestions[0],
            "Cutting monthly living costs by 10% (10,000) would make your funds last about 1.1 years longer."
        );
    }

    #[test]
    fn expense_cut_is_skipped_when_cut_covers_deficit() {
        // deficit 5,000/month; a 10% cut saves 10,000
        let input = input(100_000, 1_000_000, 95_000);
        let projection = project(&input);

        let suggestions = PlanAnalyzer::new(&input, &projection).suggestions();

        assert!(
            suggestions.iter().all(|s| !s.starts_with("Cutting")),
            "got {suggestions:?}"
        );
    }

    #[test]
    fn expense_cut_formats_whole_years_with_one_decimal() {
        // deficit 10,000; cut saves 1,000 -> 9,000
        // 1,080,000 / 10,000 = 108, / 9,000 = 120 -> 12 months -> 1.0 years
        let input = input(10_000, 1_080_000, 0);
        let projection = project(&input);

        let suggestions = PlanAnalyzer::new(&input, &projection).suggestions();

        assert!(suggestions[0].contains("about 1.0 years"), "got {suggestions:?}");
    }

    #[test]
    fn high_expenses_and_low_support_suggestions() {
        let input = input(120_000, 100_000_000, 30_000);
        let projection = project(&input);

        let suggestions = PlanAnalyzer::new(&input, &projection).suggestions();

        assert_eq!(
            suggestions,
            vec![
                "Start by reviewing fixed costs such as phone and utility bills.".to_string(),
                "Consider a small, manageable source of income such as light work from home."
                    .to_string(),
            ]
        );
    }

    // =========================================================================
    // advice message
    // =========================================================================

    #[test]
    fn advice_names_years_until_depletion() {
        let input = input(100_000, 3_000_000, 0);
        let projection = project(&input);

        let advice = PlanAnalyzer::new(&input, &projection).advice_message();

        assert!(advice.contains("about 2 years"), "got {advice}");
    }

    #[test]
    fn advice_for_lasting_funds() {
        let input = input(10_000, 0, 20_000);
        let projection = project(&input);

        let analysis = PlanAnalyzer::new(&input, &projection).analyze();

        assert!(analysis.advice_message.contains("last the whole simulated period"));
        assert_eq!(analysis.model_version, MODEL_VERSION);
    }
}
