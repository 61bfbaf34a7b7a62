//! In-process simulation backend.

use std::ops::RangeInclusive;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use tracing::{debug, info, warn};

use super::factory::{SimulatorConfig, SimulatorFactory};
use super::service::{Simulator, SimulatorError};
use crate::calculations::{PlanAnalyzer, ProjectionCalculator};
use crate::models::{SimulationInput, SimulationRequest, SimulationResult};
use crate::wizard::validators::{
    AGE_RANGE, MONTHLY_EXPENSES_RANGE, MONTHLY_SUPPORT_RANGE, TOTAL_ASSETS_RANGE,
};

/// Runs the projection and analysis in the calling process.
#[derive(Debug, Clone, Default)]
pub struct LocalSimulator {
    base_year: Option<i32>,
}

impl LocalSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the first projected year instead of using the current year.
    pub fn with_base_year(base_year: i32) -> Self {
        Self {
            base_year: Some(base_year),
        }
    }

    fn base_year(&self) -> i32 {
        self.base_year.unwrap_or_else(|| Utc::now().year())
    }
}

fn check_range(
    name: &str,
    value: i64,
    range: &RangeInclusive<i64>,
) -> Result<(), SimulatorError> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(SimulatorError::InvalidInput(format!(
        "{name} must be between {} and {}, got {value}",
        range.start(),
        range.end()
    )))
}

/// Same bounds the questionnaire enforces; requests may arrive from
/// elsewhere, e.g. deserialized.
fn check_input(input: &SimulationInput) -> Result<(), SimulatorError> {
    check_range("age", input.age, &AGE_RANGE)?;
    check_range(
        "monthly expenses",
        input.monthly_expenses,
        &MONTHLY_EXPENSES_RANGE,
    )?;
    check_range("total assets", input.total_assets, &TOTAL_ASSETS_RANGE)?;
    check_range(
        "monthly support",
        input.monthly_support,
        &MONTHLY_SUPPORT_RANGE,
    )
}

#[async_trait]
impl Simulator for LocalSimulator {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn simulate(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResult, SimulatorError> {
        let input = &request.user_info;
        if let Err(e) = check_input(input) {
            warn!(error = %e, "rejected simulation input");
            return Err(e);
        }

        let base_year = self.base_year();
        let years = request.options.simulation_years;
        debug!(base_year, years, "running local projection");

        let projection = ProjectionCalculator::new(input, base_year)
            .calculate(years)
            .map_err(|e| SimulatorError::Configuration(e.to_string()))?;

        let analysis = request
            .options
            .include_analysis
            .then(|| PlanAnalyzer::new(input, &projection).analyze());

        info!(
            years = projection.total_years_simulated,
            depletion_year = ?projection.depletion_year,
            "simulation finished"
        );

        Ok(SimulationResult {
            created_at: Utc::now(),
            input: *input,
            depletion_age: projection.depletion_age,
            depletion_year: projection.depletion_year,
            years_until_depletion: projection.years_until_depletion,
            total_years_simulated: projection.total_years_simulated,
            yearly_data: projection.yearly_data,
            summary: projection.summary,
            analysis,
        })
    }
}

/// Factory registered under the `local` backend name.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSimulatorFactory;

#[async_trait]
impl SimulatorFactory for LocalSimulatorFactory {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    async fn create(
        &self,
        config: &SimulatorConfig,
    ) -> Result<Box<dyn Simulator>, SimulatorError> {
        let simulator = match config.base_year {
            Some(year) => LocalSimulator::with_base_year(year),
            None => LocalSimulator::new(),
        };
        Ok(Box::new(simulator))
    }
}
