//! Year-by-year asset depletion projection.
//!
//! Starting from the respondent's current assets, each simulated year adds
//! twelve months of support income and subtracts twelve months of living
//! expenses. The balance never goes below zero: the first year in which it
//! reaches zero is the depletion year, and it stays at zero afterwards.
//!
//! # Example
//!
//! ```
//! use plan_core::calculations::ProjectionCalculator;
//! use plan_core::models::{SimulationInput, SupportType};
//!
//! let input = SimulationInput {
//!     age: 50,
//!     monthly_expenses: 100_000,
//!     total_assets: 3_000_000,
//!     monthly_support: 0,
//!     support_type: SupportType::None,
//! };
//!
//! let projection = ProjectionCalculator::new(&input, 2025).calculate(10).unwrap();
//!
//! assert_eq!(projection.depletion_year, Some(2027));
//! assert_eq!(projection.depletion_age, Some(52));
//! assert_eq!(projection.years_until_depletion, Some(2));
//! assert_eq!(projection.yearly_data[0].balance, 1_800_000);
//! ```

use thiserror::Error;
use tracing::debug;

use crate::models::{ProjectionSummary, SimulationInput, YearlyData};

/// Longest horizon the calculator accepts.
pub const MAX_SIMULATION_YEARS: u32 = 150;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    /// The horizon must be between 1 and [`MAX_SIMULATION_YEARS`].
    #[error("simulation years must be between 1 and {max}, got {0}", max = MAX_SIMULATION_YEARS)]
    InvalidYears(u32),

    /// The last projected year does not fit in an `i32`.
    #[error("base year {base_year} is too late for a {years}-year projection")]
    InvalidBaseYear { base_year: i32, years: u32 },

    /// Amounts too large to project without overflowing.
    #[error("amounts are too large to project")]
    AmountOverflow,
}

/// Output of [`ProjectionCalculator::calculate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub depletion_age: Option<i64>,
    pub depletion_year: Option<i32>,
    pub years_until_depletion: Option<i32>,
    pub total_years_simulated: u32,
    pub yearly_data: Vec<YearlyData>,
    pub summary: ProjectionSummary,
}

#[derive(Debug, Clone)]
pub struct ProjectionCalculator<'a> {
    input: &'a SimulationInput,
    base_year: i32,
}

impl<'a> ProjectionCalculator<'a> {
    /// `base_year` is the calendar year of the first simulated year.
    pub fn new(
        input: &'a SimulationInput,
        base_year: i32,
    ) -> Self {
        Self { input, base_year }
    }

    /// Projects `years` years forward.
    ///
    /// # Errors
    ///
    /// * [`ProjectionError::InvalidYears`] for a zero or overly long horizon.
    /// * [`ProjectionError::InvalidBaseYear`] when the last year overflows.
    /// * [`ProjectionError::AmountOverflow`] when a balance or total overflows.
    pub fn calculate(
        &self,
        years: u32,
    ) -> Result<Projection, ProjectionError> {
        if years == 0 || years > MAX_SIMULATION_YEARS {
            return Err(ProjectionError::InvalidYears(years));
        }

        // years <= MAX_SIMULATION_YEARS, so the cast is lossless
        let last_offset = years as i32 - 1;
        if self.base_year.checked_add(last_offset).is_none() {
            return Err(ProjectionError::InvalidBaseYear {
                base_year: self.base_year,
                years,
            });
        }

        let annual_income = annual(self.input.monthly_support)?;
        let annual_expenses = annual(self.input.monthly_expenses)?;
        let net_change = annual_income
            .checked_sub(annual_expenses)
            .ok_or(ProjectionError::AmountOverflow)?;

        let mut balance = self.input.total_assets;
        let mut depletion: Option<(i32, i64)> = None;
        let mut yearly_data = Vec::with_capacity(years as usize);

        for offset in 0..years {
            // checked above: base_year + last_offset fits
            let year = self.base_year + offset as i32;
            let age = self
                .input
                .age
                .checked_add(i64::from(offset))
                .ok_or(ProjectionError::AmountOverflow)?;

            balance = balance
                .checked_add(net_change)
                .ok_or(ProjectionError::AmountOverflow)?;

            yearly_data.push(YearlyData {
                year,
                age,
                balance: balance.max(0),
                annual_income,
                annual_expenses,
                net_change,
            });

            if balance <= 0 {
                if depletion.is_none() {
                    debug!(year, age, "assets depleted");
                    depletion = Some((year, age));
                }
                balance = 0;
            }
        }

        let summary = summarize(&yearly_data)?;
        let years_until_depletion = depletion.map(|(year, _)| year - self.base_year);

        Ok(Projection {
            depletion_age: depletion.map(|(_, age)| age),
            depletion_year: depletion.map(|(year, _)| year),
            years_until_depletion,
            total_years_simulated: years,
            yearly_data,
            summary,
        })
    }
}

fn annual(monthly: i64) -> Result<i64, ProjectionError> {
    monthly.checked_mul(12).ok_or(ProjectionError::AmountOverflow)
}

fn summarize(yearly_data: &[YearlyData]) -> Result<ProjectionSummary, ProjectionError> {
    let to_i64 = |v: i128| i64::try_from(v).map_err(|_| ProjectionError::AmountOverflow);

    let total_income: i128 = yearly_data.iter().map(|d| i128::from(d.annual_income)).sum();
    let total_expenses: i128 = yearly_data.iter().map(|d| i128::from(d.annual_expenses)).sum();
    let balance_sum: i128 = yearly_data.iter().map(|d| i128::from(d.balance)).sum();
    let months = (yearly_data.len() as i128 * 12).max(1);

    Ok(ProjectionSummary {
        total_income: to_i64(total_income)?,
        total_expenses: to_i64(total_expenses)?,
        net_balance: to_i64(total_income - total_expenses)?,
        // balances are never negative, so integer division truncates
        average_monthly_balance: to_i64(balance_sum / months)?,
    })
}
