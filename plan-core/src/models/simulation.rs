use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::SupportType;

/// Default projection horizon in years.
pub const DEFAULT_SIMULATION_YEARS: u32 = 50;

/// The completed answer record handed to a simulator.
///
/// Field names are the wire contract with simulation engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub age: i64,
    pub monthly_expenses: i64,
    pub total_assets: i64,
    pub monthly_support: i64,
    pub support_type: SupportType,
}

/// Knobs for a single simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOptions {
    pub simulation_years: u32,
    pub include_analysis: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            simulation_years: DEFAULT_SIMULATION_YEARS,
            include_analysis: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub user_info: SimulationInput,
    #[serde(default)]
    pub options: SimulationOptions,
}

impl SimulationRequest {
    pub fn new(user_info: SimulationInput) -> Self {
        Self {
            user_info,
            options: SimulationOptions::default(),
        }
    }

    pub fn with_options(
        mut self,
        options: SimulationOptions,
    ) -> Self {
        self.options = options;
        self
    }
}

/// One projected year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyData {
    pub year: i32,
    pub age: i64,
    /// End-of-year balance, never negative.
    pub balance: i64,
    pub annual_income: i64,
    pub annual_expenses: i64,
    pub net_change: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_income: i64,
    pub total_expenses: i64,
    pub net_balance: i64,
    pub average_monthly_balance: i64,
}

/// Rule-based commentary attached to a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub risk_factors: Vec<String>,
    pub suggestions: Vec<String>,
    pub advice_message: String,
    pub generated_at: DateTime<Utc>,
    pub model_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub created_at: DateTime<Utc>,
    pub input: SimulationInput,
    pub depletion_age: Option<i64>,
    pub depletion_year: Option<i32>,
    pub years_until_depletion: Option<i32>,
    pub total_years_simulated: u32,
    pub yearly_data: Vec<YearlyData>,
    pub summary: ProjectionSummary,
    pub analysis: Option<Analysis>,
}

impl SimulationResult {
    /// Whether assets run out within the simulated horizon.
    pub fn depletes(&self) -> bool {
        self.depletion_year.is_some()
    }
}

impl fmt::Display for SimulationInput {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Age:              {}", self.age)?;
        writeln!(f, "Monthly expenses: {}", self.monthly_expenses)?;
        writeln!(f, "Total assets:     {}", self.total_assets)?;
        writeln!(f, "Support type:     {}", self.support_type.label())?;
        write!(f, "Monthly support:  {}", self.monthly_support)
    }
}
