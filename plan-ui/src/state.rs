//! Application state for the interactive planner.
//!
//! Holds the one wizard controller of the session plus the most recent
//! simulation result. Nothing here outlives the process.

use plan_core::models::{SimulationOptions, SimulationRequest, SimulationResult};
use plan_core::wizard::{WizardController, WizardError};

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub wizard: WizardController,
    /// Options sent with every simulation request.
    pub options: SimulationOptions,
    /// Result of the last successful simulation.
    pub last_result: Option<SimulationResult>,
}

impl AppState {
    pub fn new(options: SimulationOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Build the request for the simulator from the current answers.
    pub fn simulation_request(&self) -> Result<SimulationRequest, WizardError> {
        let input = self.wizard.hand_off()?;
        Ok(SimulationRequest::new(input).with_options(self.options))
    }

    pub fn has_result(&self) -> bool {
        self.last_result.is_some()
    }

    /// Start over: empty answers, step 1, no result.
    pub fn clear(&mut self) {
        self.wizard.reset();
        self.last_result = None;
    }
}
