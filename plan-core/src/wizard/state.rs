use serde::Serialize;

use super::step::{Step, TOTAL_STEPS};
use super::validators::validate_step;
use crate::models::AnswerSet;

/// Snapshot of questionnaire progress.
///
/// Only [`WizardController`](super::WizardController) can change a state;
/// everything else reads it. `is_valid` is derived from `current_step` and
/// `answers` and is refreshed after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardState {
    current_step: u8,
    total_steps: u8,
    answers: AnswerSet,
    is_valid: bool,
}

impl WizardState {
    /// Fresh state: step 1, no answers, not valid.
    pub fn new() -> Self {
        Self {
            current_step: 1,
            total_steps: TOTAL_STEPS,
            answers: AnswerSet::new(),
            is_valid: false,
        }
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    pub fn step(&self) -> Step {
        // current_step is kept within 1..=TOTAL_STEPS by the controller
        Step::from_number(self.current_step).unwrap_or(Step::Age)
    }

    pub fn total_steps(&self) -> u8 {
        self.total_steps
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 1
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == self.total_steps
    }

    /// Rounded share of steps reached, as shown on the progress bar.
    pub fn progress_percent(&self) -> u8 {
        let current = u32::from(self.current_step);
        let total = u32::from(self.total_steps);
        ((current * 100 + total / 2) / total) as u8
    }

    pub(super) fn answers_mut(&mut self) -> &mut AnswerSet {
        &mut self.answers
    }

    pub(super) fn set_current_step(
        &mut self,
        step: u8,
    ) {
        self.current_step = step;
    }

    pub(super) fn refresh_validity(&mut self) {
        self.is_valid = validate_step(self.current_step, &self.answers);
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
