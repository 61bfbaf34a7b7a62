//! The questionnaire state machine.
//!
//! Writes are permissive and transitions are gated: any well-typed value
//! may be stored, and an out-of-range value simply leaves the current step
//! invalid. The caller is expected to check [`WizardState::is_valid`] before
//! calling [`WizardController::advance`]; the controller itself never
//! refuses a forward move below the terminal step.
//!
//! # Example
//!
//! ```
//! use plan_core::models::{AnswerValue, Field, SupportType};
//! use plan_core::wizard::WizardController;
//!
//! let mut wizard = WizardController::new();
//! wizard.set_answer(Field::Age, AnswerValue::Integer(45));
//! assert!(wizard.state().is_valid());
//!
//! wizard.advance();
//! wizard.set_answer(Field::MonthlyExpenses, AnswerValue::Integer(150_000));
//! wizard.advance();
//! wizard.set_answer(Field::TotalAssets, AnswerValue::Integer(10_000_000));
//! wizard.advance();
//! assert!(wizard.state().is_last_step());
//!
//! let input = wizard.hand_off().unwrap();
//! assert_eq!(input.support_type, SupportType::None);
//! assert_eq!(input.monthly_support, 0);
//! ```

use thiserror::Error;
use tracing::{debug, info, warn};

use super::state::WizardState;
use super::validators::{MONTHLY_SUPPORT_RANGE, validate_step};
use crate::models::{AnswerValue, Field, SimulationInput, SupportType};

/// Errors surfaced by the controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    /// `jump_to` was given a step outside `1..=total`.
    #[error("step {step} is out of range (1..={total})")]
    StepOutOfRange { step: i64, total: u8 },

    /// `hand_off` was requested while a required step is still incomplete.
    #[error("step {step} is not complete")]
    Incomplete { step: u8 },
}

/// A single state transition, for callers that prefer message passing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardCommand {
    SetAnswer { field: Field, value: AnswerValue },
    Advance,
    Retreat,
    JumpTo(i64),
    Reset,
}

/// Sole owner and mutator of a [`WizardState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardController {
    state: WizardState,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Stores `value` for `field`, replacing any previous value.
    ///
    /// Fields of other steps may be written; only the current step's
    /// validator decides `is_valid`.
    pub fn set_answer(
        &mut self,
        field: Field,
        value: AnswerValue,
    ) {
        self.state.answers_mut().set(field, value);
        self.state.refresh_validity();
        debug!(
            %field,
            %value,
            step = self.state.current_step(),
            valid = self.state.is_valid(),
            "answer set"
        );
    }

    /// Moves one step forward. No-op at the terminal step.
    pub fn advance(&mut self) {
        let current = self.state.current_step();
        if current < self.state.total_steps() {
            self.move_to(current + 1);
        } else {
            debug!(step = current, "advance ignored at terminal step");
        }
    }

    /// Moves one step back. No-op at step 1.
    pub fn retreat(&mut self) {
        let current = self.state.current_step();
        if current > 1 {
            self.move_to(current - 1);
        } else {
            debug!("retreat ignored at first step");
        }
    }

    /// Jumps directly to `step`.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::StepOutOfRange`] when `step` is outside
    /// `1..=total_steps`; the state is left untouched.
    pub fn jump_to(
        &mut self,
        step: i64,
    ) -> Result<(), WizardError> {
        let total = self.state.total_steps();
        match u8::try_from(step) {
            Ok(target) if (1..=total).contains(&target) => {
                self.move_to(target);
                Ok(())
            }
            _ => {
                warn!(step, total, "rejected jump outside questionnaire");
                Err(WizardError::StepOutOfRange { step, total })
            }
        }
    }

    /// Restores the initial state. Idempotent.
    pub fn reset(&mut self) {
        self.state = WizardState::new();
        debug!("wizard reset");
    }

    /// Applies one [`WizardCommand`].
    ///
    /// # Errors
    ///
    /// Only [`WizardCommand::JumpTo`] can fail, see [`Self::jump_to`].
    pub fn apply(
        &mut self,
        command: WizardCommand,
    ) -> Result<(), WizardError> {
        match command {
            WizardCommand::SetAnswer { field, value } => self.set_answer(field, value),
            WizardCommand::Advance => self.advance(),
            WizardCommand::Retreat => self.retreat(),
            WizardCommand::JumpTo(step) => self.jump_to(step)?,
            WizardCommand::Reset => self.reset(),
        }
        Ok(())
    }

    /// Builds the completed record for the simulation engine.
    ///
    /// Support defaults to `none` with a monthly amount of 0. Whenever the
    /// support type is `none` the amount is forced to 0, whatever was typed
    /// before; otherwise it is clamped to the accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Incomplete`] naming the first required step
    /// whose validator fails.
    pub fn hand_off(&self) -> Result<SimulationInput, WizardError> {
        let answers = self.state.answers();

        for step in 1..self.state.total_steps() {
            if !validate_step(step, answers) {
                warn!(step, "hand-off refused, step incomplete");
                return Err(WizardError::Incomplete { step });
            }
        }

        let support_type = answers.support_type().unwrap_or_default();
        let monthly_support = match support_type {
            SupportType::None => 0,
            _ => answers
                .integer(Field::MonthlySupport)
                .unwrap_or(0)
                .clamp(*MONTHLY_SUPPORT_RANGE.start(), *MONTHLY_SUPPORT_RANGE.end()),
        };

        let input = SimulationInput {
            age: answers.integer(Field::Age).unwrap_or_default(),
            monthly_expenses: answers.integer(Field::MonthlyExpenses).unwrap_or_default(),
            total_assets: answers.integer(Field::TotalAssets).unwrap_or_default(),
            monthly_support,
            support_type,
        };
        info!(?input, "answers handed off");

        Ok(input)
    }

    fn move_to(
        &mut self,
        step: u8,
    ) {
        self.state.set_current_step(step);
        self.state.refresh_validity();
        debug!(step, valid = self.state.is_valid(), "moved to step");
    }
}
