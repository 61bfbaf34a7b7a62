use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::controller::{WizardCommand, WizardController, WizardError};
use super::state::WizardState;
use crate::models::SimulationInput;

/// A controller that can be shared between threads.
///
/// Each call holds the lock for the whole read-modify-write, so a reader
/// never sees `is_valid` computed against a different answer set.
#[derive(Debug, Clone, Default)]
pub struct SharedWizard {
    inner: Arc<Mutex<WizardController>>,
}

impl SharedWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `command` and returns the resulting state.
    pub fn apply(
        &self,
        command: WizardCommand,
    ) -> Result<WizardState, WizardError> {
        let mut wizard = self.lock();
        wizard.apply(command)?;
        Ok(wizard.state().clone())
    }

    pub fn snapshot(&self) -> WizardState {
        self.lock().state().clone()
    }

    pub fn hand_off(&self) -> Result<SimulationInput, WizardError> {
        self.lock().hand_off()
    }

    fn lock(&self) -> MutexGuard<'_, WizardController> {
        // Controller operations cannot panic halfway through a mutation.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
