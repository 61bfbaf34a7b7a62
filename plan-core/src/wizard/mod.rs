//! Multi-step questionnaire.
//!
//! - `step` - step numbering and per-step prompts
//! - `validators` - pure completeness predicates, one per step
//! - `state` - the read-only progress snapshot
//! - `controller` - the only mutator of the state
//! - `shared` - a lock-guarded controller for concurrent embedding

mod controller;
mod shared;
mod state;
mod step;
pub mod validators;

pub use controller::{WizardCommand, WizardController, WizardError};
pub use shared::SharedWizard;
pub use state::WizardState;
pub use step::{Step, TOTAL_STEPS};
pub use validators::{StepValidator, field_range, validate_step};
