pub mod calculations;
pub mod models;
pub mod simulator;
pub mod wizard;

pub use models::*;
pub use simulator::{Simulator, SimulatorError};
pub use wizard::{WizardCommand, WizardController, WizardError, WizardState};
