pub mod factory;
pub mod local;
pub mod service;

pub use factory::{SimulatorConfig, SimulatorFactory, SimulatorRegistry};
pub use local::{LocalSimulator, LocalSimulatorFactory};
pub use service::{Simulator, SimulatorError};
