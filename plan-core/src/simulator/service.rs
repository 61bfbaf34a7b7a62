use async_trait::async_trait;
use thiserror::Error;

use crate::models::{SimulationRequest, SimulationResult};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulatorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Simulator unavailable: {0}")]
    Unavailable(String),
}

/// Engine that turns a completed answer record into a projection.
///
/// Implementations may run in process or call out to a remote service;
/// callers only rely on the request/result contract.
#[async_trait]
pub trait Simulator: Send + Sync {
    /// Backend identifier, e.g. `"local"`.
    fn name(&self) -> &'static str;

    async fn simulate(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResult, SimulatorError>;
}
