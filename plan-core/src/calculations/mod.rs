//! Calculations behind the local simulation engine.
//!
//! - `projection` - year-by-year balance and depletion detection
//! - `analysis` - rule-based risks, suggestions and advice
//! - `common` - rounding and formatting helpers

pub mod analysis;
pub mod common;
pub mod projection;

pub use analysis::{MODEL_VERSION, PlanAnalyzer};
pub use projection::{MAX_SIMULATION_YEARS, Projection, ProjectionCalculator, ProjectionError};
