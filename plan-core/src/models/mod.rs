mod answer_set;
mod field;
mod simulation;

pub use answer_set::{AnswerSet, NOT_ANSWERED};
pub use field::{AnswerValue, Field, FieldParseError, SupportType};
pub use simulation::{
    Analysis, DEFAULT_SIMULATION_YEARS, ProjectionSummary, SimulationInput, SimulationOptions,
    SimulationRequest, SimulationResult, YearlyData,
};
