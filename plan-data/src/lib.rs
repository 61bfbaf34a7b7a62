pub mod answers;
pub mod export;

pub use answers::{AnswerRecord, AnswerSheetError, AnswerSheetLoader};
pub use export::ProjectionExporter;
