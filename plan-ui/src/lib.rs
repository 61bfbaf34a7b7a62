pub mod config;
pub mod logging;
pub mod prompt;
pub mod report;
pub mod session;
pub mod state;
pub mod utils;

pub use config::{AppConfig, ConfigError};
pub use session::Session;
pub use state::AppState;
