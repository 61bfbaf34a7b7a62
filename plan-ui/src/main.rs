use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use plan_core::simulator::SimulatorRegistry;
use plan_data::AnswerSheetLoader;
use tracing::{debug, info};

use plan_ui::{AppConfig, AppState, Session, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Life planner: a short questionnaire about age, living costs, assets and
/// public support, followed by a year-by-year projection of how long the
/// money lasts.
#[derive(Debug, Parser)]
#[command(name = "life-planner", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulation backend (overrides the config file).
    #[arg(long)]
    backend: Option<String>,

    /// Number of years to project (overrides the config file).
    #[arg(long)]
    years: Option<u32>,

    /// Log level or EnvFilter directive (overrides the config file).
    #[arg(long)]
    log_level: Option<String>,

    /// Pre-fill answers from a CSV sheet with a `field,value` header.
    #[arg(long)]
    answers: Option<PathBuf>,

    /// Write the projection to this CSV file after a successful run.
    #[arg(long)]
    export: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if let Some(backend) = &self.backend {
            config.simulation.backend = backend.clone();
        }
        if let Some(years) = self.years {
            config.simulation.years = years;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        Ok(config)
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    logging::init_logging(&config.logging)?;
    debug!(?config, "configuration loaded");

    let simulator_config = config.simulator_config();
    let simulator = SimulatorRegistry::with_builtin()
        .create(&simulator_config)
        .await
        .with_context(|| format!("Failed to create simulator: {}", simulator_config.backend))?;
    info!(backend = simulator.name(), "simulator ready");

    let mut state = AppState::new(config.simulation_options());

    if let Some(path) = &cli.answers {
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = AnswerSheetLoader::parse(file)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        let applied = AnswerSheetLoader::apply(&mut state.wizard, &records);
        info!(applied, path = %path.display(), "answers pre-filled");
    }

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout(), state, simulator);
    if let Some(path) = cli.export {
        session = session.with_export(path);
    }

    let state = session.run().await?;
    debug!(has_result = state.has_result(), "session finished");

    Ok(())
}
