use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use plan_core::models::{DEFAULT_SIMULATION_YEARS, SimulationOptions, SimulationRequest};
use plan_core::simulator::{SimulatorConfig, SimulatorRegistry};
use plan_core::wizard::WizardController;
use plan_data::{AnswerSheetLoader, ProjectionExporter};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run a projection from a CSV answer sheet without the interactive wizard.
///
/// The answer sheet has a `field,value` header followed by one row per
/// answer (age, monthly_expenses, total_assets, support_type,
/// monthly_support). The yearly projection is written as CSV.
#[derive(Parser, Debug)]
#[command(name = "plan-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV answer sheet
    #[arg(short, long)]
    answers: PathBuf,

    /// Where to write the projection CSV (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of years to project
    #[arg(short, long, default_value_t = DEFAULT_SIMULATION_YEARS)]
    years: u32,

    /// Calendar year of the first projected year (defaults to this year)
    #[arg(short, long)]
    base_year: Option<i32>,

    /// Simulation backend
    #[arg(long, default_value = "local")]
    backend: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    eprintln!("Loading answers from: {}", args.answers.display());

    let file = File::open(&args.answers)
        .with_context(|| format!("Failed to open: {}", args.answers.display()))?;

    let records = AnswerSheetLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.answers.display()))?;

    let mut wizard = WizardController::new();
    AnswerSheetLoader::apply(&mut wizard, &records);
    eprintln!("Applied {} answers", records.len());

    let input = wizard
        .hand_off()
        .context("Answer sheet does not complete the questionnaire")?;

    let config = SimulatorConfig {
        backend: args.backend,
        base_year: args.base_year,
    };
    let simulator = SimulatorRegistry::with_builtin()
        .create(&config)
        .await
        .with_context(|| format!("Failed to create simulator: {}", config.backend))?;

    let request = SimulationRequest::new(input).with_options(SimulationOptions {
        simulation_years: args.years,
        include_analysis: false,
    });
    let result = simulator
        .simulate(&request)
        .await
        .context("Simulation failed")?;
    info!(years = result.total_years_simulated, "projection ready");

    let written = match &args.output {
        Some(path) => {
            let out = File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?;
            ProjectionExporter::write(out, &result)
                .with_context(|| format!("Failed to write: {}", path.display()))?
        }
        None => ProjectionExporter::write(io::stdout().lock(), &result)
            .context("Failed to write projection")?,
    };

    match result.depletion_year {
        Some(year) => eprintln!("Wrote {written} years; assets run out in {year}."),
        None => eprintln!("Wrote {written} years; assets last the whole projection."),
    }

    Ok(())
}
