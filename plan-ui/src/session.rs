//! The interactive questionnaire loop.
//!
//! Generic over its input and output so tests can drive it with byte
//! buffers. One line of input is one [`Input`]; after each line the
//! current question is rendered again.

use std::fs::File;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use plan_core::models::{AnswerValue, Field};
use plan_core::simulator::Simulator;
use plan_core::wizard::{WizardError, field_range};
use plan_data::ProjectionExporter;
use tracing::{error, info};

use crate::prompt::{Input, parse_input, render_step};
use crate::report::render_result;
use crate::state::AppState;

pub const CHECK_ANSWER: &str = "Please check your answer.";

pub struct Session<R, W> {
    input: R,
    output: W,
    state: AppState,
    simulator: Box<dyn Simulator>,
    export_path: Option<PathBuf>,
}

enum Flow {
    Continue,
    Finished,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        input: R,
        output: W,
        state: AppState,
        simulator: Box<dyn Simulator>,
    ) -> Self {
        Self {
            input,
            output,
            state,
            simulator,
            export_path: None,
        }
    }

    /// Write the projection CSV to `path` after a successful simulation.
    pub fn with_export(
        mut self,
        path: PathBuf,
    ) -> Self {
        self.export_path = Some(path);
        self
    }

    /// Runs until the user quits, input ends, or a simulation succeeds.
    /// Returns the final state, including the result if there is one.
    pub async fn run(mut self) -> Result<AppState> {
        writeln!(
            self.output,
            "Life planner: answer {} short questions to see how long your money lasts.",
            self.state.wizard.state().total_steps()
        )?;

        loop {
            render_step(&mut self.output, self.state.wizard.state())?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            if let Flow::Finished = self.handle_line(&line).await? {
                break;
            }
        }

        writeln!(self.output, "Goodbye.")?;
        Ok(self.state)
    }

    async fn handle_line(
        &mut self,
        line: &str,
    ) -> Result<Flow> {
        let step = self.state.wizard.state().step();

        let input = match parse_input(step, line) {
            Ok(input) => input,
            Err(e) => {
                writeln!(self.output, "{e}. Type a number or a command.")?;
                return Ok(Flow::Continue);
            }
        };

        match input {
            Input::Answer { field, value } => self.answer(field, value)?,
            Input::Next => return self.next().await,
            Input::Back => self.state.wizard.retreat(),
            Input::Jump(target) => {
                if let Err(e) = self.state.wizard.jump_to(target) {
                    writeln!(self.output, "{e}.")?;
                }
            }
            Input::Reset => {
                self.state.clear();
                writeln!(self.output, "All answers cleared.")?;
            }
            Input::Quit => return Ok(Flow::Finished),
        }

        Ok(Flow::Continue)
    }

    fn answer(
        &mut self,
        field: Field,
        value: AnswerValue,
    ) -> Result<()> {
        self.state.wizard.set_answer(field, value);

        if let (Some(range), Some(v)) = (field_range(field), value.as_integer()) {
            if !range.contains(&v) {
                writeln!(
                    self.output,
                    "{CHECK_ANSWER} Enter a value between {} and {}.",
                    range.start(),
                    range.end()
                )?;
            }
        }
        Ok(())
    }

    async fn next(&mut self) -> Result<Flow> {
        let wizard = self.state.wizard.state();
        if !wizard.is_valid() {
            writeln!(self.output, "{CHECK_ANSWER}")?;
            return Ok(Flow::Continue);
        }
        if !wizard.is_last_step() {
            self.state.wizard.advance();
            return Ok(Flow::Continue);
        }
        self.simulate().await
    }

    async fn simulate(&mut self) -> Result<Flow> {
        let request = match self.state.simulation_request() {
            Ok(request) => request,
            Err(WizardError::Incomplete { step }) => {
                writeln!(self.output, "Question {step} needs an answer first.")?;
                self.state.wizard.jump_to(i64::from(step))?;
                return Ok(Flow::Continue);
            }
            Err(e) => return Err(e.into()),
        };

        writeln!(self.output, "Running simulation...")?;
        let result = match self.simulator.simulate(&request).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, backend = self.simulator.name(), "simulation failed");
                writeln!(
                    self.output,
                    "Simulation failed: {e}. Your answers are kept; try again."
                )?;
                return Ok(Flow::Continue);
            }
        };

        render_result(&mut self.output, &result)?;

        if let Some(path) = &self.export_path {
            let file = File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?;
            let rows = ProjectionExporter::write(file, &result)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            writeln!(self.output, "Projection saved to {} ({rows} rows).", path.display())?;
            info!(path = %path.display(), rows, "projection exported");
        }

        self.state.last_result = Some(result);
        Ok(Flow::Finished)
    }
}
