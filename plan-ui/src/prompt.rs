//! Rendering of the current question and parsing of typed input.
//!
//! | Input | Meaning |
//! |-------|---------|
//! | number (`150,000`, `80000円`) | answer for the current step |
//! | `none` / `pension` / `welfare` / `other` | support type (step 4) |
//! | `next`, `n`, empty line | continue |
//! | `back`, `b` | previous question |
//! | `jump N`, `j N` | go to question N |
//! | `reset` | clear all answers |
//! | `quit`, `q` | leave |

use std::io::{self, Write};

use plan_core::calculations::common::format_amount;
use plan_core::models::{AnswerValue, Field, NOT_ANSWERED, SupportType};
use plan_core::wizard::{Step, WizardState};
use thiserror::Error;

use crate::utils::{is_amount, parse_amount};

/// One parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Answer { field: Field, value: AnswerValue },
    Next,
    Back,
    Jump(i64),
    Reset,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a whole amount")]
    InvalidAmount(String),

    #[error("'{0}' is not a question number")]
    InvalidJump(String),

    #[error("unknown command '{0}'")]
    Unknown(String),
}

/// Parses one line typed while `step` is on screen.
pub fn parse_input(
    step: Step,
    line: &str,
) -> Result<Input, InputError> {
    let line = line.trim();
    let lower = line.to_ascii_lowercase();

    let mut words = lower.split_whitespace();
    let command = words.next().unwrap_or("");
    let argument = words.next();

    match (command, argument) {
        ("" | "next" | "n", None) => return Ok(Input::Next),
        ("back" | "b", None) => return Ok(Input::Back),
        ("reset", None) => return Ok(Input::Reset),
        ("quit" | "q" | "exit", None) => return Ok(Input::Quit),
        ("jump" | "j", Some(target)) => {
            return target
                .parse::<i64>()
                .map(Input::Jump)
                .map_err(|_| InputError::InvalidJump(target.to_string()));
        }
        _ => {}
    }

    if step == Step::Support {
        if let Some(support) = SupportType::parse(&lower) {
            return Ok(Input::Answer {
                field: Field::SupportType,
                value: AnswerValue::Support(support),
            });
        }
    }

    if is_amount(line) {
        let amount = parse_amount(line).map_err(|_| InputError::InvalidAmount(line.to_string()))?;
        return Ok(Input::Answer {
            field: step.amount_field(),
            value: AnswerValue::Integer(amount),
        });
    }

    Err(InputError::Unknown(line.to_string()))
}

fn current_value(
    state: &WizardState,
    field: Field,
) -> String {
    match state.answers().get(field).copied() {
        Some(AnswerValue::Integer(v)) if field == Field::Age => v.to_string(),
        Some(AnswerValue::Integer(v)) => format_amount(v),
        Some(AnswerValue::Support(s)) => s.label().to_string(),
        None => NOT_ANSWERED.to_string(),
    }
}

/// Writes the question for the current step.
pub fn render_step<W: Write>(
    out: &mut W,
    state: &WizardState,
) -> io::Result<()> {
    let step = state.step();

    writeln!(out)?;
    writeln!(
        out,
        "Question {} / {} ({}%)",
        state.current_step(),
        state.total_steps(),
        state.progress_percent()
    )?;
    writeln!(out, "== {} ==", step.title())?;
    writeln!(out, "{}", step.prompt())?;
    writeln!(out, "  {}", step.help())?;

    if step == Step::Support {
        let choices: Vec<String> = SupportType::all()
            .iter()
            .map(|s| format!("{} ({})", s.as_str(), s.label()))
            .collect();
        writeln!(out, "  Choices: {}", choices.join(", "))?;
        writeln!(out, "  Type a choice, then the monthly amount.")?;
    }

    for field in step.fields() {
        writeln!(out, "  Current {}: {}", field, current_value(state, *field))?;
    }

    let next = if state.is_last_step() {
        "next = run simulation"
    } else {
        "next"
    };
    let back = if state.is_first_step() { "" } else { ", back" };
    writeln!(out, "[{next}{back}, jump N, reset, quit]")?;
    write!(out, "> ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use plan_core::wizard::WizardController;
    use pretty_assertions::assert_eq;

    use super::*;

    // ===== navigation commands =====

    #[test]
    fn navigation_words_and_shortcuts() {
        assert_eq!(parse_input(Step::Age, "next"), Ok(Input::Next));
        assert_eq!(parse_input(Step::Age, "N"), Ok(Input::Next));
        assert_eq!(parse_input(Step::Age, ""), Ok(Input::Next));
        assert_eq!(parse_input(Step::Age, "  back "), Ok(Input::Back));
        assert_eq!(parse_input(Step::Age, "b"), Ok(Input::Back));
        assert_eq!(parse_input(Step::Age, "reset"), Ok(Input::Reset));
        assert_eq!(parse_input(Step::Age, "q"), Ok(Input::Quit));
    }

    #[test]
    fn jump_takes_any_integer() {
        assert_eq!(parse_input(Step::Age, "jump 3"), Ok(Input::Jump(3)));
        assert_eq!(parse_input(Step::Age, "j -1"), Ok(Input::Jump(-1)));
        assert_eq!(
            parse_input(Step::Age, "jump two"),
            Err(InputError::InvalidJump("two".to_string()))
        );
    }

    // ===== answers =====

    #[test]
    fn number_sets_current_step_field() {
        assert_eq!(
            parse_input(Step::MonthlyExpenses, "150,000円"),
            Ok(Input::Answer {
                field: Field::MonthlyExpenses,
                value: AnswerValue::Integer(150_000),
            })
        );
    }

    #[test]
    fn support_step_takes_type_word_and_amount() {
        assert_eq!(
            parse_input(Step::Support, "Pension"),
            Ok(Input::Answer {
                field: Field::SupportType,
                value: AnswerValue::Support(SupportType::Pension),
            })
        );
        assert_eq!(
            parse_input(Step::Support, "80000"),
            Ok(Input::Answer {
                field: Field::MonthlySupport,
                value: AnswerValue::Integer(80_000),
            })
        );
    }

    #[test]
    fn support_word_outside_support_step_is_unknown() {
        assert_eq!(
            parse_input(Step::Age, "pension"),
            Err(InputError::Unknown("pension".to_string()))
        );
    }

    #[test]
    fn negative_number_is_still_an_answer() {
        assert_eq!(
            parse_input(Step::TotalAssets, "-1"),
            Ok(Input::Answer {
                field: Field::TotalAssets,
                value: AnswerValue::Integer(-1),
            })
        );
    }

    #[test]
    fn overflowing_number_is_invalid_amount() {
        assert!(matches!(
            parse_input(Step::TotalAssets, "99999999999999999999"),
            Err(InputError::InvalidAmount(_))
        ));
    }

    // ===== rendering =====

    #[test]
    fn render_first_step() {
        let wizard = WizardController::new();
        let mut out = Vec::new();

        render_step(&mut out, wizard.state()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Question 1 / 4 (25%)"), "{text}");
        assert!(text.contains("== Your age =="), "{text}");
        assert!(text.contains("Current age: (not answered)"), "{text}");
        assert!(text.contains("[next, jump N, reset, quit]"), "{text}");
    }

    #[test]
    fn render_support_step_lists_choices_and_values() {
        let mut wizard = WizardController::new();
        wizard.jump_to(4).unwrap();
        wizard.set_answer(Field::SupportType, AnswerValue::Support(SupportType::Welfare));
        wizard.set_answer(Field::MonthlySupport, AnswerValue::Integer(70_000));
        let mut out = Vec::new();

        render_step(&mut out, wizard.state()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Question 4 / 4 (100%)"), "{text}");
        assert!(text.contains("pension (Disability pension)"), "{text}");
        assert!(text.contains("Current support_type: Public assistance (welfare)"), "{text}");
        assert!(text.contains("Current monthly_support: 70,000"), "{text}");
        assert!(text.contains("next = run simulation, back"), "{text}");
    }
}
