//! End-to-end: answer sheet -> wizard -> local simulator -> CSV export.

use plan_core::models::{SimulationOptions, SimulationRequest, SupportType};
use plan_core::simulator::{LocalSimulator, Simulator};
use plan_core::wizard::{WizardController, WizardError};
use plan_data::{AnswerSheetLoader, ProjectionExporter};
use pretty_assertions::assert_eq;

const ANSWERS_CSV: &str = include_str!("../test-data/answers.csv");

fn wizard_from(csv: &str) -> WizardController {
    let records = AnswerSheetLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");
    let mut wizard = WizardController::new();
    AnswerSheetLoader::apply(&mut wizard, &records);
    wizard
}

#[test]
fn test_fixture_completes_the_questionnaire() {
    let wizard = wizard_from(ANSWERS_CSV);

    let input = wizard.hand_off().expect("fixture should be complete");

    assert_eq!(input.age, 45);
    assert_eq!(input.monthly_expenses, 150_000);
    assert_eq!(input.total_assets, 10_000_000);
    assert_eq!(input.support_type, SupportType::Pension);
    assert_eq!(input.monthly_support, 60_000);
}

#[test]
fn test_partial_sheet_reports_first_missing_step() {
    let wizard = wizard_from("field,value\nage,45\ntotal_assets,100\n");

    assert_eq!(wizard.hand_off(), Err(WizardError::Incomplete { step: 2 }));
}

#[test]
fn test_support_amount_without_type_is_dropped() {
    let wizard = wizard_from("field,value\nage,45\nmonthly_expenses,1\ntotal_assets,1\nmonthly_support,90000\n");

    let input = wizard.hand_off().unwrap();

    assert_eq!(input.support_type, SupportType::None);
    assert_eq!(input.monthly_support, 0);
}

#[tokio::test]
async fn test_simulate_and_export_fixture() {
    let input = wizard_from(ANSWERS_CSV).hand_off().unwrap();
    let request = SimulationRequest::new(input).with_options(SimulationOptions {
        simulation_years: 12,
        include_analysis: false,
    });

    let result = LocalSimulator::with_base_year(2025)
        .simulate(&request)
        .await
        .expect("simulation should succeed");

    // -1,080,000 per year against 10,000,000
    assert_eq!(result.depletion_year, Some(2034));
    assert_eq!(result.depletion_age, Some(54));
    assert_eq!(result.years_until_depletion, Some(9));

    let mut out = Vec::new();
    let written = ProjectionExporter::write(&mut out, &result).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(written, 12);
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], "year,age,balance,annual_income,annual_expenses,net_change");
    assert_eq!(lines[1], "2025,45,8920000,720000,1800000,-1080000");
    assert_eq!(lines[10], "2034,54,0,720000,1800000,-1080000");
}
