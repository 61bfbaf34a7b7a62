//! CSV answer sheets for pre-filling the questionnaire.
//!
//! ## CSV Format
//!
//! Two columns matched by header name, one answer per row. Later rows
//! override earlier rows for the same field.
//!
//! | Column  | Type   | Notes |
//! |---------|--------|-------|
//! | `field` | string | `age`, `monthly_expenses`, `total_assets`, `support_type`, `monthly_support` |
//! | `value` | string | whole number, or `none` / `pension` / `welfare` / `other` for `support_type` |
//!
//! ```csv
//! field,value
//! age,45
//! monthly_expenses,150000
//! total_assets,5000000
//! support_type,pension
//! monthly_support,80000
//! ```

use std::io::Read;

use plan_core::models::{AnswerValue, Field, FieldParseError};
use plan_core::wizard::WizardController;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    field: String,
    value: String,
}

/// Errors that can occur while reading an answer sheet.
#[derive(Debug, Error)]
pub enum AnswerSheetError {
    /// Bad structure, missing column, wrong column count.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A cell could not be turned into an answer. `row` is 1-based
    /// (header = row 0).
    #[error("row {row}: {source}")]
    InvalidAnswer {
        row: usize,
        #[source]
        source: FieldParseError,
    },
}

/// One parsed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub field: Field,
    pub value: AnswerValue,
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<AnswerRecord, AnswerSheetError> {
    let invalid = |source| AnswerSheetError::InvalidAnswer {
        row: row_number,
        source,
    };

    let field = row.field.parse::<Field>().map_err(invalid)?;
    let value = AnswerValue::parse_for(field, &row.value).map_err(invalid)?;

    Ok(AnswerRecord { field, value })
}

pub struct AnswerSheetLoader;

impl AnswerSheetLoader {
    /// Parse answer records from any reader, in file order.
    ///
    /// # Errors
    ///
    /// * [`AnswerSheetError::Parse`] if the CSV is structurally invalid.
    /// * [`AnswerSheetError::InvalidAnswer`] for an unknown field name or
    ///   a value of the wrong type.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<AnswerRecord>, AnswerSheetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);

        csv_reader
            .deserialize::<CsvRow>()
            .enumerate()
            .map(|(idx, result)| convert_row(result?, idx + 1))
            .collect()
    }

    /// Feed every record to `controller` as a `set_answer` call.
    ///
    /// Values are stored even when out of range; the controller reports
    /// them through `is_valid`. Returns the number of answers applied.
    pub fn apply(
        controller: &mut WizardController,
        records: &[AnswerRecord],
    ) -> usize {
        for record in records {
            controller.set_answer(record.field, record.value);
        }
        debug!(count = records.len(), "answer sheet applied");
        records.len()
    }
}

#[cfg(test)]
mod tests {
    use plan_core::models::SupportType;
    use pretty_assertions::assert_eq;

    use super::*;

    const FULL_SHEET: &str = "\
field,value
age,45
monthly_expenses,150000
total_assets,5000000
support_type,pension
monthly_support,80000
";

    // =========================================================================
    // parse
    // =========================================================================

    #[test]
    fn parse_full_sheet_in_file_order() {
        let records = AnswerSheetLoader::parse(FULL_SHEET.as_bytes()).expect("valid sheet");

        assert_eq!(
            records,
            vec![
                AnswerRecord {
                    field: Field::Age,
                    value: AnswerValue::Integer(45),
                },
                AnswerRecord {
                    field: Field::MonthlyExpenses,
                    value: AnswerValue::Integer(150_000),
                },
                AnswerRecord {
                    field: Field::TotalAssets,
                    value: AnswerValue::Integer(5_000_000),
                },
                AnswerRecord {
                    field: Field::SupportType,
                    value: AnswerValue::Support(SupportType::Pension),
                },
                AnswerRecord {
                    field: Field::MonthlySupport,
                    value: AnswerValue::Integer(80_000),
                },
            ]
        );
    }

    #[test]
    fn parse_tolerates_whitespace() {
        let csv = "field , value\n  age ,  30  \n";

        let records = AnswerSheetLoader::parse(csv.as_bytes()).expect("valid sheet");

        assert_eq!(records[0].value, AnswerValue::Integer(30));
    }

    #[test]
    fn parse_header_only_is_empty() {
        let records = AnswerSheetLoader::parse("field,value\n".as_bytes()).expect("valid sheet");

        assert!(records.is_empty());
    }

    #[test]
    fn parse_rejects_unknown_field_with_row_number() {
        let csv = "field,value\nage,30\nincome,1000\n";

        let err = AnswerSheetLoader::parse(csv.as_bytes()).expect_err("unknown field");

        match err {
            AnswerSheetError::InvalidAnswer { row, source } => {
                assert_eq!(row, 2);
                assert_eq!(source, FieldParseError::UnknownField("income".to_string()));
            }
            other => panic!("expected InvalidAnswer, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_non_integer_amount() {
        let csv = "field,value\ntotal_assets,lots\n";

        let err = AnswerSheetLoader::parse(csv.as_bytes()).expect_err("bad amount");

        assert!(
            matches!(
                err,
                AnswerSheetError::InvalidAnswer {
                    row: 1,
                    source: FieldParseError::InvalidInteger { field: Field::TotalAssets, .. }
                }
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn parse_rejects_missing_column() {
        let csv = "field\nage\n";

        let err = AnswerSheetLoader::parse(csv.as_bytes()).expect_err("missing column");

        assert!(matches!(err, AnswerSheetError::Parse(_)), "got {err:?}");
    }

    // =========================================================================
    // apply
    // =========================================================================

    #[test]
    fn apply_fills_controller_and_revalidates() {
        let records = AnswerSheetLoader::parse(FULL_SHEET.as_bytes()).expect("valid sheet");
        let mut wizard = WizardController::new();

        let applied = AnswerSheetLoader::apply(&mut wizard, &records);

        assert_eq!(applied, 5);
        assert_eq!(wizard.state().current_step(), 1);
        assert!(wizard.state().is_valid());
        assert_eq!(wizard.state().answers().len(), 5);
    }

    #[test]
    fn apply_stores_out_of_range_values() {
        let records = AnswerSheetLoader::parse("field,value\nage,130\n".as_bytes()).unwrap();
        let mut wizard = WizardController::new();

        AnswerSheetLoader::apply(&mut wizard, &records);

        assert!(!wizard.state().is_valid());
        assert_eq!(wizard.state().answers().integer(Field::Age), Some(130));
    }
}
