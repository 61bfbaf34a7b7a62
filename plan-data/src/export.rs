use std::io::Write;

use plan_core::models::{SimulationResult, YearlyData};

/// Writes the yearly projection of a [`SimulationResult`] as CSV.
///
/// Columns: `year,age,balance,annual_income,annual_expenses,net_change`.
pub struct ProjectionExporter;

impl ProjectionExporter {
    /// Returns the number of data rows written.
    pub fn write<W: Write>(
        writer: W,
        result: &SimulationResult,
    ) -> Result<usize, csv::Error> {
        Self::write_rows(writer, &result.yearly_data)
    }

    pub fn write_rows<W: Write>(
        writer: W,
        rows: &[YearlyData],
    ) -> Result<usize, csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(rows.len())
    }
}
