//! Text rendering of a simulation result.

use std::io::{self, Write};

use plan_core::calculations::common::format_amount;
use plan_core::models::SimulationResult;

fn yen(value: i64) -> String {
    format!("{}円", format_amount(value))
}

pub fn render_result<W: Write>(
    out: &mut W,
    result: &SimulationResult,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "===== Simulation result =====")?;
    writeln!(out, "{}", result.input)?;
    writeln!(out)?;

    match (
        result.depletion_year,
        result.depletion_age,
        result.years_until_depletion,
    ) {
        (Some(year), Some(age), Some(years)) => writeln!(
            out,
            "Assets run out in {year} (age {age}), about {years} years from now."
        )?,
        _ => writeln!(
            out,
            "Assets last all {} simulated years.",
            result.total_years_simulated
        )?,
    }
    writeln!(out)?;

    writeln!(
        out,
        "{:>6} {:>5} {:>18} {:>14} {:>14} {:>15}",
        "Year", "Age", "Balance", "Income", "Expenses", "Net"
    )?;
    for row in &result.yearly_data {
        writeln!(
            out,
            "{:>6} {:>5} {:>18} {:>14} {:>14} {:>15}",
            row.year,
            row.age,
            yen(row.balance),
            yen(row.annual_income),
            yen(row.annual_expenses),
            yen(row.net_change)
        )?;
    }
    writeln!(out)?;

    let summary = &result.summary;
    writeln!(out, "Total income:            {}", yen(summary.total_income))?;
    writeln!(out, "Total expenses:          {}", yen(summary.total_expenses))?;
    writeln!(out, "Net balance:             {}", yen(summary.net_balance))?;
    writeln!(
        out,
        "Average monthly balance: {}",
        yen(summary.average_monthly_balance)
    )?;

    if let Some(analysis) = &result.analysis {
        writeln!(out)?;
        if !analysis.risk_factors.is_empty() {
            writeln!(out, "Risks:")?;
            for risk in &analysis.risk_factors {
                writeln!(out, "  - {risk}")?;
            }
        }
        if !analysis.suggestions.is_empty() {
            writeln!(out, "Suggestions:")?;
            for suggestion in &analysis.suggestions {
                writeln!(out, "  - {suggestion}")?;
            }
        }
        writeln!(out, "{}", analysis.advice_message)?;
    }

    Ok(())
}
