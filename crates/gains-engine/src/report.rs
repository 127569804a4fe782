//! Report formatting
//!
//! Renders classified gain entries and open lots into Form 8949 style CSV
//! rows. The totals row is only emitted after re-checking the
//! `proceeds - cost basis == gain` identity on the exact stored values; a
//! mismatch means corrupted entries or a rounding bug and aborts the run.

use rust_decimal::Decimal;

use crate::error::EngineError;
use crate::ledger::LedgerEntry;
use crate::matcher::{round_currency, CapitalGainEntry};

pub const GAIN_REPORT_HEADER: &str = "DESCRIPTION OF PROPERTY,DATE ACQUIRED,DATE SOLD OR DISPOSED,PROCEEDS,COST OR OTHER BASIS,CODE(S) FROM INSTRUCTIONS,AMOUNT OF ADJUSTMENT,GAIN OR (LOSS)";
pub const REMAINDER_REPORT_HEADER: &str = "DESCRIPTION OF PROPERTY,DATE ACQUIRED,QUANTITY,UNIT PRICE";

const SEPARATOR_ROW: &str = ",,,,,,,,";

/// Persistence seam: receives a named sequence of report lines. The
/// engine renders reports in full before any sink sees them, so a failed
/// run never emits a partial report.
pub trait ReportSink {
    fn write_report(&mut self, name: &str, lines: &[String]) -> Result<(), EngineError>;
}

/// Render one gain bucket: header, one row per entry, separator, and the
/// validated TOTALS row.
pub fn render_gain_report(entries: &[CapitalGainEntry]) -> Result<Vec<String>, EngineError> {
    let mut lines = Vec::with_capacity(entries.len() + 3);
    lines.push(GAIN_REPORT_HEADER.to_string());

    for entry in entries {
        lines.push(gain_row(entry));
    }

    lines.push(SEPARATOR_ROW.to_string());
    lines.push(totals_row(entries)?);

    Ok(lines)
}

/// Render the open-lot report: header plus one row per unconsumed buy.
/// No totals row; nothing is aggregated here.
pub fn render_remainder_report(lots: &[LedgerEntry]) -> Vec<String> {
    let mut lines = Vec::with_capacity(lots.len() + 1);
    lines.push(REMAINDER_REPORT_HEADER.to_string());

    for lot in lots {
        lines.push(format!(
            "{},{},{},{}",
            lot.security,
            lot.date.format("%Y-%m-%d"),
            lot.quantity,
            lot.unit_price
        ));
    }

    lines
}

fn gain_row(entry: &CapitalGainEntry) -> String {
    format!(
        "{} {},{},{},{},{},,,{}",
        entry.quantity,
        entry.security,
        entry.acquisition_date.format("%Y-%m-%d"),
        entry.sale_date.format("%Y-%m-%d"),
        round_currency(entry.proceeds),
        round_currency(entry.cost_basis),
        gain_cell(entry.capital_gain)
    )
}

/// Accounting convention: losses render as a parenthesized magnitude.
fn gain_cell(capital_gain: Decimal) -> String {
    let rounded = round_currency(capital_gain);
    if rounded >= Decimal::ZERO {
        rounded.to_string()
    } else {
        format!("({})", -rounded)
    }
}

fn totals_row(entries: &[CapitalGainEntry]) -> Result<String, EngineError> {
    let mut proceeds = Decimal::ZERO;
    let mut cost_basis = Decimal::ZERO;
    let mut capital_gain = Decimal::ZERO;

    for entry in entries {
        proceeds += entry.proceeds;
        cost_basis += entry.cost_basis;
        capital_gain += entry.capital_gain;
    }

    if proceeds - cost_basis != capital_gain {
        return Err(EngineError::TotalsMismatch {
            proceeds,
            cost_basis,
            capital_gain,
        });
    }

    Ok(format!(
        "TOTALS,,,{},{},,,{}",
        round_currency(proceeds),
        round_currency(cost_basis),
        round_currency(capital_gain)
    ))
}
