//! Pipeline façade
//!
//! `generate_reports` runs the whole chain — parse, match, classify,
//! format — as a pure function of the raw ledger text. `write_reports`
//! hands the rendered row sequences to a [`ReportSink`] under the report
//! naming scheme the filed CSVs use.

use crate::classifier;
use crate::error::EngineError;
use crate::ledger;
use crate::matcher;
use crate::report::{self, ReportSink};

/// Rendered report row sequences. A gain bucket with no entries produces
/// no report at all (`None`); the remainder report always exists, even
/// when only its header remains.
#[derive(Debug, Clone)]
pub struct GeneratedReports {
    pub short_term: Option<Vec<String>>,
    pub long_term: Option<Vec<String>>,
    pub remainder: Vec<String>,
}

/// Run the full pipeline over raw ledger text.
pub fn generate_reports(input: &str) -> Result<GeneratedReports, EngineError> {
    let parsed = ledger::parse_ledger(input);
    if parsed.skipped > 0 {
        tracing::info!("tolerated {} malformed ledger rows", parsed.skipped);
    }

    let outcome = matcher::match_lots(parsed)?;
    let classified = classifier::classify(outcome.gains);

    let short_term = match classified.short_term.as_slice() {
        [] => None,
        entries => Some(report::render_gain_report(entries)?),
    };
    let long_term = match classified.long_term.as_slice() {
        [] => None,
        entries => Some(report::render_gain_report(entries)?),
    };
    let remainder = report::render_remainder_report(&outcome.remainder);

    Ok(GeneratedReports {
        short_term,
        long_term,
        remainder,
    })
}

/// Persist the rendered reports through a sink. `dataset` names the run
/// (typically the input file stem) and determines the report names:
/// `f8949_{dataset}_longterm.csv`, `f8949_{dataset}_shortterm.csv`,
/// `{dataset}_remainder.csv`.
pub fn write_reports(
    reports: &GeneratedReports,
    dataset: &str,
    sink: &mut dyn ReportSink,
) -> Result<(), EngineError> {
    if let Some(lines) = &reports.long_term {
        sink.write_report(&format!("f8949_{}_longterm.csv", dataset), lines)?;
    }
    if let Some(lines) = &reports.short_term {
        sink.write_report(&format!("f8949_{}_shortterm.csv", dataset), lines)?;
    }
    sink.write_report(&format!("{}_remainder.csv", dataset), &reports.remainder)
}
