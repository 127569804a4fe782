//! Capital Gains Engine
//!
//! FIFO lot matching and Form 8949 report generation from a flat
//! securities ledger. The pipeline is a pure function of its input:
//! raw ledger text in, named CSV row sequences out. Persistence lives
//! behind the [`ReportSink`] trait.

pub mod classifier;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod matcher;
pub mod report;

pub use classifier::{classify, is_long_term, ClassifiedGains};
pub use engine::{generate_reports, write_reports, GeneratedReports};
pub use error::EngineError;
pub use ledger::{parse_ledger, LedgerEntry, ParsedLedger};
pub use matcher::{match_lots, CapitalGainEntry, MatchOutcome};
pub use report::{
    render_gain_report, render_remainder_report, ReportSink, GAIN_REPORT_HEADER,
    REMAINDER_REPORT_HEADER,
};
