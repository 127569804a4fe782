use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A sell could not be fully matched from lots acquired on or before
    /// the sale date. `quantity` is the unmatched remainder.
    #[error("a sell of {quantity} units of {security} on {date} was found without any quantity left from before the transaction date")]
    UnmatchedSell {
        security: String,
        date: NaiveDate,
        quantity: Decimal,
    },

    /// The aggregated report totals no longer satisfy
    /// `proceeds - cost_basis == capital_gain`. Indicates corrupted
    /// entries or a rounding bug, never bad input.
    #[error("report totals are inconsistent: proceeds {proceeds} - cost basis {cost_basis} != gain {capital_gain}")]
    TotalsMismatch {
        proceeds: Decimal,
        cost_basis: Decimal,
        capital_gain: Decimal,
    },

    /// The report sink failed to persist a rendered report.
    #[error("report sink error: {0}")]
    Sink(String),
}
