//! Ledger parsing
//!
//! Turns raw comma-separated ledger text into validated [`LedgerEntry`]
//! records, split into buy and sell lists. Rows that fail validation are
//! skipped rather than rejected; the skip count is surfaced on
//! [`ParsedLedger`] so callers can tell a clean run from a tolerated one.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fractional digits kept on parsed quantities.
pub const QUANTITY_SCALE: u32 = 8;
/// Fractional digits kept on parsed unit prices.
pub const PRICE_SCALE: u32 = 4;

/// One parsed ledger transaction. Quantity is a positive magnitude; the
/// buy/sell role is carried by which [`ParsedLedger`] list holds the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub security: String,
    pub date: NaiveDate,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// Parser output: buys and sells, each sorted ascending by date with
/// input order preserved on ties.
#[derive(Debug, Clone, Default)]
pub struct ParsedLedger {
    pub buys: Vec<LedgerEntry>,
    pub sells: Vec<LedgerEntry>,
    /// Rows dropped by the tolerance policy (too few fields, bad date,
    /// unparseable quantity or price).
    pub skipped: usize,
}

/// Parse raw ledger text.
///
/// Expected columns per row: `security,date,quantity,unitPrice` with the
/// date as `YYYY-MM-DD` and locale-invariant decimal numbers (exponential
/// notation accepted). No header row, no quoting. A negative quantity
/// marks a sell and is stored as a positive magnitude.
pub fn parse_ledger(input: &str) -> ParsedLedger {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input.as_bytes());

    let mut ledger = ParsedLedger::default();
    for (row, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(_) => {
                tracing::debug!("skipping unreadable ledger row {}", row);
                ledger.skipped += 1;
                continue;
            }
        };

        let security = record.get(0).unwrap_or("").to_string();
        let date = record
            .get(1)
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
        let quantity = record.get(2).and_then(parse_decimal);
        let unit_price = record.get(3).and_then(parse_decimal);

        let (date, quantity, unit_price) = match (date, quantity, unit_price) {
            (Some(date), Some(quantity), Some(unit_price)) => (date, quantity, unit_price),
            _ => {
                tracing::debug!("skipping malformed ledger row {}", row);
                ledger.skipped += 1;
                continue;
            }
        };

        let quantity =
            quantity.round_dp_with_strategy(QUANTITY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        let unit_price =
            unit_price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);

        let entry = LedgerEntry {
            security,
            date,
            quantity,
            unit_price,
        };

        if entry.quantity < Decimal::ZERO {
            ledger.sells.push(LedgerEntry {
                quantity: -entry.quantity,
                ..entry
            });
        } else {
            ledger.buys.push(entry);
        }
    }

    // Stable sorts: same-day entries keep their input order.
    ledger.buys.sort_by(|a, b| a.date.cmp(&b.date));
    ledger.sells.sort_by(|a, b| a.date.cmp(&b.date));

    ledger
}

fn parse_decimal(field: &str) -> Option<Decimal> {
    let field = field.trim();
    Decimal::from_str(field)
        .or_else(|_| Decimal::from_scientific(field))
        .ok()
}
