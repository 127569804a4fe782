//! FIFO lot matching
//!
//! Realizes gains by pairing each sell, oldest first, against the
//! earliest still-open buy lot of the same security. Lots split on
//! partial fills and close for good at zero quantity. A sell that cannot
//! be covered by lots acquired on or before its sale date aborts the run:
//! silently pairing a sale with a later acquisition would produce a
//! negative holding period on the tax report.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::ledger::{LedgerEntry, ParsedLedger};

/// Fractional digits for currency amounts (cost basis, proceeds, gain).
pub const CURRENCY_SCALE: u32 = 2;

/// One realized matching event between a sell and a portion of a buy lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalGainEntry {
    pub security: String,
    pub acquisition_date: NaiveDate,
    pub sale_date: NaiveDate,
    pub quantity: Decimal,
    pub unit_buy_price: Decimal,
    pub unit_sell_price: Decimal,
    pub cost_basis: Decimal,
    pub proceeds: Decimal,
    pub capital_gain: Decimal,
}

/// Matching output: realized gain entries plus the buy lots left open.
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    pub gains: Vec<CapitalGainEntry>,
    pub remainder: Vec<LedgerEntry>,
}

/// Round a currency amount half away from zero to two fractional digits.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Match every sell against the buy lots under strict per-security FIFO.
///
/// Buy quantities are decremented in place as lots are consumed; running
/// quantities are never rounded mid-match. `cost_basis` and `proceeds`
/// are rounded to currency scale per entry, and `capital_gain` is their
/// exact difference, so `capital_gain == proceeds - cost_basis` holds for
/// every entry and every aggregation of entries.
pub fn match_lots(ledger: ParsedLedger) -> Result<MatchOutcome, EngineError> {
    let ParsedLedger {
        mut buys, sells, ..
    } = ledger;

    let mut gains = Vec::new();

    for sell in sells {
        let mut remaining = sell.quantity;

        for buy in buys.iter_mut() {
            if remaining <= Decimal::ZERO {
                break;
            }
            if buy.security != sell.security || buy.quantity <= Decimal::ZERO {
                continue;
            }
            // Buys are date-sorted, so the first same-security lot dated
            // after the sale means no eligible lot remains.
            if buy.date > sell.date {
                break;
            }

            let matched = remaining.min(buy.quantity);
            let cost_basis = round_currency(matched * buy.unit_price);
            let proceeds = round_currency(matched * sell.unit_price);

            gains.push(CapitalGainEntry {
                security: sell.security.clone(),
                acquisition_date: buy.date,
                sale_date: sell.date,
                quantity: matched,
                unit_buy_price: buy.unit_price,
                unit_sell_price: sell.unit_price,
                cost_basis,
                proceeds,
                capital_gain: proceeds - cost_basis,
            });

            buy.quantity -= matched;
            remaining -= matched;
        }

        if remaining > Decimal::ZERO {
            return Err(EngineError::UnmatchedSell {
                security: sell.security,
                date: sell.date,
                quantity: remaining,
            });
        }
    }

    let remainder: Vec<LedgerEntry> = buys
        .into_iter()
        .filter(|buy| buy.quantity > Decimal::ZERO)
        .collect();

    tracing::debug!(
        "matched {} gain entries, {} lots remain open",
        gains.len(),
        remainder.len()
    );

    Ok(MatchOutcome { gains, remainder })
}
