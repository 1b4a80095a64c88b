//! Line-per-item text renderings.

use tripsplit_ledger::Ledger;
use tripsplit_types::{Balances, Settlement, TripConfig};

/// `"{n}. {timestamp} | {description} | Amount: {amount}, Payer: {payer}, Beneficiaries: {list}"`,
/// numbered from 1 in insertion order.
#[must_use]
pub fn expense_lines(ledger: &Ledger) -> Vec<String> {
    let config = ledger.config();
    ledger
        .expenses()
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                "{}. {} | {} | Amount: {}, Payer: {}, Beneficiaries: {}",
                i + 1,
                e.formatted_timestamp(),
                e.description,
                config.format_amount(e.amount),
                e.payer,
                e.beneficiary_list(),
            )
        })
        .collect()
}

/// `"{name}: {amount}"` per participant, in balance order.
#[must_use]
pub fn balance_lines(balances: &Balances, config: &TripConfig) -> Vec<String> {
    balances
        .iter()
        .map(|(name, balance)| format!("{name}: {}", config.format_amount(*balance)))
        .collect()
}

/// `"{debtor} pays {creditor} {amount}"` per settlement, in output order.
#[must_use]
pub fn settlement_lines(settlements: &[Settlement], config: &TripConfig) -> Vec<String> {
    settlements
        .iter()
        .map(|s| {
            format!(
                "{} pays {} {}",
                s.debtor,
                s.creditor,
                config.format_amount(s.amount)
            )
        })
        .collect()
}
