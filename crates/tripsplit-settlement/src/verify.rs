//! Settlement verification.
//!
//! A debtor paying a creditor raises the debtor's balance and lowers the
//! creditor's by the same amount. Applying a complete settlement list to
//! the balances it was computed from must leave everyone at (about) zero.

use rust_decimal::Decimal;
use tripsplit_types::{Balances, Result, Settlement, TripsplitError};

/// Balances after every settlement has been paid.
#[must_use]
pub fn apply_settlements(balances: &Balances, settlements: &[Settlement]) -> Balances {
    let mut after = balances.clone();
    for settlement in settlements {
        *after
            .entry(settlement.debtor.clone())
            .or_insert(Decimal::ZERO) += settlement.amount;
        *after
            .entry(settlement.creditor.clone())
            .or_insert(Decimal::ZERO) -= settlement.amount;
    }
    after
}

/// Check that `settlements` leave no balance above `tolerance` in magnitude.
///
/// # Errors
/// Returns [`TripsplitError::UnsettledBalance`] for the first participant
/// (in balance order) whose residual exceeds `tolerance`.
pub fn verify_settled(
    balances: &Balances,
    settlements: &[Settlement],
    tolerance: Decimal,
) -> Result<()> {
    let after = apply_settlements(balances, settlements);
    if let Some((name, residual)) = after.iter().find(|(_, b)| b.abs() > tolerance) {
        return Err(TripsplitError::UnsettledBalance {
            name: name.clone(),
            residual: *residual,
        });
    }
    Ok(())
}
