//! Conservation invariant checker.
//!
//! Every expense credits its payer with `amount` and spreads exactly
//! `amount` across its beneficiaries, so at all times:
//! ```text
//! Σ total_paid == Σ total_share == Σ expense.amount
//! ```
//! A violation means the aggregates and the expense records have diverged.

use rust_decimal::Decimal;
use tripsplit_types::{Result, TripsplitError};

use crate::Ledger;

/// Totals gathered from a ledger for the conservation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conservation {
    /// Σ amount over all expense records.
    pub expenses: Decimal,
    /// Σ `total_paid` over all participants.
    pub paid: Decimal,
    /// Σ `total_share` over all participants.
    pub share: Decimal,
}

impl Conservation {
    #[must_use]
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            expenses: ledger.total_expenses(),
            paid: ledger.total_paid(),
            share: ledger.total_share(),
        }
    }

    /// Net of all balances (`Σ paid - Σ share`). Zero when conserved.
    #[must_use]
    pub fn net_balance(&self) -> Decimal {
        self.paid - self.share
    }

    /// Verify both aggregate sums match the recorded expense total.
    ///
    /// # Errors
    /// Returns [`TripsplitError::ConservationViolation`] on any mismatch.
    pub fn verify(&self) -> Result<()> {
        if self.paid != self.expenses || self.share != self.expenses {
            return Err(TripsplitError::ConservationViolation {
                reason: format!(
                    "expenses={} paid={} share={}",
                    self.expenses, self.paid, self.share
                ),
            });
        }
        Ok(())
    }
}
