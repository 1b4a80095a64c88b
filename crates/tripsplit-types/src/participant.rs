//! Participant aggregates.
//!
//! A participant carries two running totals: what they paid out as a
//! payer and what they owe as a beneficiary. Both start at zero and are
//! only moved by the ledger while applying or reverting expense effects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A registered trip participant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    name: String,
    total_paid: Decimal,
    total_share: Decimal,
}

impl Participant {
    /// Create a participant with zero aggregates.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_paid: Decimal::ZERO,
            total_share: Decimal::ZERO,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cumulative amount disbursed as payer.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.total_paid
    }

    /// Cumulative amount owed as beneficiary.
    #[must_use]
    pub fn total_share(&self) -> Decimal {
        self.total_share
    }

    /// Net position: paid minus share. Positive means the group owes them.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.total_paid - self.total_share
    }

    /// Whether both aggregates are zero.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.total_paid.is_zero() && self.total_share.is_zero()
    }

    pub fn rename(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
    }

    /// Add (or with a negative delta, remove) a payment made by this participant.
    pub fn adjust_paid(&mut self, delta: Decimal) {
        self.total_paid += delta;
    }

    /// Add (or with a negative delta, remove) a share owed by this participant.
    pub fn adjust_share(&mut self, delta: Decimal) {
        self.total_share += delta;
    }
}
