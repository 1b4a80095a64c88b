//! Settlement engine output types.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Net balance per participant name, in participant registration order.
///
/// Positive means the participant is owed money, negative means they owe.
pub type Balances = IndexMap<String, Decimal>;

/// A single transfer: `debtor` pays `creditor` the given `amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settlement {
    pub debtor: String,
    pub creditor: String,
    pub amount: Decimal,
}

impl Settlement {
    #[must_use]
    pub fn new(debtor: impl Into<String>, creditor: impl Into<String>, amount: Decimal) -> Self {
        Self {
            debtor: debtor.into(),
            creditor: creditor.into(),
            amount,
        }
    }
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pays {} {}", self.debtor, self.creditor, self.amount)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
pub fn balances_from_pairs(pairs: &[(&str, i64)]) -> Balances {
    pairs
        .iter()
        .map(|(name, amount)| ((*name).to_string(), Decimal::from(*amount)))
        .collect()
}
