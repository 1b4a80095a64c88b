//! Greedy settlement optimizer.
//!
//! ## Algorithm
//!
//! 1. Quantize balances to the output scale (see [`crate::rounding`])
//! 2. Split participants into creditors (balance > 0) and debtors
//!    (balance < 0); zero balances are dropped
//! 3. While both sides are non-empty: pop the largest creditor and the
//!    largest debtor, emit `debtor → creditor` for the smaller of the two
//!    remaining amounts, and push back whichever side still has a balance
//!
//! Each round retires at least one participant, so the output has at most
//! `n - 1` settlements and the loop runs in `O(n log n)`.
//!
//! ## Determinism
//!
//! Ties on the remaining amount go to the participant registered first.
//! The same balances in the same order always produce the same settlements
//! in the same order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rust_decimal::Decimal;
use tripsplit_ledger::Ledger;
use tripsplit_types::{Balances, Settlement, SettlementConfig};

use crate::rounding::quantize_balances;

/// One side of the matching: a creditor or debtor with what is still open.
#[derive(Debug, PartialEq, Eq)]
struct Open<'a> {
    remaining: Decimal,
    position: usize,
    name: &'a str,
}

impl Ord for Open<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.remaining
            .cmp(&other.remaining)
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for Open<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Largest-first creditor/debtor matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementOptimizer {
    config: SettlementConfig,
}

impl SettlementOptimizer {
    #[must_use]
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Compute the settlements that zero out `balances`.
    ///
    /// Output order is the order the greedy loop produced them in.
    #[must_use]
    pub fn optimize(&self, balances: &Balances) -> Vec<Settlement> {
        let quantized = quantize_balances(balances, self.config.effective_scale());

        let mut creditors = BinaryHeap::new();
        let mut debtors = BinaryHeap::new();
        for (position, (name, balance)) in quantized.iter().enumerate() {
            let open = |remaining| Open {
                remaining,
                position,
                name: name.as_str(),
            };
            match balance.cmp(&Decimal::ZERO) {
                Ordering::Greater => creditors.push(open(*balance)),
                Ordering::Less => debtors.push(open(-*balance)),
                Ordering::Equal => {}
            }
        }

        let mut settlements = Vec::with_capacity(quantized.len().saturating_sub(1));
        while !creditors.is_empty() && !debtors.is_empty() {
            let (Some(mut creditor), Some(mut debtor)) = (creditors.pop(), debtors.pop()) else {
                break;
            };

            let amount = creditor.remaining.min(debtor.remaining);
            settlements.push(Settlement::new(debtor.name, creditor.name, amount));

            creditor.remaining -= amount;
            debtor.remaining -= amount;

            if !creditor.remaining.is_zero() {
                creditors.push(creditor);
            }
            if !debtor.remaining.is_zero() {
                debtors.push(debtor);
            }
        }

        if !creditors.is_empty() || !debtors.is_empty() {
            tracing::warn!(
                creditors = creditors.len(),
                debtors = debtors.len(),
                "Balances do not net to zero; some remain open"
            );
        }

        tracing::info!(
            participants = balances.len(),
            settlements = settlements.len(),
            "Settlement optimization complete"
        );
        settlements
    }
}

/// Settle `balances` with the default configuration.
#[must_use]
pub fn optimize_settlements(balances: &Balances) -> Vec<Settlement> {
    SettlementOptimizer::default().optimize(balances)
}

/// Settle the ledger's current balances with the ledger's own configuration.
#[must_use]
pub fn settle_ledger(ledger: &Ledger) -> Vec<Settlement> {
    SettlementOptimizer::new(ledger.config().settlement).optimize(&ledger.calculate_balances())
}
