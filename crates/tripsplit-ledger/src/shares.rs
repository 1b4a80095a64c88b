//! Uniform expense splitting.
//!
//! Every occurrence of a beneficiary gets `amount / count`, truncated to
//! [`SHARE_SCALE`] places. The last occurrence absorbs the remainder so the
//! shares always sum to exactly `amount`. Reverting an expense replays the
//! same split, which keeps add-then-remove lossless.
//!
//! [`SHARE_SCALE`]: tripsplit_types::constants::SHARE_SCALE

use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use tripsplit_types::{Expense, Participant, Result, TripsplitError, constants::SHARE_SCALE};

/// Split `amount` into `count` uniform shares.
///
/// # Errors
/// Returns [`TripsplitError::EmptyBeneficiaries`] if `count` is zero.
pub fn split_shares(amount: Decimal, count: usize) -> Result<Vec<Decimal>> {
    if count == 0 {
        return Err(TripsplitError::EmptyBeneficiaries);
    }

    let share = (amount / Decimal::from(count))
        .round_dp_with_strategy(SHARE_SCALE, RoundingStrategy::ToZero);
    let mut shares = vec![share; count];
    let allocated = share * Decimal::from(count - 1);
    shares[count - 1] = amount - allocated;
    Ok(shares)
}

/// Aggregate effect of one expense on the participant registry.
pub(crate) struct ExpenseEffect<'a> {
    payer: &'a str,
    amount: Decimal,
    shares: Vec<(&'a str, Decimal)>,
}

impl<'a> ExpenseEffect<'a> {
    pub(crate) fn of(amount: Decimal, payer: &'a str, beneficiaries: &'a [String]) -> Result<Self> {
        let split = split_shares(amount, beneficiaries.len())?;
        let shares = beneficiaries
            .iter()
            .map(String::as_str)
            .zip(split)
            .collect();
        Ok(Self {
            payer,
            amount,
            shares,
        })
    }

    pub(crate) fn of_expense(expense: &'a Expense) -> Result<Self> {
        Self::of(expense.amount, &expense.payer, &expense.beneficiaries)
    }

    /// Credit the payer and charge each beneficiary occurrence.
    pub(crate) fn apply(&self, participants: &mut IndexMap<String, Participant>) {
        self.adjust(participants, Decimal::ONE);
    }

    /// Exact inverse of [`ExpenseEffect::apply`].
    pub(crate) fn revert(&self, participants: &mut IndexMap<String, Participant>) {
        self.adjust(participants, Decimal::NEGATIVE_ONE);
    }

    // Callers validate references first; a missing name here means the
    // registry and the expense records have diverged.
    fn adjust(&self, participants: &mut IndexMap<String, Participant>, sign: Decimal) {
        if let Some(payer) = participants.get_mut(self.payer) {
            payer.adjust_paid(self.amount * sign);
        } else {
            tracing::error!(payer = self.payer, "Payer missing from registry");
        }
        for (name, share) in &self.shares {
            if let Some(beneficiary) = participants.get_mut(*name) {
                beneficiary.adjust_share(*share * sign);
            } else {
                tracing::error!(beneficiary = *name, "Beneficiary missing from registry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_split() {
        let shares = split_shares(Decimal::new(300, 0), 3).unwrap();
        assert_eq!(shares, vec![Decimal::new(100, 0); 3]);
    }

    #[test]
    fn uneven_split_sums_exactly() {
        let amount = Decimal::new(100, 0);
        let shares = split_shares(amount, 3).unwrap();
        assert_eq!(shares.len(), 3);
        assert_eq!(shares.iter().copied().sum::<Decimal>(), amount);
        assert_eq!(shares[0], shares[1]);
        assert_eq!(shares[0], Decimal::new(333_333_333_333, 10));
        assert_eq!(shares[2], Decimal::new(333_333_333_334, 10));
    }

    #[test]
    fn single_beneficiary_takes_everything() {
        let shares = split_shares(Decimal::new(4599, 2), 1).unwrap();
        assert_eq!(shares, vec![Decimal::new(4599, 2)]);
    }

    #[test]
    fn zero_beneficiaries_rejected() {
        let err = split_shares(Decimal::ONE, 0).unwrap_err();
        assert_eq!(err, TripsplitError::EmptyBeneficiaries);
    }

    #[test]
    fn apply_then_revert_is_lossless() {
        let mut participants: IndexMap<String, Participant> = ["A", "B", "C"]
            .into_iter()
            .map(|n| (n.to_string(), Participant::new(n)))
            .collect();
        let beneficiaries = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let effect = ExpenseEffect::of(Decimal::new(1000, 1), "A", &beneficiaries).unwrap();

        effect.apply(&mut participants);
        assert_eq!(participants["A"].total_paid(), Decimal::new(100, 0));
        assert!(!participants["B"].total_share().is_zero());

        effect.revert(&mut participants);
        assert!(participants.values().all(Participant::is_idle));
    }

    #[test]
    fn duplicate_beneficiary_gets_two_shares() {
        let mut participants: IndexMap<String, Participant> = ["A", "B"]
            .into_iter()
            .map(|n| (n.to_string(), Participant::new(n)))
            .collect();
        let beneficiaries = vec!["B".to_string(), "B".to_string(), "A".to_string()];
        let effect = ExpenseEffect::of(Decimal::new(90, 0), "A", &beneficiaries).unwrap();
        effect.apply(&mut participants);
        assert_eq!(participants["B"].total_share(), Decimal::new(60, 0));
        assert_eq!(participants["A"].total_share(), Decimal::new(30, 0));
    }
}
