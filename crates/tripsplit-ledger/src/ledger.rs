//! The trip ledger.
//!
//! Owns every [`Participant`] and [`Expense`] of one trip. Each mutation
//! either fully applies its aggregate effects or returns an error before
//! touching any state.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use tripsplit_types::{
    Balances, Expense, ExpenseId, Participant, Result, TripConfig, TripsplitError,
};

use crate::conservation::Conservation;
use crate::shares::ExpenseEffect;

/// Participant registry plus ordered expense records for a single trip.
///
/// Participants keep their registration order; expenses keep insertion
/// order and are addressed by index for edit/remove.
#[derive(Debug, Clone)]
pub struct Ledger {
    config: TripConfig,
    participants: IndexMap<String, Participant>,
    expenses: Vec<Expense>,
}

impl Ledger {
    /// Create an empty ledger for a trip with the default configuration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(TripConfig::named(name))
    }

    #[must_use]
    pub fn with_config(config: TripConfig) -> Self {
        Self {
            config,
            participants: IndexMap::new(),
            expenses: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn config(&self) -> &TripConfig {
        &self.config
    }

    // -----------------------------------------------------------------
    // Participants
    // -----------------------------------------------------------------

    /// Register a participant. Registering an existing name is a no-op.
    pub fn add_participant(&mut self, name: &str) {
        if self.participants.contains_key(name) {
            tracing::debug!(participant = name, "Participant already registered");
            return;
        }
        self.participants
            .insert(name.to_string(), Participant::new(name));
        tracing::debug!(participant = name, "Participant registered");
    }

    /// Rename a participant and rewrite every expense reference to it.
    ///
    /// The participant keeps its aggregates and registration position.
    /// If `new_name` already belongs to a different participant, that
    /// entry is overwritten in place and its aggregates are discarded.
    ///
    /// # Errors
    /// Returns [`TripsplitError::ParticipantNotFound`] if `old_name` is not registered.
    pub fn edit_participant(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        let Some((index, _, mut participant)) = self.participants.shift_remove_full(old_name)
        else {
            return Err(TripsplitError::ParticipantNotFound(old_name.to_string()));
        };

        participant.rename(new_name);
        if let Some(overwritten) = self.participants.insert(new_name.to_string(), participant) {
            tracing::warn!(
                from = old_name,
                to = new_name,
                discarded_paid = %overwritten.total_paid(),
                discarded_share = %overwritten.total_share(),
                "Rename collided with an existing participant; entry overwritten"
            );
        } else {
            let last = self.participants.len() - 1;
            self.participants.move_index(last, index);
        }

        let rewritten = self
            .expenses
            .iter_mut()
            .map(|expense| expense.rename_participant(old_name, new_name))
            .filter(|changed| *changed)
            .count();

        tracing::debug!(
            from = old_name,
            to = new_name,
            expenses = rewritten,
            "Participant renamed"
        );
        Ok(())
    }

    /// Remove a participant together with every expense they are part of.
    ///
    /// The aggregate effects of the dropped expenses are reverted for the
    /// remaining participants, so conservation holds afterwards.
    ///
    /// # Errors
    /// Returns [`TripsplitError::ParticipantNotFound`] if `name` is not registered.
    pub fn remove_participant(&mut self, name: &str) -> Result<()> {
        if !self.participants.contains_key(name) {
            return Err(TripsplitError::ParticipantNotFound(name.to_string()));
        }

        let effects = self
            .expenses
            .iter()
            .filter(|expense| expense.involves(name))
            .map(ExpenseEffect::of_expense)
            .collect::<Result<Vec<_>>>()?;
        let dropped = effects.len();
        for effect in effects {
            effect.revert(&mut self.participants);
        }
        self.expenses.retain(|expense| !expense.involves(name));

        let removed = self.participants.shift_remove(name);
        if let Some(removed) = removed.filter(|p| !p.is_idle()) {
            tracing::warn!(
                participant = name,
                residual_paid = %removed.total_paid(),
                residual_share = %removed.total_share(),
                "Removed participant still carried aggregates"
            );
        }

        if dropped == 0 {
            tracing::debug!(participant = name, "Participant removed");
        } else {
            tracing::info!(
                participant = name,
                cascaded_expenses = dropped,
                "Participant removed; expenses involving them were deleted"
            );
        }
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.participants.contains_key(name)
    }

    #[must_use]
    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.get(name)
    }

    /// Participants in registration order.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    /// Participant names in registration order.
    #[must_use]
    pub fn participant_names(&self) -> Vec<String> {
        self.participants.keys().cloned().collect()
    }

    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    // -----------------------------------------------------------------
    // Expenses
    // -----------------------------------------------------------------

    /// Record an expense stamped with the current time.
    ///
    /// # Errors
    /// - `UnknownPayer` / `UnknownBeneficiary` if a name is not registered
    /// - `EmptyBeneficiaries` if no beneficiary is given
    /// - `NonPositiveAmount` if `amount <= 0`
    pub fn add_expense<I, S>(
        &mut self,
        amount: Decimal,
        payer: &str,
        beneficiaries: I,
        description: &str,
    ) -> Result<ExpenseId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_expense_at(amount, payer, beneficiaries, description, Utc::now())
    }

    /// Record an expense with an explicit timestamp.
    ///
    /// # Errors
    /// Same as [`Ledger::add_expense`].
    pub fn add_expense_at<I, S>(
        &mut self,
        amount: Decimal,
        payer: &str,
        beneficiaries: I,
        description: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<ExpenseId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let beneficiaries: Vec<String> = beneficiaries.into_iter().map(Into::into).collect();
        self.validate_expense(amount, payer, &beneficiaries, Decimal::ZERO)?;

        let expense =
            Expense::with_timestamp(amount, payer, beneficiaries, description, timestamp);
        ExpenseEffect::of_expense(&expense)?.apply(&mut self.participants);

        let id = expense.id;
        tracing::debug!(
            expense = %id.short(),
            amount = %expense.amount,
            payer = %expense.payer,
            beneficiaries = expense.beneficiaries.len(),
            "Expense added"
        );
        self.expenses.push(expense);
        Ok(id)
    }

    /// Replace the expense at `index`, keeping its id and timestamp.
    ///
    /// The new values are validated before anything changes; on success
    /// the old effects are reverted and the new ones applied.
    ///
    /// # Errors
    /// - `ExpenseIndexOutOfRange` if `index >= expense_count()`
    /// - any validation error of [`Ledger::add_expense`]
    pub fn edit_expense<I, S>(
        &mut self,
        index: usize,
        amount: Decimal,
        payer: &str,
        beneficiaries: I,
        description: &str,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check_index(index)?;
        let beneficiaries: Vec<String> = beneficiaries.into_iter().map(Into::into).collect();
        self.validate_expense(amount, payer, &beneficiaries, self.expenses[index].amount)?;

        let incoming = ExpenseEffect::of(amount, payer, &beneficiaries)?;
        let expense = &mut self.expenses[index];
        ExpenseEffect::of_expense(expense)?.revert(&mut self.participants);
        incoming.apply(&mut self.participants);

        expense.amount = amount;
        expense.payer = payer.to_string();
        expense.beneficiaries = beneficiaries;
        expense.description = description.to_string();

        tracing::debug!(
            index,
            expense = %expense.id.short(),
            amount = %expense.amount,
            payer = %expense.payer,
            "Expense edited"
        );
        Ok(())
    }

    /// Remove the expense at `index` and revert its aggregate effects.
    ///
    /// # Errors
    /// Returns `ExpenseIndexOutOfRange` if `index >= expense_count()`.
    pub fn remove_expense(&mut self, index: usize) -> Result<Expense> {
        self.check_index(index)?;
        ExpenseEffect::of_expense(&self.expenses[index])?.revert(&mut self.participants);
        let expense = self.expenses.remove(index);

        tracing::debug!(index, expense = %expense.id.short(), "Expense removed");
        Ok(expense)
    }

    /// Expense records in insertion order.
    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    #[must_use]
    pub fn expense(&self, index: usize) -> Option<&Expense> {
        self.expenses.get(index)
    }

    #[must_use]
    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    // -----------------------------------------------------------------
    // Aggregates
    // -----------------------------------------------------------------

    /// Net balance (`total_paid - total_share`) per participant, in
    /// registration order.
    #[must_use]
    pub fn calculate_balances(&self) -> Balances {
        self.participants
            .iter()
            .map(|(name, participant)| (name.clone(), participant.balance()))
            .collect()
    }

    /// Sum of all expense amounts.
    #[must_use]
    pub fn total_expenses(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Sum of `total_paid` across participants.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.participants.values().map(Participant::total_paid).sum()
    }

    /// Sum of `total_share` across participants.
    #[must_use]
    pub fn total_share(&self) -> Decimal {
        self.participants
            .values()
            .map(Participant::total_share)
            .sum()
    }

    /// Check `Σ paid == Σ share == Σ amount`.
    ///
    /// # Errors
    /// Returns [`TripsplitError::ConservationViolation`] if the aggregates drifted.
    pub fn verify_conservation(&self) -> Result<()> {
        Conservation::from_ledger(self).verify()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.expenses.len() {
            Ok(())
        } else {
            Err(TripsplitError::ExpenseIndexOutOfRange {
                index,
                len: self.expenses.len(),
            })
        }
    }

    /// `replaced` is the amount of the expense being overwritten, zero for
    /// a new one.
    fn validate_expense(
        &self,
        amount: Decimal,
        payer: &str,
        beneficiaries: &[String],
        replaced: Decimal,
    ) -> Result<()> {
        if !self.participants.contains_key(payer) {
            return Err(TripsplitError::UnknownPayer(payer.to_string()));
        }
        if let Some(unknown) = beneficiaries
            .iter()
            .find(|name| !self.participants.contains_key(name.as_str()))
        {
            return Err(TripsplitError::UnknownBeneficiary(unknown.clone()));
        }
        if beneficiaries.is_empty() {
            return Err(TripsplitError::EmptyBeneficiaries);
        }
        if amount <= Decimal::ZERO {
            return Err(TripsplitError::NonPositiveAmount(amount));
        }
        // Every per-participant paid and share total is bounded by the
        // trip total, so checking the trip total covers them all.
        if (self.total_expenses() - replaced)
            .checked_add(amount)
            .is_none()
        {
            return Err(TripsplitError::AmountOverflow(amount));
        }
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::with_config(TripConfig::default())
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Ledger {
    /// A ledger with the given participants registered in order.
    pub fn with_participants(names: &[&str]) -> Self {
        let mut ledger = Self::default();
        for name in names {
            ledger.add_participant(name);
        }
        ledger
    }
}
