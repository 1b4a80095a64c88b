//! Expense records.
//!
//! An [`Expense`] is one transaction: a payer disbursed `amount` on behalf
//! of an ordered list of beneficiaries. Duplicate beneficiary names are
//! allowed and each occurrence receives its own share.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ExpenseId, constants};

/// A single shared expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expense {
    /// Stable identifier, survives edits.
    pub id: ExpenseId,
    /// Positive amount disbursed by the payer.
    pub amount: Decimal,
    /// Name of the paying participant.
    pub payer: String,
    /// Names sharing the cost, in entry order.
    pub beneficiaries: Vec<String>,
    /// Free text, may be empty.
    pub description: String,
    /// Creation time. Edits keep it.
    pub timestamp: DateTime<Utc>,
}

impl Expense {
    /// Create an expense stamped with the current time.
    #[must_use]
    pub fn new(
        amount: Decimal,
        payer: impl Into<String>,
        beneficiaries: Vec<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::with_timestamp(amount, payer, beneficiaries, description, Utc::now())
    }

    /// Create an expense with an explicit timestamp.
    #[must_use]
    pub fn with_timestamp(
        amount: Decimal,
        payer: impl Into<String>,
        beneficiaries: Vec<String>,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            payer: payer.into(),
            beneficiaries,
            description: description.into(),
            timestamp,
        }
    }

    /// Whether `name` is the payer or appears among the beneficiaries.
    #[must_use]
    pub fn involves(&self, name: &str) -> bool {
        self.payer == name || self.beneficiaries.iter().any(|b| b == name)
    }

    /// Rewrite every reference to `old_name`. Returns `true` if anything changed.
    pub fn rename_participant(&mut self, old_name: &str, new_name: &str) -> bool {
        let mut changed = false;
        if self.payer == old_name {
            self.payer = new_name.to_string();
            changed = true;
        }
        for beneficiary in &mut self.beneficiaries {
            if beneficiary == old_name {
                *beneficiary = new_name.to_string();
                changed = true;
            }
        }
        changed
    }

    /// Beneficiaries joined with `", "`.
    #[must_use]
    pub fn beneficiary_list(&self) -> String {
        self.beneficiaries.join(", ")
    }

    /// Timestamp rendered with [`constants::TIMESTAMP_FORMAT`].
    #[must_use]
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(constants::TIMESTAMP_FORMAT).to_string()
    }
}

impl std::fmt::Display for Expense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | Amount: {}, Payer: {}, Beneficiaries: {}",
            self.formatted_timestamp(),
            self.description,
            self.amount,
            self.payer,
            self.beneficiary_list(),
        )
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Expense {
    pub fn dummy(amount: i64, payer: &str, beneficiaries: &[&str]) -> Self {
        Self::new(
            Decimal::from(amount),
            payer,
            beneficiaries.iter().map(|b| (*b).to_string()).collect(),
            "",
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn involves_payer_and_beneficiaries() {
        let e = Expense::dummy(90, "A", &["B", "C"]);
        assert!(e.involves("A"));
        assert!(e.involves("B"));
        assert!(e.involves("C"));
        assert!(!e.involves("D"));
    }

    #[test]
    fn rename_rewrites_all_occurrences() {
        let mut e = Expense::dummy(30, "B", &["A", "B", "B"]);
        assert!(e.rename_participant("B", "Bee"));
        assert_eq!(e.payer, "Bee");
        assert_eq!(e.beneficiaries, vec!["A", "Bee", "Bee"]);
        assert!(!e.rename_participant("Z", "Zed"));
    }

    #[test]
    fn display_matches_report_layout() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 0).unwrap();
        let e = Expense::with_timestamp(
            Decimal::new(12050, 2),
            "A",
            vec!["A".into(), "B".into()],
            "Dinner",
            ts,
        );
        assert_eq!(
            e.to_string(),
            "2024-03-01 18:30:00 | Dinner | Amount: 120.50, Payer: A, Beneficiaries: A, B"
        );
    }

    #[test]
    fn expense_serde_roundtrip() {
        let e = Expense::dummy(300, "A", &["A", "B", "C"]);
        let json = serde_json::to_string(&e).unwrap();
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
