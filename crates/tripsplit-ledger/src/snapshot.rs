//! JSON snapshot of a trip.
//!
//! Layout:
//! ```json
//! {
//!   "name": "My Trip",
//!   "participants": { "A": { "total_paid": "300", "total_share": "100" } },
//!   "expenses": [
//!     { "amount": "300", "payer": "A", "beneficiaries": ["A", "B", "C"],
//!       "description": "Hotel", "timestamp": "2024-03-01 18:30:00" }
//!   ]
//! }
//! ```
//!
//! Restoring replays every expense through the validated ledger path. The
//! replayed totals are authoritative; stored totals that drift from them
//! (e.g. after a rename collision discarded an entry) are logged.

use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tripsplit_types::{Result, TripConfig, TripsplitError, constants};

use crate::Ledger;

/// Stored aggregates of one participant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantTotals {
    pub total_paid: Decimal,
    pub total_share: Decimal,
}

/// Stored form of one expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub amount: Decimal,
    pub payer: String,
    pub beneficiaries: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(with = "timestamp_format")]
    pub timestamp: DateTime<Utc>,
}

/// Whole-trip snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TripSnapshot {
    #[serde(default = "default_trip_name")]
    pub name: String,
    pub participants: IndexMap<String, ParticipantTotals>,
    pub expenses: Vec<ExpenseRecord>,
}

fn default_trip_name() -> String {
    constants::DEFAULT_TRIP_NAME.to_string()
}

impl TripSnapshot {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`TripsplitError::Serialization`] if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TripsplitError::Serialization(e.to_string()))
    }

    /// # Errors
    /// Returns [`TripsplitError::Serialization`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TripsplitError::Serialization(e.to_string()))
    }

    /// Write the snapshot as pretty JSON to `path`.
    ///
    /// # Errors
    /// `Serialization` or `Io` on failure.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path.as_ref(), json)?;
        tracing::info!(
            path = %path.as_ref().display(),
            participants = self.participants.len(),
            expenses = self.expenses.len(),
            "Snapshot saved"
        );
        Ok(())
    }

    /// # Errors
    /// `Io` if the file cannot be read, `Serialization` if it is not a snapshot.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Compare the stored participant totals with `ledger`'s.
    ///
    /// # Errors
    /// Returns [`TripsplitError::SnapshotMismatch`] for the first participant
    /// whose paid or share total differs by more than `tolerance`.
    pub fn check_totals(&self, ledger: &Ledger, tolerance: Decimal) -> Result<()> {
        for (name, stored) in &self.participants {
            let Some(actual) = ledger.participant(name) else {
                continue;
            };
            let paid_drift = (actual.total_paid() - stored.total_paid).abs();
            let share_drift = (actual.total_share() - stored.total_share).abs();
            if paid_drift > tolerance || share_drift > tolerance {
                return Err(TripsplitError::SnapshotMismatch {
                    reason: format!(
                        "participant '{name}': stored paid={} share={}, recomputed paid={} share={}",
                        stored.total_paid,
                        stored.total_share,
                        actual.total_paid(),
                        actual.total_share(),
                    ),
                });
            }
        }
        Ok(())
    }
}

impl Ledger {
    /// Capture the current participants and expenses.
    #[must_use]
    pub fn snapshot(&self) -> TripSnapshot {
        TripSnapshot {
            name: self.name().to_string(),
            participants: self
                .participants()
                .map(|p| {
                    (
                        p.name().to_string(),
                        ParticipantTotals {
                            total_paid: p.total_paid(),
                            total_share: p.total_share(),
                        },
                    )
                })
                .collect(),
            expenses: self
                .expenses()
                .iter()
                .map(|e| ExpenseRecord {
                    amount: e.amount,
                    payer: e.payer.clone(),
                    beneficiaries: e.beneficiaries.clone(),
                    description: e.description.clone(),
                    timestamp: e.timestamp,
                })
                .collect(),
        }
    }

    /// Rebuild a ledger from a snapshot with the default configuration.
    ///
    /// # Errors
    /// See [`Ledger::from_snapshot_with_config`].
    pub fn from_snapshot(snapshot: TripSnapshot) -> Result<Self> {
        let config = TripConfig::named(snapshot.name.clone());
        Self::from_snapshot_with_config(snapshot, config)
    }

    /// Rebuild a ledger from a snapshot.
    ///
    /// Participants are registered in stored order and expenses replayed
    /// with their stored timestamps. Totals come from the replay; stored
    /// totals that disagree beyond the settlement tolerance are logged.
    ///
    /// # Errors
    /// Any validation error of [`Ledger::add_expense`] for a stored expense.
    pub fn from_snapshot_with_config(snapshot: TripSnapshot, config: TripConfig) -> Result<Self> {
        let tolerance = config.settlement.tolerance;
        let mut ledger = Self::with_config(config);

        for name in snapshot.participants.keys() {
            ledger.add_participant(name);
        }
        for record in &snapshot.expenses {
            ledger.add_expense_at(
                record.amount,
                &record.payer,
                record.beneficiaries.iter().map(String::as_str),
                &record.description,
                record.timestamp,
            )?;
        }

        if let Err(err) = snapshot.check_totals(&ledger, tolerance) {
            tracing::warn!(error = %err, "Stored totals differ from replay; using replayed totals");
        }

        tracing::info!(
            trip = ledger.name(),
            participants = ledger.participant_count(),
            expenses = ledger.expense_count(),
            "Snapshot restored"
        );
        Ok(ledger)
    }
}

/// Timestamps are stored as `YYYY-MM-DD HH:MM:SS` (UTC). RFC 3339 input
/// is accepted as well.
mod timestamp_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use tripsplit_types::constants::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT) {
            return Ok(naive.and_utc());
        }
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|err| D::Error::custom(format!("invalid timestamp '{raw}': {err}")))
    }
}
