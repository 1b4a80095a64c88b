//! Error types for the Tripsplit ledger.
//!
//! All errors use the `TS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Participant errors
//! - 2xx: Expense errors
//! - 3xx: Settlement / integrity errors
//! - 9xx: General / I/O errors

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Central error enum for all Tripsplit operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TripsplitError {
    // =================================================================
    // Participant Errors (1xx)
    // =================================================================
    /// The named participant is not registered in the ledger.
    #[error("TS_ERR_100: Participant '{0}' does not exist")]
    ParticipantNotFound(String),

    /// A participant name was blank after trimming.
    #[error("TS_ERR_101: Participant name cannot be empty")]
    EmptyParticipantName,

    // =================================================================
    // Expense Errors (2xx)
    // =================================================================
    /// The payer of an expense is not a registered participant.
    #[error("TS_ERR_200: Payer '{0}' is not a participant")]
    UnknownPayer(String),

    /// A beneficiary of an expense is not a registered participant.
    #[error("TS_ERR_201: Beneficiary '{0}' is not a participant")]
    UnknownBeneficiary(String),

    /// An expense must be shared by at least one beneficiary.
    #[error("TS_ERR_202: Expense must have at least one beneficiary")]
    EmptyBeneficiaries,

    /// Expense amounts must be strictly positive.
    #[error("TS_ERR_203: Expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Expense edit/remove addressed an index outside `[0, len)`.
    #[error("TS_ERR_204: Invalid expense index {index} (ledger has {len} expenses)")]
    ExpenseIndexOutOfRange { index: usize, len: usize },

    /// Recording the amount would push the trip totals past the
    /// representable `Decimal` range.
    #[error("TS_ERR_205: Expense amount {0} overflows the trip totals")]
    AmountOverflow(Decimal),

    // =================================================================
    // Settlement / Integrity Errors (3xx)
    // =================================================================
    /// Paid and share aggregates no longer agree with the expense records.
    #[error("TS_ERR_300: Conservation invariant violation: {reason}")]
    ConservationViolation { reason: String },

    /// A participant still carries a balance after applying settlements.
    #[error("TS_ERR_301: Balance for '{name}' not settled, residual {residual}")]
    UnsettledBalance { name: String, residual: Decimal },

    /// A restored snapshot disagrees with the totals recomputed from its expenses.
    #[error("TS_ERR_302: Snapshot mismatch: {reason}")]
    SnapshotMismatch { reason: String },

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Raw user input could not be interpreted.
    #[error("TS_ERR_900: Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Serialization / deserialization error.
    #[error("TS_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// I/O error (snapshot files).
    #[error("TS_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Coarse classification used by callers that only care about the error family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced participant is not registered.
    NotFound,
    /// Input failed referential or structural validation.
    Validation,
    /// An expense index was out of range.
    Index,
    /// Internal aggregates are inconsistent.
    Integrity,
    /// Persistence or serialization failure.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Index => write!(f, "INDEX"),
            Self::Integrity => write!(f, "INTEGRITY"),
            Self::Io => write!(f, "IO"),
        }
    }
}

impl TripsplitError {
    /// The error family this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ParticipantNotFound(_) => ErrorKind::NotFound,
            Self::EmptyParticipantName
            | Self::UnknownPayer(_)
            | Self::UnknownBeneficiary(_)
            | Self::EmptyBeneficiaries
            | Self::NonPositiveAmount(_)
            | Self::AmountOverflow(_)
            | Self::InvalidInput { .. } => ErrorKind::Validation,
            Self::ExpenseIndexOutOfRange { .. } => ErrorKind::Index,
            Self::ConservationViolation { .. }
            | Self::UnsettledBalance { .. }
            | Self::SnapshotMismatch { .. } => ErrorKind::Integrity,
            Self::Serialization(_) | Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, TripsplitError>;

impl From<std::io::Error> for TripsplitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = TripsplitError::ParticipantNotFound("Alice".into());
        let msg = format!("{err}");
        assert!(msg.starts_with("TS_ERR_100"), "Got: {msg}");
        assert!(msg.contains("Alice"));
    }

    #[test]
    fn index_error_display() {
        let err = TripsplitError::ExpenseIndexOutOfRange { index: 5, len: 2 };
        let msg = format!("{err}");
        assert!(msg.contains("TS_ERR_204"));
        assert!(msg.contains('5'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            TripsplitError::ParticipantNotFound("x".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            TripsplitError::UnknownBeneficiary("x".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(TripsplitError::EmptyBeneficiaries.kind(), ErrorKind::Validation);
        assert_eq!(
            TripsplitError::AmountOverflow(Decimal::MAX).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            TripsplitError::ExpenseIndexOutOfRange { index: 0, len: 0 }.kind(),
            ErrorKind::Index
        );
        assert_eq!(
            TripsplitError::ConservationViolation { reason: "x".into() }.kind(),
            ErrorKind::Integrity
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: TripsplitError = io.into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(format!("{err}").contains("missing.json"));
    }

    #[test]
    fn all_errors_have_ts_err_prefix() {
        let errors = vec![
            TripsplitError::EmptyParticipantName,
            TripsplitError::EmptyBeneficiaries,
            TripsplitError::NonPositiveAmount(Decimal::ZERO),
            TripsplitError::AmountOverflow(Decimal::MAX),
            TripsplitError::UnsettledBalance {
                name: "a".into(),
                residual: Decimal::ONE,
            },
            TripsplitError::Serialization("bad".into()),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(msg.starts_with("TS_ERR_"), "Error missing TS_ERR_ prefix: {msg}");
        }
    }
}
