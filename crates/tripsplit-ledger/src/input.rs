//! Parsing of raw form input.
//!
//! Front ends hand the ledger plain strings. These helpers turn them into
//! the typed values the ledger operations take.

use std::str::FromStr;

use rust_decimal::Decimal;
use tripsplit_types::{Result, TripsplitError};

/// Parse an amount field such as `" 120.50 "`.
///
/// # Errors
/// Returns [`TripsplitError::InvalidInput`] if the text is not a decimal number.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed).map_err(|err| TripsplitError::InvalidInput {
        reason: format!("amount '{trimmed}' is not a number: {err}"),
    })
}

/// Split a comma-separated beneficiary field, trimming each name and
/// dropping blanks.
#[must_use]
pub fn parse_beneficiaries(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim a participant name.
///
/// # Errors
/// Returns [`TripsplitError::EmptyParticipantName`] if nothing is left.
pub fn normalize_participant_name(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TripsplitError::EmptyParticipantName);
    }
    Ok(trimmed.to_string())
}
