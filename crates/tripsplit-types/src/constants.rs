//! System-wide constants for the Tripsplit ledger.

use rust_decimal::Decimal;

/// Decimal places kept for per-beneficiary shares. The last share of an
/// expense absorbs the truncated remainder.
pub const SHARE_SCALE: u32 = 10;

/// Decimal places used when emitting settlement amounts.
pub const DEFAULT_SETTLEMENT_SCALE: u32 = 2;

/// Upper bound on any configured settlement scale (the `Decimal` limit).
pub const MAX_SETTLEMENT_SCALE: u32 = 28;

/// Largest residual balance accepted after settlements are applied (one cent).
pub const DEFAULT_SETTLEMENT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Default trip name for a fresh ledger.
pub const DEFAULT_TRIP_NAME: &str = "My Trip";

/// Default ISO currency code shown in tabular exports.
pub const DEFAULT_CURRENCY_CODE: &str = "INR";

/// Default currency symbol prefixed to rendered amounts.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Timestamp layout used in reports and exports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default file name for JSON snapshots.
pub const DEFAULT_SNAPSHOT_FILE: &str = "bill_splitter_data.json";
