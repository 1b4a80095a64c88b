//! # tripsplit-ledger
//!
//! **Ledger**: the in-memory record of one trip.
//!
//! ## Architecture
//!
//! 1. **Ledger**: participant registry (name → [`Participant`]) plus the
//!    ordered expense records, with running `total_paid` / `total_share`
//!    aggregates kept in step on every add, edit and remove
//! 2. **shares**: uniform split of an expense across its beneficiaries
//! 3. **Conservation**: `Σ paid == Σ share == Σ amount` check
//! 4. **input**: parsing of raw form strings handed in by a front end
//! 5. **snapshot**: JSON persistence and validated restore
//!
//! ```text
//! caller → Ledger.add_expense() → shares::split_shares() → aggregates
//!        → Ledger.calculate_balances() → settlement engine
//! ```
//!
//! [`Participant`]: tripsplit_types::Participant

pub mod conservation;
pub mod input;
pub mod ledger;
pub mod shares;
pub mod snapshot;

pub use conservation::Conservation;
pub use ledger::Ledger;
pub use shares::split_shares;
pub use snapshot::{ExpenseRecord, ParticipantTotals, TripSnapshot};
