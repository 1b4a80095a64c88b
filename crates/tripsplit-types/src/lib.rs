//! # tripsplit-types
//!
//! Shared types, errors, and configuration for the **Tripsplit** expense ledger.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`ExpenseId`]
//! - **Ledger records**: [`Participant`], [`Expense`]
//! - **Settlement output**: [`Settlement`], [`Balances`]
//! - **Configuration**: [`TripConfig`], [`SettlementConfig`]
//! - **Errors**: [`TripsplitError`] with `TS_ERR_` prefix codes
//! - **Constants**: defaults for currency, rounding and formatting

pub mod config;
pub mod constants;
pub mod error;
pub mod expense;
pub mod ids;
pub mod participant;
pub mod settlement;

pub use config::*;
pub use error::*;
pub use expense::*;
pub use ids::*;
pub use participant::*;
pub use settlement::*;

// Constants are accessed via `tripsplit_types::constants::FOO`.
