//! # tripsplit-report
//!
//! Read-only renderings of ledger state for a front end: numbered expense
//! lines, balance lines, settlement instructions, and a tabular export
//! with one row per expense.

pub mod lines;
pub mod table;

pub use lines::{balance_lines, expense_lines, settlement_lines};
pub use table::ExpenseTable;
