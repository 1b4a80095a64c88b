//! # tripsplit-settlement
//!
//! **Settlement Engine**: turns net balances into a short list of
//! point-to-point payments that zero everyone out.
//!
//! ## Pipeline
//!
//! 1. **rounding**: quantize balances to the output scale, keeping their sum
//! 2. **optimizer**: greedily match the largest creditor with the largest
//!    debtor until one side is exhausted
//! 3. **verify**: apply settlements back onto balances and check residuals
//! 4. **digest**: order-sensitive SHA-256 over the output for reproducibility checks
//!
//! ```text
//! Ledger.calculate_balances() → quantize_balances() → optimize() → Vec<Settlement>
//! ```
//!
//! Nothing is cached: every call recomputes from the balances it is given.

pub mod digest;
pub mod optimizer;
pub mod rounding;
pub mod verify;

pub use digest::{compute_settlement_root, settlement_root_hex, verify_settlement_root};
pub use optimizer::{SettlementOptimizer, optimize_settlements, settle_ledger};
pub use rounding::quantize_balances;
pub use verify::{apply_settlements, verify_settled};
