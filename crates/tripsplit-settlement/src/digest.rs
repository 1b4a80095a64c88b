//! Settlement digest.
//!
//! The optimizer is deterministic, so a settlement list can be pinned by a
//! hash. Two runs over the same ledger state must produce the same root;
//! a differing root means the balances or the ordering changed.

use sha2::{Digest, Sha256};
use tripsplit_types::Settlement;

/// Compute the settlement root hash.
///
/// Covers, in order, each settlement's debtor, creditor and normalized
/// amount. Names are length-prefixed so `("ab", "c")` and `("a", "bc")`
/// hash differently.
#[must_use]
pub fn compute_settlement_root(settlements: &[Settlement]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"tripsplit:settlements:v1:");
    hasher.update((settlements.len() as u64).to_le_bytes());

    for settlement in settlements {
        for name in [&settlement.debtor, &settlement.creditor] {
            hasher.update((name.len() as u64).to_le_bytes());
            hasher.update(name.as_bytes());
        }
        hasher.update(settlement.amount.normalize().to_string().as_bytes());
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Recompute the root and compare with `expected_root`.
#[must_use]
pub fn verify_settlement_root(settlements: &[Settlement], expected_root: &[u8; 32]) -> bool {
    compute_settlement_root(settlements) == *expected_root
}

/// Hex rendering of the root, for logs and exports.
#[must_use]
pub fn settlement_root_hex(settlements: &[Settlement]) -> String {
    hex::encode(compute_settlement_root(settlements))
}
