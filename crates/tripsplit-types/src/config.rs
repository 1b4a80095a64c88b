//! Configuration types for a trip ledger and its settlement run.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::constants;

/// Per-trip configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TripConfig {
    /// Display name of the trip.
    pub name: String,
    /// ISO currency code (e.g., "INR"), used in export headers.
    pub currency_code: String,
    /// Symbol prefixed to rendered amounts (e.g., "₹").
    pub currency_symbol: String,
    /// Settlement rounding and tolerance.
    #[serde(default)]
    pub settlement: SettlementConfig,
}

impl TripConfig {
    /// Default configuration under a custom trip name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Render an amount with the currency symbol, rounded half away from
    /// zero to the settlement scale.
    #[must_use]
    pub fn format_amount(&self, amount: Decimal) -> String {
        let scale = self.settlement.effective_scale();
        let rounded = amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{:.*}", self.currency_symbol, scale as usize, rounded)
    }
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            name: constants::DEFAULT_TRIP_NAME.to_string(),
            currency_code: constants::DEFAULT_CURRENCY_CODE.to_string(),
            currency_symbol: constants::DEFAULT_CURRENCY_SYMBOL.to_string(),
            settlement: SettlementConfig::default(),
        }
    }
}

/// Settlement optimizer configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementConfig {
    /// Decimal places of emitted settlement amounts.
    pub scale: u32,
    /// Largest residual balance accepted when verifying settlements or
    /// restoring snapshots.
    pub tolerance: Decimal,
}

impl SettlementConfig {
    /// `scale` clamped to [`constants::MAX_SETTLEMENT_SCALE`].
    #[must_use]
    pub fn effective_scale(&self) -> u32 {
        self.scale.min(constants::MAX_SETTLEMENT_SCALE)
    }
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            scale: constants::DEFAULT_SETTLEMENT_SCALE,
            tolerance: constants::DEFAULT_SETTLEMENT_TOLERANCE,
        }
    }
}
