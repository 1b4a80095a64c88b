//! Balance quantization.
//!
//! Ledger balances carry fractional shares (e.g. a third of 100). Before
//! matching, each balance is rounded to the output scale. Rounding can
//! break the zero sum, so the leftover is taken back one unit at a time
//! from the balances whose rounding error points the same way, largest
//! error first. Every quantized balance stays within one unit of its
//! original.

use rust_decimal::{Decimal, RoundingStrategy};
use tripsplit_types::{Balances, constants::MAX_SETTLEMENT_SCALE};

fn round(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven)
}

/// Round every balance to `scale` places while preserving the rounded total.
///
/// `scale` is clamped to [`MAX_SETTLEMENT_SCALE`].
#[must_use]
pub fn quantize_balances(balances: &Balances, scale: u32) -> Balances {
    let scale = scale.min(MAX_SETTLEMENT_SCALE);
    let unit = Decimal::new(1, scale);
    let mut quantized: Balances = balances
        .iter()
        .map(|(name, balance)| (name.clone(), round(*balance, scale)))
        .collect();

    let target = round(balances.values().copied().sum(), scale);
    let mut excess = quantized.values().copied().sum::<Decimal>() - target;
    if excess.is_zero() {
        return quantized;
    }

    // Rounding error per position: positive means rounded up.
    let errors: Vec<Decimal> = quantized
        .values()
        .zip(balances.values())
        .map(|(q, original)| *q - *original)
        .collect();
    let mut order: Vec<usize> = (0..errors.len()).collect();

    if excess > Decimal::ZERO {
        order.sort_by(|&a, &b| errors[b].cmp(&errors[a]).then(a.cmp(&b)));
        for index in order {
            if excess <= Decimal::ZERO {
                break;
            }
            quantized[index] -= unit;
            excess -= unit;
        }
    } else {
        order.sort_by(|&a, &b| errors[a].cmp(&errors[b]).then(a.cmp(&b)));
        for index in order {
            if excess >= Decimal::ZERO {
                break;
            }
            quantized[index] += unit;
            excess += unit;
        }
    }

    tracing::debug!(
        participants = quantized.len(),
        scale,
        "Quantized balances with remainder correction"
    );
    quantized
}

#[cfg(test)]
mod tests {
    use tripsplit_types::balances_from_pairs;

    use super::*;

    fn balances(pairs: &[(&str, Decimal)]) -> Balances {
        pairs
            .iter()
            .map(|(name, amount)| ((*name).to_string(), *amount))
            .collect()
    }

    #[test]
    fn whole_amounts_unchanged() {
        let input = balances_from_pairs(&[("A", 200), ("B", -100), ("C", -100)]);
        assert_eq!(quantize_balances(&input, 2), input);
    }

    #[test]
    fn thirds_are_corrected_to_zero_sum() {
        let input = balances(&[
            ("A", Decimal::new(666_666_666_667, 10)),
            ("B", Decimal::new(-333_333_333_333, 10)),
            ("C", Decimal::new(-333_333_333_334, 10)),
        ]);
        let q = quantize_balances(&input, 2);
        assert_eq!(q["A"], Decimal::new(6667, 2));
        assert_eq!(q["B"], Decimal::new(-3333, 2));
        assert_eq!(q["C"], Decimal::new(-3334, 2));
        assert_eq!(q.values().copied().sum::<Decimal>(), Decimal::ZERO);
    }

    #[test]
    fn rounded_down_excess_is_added_back() {
        let input = balances(&[
            ("A", Decimal::new(-6_666_666, 5)),
            ("B", Decimal::new(3_333_333, 5)),
            ("C", Decimal::new(3_333_333, 5)),
        ]);
        let q = quantize_balances(&input, 2);
        assert_eq!(q.values().copied().sum::<Decimal>(), Decimal::ZERO);
        for (name, original) in &input {
            assert!((q[name] - *original).abs() < Decimal::new(1, 2), "{name}");
        }
    }

    #[test]
    fn preserves_order_and_names() {
        let input = balances_from_pairs(&[("Zed", 1), ("Amy", -1)]);
        let q = quantize_balances(&input, 2);
        let names: Vec<&str> = q.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
    }

    #[test]
    fn oversized_scale_is_clamped() {
        let input = balances(&[
            ("A", Decimal::new(666_666_666_667, 10)),
            ("B", Decimal::new(-666_666_666_667, 10)),
        ]);
        assert_eq!(quantize_balances(&input, 40), input);
    }

    #[test]
    fn empty_balances() {
        assert!(quantize_balances(&Balances::new(), 2).is_empty());
    }
}
