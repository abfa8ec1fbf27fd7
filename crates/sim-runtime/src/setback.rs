//! Narrative reasons for low-morale production losses.

use rand::Rng;
use rust_decimal::Decimal;

pub const SETBACK_REASONS: [&str; 6] = [
    "A disgruntled shift walked off the line",
    "Skipped maintenance left a key machine idle",
    "Quality control flagged a batch after careless assembly",
    "Absenteeism spiked across the factory floor",
    "A slowdown protest over working conditions stalled output",
    "Supervisors spent the quarter putting out staff disputes",
];

pub fn pick_reason<R: Rng>(rng: &mut R) -> &'static str {
    SETBACK_REASONS[rng.gen_range(0..SETBACK_REASONS.len())]
}

pub fn message(reason: &str, lost_units: u64, lost_revenue: Decimal) -> String {
    format!("{reason}: {lost_units} units lost (${lost_revenue} in sales)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn same_seed_same_reason() {
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..10 {
            assert_eq!(pick_reason(&mut a), pick_reason(&mut b));
        }
    }

    #[test]
    fn message_mentions_losses() {
        let m = message(SETBACK_REASONS[0], 140, Decimal::new(1400, 0));
        assert!(m.contains("140 units"));
        assert!(m.contains("$1400"));
    }
}
