//! Company-wide workforce: headcount, factories, morale and salary policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::sources::WorkforceSource;

/// Workforce satisfaction score, always within [0,100].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Morale(u8);

impl Morale {
    pub const MAX: u8 = 100;

    /// Build a morale value, clamping anything above 100.
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Apply a signed delta and clamp the result to [0,100].
    pub fn adjusted(self, delta: i32) -> Self {
        let raw = i32::from(self.0).saturating_add(delta);
        // clamp keeps the cast lossless
        Self(raw.clamp(0, i32::from(Self::MAX)) as u8)
    }
}

impl Default for Morale {
    fn default() -> Self {
        Self(75)
    }
}

impl From<u8> for Morale {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Morale> for u8 {
    fn from(m: Morale) -> Self {
        m.0
    }
}

/// Pay policy chosen by the player; shifts morale every quarterly advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryPolicy {
    /// Below-market pay.
    Low,
    /// Market pay.
    #[default]
    Avg,
    /// Above-market pay.
    High,
}

/// Company-wide workforce state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkforceState {
    /// Number of factories operated.
    pub factory_count: u64,
    /// Total employees; must cover the per-factory minimum.
    pub employee_count: u64,
    /// Current morale.
    #[serde(default)]
    pub morale: Morale,
    /// Current pay policy.
    #[serde(default)]
    pub salary_policy: SalaryPolicy,
    /// Team events hosted since the last quarterly close.
    #[serde(default)]
    pub events_hosted_this_quarter: u32,
    /// Whether a bonus has been paid since the last quarterly close.
    #[serde(default)]
    pub bonus_distributed_this_quarter: bool,
    /// Net profit of the most recent quarterly close.
    #[serde(default)]
    pub last_quarter_profit: Decimal,
}

impl WorkforceState {
    /// Minimum headcount needed to run `factories` factories.
    pub fn required_staff(factories: u64, min_staff_per_factory: u64) -> u64 {
        factories.saturating_mul(min_staff_per_factory)
    }

    pub fn is_adequately_staffed(&self, min_staff_per_factory: u64) -> bool {
        self.employee_count >= Self::required_staff(self.factory_count, min_staff_per_factory)
    }
}

impl WorkforceSource for WorkforceState {
    fn get_employee_count(&self) -> u64 {
        self.employee_count
    }

    fn get_factory_count(&self) -> u64 {
        self.factory_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_clamps_high_values() {
        assert_eq!(Morale::new(250).value(), 100);
        assert_eq!(Morale::new(40).value(), 40);
    }

    #[test]
    fn deserialize_clamps() {
        let m: Morale = serde_json::from_str("180").unwrap();
        assert_eq!(m.value(), 100);
        assert_eq!(serde_json::to_string(&Morale::new(33)).unwrap(), "33");
    }

    #[test]
    fn policy_serializes_short_names() {
        assert_eq!(serde_json::to_string(&SalaryPolicy::Avg).unwrap(), "\"avg\"");
        let p: SalaryPolicy = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(p, SalaryPolicy::High);
    }

    #[test]
    fn staffing_minimum() {
        let w = WorkforceState {
            factory_count: 5,
            employee_count: 249,
            ..Default::default()
        };
        assert!(!w.is_adequately_staffed(50));
        assert!(w.is_adequately_staffed(49));
    }

    proptest! {
        #[test]
        fn adjusted_stays_in_range(start in 0u8..=100, delta in -1000i32..1000) {
            let m = Morale::new(start).adjusted(delta);
            prop_assert!(m.value() <= 100);
        }
    }
}
