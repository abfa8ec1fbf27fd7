//! Tunable economy constants and the top-level simulation configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A fraction-valued field was outside [0, 1].
    #[error("{0} must be within [0,1]")]
    FractionOutOfRange(&'static str),
    /// A monetary or count field was negative or zero where it must be positive.
    #[error("{0} must be > 0")]
    NonPositive(&'static str),
    /// The YAML document could not be parsed.
    #[error("invalid config yaml: {0}")]
    Yaml(String),
}

/// Economy constants used by production, morale and ledger math.
///
/// Every field has a default; a YAML file only needs to list overrides.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EconomyConfig {
    /// Units produced per employee per quarter before the complexity divisor.
    pub base_output_per_employee: u64,
    /// Share of available goods that sells with zero marketing.
    pub organic_sales_factor: Decimal,
    /// Fraction of selling price at which marketing spend saturates.
    pub saturation_fraction: Decimal,
    /// Morale below this value triggers an operational setback.
    pub low_morale_threshold: u8,
    /// Share of potential sales lost at zero morale.
    pub max_morale_penalty: Decimal,
    /// Storage cost per unsold unit per quarter.
    pub storage_cost_per_unit: Decimal,
    /// Complexity used when a product carries a non-positive complexity.
    pub default_complexity: Decimal,
    /// Overhead per factory per quarter.
    pub factory_overhead_per_quarter: Decimal,
    /// Salary per researcher per quarter.
    pub researcher_salary_per_quarter: Decimal,
    /// Research points generated by one researcher in one quarter.
    pub research_points_per_researcher: u64,
    /// Fixed company expense per month.
    pub fixed_monthly_expense: Decimal,
    /// Annual interest rate charged on outstanding debt.
    pub debt_annual_rate: Decimal,
    /// Company valuation as a multiple of capital.
    pub valuation_multiplier: Decimal,
    /// Minimum employees required per factory.
    pub min_staff_per_factory: u64,
    /// Morale lost per processed quarter.
    pub morale_decay_per_quarter: u8,
    /// Morale gained (high policy) or lost (low policy) per quarterly advance.
    pub salary_policy_effect: u8,
    /// Factory count changes larger than this hit morale.
    pub large_shift_threshold: u64,
    /// Morale lost on a large factory count change.
    pub large_shift_penalty: u8,
    /// Team events allowed per quarter.
    pub events_per_quarter: u32,
    /// Share of last quarter's profit paid out as a bonus.
    pub bonus_fraction: Decimal,
    /// Morale gained from a bonus payout.
    pub bonus_morale_boost: u8,
    /// Monthly salary used when the player has none on record.
    pub default_player_salary: Decimal,
    /// Monthly living expenses used when the player has none on record.
    pub default_living_expenses: Decimal,
    /// Attribute points lost per quarterly advance.
    pub attribute_decay: u8,
    /// Smarts gained when an education program completes.
    pub education_smarts_bonus: u8,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            base_output_per_employee: 500,
            organic_sales_factor: Decimal::new(15, 2),
            saturation_fraction: Decimal::new(30, 2),
            low_morale_threshold: 50,
            max_morale_penalty: Decimal::new(35, 2),
            storage_cost_per_unit: Decimal::new(50, 2),
            default_complexity: Decimal::new(10, 0),
            factory_overhead_per_quarter: Decimal::new(25_000, 0),
            researcher_salary_per_quarter: Decimal::new(18_000, 0),
            research_points_per_researcher: 10,
            fixed_monthly_expense: Decimal::new(5_000, 0),
            debt_annual_rate: Decimal::new(8, 2),
            valuation_multiplier: Decimal::new(15, 1),
            min_staff_per_factory: 50,
            morale_decay_per_quarter: 5,
            salary_policy_effect: 15,
            large_shift_threshold: 3,
            large_shift_penalty: 5,
            events_per_quarter: 2,
            bonus_fraction: Decimal::new(5, 2),
            bonus_morale_boost: 15,
            default_player_salary: Decimal::new(3_000, 0),
            default_living_expenses: Decimal::new(1_500, 0),
            attribute_decay: 2,
            education_smarts_bonus: 10,
        }
    }
}

impl EconomyConfig {
    /// Check that fractions are fractions and divisors are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fractions = [
            ("organic_sales_factor", self.organic_sales_factor),
            ("saturation_fraction", self.saturation_fraction),
            ("max_morale_penalty", self.max_morale_penalty),
            ("bonus_fraction", self.bonus_fraction),
        ];
        for (name, value) in fractions {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(ConfigError::FractionOutOfRange(name));
            }
        }
        if self.default_complexity <= Decimal::ZERO {
            return Err(ConfigError::NonPositive("default_complexity"));
        }
        if self.valuation_multiplier <= Decimal::ZERO {
            return Err(ConfigError::NonPositive("valuation_multiplier"));
        }
        if self.low_morale_threshold == 0 {
            return Err(ConfigError::NonPositive("low_morale_threshold"));
        }
        Ok(())
    }
}

/// Simulation configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the narrative RNG.
    pub rng_seed: u64,
    /// Economy constants.
    pub economy: EconomyConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rng_seed: 42,
            economy: EconomyConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a YAML document and validate the economy section.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig =
            serde_yaml::from_str(text).map_err(|e| ConfigError::Yaml(e.to_string()))?;
        cfg.economy.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(EconomyConfig::default().validate(), Ok(()));
    }

    #[test]
    fn yaml_overrides_only_listed_fields() {
        let cfg = SimConfig::from_yaml_str("rng_seed: 7\neconomy:\n  base_output_per_employee: 250\n")
            .unwrap();
        assert_eq!(cfg.rng_seed, 7);
        assert_eq!(cfg.economy.base_output_per_employee, 250);
        assert_eq!(cfg.economy.organic_sales_factor, Decimal::new(15, 2));
    }

    #[test]
    fn rejects_fraction_above_one() {
        let err = SimConfig::from_yaml_str("economy:\n  organic_sales_factor: 1.5\n").unwrap_err();
        assert_eq!(err, ConfigError::FractionOutOfRange("organic_sales_factor"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            SimConfig::from_yaml_str("economy: [1, 2"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
