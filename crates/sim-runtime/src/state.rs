//! The set of ledgers one game owns.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sim_core::{
    validate_company, validate_player, validate_products, validate_workforce, CompanyLedger,
    EconomyConfig, Morale, Partner, PlayerLedger, ProductLedger, ResearchLab, SalaryPolicy,
    ValidationError, WorkforceState,
};

use crate::SimError;

/// Every ledger the orchestrator reads and writes in one advance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Every product, active or not.
    #[serde(default)]
    pub products: ProductLedger,
    /// Factories, headcount and morale.
    pub workforce: WorkforceState,
    /// The player's company.
    pub company: CompanyLedger,
    /// Personal finances and the game clock.
    pub player: PlayerLedger,
    /// R&D department.
    #[serde(default)]
    pub research: ResearchLab,
    /// Current partner, if any.
    #[serde(default)]
    pub partner: Option<Partner>,
}

impl GameState {
    /// Starting position of a fresh game.
    pub fn new_game(cfg: &EconomyConfig) -> Result<Self, ValidationError> {
        let company = CompanyLedger::new("Startup Co", Decimal::new(250_000, 0), cfg.valuation_multiplier)?;
        let mut player = PlayerLedger::new("Player", Decimal::new(1_000, 0), 18);
        player.net_worth = sim_econ::ledger::net_worth(&player, &company)?;
        Ok(Self {
            products: ProductLedger::new(),
            workforce: WorkforceState {
                factory_count: 1,
                employee_count: cfg.min_staff_per_factory,
                morale: Morale::default(),
                salary_policy: SalaryPolicy::Avg,
                ..Default::default()
            },
            company,
            player,
            research: ResearchLab::new(0, cfg.research_points_per_researcher),
            partner: None,
        })
    }

    /// Load a saved or hand-written scenario and check it.
    pub fn from_yaml_str(text: &str, cfg: &EconomyConfig) -> Result<Self, SimError> {
        let mut state: GameState =
            serde_yaml::from_str(text).map_err(|e| SimError::Scenario(e.to_string()))?;
        state.validate(cfg)?;
        // Derived figures are never trusted from disk.
        state.company.revalue(cfg.valuation_multiplier)?;
        state.player.net_worth = sim_econ::ledger::net_worth(&state.player, &state.company)?;
        Ok(state)
    }

    pub fn validate(&self, cfg: &EconomyConfig) -> Result<(), ValidationError> {
        validate_products(&self.products)?;
        validate_workforce(&self.workforce, cfg.min_staff_per_factory)?;
        validate_company(&self.company)?;
        validate_player(&self.player)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_is_valid() {
        let cfg = EconomyConfig::default();
        let s = GameState::new_game(&cfg).unwrap();
        assert!(s.validate(&cfg).is_ok());
        assert!(s.products.is_empty());
        // 1_000 cash + 100% of 250_000 * 1.5
        assert_eq!(s.player.net_worth, Decimal::new(376_000, 0));
    }

    #[test]
    fn scenario_yaml_loads() {
        let cfg = EconomyConfig::default();
        let text = r#"
products:
  - id: gizmo
    unit_cost: 10
    selling_price: 25
    complexity: 50
    production_level: 50
    market_demand: 50
    marketing_spend_per_unit: 5
workforce:
  factory_count: 5
  employee_count: 1000
  morale: 75
  salary_policy: avg
company:
  name: Gizmo Works
  capital: 1000000
  ownership_pct: 100
player:
  name: Sam
  cash: 1000
  month: 1
  age: 30
"#;
        let s = GameState::from_yaml_str(text, &cfg).unwrap();
        assert_eq!(s.products.len(), 1);
        assert_eq!(s.workforce.morale.value(), 75);
        assert_eq!(s.player.age, 30);
        assert_eq!(s.company.valuation, Decimal::new(1_500_000, 0));
    }

    #[test]
    fn understaffed_scenario_rejected() {
        let cfg = EconomyConfig::default();
        let text = r#"
workforce: { factory_count: 5, employee_count: 10 }
company: { name: X, capital: 0, ownership_pct: 100 }
player: { name: Sam, cash: 0, month: 1, age: 30 }
"#;
        assert!(matches!(
            GameState::from_yaml_str(text, &cfg),
            Err(SimError::Validation(ValidationError::Understaffed { .. }))
        ));
    }
}
