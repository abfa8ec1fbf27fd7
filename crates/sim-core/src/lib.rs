#![deny(warnings)]

//! Core domain models and invariants for the life/business tycoon simulation.
//!
//! This crate defines the serializable ledgers the simulation reads and
//! writes, the seams the orchestrator reaches them through, and validation
//! helpers that reject malformed state before any ledger is mutated.

pub mod company;
pub mod config;
pub mod player;
pub mod product;
pub mod research;
pub mod sources;
pub mod workforce;

pub use company::{valuation_of, CompanyLedger, CycleFinancials};
pub use config::{ConfigError, EconomyConfig, SimConfig};
pub use player::{AssetKind, AttributeDeltas, Attributes, Education, Holding, Partner, PlayerLedger};
pub use product::{Product, ProductId, ProductLedger, ProductStatus};
pub use research::ResearchLab;
pub use sources::{PartnerSource, ProductSource, ResearchOutcome, ResearchSource, WorkforceSource};
pub use workforce::{Morale, SalaryPolicy, WorkforceState};

use rust_decimal::Decimal;
use std::collections::BTreeSet;
use thiserror::Error;

/// Months advanced when the caller does not say.
pub const DEFAULT_ADVANCE_MONTHS: u32 = 3;

/// Largest single advance accepted (one hundred years).
pub const MAX_ADVANCE_MONTHS: u32 = 1200;

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Month count was negative.
    #[error("months must be >= 0, got {0}")]
    NegativeMonths(i64),
    /// Month count exceeded [`MAX_ADVANCE_MONTHS`].
    #[error("months {0} exceeds the maximum of 1200")]
    MonthsOutOfRange(i64),
    /// Calendar month outside [1,12].
    #[error("calendar month {0} is out of range [1,12]")]
    CalendarMonthOutOfRange(u8),
    /// Price, cost or balance must be non-negative.
    #[error("negative monetary value is invalid: {0}")]
    NegativeMoney(&'static str),
    /// Percentage outside [0,100].
    #[error("{0} must be within [0,100]")]
    PercentOutOfRange(&'static str),
    /// Fewer employees than the factories need.
    #[error("{employees} employees cannot staff {factories} factories (need {required})")]
    Understaffed {
        employees: u64,
        factories: u64,
        required: u64,
    },
    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateProduct(String),
    /// A figure derived from the ledgers does not fit the numeric range.
    #[error("{0} is too large to compute")]
    Overflow(&'static str),
}

/// Normalize the months argument of an advance. `None` means a quarter.
pub fn validate_months(months: Option<i64>) -> Result<u32, ValidationError> {
    let Some(m) = months else {
        return Ok(DEFAULT_ADVANCE_MONTHS);
    };
    if m < 0 {
        return Err(ValidationError::NegativeMonths(m));
    }
    match u32::try_from(m) {
        Ok(v) if v <= MAX_ADVANCE_MONTHS => Ok(v),
        _ => Err(ValidationError::MonthsOutOfRange(m)),
    }
}

/// Validate a product's monetary fields.
///
/// Percentages and complexity are not rejected: the simulation clamps and
/// defaults them.
pub fn validate_product(p: &Product) -> Result<(), ValidationError> {
    if p.unit_cost < Decimal::ZERO {
        return Err(ValidationError::NegativeMoney("unit_cost"));
    }
    if p.selling_price < Decimal::ZERO {
        return Err(ValidationError::NegativeMoney("selling_price"));
    }
    if p.marketing_spend_per_unit < Decimal::ZERO {
        return Err(ValidationError::NegativeMoney("marketing_spend_per_unit"));
    }
    Ok(())
}

/// Validate every product and id uniqueness.
pub fn validate_products(ledger: &ProductLedger) -> Result<(), ValidationError> {
    let mut ids = BTreeSet::new();
    for p in ledger.iter() {
        validate_product(p)?;
        if !ids.insert(&p.id) {
            return Err(ValidationError::DuplicateProduct(p.id.0.clone()));
        }
    }
    Ok(())
}

/// Validate staffing against the per-factory minimum.
pub fn validate_workforce(w: &WorkforceState, min_staff_per_factory: u64) -> Result<(), ValidationError> {
    if !w.is_adequately_staffed(min_staff_per_factory) {
        return Err(ValidationError::Understaffed {
            employees: w.employee_count,
            factories: w.factory_count,
            required: WorkforceState::required_staff(w.factory_count, min_staff_per_factory),
        });
    }
    Ok(())
}

/// Validate company fields. Capital may be negative (bankrupt).
pub fn validate_company(c: &CompanyLedger) -> Result<(), ValidationError> {
    if c.debt_total < Decimal::ZERO {
        return Err(ValidationError::NegativeMoney("debt_total"));
    }
    if c.ownership_pct < Decimal::ZERO || c.ownership_pct > Decimal::ONE_HUNDRED {
        return Err(ValidationError::PercentOutOfRange("ownership_pct"));
    }
    Ok(())
}

/// Validate the player's clock and assets.
pub fn validate_player(p: &PlayerLedger) -> Result<(), ValidationError> {
    if !(1..=12).contains(&p.month) {
        return Err(ValidationError::CalendarMonthOutOfRange(p.month));
    }
    for h in &p.holdings {
        if h.units < Decimal::ZERO || h.unit_value < Decimal::ZERO {
            return Err(ValidationError::NegativeMoney("holding"));
        }
    }
    for amount in [p.monthly_salary, p.monthly_living_expenses].into_iter().flatten() {
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeMoney("monthly salary or expenses"));
        }
    }
    p.holdings_value()?;
    p.monthly_coupons()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId(id.to_string()),
            name: String::new(),
            status: ProductStatus::Active,
            unit_cost: Decimal::new(10, 0),
            selling_price: Decimal::new(25, 0),
            complexity: Decimal::ZERO,
            inventory: 0,
            production_level: Decimal::new(250, 0),
            market_demand: Decimal::new(50, 0),
            marketing_spend_per_unit: Decimal::ZERO,
        }
    }

    #[test]
    fn months_default_to_a_quarter() {
        assert_eq!(validate_months(None), Ok(3));
        assert_eq!(validate_months(Some(0)), Ok(0));
        assert_eq!(validate_months(Some(25)), Ok(25));
    }

    #[test]
    fn negative_and_huge_months_rejected() {
        assert_eq!(validate_months(Some(-1)), Err(ValidationError::NegativeMonths(-1)));
        assert_eq!(
            validate_months(Some(i64::MAX)),
            Err(ValidationError::MonthsOutOfRange(i64::MAX))
        );
    }

    #[test]
    fn product_clamped_fields_pass_but_negative_price_fails() {
        let mut p = product("a");
        assert!(validate_product(&p).is_ok());
        p.selling_price = Decimal::new(-1, 0);
        assert_eq!(
            validate_product(&p),
            Err(ValidationError::NegativeMoney("selling_price"))
        );
    }

    #[test]
    fn understaffed_workforce_rejected() {
        let w = WorkforceState {
            factory_count: 3,
            employee_count: 100,
            ..Default::default()
        };
        assert_eq!(
            validate_workforce(&w, 50),
            Err(ValidationError::Understaffed {
                employees: 100,
                factories: 3,
                required: 150
            })
        );
    }

    #[test]
    fn bankrupt_company_is_still_valid() {
        let mut c = CompanyLedger::new("Acme", Decimal::new(-5, 0), Decimal::ONE).unwrap();
        assert!(validate_company(&c).is_ok());
        c.ownership_pct = Decimal::new(101, 0);
        assert!(validate_company(&c).is_err());
    }

    #[test]
    fn player_month_checked() {
        let mut p = PlayerLedger::new("Sam", Decimal::ZERO, 30);
        assert!(validate_player(&p).is_ok());
        p.month = 13;
        assert_eq!(validate_player(&p), Err(ValidationError::CalendarMonthOutOfRange(13)));
    }

    #[test]
    fn unrepresentable_holdings_rejected() {
        let mut p = PlayerLedger::new("Sam", Decimal::ZERO, 30);
        p.holdings.push(Holding {
            symbol: "MOON".into(),
            kind: AssetKind::Crypto,
            units: Decimal::MAX,
            unit_value: Decimal::new(2, 0),
            annual_coupon_rate: Decimal::ZERO,
        });
        assert_eq!(validate_player(&p), Err(ValidationError::Overflow("holding value")));
    }

    #[test]
    fn player_snapshot_roundtrip() {
        let mut p = PlayerLedger::new("Sam", Decimal::new(1_000, 0), 30);
        p.take_monthly_action("gym");
        let s = serde_json::to_string_pretty(&p).unwrap();
        let back: PlayerLedger = serde_json::from_str(&s).unwrap();
        assert_eq!(back, p);
    }

    proptest! {
        #[test]
        fn any_non_negative_months_accepted(m in 0i64..=1200) {
            prop_assert_eq!(validate_months(Some(m)), Ok(m as u32));
        }

        #[test]
        fn non_negative_prices_validate(cost in 0i64..1_000_000, price in 0i64..1_000_000) {
            let mut p = product("x");
            p.unit_cost = Decimal::new(cost, 2);
            p.selling_price = Decimal::new(price, 2);
            prop_assert!(validate_product(&p).is_ok());
        }
    }
}
