#![deny(warnings)]

//! Economic models for the tycoon simulation.
//!
//! Pure functions over the `sim-core` ledgers:
//! - [`production`]: quarterly production, sales and inventory per product
//! - [`morale`]: quarterly morale drift and employee management actions
//! - [`ledger`]: company expense aggregation, settlement and personal cash flow
//! - [`calendar`] and [`lifestyle`]: the player's clock and personal progression

pub mod calendar;
pub mod ledger;
pub mod lifestyle;
pub mod morale;
pub mod production;

pub use ledger::{CompanyCosts, PersonalCashFlow, Settlement};
pub use morale::{ActionOutcome, RejectReason};
pub use production::{ProductOutcome, ProductionTotals};

/// Whole quarters covered by an advance of `months`.
pub fn quarters_in(months: u32) -> u64 {
    u64::from(months / 3)
}
