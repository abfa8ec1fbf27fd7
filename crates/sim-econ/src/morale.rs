//! Workforce morale: quarterly drift, team events, bonuses and management actions.
//!
//! Management actions never fail loudly. When a precondition is not met they
//! return [`ActionOutcome::Rejected`] and leave every ledger untouched.

use rust_decimal::Decimal;
use serde::Serialize;
use sim_core::{CompanyLedger, EconomyConfig, SalaryPolicy, WorkforceState};
use tracing::debug;

/// Why a management action was turned down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The per-quarter event quota is used up.
    EventQuotaReached,
    /// The company cannot afford it.
    InsufficientCapital,
    /// A bonus was already paid this quarter.
    BonusAlreadyDistributed,
    /// Last quarter made no profit to share.
    NoProfitToShare,
    /// The change would leave factories without minimum staff.
    BelowMinimumStaffing,
    /// A negative cost was supplied.
    InvalidCost,
    /// The resulting company figures would not fit the numeric range.
    OutOfRange,
}

/// Result of a management action.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "reason")]
pub enum ActionOutcome {
    Applied,
    Rejected(RejectReason),
}

impl ActionOutcome {
    pub fn is_applied(self) -> bool {
        self == ActionOutcome::Applied
    }
}

fn reject(action: &str, reason: RejectReason) -> ActionOutcome {
    debug!(action, ?reason, "management action rejected");
    ActionOutcome::Rejected(reason)
}

/// Morale change from the salary policy for one quarterly advance.
pub fn policy_effect(policy: SalaryPolicy, cfg: &EconomyConfig) -> i32 {
    let effect = i32::from(cfg.salary_policy_effect);
    match policy {
        SalaryPolicy::High => effect,
        SalaryPolicy::Low => -effect,
        SalaryPolicy::Avg => 0,
    }
}

/// Close the quarter for the workforce.
///
/// Decay applies per processed quarter; the salary policy applies once per
/// call however many quarters were covered. The morale clamp happens after
/// both. Event and bonus allowances reset, and `net_profit` becomes the base
/// for the next bonus.
pub fn close_quarter(workforce: &mut WorkforceState, quarters: u64, net_profit: Decimal, cfg: &EconomyConfig) {
    let decay = i64::from(cfg.morale_decay_per_quarter).saturating_mul(i64::try_from(quarters).unwrap_or(i64::MAX));
    let delta = i64::from(policy_effect(workforce.salary_policy, cfg)).saturating_sub(decay);
    let delta = i32::try_from(delta).unwrap_or(i32::MIN);
    let before = workforce.morale;
    workforce.morale = before.adjusted(delta);
    workforce.events_hosted_this_quarter = 0;
    workforce.bonus_distributed_this_quarter = false;
    workforce.last_quarter_profit = net_profit;
    debug!(
        before = before.value(),
        after = workforce.morale.value(),
        quarters,
        "quarter closed for workforce"
    );
}

/// Host a team event: costs company capital, lifts morale.
pub fn organize_event(
    workforce: &mut WorkforceState,
    company: &mut CompanyLedger,
    cost: Decimal,
    boost: u8,
    cfg: &EconomyConfig,
) -> ActionOutcome {
    if cost < Decimal::ZERO {
        return reject("organize_event", RejectReason::InvalidCost);
    }
    if workforce.events_hosted_this_quarter >= cfg.events_per_quarter {
        return reject("organize_event", RejectReason::EventQuotaReached);
    }
    if company.capital < cost {
        return reject("organize_event", RejectReason::InsufficientCapital);
    }
    if company.set_capital(company.capital - cost, cfg.valuation_multiplier).is_err() {
        return reject("organize_event", RejectReason::OutOfRange);
    }
    workforce.morale = workforce.morale.adjusted(i32::from(boost));
    workforce.events_hosted_this_quarter += 1;
    ActionOutcome::Applied
}

/// Pay a share of last quarter's profit as a bonus, once per quarter.
pub fn distribute_bonus(
    workforce: &mut WorkforceState,
    company: &mut CompanyLedger,
    cfg: &EconomyConfig,
) -> ActionOutcome {
    if workforce.bonus_distributed_this_quarter {
        return reject("distribute_bonus", RejectReason::BonusAlreadyDistributed);
    }
    if workforce.last_quarter_profit <= Decimal::ZERO {
        return reject("distribute_bonus", RejectReason::NoProfitToShare);
    }
    let Some(amount) = workforce.last_quarter_profit.checked_mul(cfg.bonus_fraction) else {
        return reject("distribute_bonus", RejectReason::OutOfRange);
    };
    if company.capital < amount {
        return reject("distribute_bonus", RejectReason::InsufficientCapital);
    }
    if company.set_capital(company.capital - amount, cfg.valuation_multiplier).is_err() {
        return reject("distribute_bonus", RejectReason::OutOfRange);
    }
    workforce.morale = workforce.morale.adjusted(i32::from(cfg.bonus_morale_boost));
    workforce.bonus_distributed_this_quarter = true;
    ActionOutcome::Applied
}

/// Open or close factories. A swing larger than the threshold hurts morale once.
pub fn set_factory_count(workforce: &mut WorkforceState, factories: u64, cfg: &EconomyConfig) -> ActionOutcome {
    let required = WorkforceState::required_staff(factories, cfg.min_staff_per_factory);
    if workforce.employee_count < required {
        return reject("set_factory_count", RejectReason::BelowMinimumStaffing);
    }
    let swing = workforce.factory_count.abs_diff(factories);
    if swing > cfg.large_shift_threshold {
        workforce.morale = workforce
            .morale
            .adjusted(-i32::from(cfg.large_shift_penalty));
    }
    workforce.factory_count = factories;
    ActionOutcome::Applied
}

/// Hire or lay off staff, never below what the factories need.
pub fn set_employee_count(workforce: &mut WorkforceState, employees: u64, cfg: &EconomyConfig) -> ActionOutcome {
    let required = WorkforceState::required_staff(workforce.factory_count, cfg.min_staff_per_factory);
    if employees < required {
        return reject("set_employee_count", RejectReason::BelowMinimumStaffing);
    }
    workforce.employee_count = employees;
    ActionOutcome::Applied
}

pub fn set_salary_policy(workforce: &mut WorkforceState, policy: SalaryPolicy) {
    workforce.salary_policy = policy;
}
