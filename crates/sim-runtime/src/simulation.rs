//! Advance-time orchestration.
//!
//! [`Simulation`] owns the game ledgers behind a single lock. Every entry
//! point takes the lock with `try_lock`, so a call that overlaps an advance in
//! flight is turned away with [`SimError::Busy`] instead of interleaving its
//! reads and writes with the running cycle.
//!
//! An advance runs in two phases. Planning computes every figure against
//! staged copies of the company and player ledgers and can fail; committing
//! writes the results and cannot. Observers are called once the lock has been
//! released.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use sim_core::{
    validate_months, CompanyLedger, CycleFinancials, EconomyConfig, Morale, PartnerSource, PlayerLedger, Product,
    ProductSource, ResearchSource, SalaryPolicy, SimConfig, ValidationError, WorkforceSource,
};
use sim_econ::{
    calendar, ledger, lifestyle, morale, production, quarters_in, ActionOutcome, PersonalCashFlow, ProductOutcome,
    ProductionTotals, Settlement,
};
use std::sync::{Mutex, MutexGuard, TryLockError};
use tracing::{info, warn};

use crate::hooks::{Notification, NotificationSink, PostCommitHook};
use crate::report::{CompanyStatus, QuarterlyReport, ReportData};
use crate::setback;
use crate::state::GameState;
use crate::SimError;

struct Inner {
    state: GameState,
    rng: ChaCha8Rng,
}

/// Every figure of one advance, computed before anything is written.
struct Cycle {
    months: u32,
    quarters: u64,
    starting_morale: Morale,
    lines: Vec<ProductOutcome>,
    totals: ProductionTotals,
    settlement: Settlement,
    cash_flow: PersonalCashFlow,
    player: PlayerLedger,
    company: CompanyLedger,
}

/// Observer work queued while the lock was held.
struct Delivery {
    events: Vec<Notification>,
    committed: Option<(GameState, Settlement)>,
}

/// The advance-time entry point and the management actions around it.
pub struct Simulation {
    config: SimConfig,
    inner: Mutex<Inner>,
    sinks: Vec<Box<dyn NotificationSink>>,
    hooks: Vec<Box<dyn PostCommitHook>>,
}

impl Simulation {
    /// Build a simulation over `state`, rejecting bad config or state.
    pub fn new(config: SimConfig, state: GameState) -> Result<Self, SimError> {
        config.economy.validate()?;
        state.validate(&config.economy)?;
        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        Ok(Self {
            config,
            inner: Mutex::new(Inner { state, rng }),
            sinks: Vec::new(),
            hooks: Vec::new(),
        })
    }

    /// A simulation over a fresh game.
    pub fn new_game(config: SimConfig) -> Result<Self, SimError> {
        let state = GameState::new_game(&config.economy)?;
        Self::new(config, state)
    }

    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn with_hook(mut self, hook: impl PostCommitHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, SimError> {
        match self.inner.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::WouldBlock) => Err(SimError::Busy),
            Err(TryLockError::Poisoned(_)) => Err(SimError::Poisoned),
        }
    }

    /// Copy of the current ledgers.
    pub fn snapshot(&self) -> Result<GameState, SimError> {
        Ok(self.lock()?.state.clone())
    }

    /// Advance game time by `months` (a quarter when `None`).
    ///
    /// Input and state are validated and every figure is computed before
    /// anything is written; on error no ledger changes. Bankruptcy is not an
    /// error: it comes back as [`CompanyStatus::Bankrupt`] with the ledgers
    /// fully updated. Sinks and hooks run after the lock is released.
    pub fn advance_months(&self, months: Option<i64>) -> Result<QuarterlyReport, SimError> {
        let months = validate_months(months)?;
        let (report, delivery) = {
            let mut guard = self.lock()?;
            let Inner { state, rng } = &mut *guard;
            state.validate(&self.config.economy)?;
            let cycle = plan_cycle(state, months, &self.config.economy)?;
            self.commit_cycle(state, rng, cycle)
        };
        self.deliver(delivery);
        Ok(report)
    }

    fn commit_cycle(&self, state: &mut GameState, rng: &mut ChaCha8Rng, cycle: Cycle) -> (QuarterlyReport, Delivery) {
        let cfg = &self.config.economy;
        let Cycle {
            months,
            quarters,
            starting_morale,
            lines,
            totals,
            settlement,
            cash_flow,
            player,
            company,
        } = cycle;

        for line in &lines {
            state.products.update_product_inventory(&line.id, line.new_inventory);
        }
        let mut rp_awarded = 0u64;
        for _ in 0..quarters {
            rp_awarded = rp_awarded.saturating_add(state.research.process_quarter().rp_awarded);
        }
        state.player = player;
        state.company = company;

        let mut events = vec![Notification::MonthAdvanced {
            month: state.player.month,
            age: state.player.age,
        }];
        // One reason per cycle even though every product took the hit.
        let setback_message = (quarters > 0 && production::is_low_morale(starting_morale, cfg))
            .then(|| setback::message(setback::pick_reason(rng), totals.lost_units, totals.lost_revenue));
        if let Some(message) = &setback_message {
            warn!(lost_units = totals.lost_units, %message, "operational setback");
            events.push(Notification::OperationalSetback {
                message: message.clone(),
            });
        }
        let bankruptcy_reason = settlement.bankrupt.then(|| {
            format!(
                "company capital fell to ${} after a net result of ${}",
                settlement.capital, settlement.net_profit
            )
        });
        if let Some(reason) = &bankruptcy_reason {
            warn!(capital = %settlement.capital, "company bankrupt");
            events.push(Notification::Bankruptcy {
                reason: reason.clone(),
            });
        }

        if months >= 3 {
            morale::close_quarter(&mut state.workforce, quarters, settlement.net_profit, cfg);
            lifestyle::apply_attribute_drift(&mut state.player, state.partner.as_ref(), cfg);
            if let Some(program) = lifestyle::advance_education(&mut state.player, months, cfg) {
                events.push(Notification::EducationCompleted { program });
            }
            events.push(Notification::QuarterClosed {
                net_profit: settlement.net_profit,
            });
        }

        info!(
            months,
            quarters,
            production = totals.production,
            sales = totals.sales,
            rp_awarded,
            net_profit = %settlement.net_profit,
            capital = %settlement.capital,
            "advance complete"
        );

        let report = QuarterlyReport {
            status: if settlement.bankrupt {
                CompanyStatus::Bankrupt
            } else {
                CompanyStatus::Active
            },
            reason: bankruptcy_reason,
            data: ReportData {
                total_production: totals.production,
                total_sales: totals.sales,
                total_revenue: settlement.total_revenue,
                total_expenses: settlement.total_expenses,
                net_profit: settlement.net_profit,
                total_inventory: totals.ending_inventory,
                current_research_points: state.research.current_points(),
                operational_setback: setback_message.is_some(),
                setback_message: setback_message.unwrap_or_default(),
                lost_revenue: totals.lost_revenue,
                lost_units: totals.lost_units,
                player_cash: state.player.cash,
                company_capital: state.company.capital,
                player_net_worth: state.player.net_worth,
                player_income: cash_flow.income,
                player_expenses: cash_flow.expenses,
                company_valuation: state.company.valuation,
            },
        };
        let committed = (!self.hooks.is_empty()).then(|| (state.clone(), settlement));
        (report, Delivery { events, committed })
    }

    fn deliver(&self, delivery: Delivery) {
        for event in &delivery.events {
            for sink in &self.sinks {
                sink.notify(event);
            }
        }
        if let Some((state, settlement)) = &delivery.committed {
            for hook in &self.hooks {
                hook.after_commit(state, settlement);
            }
        }
    }

    /// Host a team event for the workforce.
    pub fn organize_event(&self, cost: Decimal, boost: u8) -> Result<ActionOutcome, SimError> {
        let mut guard = self.lock()?;
        let state = &mut guard.state;
        Ok(morale::organize_event(
            &mut state.workforce,
            &mut state.company,
            cost,
            boost,
            &self.config.economy,
        ))
    }

    /// Pay out a share of last quarter's profit.
    pub fn distribute_bonus(&self) -> Result<ActionOutcome, SimError> {
        let mut guard = self.lock()?;
        let state = &mut guard.state;
        Ok(morale::distribute_bonus(
            &mut state.workforce,
            &mut state.company,
            &self.config.economy,
        ))
    }

    pub fn set_factory_count(&self, factories: u64) -> Result<ActionOutcome, SimError> {
        let mut guard = self.lock()?;
        Ok(morale::set_factory_count(
            &mut guard.state.workforce,
            factories,
            &self.config.economy,
        ))
    }

    pub fn set_employee_count(&self, employees: u64) -> Result<ActionOutcome, SimError> {
        let mut guard = self.lock()?;
        Ok(morale::set_employee_count(
            &mut guard.state.workforce,
            employees,
            &self.config.economy,
        ))
    }

    pub fn set_salary_policy(&self, policy: SalaryPolicy) -> Result<(), SimError> {
        let mut guard = self.lock()?;
        morale::set_salary_policy(&mut guard.state.workforce, policy);
        Ok(())
    }

    /// Register a newly designed product.
    pub fn add_product(&self, product: Product) -> Result<(), SimError> {
        let mut guard = self.lock()?;
        guard.state.products.insert(product)?;
        Ok(())
    }

    /// Throw the game away and start over. The narrative RNG is re-seeded.
    pub fn reset(&self) -> Result<(), SimError> {
        let fresh = GameState::new_game(&self.config.economy)?;
        let mut guard = self.lock()?;
        guard.state = fresh;
        guard.rng = ChaCha8Rng::seed_from_u64(self.config.rng_seed);
        info!("game reset");
        Ok(())
    }
}

/// Compute one advance without touching `state`.
fn plan_cycle(state: &GameState, months: u32, cfg: &EconomyConfig) -> Result<Cycle, ValidationError> {
    let quarters = quarters_in(months);
    let starting_morale = state.workforce.morale;

    let active = state.products.list_active_products();
    let (lines, totals) = production::simulate_products(
        &active,
        state.workforce.get_employee_count(),
        starting_morale,
        quarters,
        cfg,
    )?;
    let costs = ledger::company_costs(
        state.workforce.get_factory_count(),
        state.research.researcher_count(),
        state.company.debt_total,
        months,
        quarters,
        cfg,
    )?;
    let settlement = ledger::settle_company(state.company.capital, &totals, &costs, cfg)?;
    let cash_flow = ledger::personal_cash_flow(
        &state.player,
        state.partner.get_partner_upkeep(),
        months,
        cfg,
    )?;

    let mut company = state.company.clone();
    company.capital = settlement.capital;
    company.valuation = settlement.valuation;
    company.last_cycle = CycleFinancials {
        months,
        revenue: settlement.total_revenue,
        expenses: settlement.total_expenses,
        net_profit: settlement.net_profit,
    };

    let mut player = state.player.clone();
    player.cash = player
        .cash
        .checked_add(cash_flow.net())
        .ok_or(ValidationError::Overflow("player cash"))?;
    player.monthly_income = cash_flow.monthly_income;
    player.monthly_expenses = cash_flow.monthly_expenses;
    let (month, age) = calendar::advance(player.month, player.age, months);
    player.month = month;
    player.age = age;
    player.monthly_actions.clear();
    player.net_worth = ledger::net_worth(&player, &company)?;

    Ok(Cycle {
        months,
        quarters,
        starting_morale,
        lines,
        totals,
        settlement,
        cash_flow,
        player,
        company,
    })
}
