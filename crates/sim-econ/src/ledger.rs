//! Company expense aggregation, settlement, and personal cash flow.
//!
//! Every sum and product here is checked; an unrepresentable figure comes
//! back as [`ValidationError::Overflow`] before any ledger is written.

use rust_decimal::Decimal;
use serde::Serialize;
use sim_core::{valuation_of, CompanyLedger, EconomyConfig, PlayerLedger, ValidationError};

use crate::production::ProductionTotals;

/// Company-level cost centers for one advance.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CompanyCosts {
    /// Per-factory overhead for each whole quarter.
    pub factory_overhead: Decimal,
    /// Researcher payroll for each whole quarter.
    pub research_salaries: Decimal,
    /// Fixed company expense for each month.
    pub fixed_expenses: Decimal,
    /// Interest on outstanding debt for each month.
    pub debt_interest: Decimal,
}

fn overflow(what: &'static str) -> ValidationError {
    ValidationError::Overflow(what)
}

fn sum(parts: &[Decimal], what: &'static str) -> Result<Decimal, ValidationError> {
    parts
        .iter()
        .try_fold(Decimal::ZERO, |total, part| total.checked_add(*part).ok_or_else(|| overflow(what)))
}

fn product(parts: &[Decimal], what: &'static str) -> Result<Decimal, ValidationError> {
    parts
        .iter()
        .try_fold(Decimal::ONE, |total, part| total.checked_mul(*part).ok_or_else(|| overflow(what)))
}

impl CompanyCosts {
    pub fn total(&self) -> Result<Decimal, ValidationError> {
        sum(
            &[
                self.factory_overhead,
                self.research_salaries,
                self.fixed_expenses,
                self.debt_interest,
            ],
            "company costs",
        )
    }
}

/// Cost centers that do not depend on production.
///
/// Factory overhead and research salaries accrue per whole quarter; fixed
/// expenses and interest accrue per month. Together with COGS, marketing and
/// storage these make up total expenses:
///
/// `cogs + marketing + storage + overhead + research + fixed + interest`
///
/// Partner upkeep is not part of that sum. It is the player's own cost and is
/// charged in [`personal_cash_flow`].
pub fn company_costs(
    factories: u64,
    researchers: u64,
    debt_total: Decimal,
    months: u32,
    quarters: u64,
    cfg: &EconomyConfig,
) -> Result<CompanyCosts, ValidationError> {
    let q = Decimal::from(quarters);
    let m = Decimal::from(months);
    let interest = product(&[debt_total, cfg.debt_annual_rate, m], "debt interest")?;
    Ok(CompanyCosts {
        factory_overhead: product(
            &[Decimal::from(factories), cfg.factory_overhead_per_quarter, q],
            "factory overhead",
        )?,
        research_salaries: product(
            &[Decimal::from(researchers), cfg.researcher_salary_per_quarter, q],
            "research salaries",
        )?,
        fixed_expenses: product(&[cfg.fixed_monthly_expense, m], "fixed expenses")?,
        debt_interest: interest / Decimal::from(12u32),
    })
}

/// Outcome of booking one advance against the company.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Settlement {
    /// Sales revenue.
    pub total_revenue: Decimal,
    /// Operating costs plus company cost centers.
    pub total_expenses: Decimal,
    /// Revenue minus expenses.
    pub net_profit: Decimal,
    /// Capital after booking the result; may be negative.
    pub capital: Decimal,
    /// Valuation at the new capital.
    pub valuation: Decimal,
    /// Capital fell below zero.
    pub bankrupt: bool,
}

/// Combine production results and company costs into the new capital.
pub fn settle_company(
    previous_capital: Decimal,
    production: &ProductionTotals,
    costs: &CompanyCosts,
    cfg: &EconomyConfig,
) -> Result<Settlement, ValidationError> {
    let total_expenses = sum(&[production.operating_costs()?, costs.total()?], "total expenses")?;
    let net_profit = production
        .revenue
        .checked_sub(total_expenses)
        .ok_or_else(|| overflow("net profit"))?;
    let capital = previous_capital
        .checked_add(net_profit)
        .ok_or_else(|| overflow("company capital"))?;
    Ok(Settlement {
        total_revenue: production.revenue,
        total_expenses,
        net_profit,
        capital,
        valuation: valuation_of(capital, cfg.valuation_multiplier)?,
        bankrupt: capital < Decimal::ZERO,
    })
}

/// Personal income and expenses for one advance.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PersonalCashFlow {
    /// Salary plus bond coupons per month.
    pub monthly_income: Decimal,
    /// Living costs plus partner upkeep per month.
    pub monthly_expenses: Decimal,
    /// Income over the whole advance.
    pub income: Decimal,
    /// Expenses over the whole advance.
    pub expenses: Decimal,
}

impl PersonalCashFlow {
    /// Both sides are non-negative, so the difference always fits.
    pub fn net(&self) -> Decimal {
        self.income - self.expenses
    }
}

/// The player's own cash flow, independent of the company result.
///
/// Income is salary plus bond coupons; expenses are living costs plus any
/// partner upkeep. Missing salary or living costs use configured defaults.
pub fn personal_cash_flow(
    player: &PlayerLedger,
    partner_upkeep: Option<Decimal>,
    months: u32,
    cfg: &EconomyConfig,
) -> Result<PersonalCashFlow, ValidationError> {
    let salary = player.monthly_salary.unwrap_or(cfg.default_player_salary);
    let living = player
        .monthly_living_expenses
        .unwrap_or(cfg.default_living_expenses);
    let upkeep = partner_upkeep.unwrap_or(Decimal::ZERO).max(Decimal::ZERO);
    let monthly_income = sum(&[salary, player.monthly_coupons()?], "personal income")?;
    let monthly_expenses = sum(&[living, upkeep], "personal expenses")?;
    let m = Decimal::from(months);
    Ok(PersonalCashFlow {
        monthly_income,
        monthly_expenses,
        income: product(&[monthly_income, m], "personal income")?,
        expenses: product(&[monthly_expenses, m], "personal expenses")?,
    })
}

/// Cash plus asset values plus the owned share of the company.
pub fn net_worth(player: &PlayerLedger, company: &CompanyLedger) -> Result<Decimal, ValidationError> {
    sum(
        &[player.cash, player.holdings_value()?, company.owner_share()?],
        "net worth",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{AssetKind, Holding};

    #[test]
    fn costs_scale_by_quarter_and_month() {
        let cfg = EconomyConfig::default();
        let c = company_costs(5, 2, Decimal::new(120_000, 0), 3, 1, &cfg).unwrap();
        assert_eq!(c.factory_overhead, Decimal::new(125_000, 0));
        assert_eq!(c.research_salaries, Decimal::new(36_000, 0));
        assert_eq!(c.fixed_expenses, Decimal::new(15_000, 0));
        assert_eq!(c.debt_interest, Decimal::new(2_400, 0));
        assert_eq!(c.total(), Ok(Decimal::new(178_400, 0)));
    }

    #[test]
    fn partial_quarter_skips_quarterly_centers() {
        let cfg = EconomyConfig::default();
        let c = company_costs(5, 2, Decimal::ZERO, 2, 0, &cfg).unwrap();
        assert_eq!(c.factory_overhead, Decimal::ZERO);
        assert_eq!(c.research_salaries, Decimal::ZERO);
        assert_eq!(c.fixed_expenses, Decimal::new(10_000, 0));
    }

    #[test]
    fn settlement_goes_negative_without_clamping() {
        let cfg = EconomyConfig::default();
        let production = ProductionTotals {
            revenue: Decimal::new(500, 0),
            cogs: Decimal::new(200, 0),
            ..Default::default()
        };
        let costs = CompanyCosts {
            fixed_expenses: Decimal::new(2_000, 0),
            ..Default::default()
        };
        let s = settle_company(Decimal::new(1_000, 0), &production, &costs, &cfg).unwrap();
        assert_eq!(s.total_expenses, Decimal::new(2_200, 0));
        assert_eq!(s.net_profit, Decimal::new(-1_700, 0));
        assert_eq!(s.capital, Decimal::new(-700, 0));
        assert_eq!(s.valuation, Decimal::new(-1_050, 0));
        assert!(s.bankrupt);
    }

    #[test]
    fn personal_flow_uses_defaults_and_upkeep() {
        let cfg = EconomyConfig::default();
        let mut p = PlayerLedger::new("Sam", Decimal::ZERO, 25);
        p.holdings.push(Holding {
            symbol: "GOV10".into(),
            kind: AssetKind::Bond,
            units: Decimal::new(10, 0),
            unit_value: Decimal::new(1_200, 0),
            annual_coupon_rate: Decimal::new(5, 2),
        });
        let f = personal_cash_flow(&p, Some(Decimal::new(400, 0)), 3, &cfg).unwrap();
        assert_eq!(f.monthly_income, Decimal::new(3_050, 0));
        assert_eq!(f.monthly_expenses, Decimal::new(1_900, 0));
        assert_eq!(f.income, Decimal::new(9_150, 0));
        assert_eq!(f.expenses, Decimal::new(5_700, 0));
        assert_eq!(f.net(), Decimal::new(3_450, 0));
    }

    #[test]
    fn net_worth_combines_parts() {
        let mut p = PlayerLedger::new("Sam", Decimal::new(1_000, 0), 25);
        p.holdings.push(Holding {
            symbol: "ACME".into(),
            kind: AssetKind::Stock,
            units: Decimal::new(4, 0),
            unit_value: Decimal::new(50, 0),
            annual_coupon_rate: Decimal::ZERO,
        });
        let mut c = CompanyLedger::new("Acme", Decimal::new(10_000, 0), Decimal::new(15, 1)).unwrap();
        c.ownership_pct = Decimal::new(50, 0);
        assert_eq!(net_worth(&p, &c), Ok(Decimal::new(8_700, 0)));
    }

    #[test]
    fn upkeep_stays_out_of_company_costs() {
        let cfg = EconomyConfig::default();
        let c = company_costs(1, 0, Decimal::ZERO, 3, 1, &cfg).unwrap();
        assert_eq!(c.total(), Ok(Decimal::new(40_000, 0)));
        let p = PlayerLedger::new("Sam", Decimal::ZERO, 25);
        let f = personal_cash_flow(&p, Some(Decimal::new(500, 0)), 3, &cfg).unwrap();
        assert_eq!(f.expenses, Decimal::new(6_000, 0));
    }

    #[test]
    fn settlement_overflow_is_reported() {
        let cfg = EconomyConfig::default();
        let production = ProductionTotals {
            revenue: Decimal::MAX,
            ..Default::default()
        };
        assert_eq!(
            settle_company(Decimal::MAX, &production, &CompanyCosts::default(), &cfg),
            Err(ValidationError::Overflow("company capital"))
        );
        // capital fits but its valuation does not
        assert_eq!(
            settle_company(Decimal::ZERO, &production, &CompanyCosts::default(), &cfg),
            Err(ValidationError::Overflow("company valuation"))
        );
    }

    #[test]
    fn huge_debt_interest_is_reported() {
        let cfg = EconomyConfig::default();
        assert_eq!(
            company_costs(0, 0, Decimal::MAX, 1200, 400, &cfg),
            Err(ValidationError::Overflow("debt interest"))
        );
    }
}
