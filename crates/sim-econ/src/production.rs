//! Quarterly production and sales for active products.
//!
//! Per product and per advance covering `quarters` whole quarters:
//! - capacity = floor(employees * base_output / complexity)
//! - production = floor(capacity * utilization * quarters)
//! - potential sales = floor(available * demand * sales_rate), where the
//!   sales rate blends an organic baseline with marketing efficiency
//! - low morale removes a share of potential sales as lost units
//! - sales never exceed available goods; the rest carries over as inventory
//!
//! An advance shorter than one quarter produces and sells nothing.
//!
//! Unit counts and money are computed with checked arithmetic. A figure that
//! does not fit is reported as [`ValidationError::Overflow`] rather than
//! clamped, so inventory is always conserved exactly.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use sim_core::{EconomyConfig, Morale, Product, ProductId, ValidationError};
use tracing::debug;

/// Result of simulating one product for one advance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductOutcome {
    /// Product simulated.
    pub id: ProductId,
    /// Units made during the advance.
    pub production: u64,
    /// Opening inventory plus production.
    pub available: u64,
    /// Potential sales before the morale penalty.
    pub potential_sales: u64,
    /// Sales lost to low morale.
    pub lost_units: u64,
    /// Revenue those lost units would have brought in.
    pub lost_revenue: Decimal,
    /// Units sold.
    pub sales: u64,
    /// Units left on hand; written back to the product.
    pub new_inventory: u64,
    /// Selling price times units sold.
    pub revenue: Decimal,
    /// Unit cost times units produced.
    pub cogs: Decimal,
    /// Marketing spend per unit times units sold.
    pub marketing_cost: Decimal,
    /// Holding cost of the closing inventory.
    pub storage_cost: Decimal,
}

/// Aggregates across every simulated product.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProductionTotals {
    /// Units made.
    pub production: u64,
    /// Units sold.
    pub sales: u64,
    /// Sales revenue.
    pub revenue: Decimal,
    /// Cost of goods produced.
    pub cogs: Decimal,
    /// Marketing spend.
    pub marketing_cost: Decimal,
    /// Inventory holding cost.
    pub storage_cost: Decimal,
    /// Sales lost to low morale.
    pub lost_units: u64,
    /// Revenue lost to low morale.
    pub lost_revenue: Decimal,
    /// Units on hand after the advance.
    pub ending_inventory: u64,
}

fn overflow(what: &'static str) -> ValidationError {
    ValidationError::Overflow(what)
}

fn add_units(a: u64, b: u64, what: &'static str) -> Result<u64, ValidationError> {
    a.checked_add(b).ok_or_else(|| overflow(what))
}

fn add_money(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, ValidationError> {
    a.checked_add(b).ok_or_else(|| overflow(what))
}

fn mul_money(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, ValidationError> {
    a.checked_mul(b).ok_or_else(|| overflow(what))
}

impl ProductionTotals {
    /// Costs that come straight out of production and sales.
    pub fn operating_costs(&self) -> Result<Decimal, ValidationError> {
        let costs = add_money(self.cogs, self.marketing_cost, "operating costs")?;
        add_money(costs, self.storage_cost, "operating costs")
    }

    fn add(&mut self, o: &ProductOutcome) -> Result<(), ValidationError> {
        self.production = add_units(self.production, o.production, "total production")?;
        self.sales = add_units(self.sales, o.sales, "total sales")?;
        self.revenue = add_money(self.revenue, o.revenue, "total revenue")?;
        self.cogs = add_money(self.cogs, o.cogs, "total cost of goods")?;
        self.marketing_cost = add_money(self.marketing_cost, o.marketing_cost, "total marketing cost")?;
        self.storage_cost = add_money(self.storage_cost, o.storage_cost, "total storage cost")?;
        self.lost_units = add_units(self.lost_units, o.lost_units, "total lost units")?;
        self.lost_revenue = add_money(self.lost_revenue, o.lost_revenue, "total lost revenue")?;
        self.ending_inventory = add_units(self.ending_inventory, o.new_inventory, "total inventory")?;
        Ok(())
    }
}

/// Units lost to low morale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoralePenalty {
    /// Potential sales that did not happen.
    pub lost_units: u64,
    /// Their value at the selling price.
    pub lost_revenue: Decimal,
}

/// Floor a decimal to whole units; negatives become zero.
fn floor_units(d: Decimal, what: &'static str) -> Result<u64, ValidationError> {
    if d <= Decimal::ZERO {
        return Ok(0);
    }
    d.floor().to_u64().ok_or_else(|| overflow(what))
}

/// Units one quarter at full utilization can produce.
pub fn capacity(employees: u64, complexity: Decimal, cfg: &EconomyConfig) -> Result<u64, ValidationError> {
    let divisor = if complexity <= Decimal::ZERO {
        cfg.default_complexity
    } else {
        complexity
    };
    let effort = mul_money(
        Decimal::from(employees),
        Decimal::from(cfg.base_output_per_employee),
        "capacity",
    )?;
    let units = effort.checked_div(divisor).ok_or_else(|| overflow("capacity"))?;
    floor_units(units, "capacity")
}

/// Share of the marketing saturation point a per-unit spend reaches, in [0,1].
pub fn marketing_efficiency(spend_per_unit: Decimal, selling_price: Decimal, cfg: &EconomyConfig) -> Decimal {
    let saturation = (selling_price * cfg.saturation_fraction).max(Decimal::ONE);
    (spend_per_unit.max(Decimal::ZERO) / saturation).min(Decimal::ONE)
}

/// Fraction of demanded goods that actually sell.
pub fn sales_rate(efficiency: Decimal, cfg: &EconomyConfig) -> Decimal {
    let organic = cfg.organic_sales_factor;
    organic + (Decimal::ONE - organic) * efficiency
}

pub fn is_low_morale(morale: Morale, cfg: &EconomyConfig) -> bool {
    morale.value() < cfg.low_morale_threshold
}

/// Share of potential sales lost at the given morale; zero at or above the threshold.
pub fn morale_penalty_ratio(morale: Morale, cfg: &EconomyConfig) -> Decimal {
    if !is_low_morale(morale, cfg) {
        return Decimal::ZERO;
    }
    let threshold = Decimal::from(cfg.low_morale_threshold);
    let gap = threshold - Decimal::from(morale.value());
    gap / threshold * cfg.max_morale_penalty
}

/// Units and revenue lost from `potential_sales` at the given morale.
pub fn morale_penalty(
    potential_sales: u64,
    selling_price: Decimal,
    morale: Morale,
    cfg: &EconomyConfig,
) -> Result<MoralePenalty, ValidationError> {
    let ratio = morale_penalty_ratio(morale, cfg);
    let lost_units = floor_units(Decimal::from(potential_sales) * ratio, "lost units")?.min(potential_sales);
    Ok(MoralePenalty {
        lost_units,
        lost_revenue: mul_money(Decimal::from(lost_units), selling_price, "lost revenue")?,
    })
}

/// Simulate one product over `quarters` whole quarters.
pub fn simulate_product(
    product: &Product,
    employees: u64,
    morale: Morale,
    quarters: u64,
    cfg: &EconomyConfig,
) -> Result<ProductOutcome, ValidationError> {
    let previous = product.inventory;
    if quarters == 0 {
        return Ok(ProductOutcome {
            id: product.id.clone(),
            production: 0,
            available: previous,
            potential_sales: 0,
            lost_units: 0,
            lost_revenue: Decimal::ZERO,
            sales: 0,
            new_inventory: previous,
            revenue: Decimal::ZERO,
            cogs: Decimal::ZERO,
            marketing_cost: Decimal::ZERO,
            storage_cost: Decimal::ZERO,
        });
    }

    let raw_capacity = capacity(employees, product.complexity, cfg)?;
    let per_quarter = Decimal::from(raw_capacity) * product.utilization();
    let production = floor_units(
        mul_money(per_quarter, Decimal::from(quarters), "production")?,
        "production",
    )?;
    let available = add_units(previous, production, "available goods")?;

    let efficiency = marketing_efficiency(product.marketing_spend_per_unit, product.selling_price, cfg);
    let rate = sales_rate(efficiency, cfg);
    let potential_sales = floor_units(Decimal::from(available) * product.demand() * rate, "potential sales")?;

    let penalty = morale_penalty(potential_sales, product.selling_price, morale, cfg)?;
    let sales = available.min(potential_sales - penalty.lost_units);
    let new_inventory = available - sales;

    let sold = Decimal::from(sales);
    let storage_per_quarter = mul_money(Decimal::from(new_inventory), cfg.storage_cost_per_unit, "storage cost")?;
    let outcome = ProductOutcome {
        id: product.id.clone(),
        production,
        available,
        potential_sales,
        lost_units: penalty.lost_units,
        lost_revenue: penalty.lost_revenue,
        sales,
        new_inventory,
        revenue: mul_money(product.selling_price, sold, "revenue")?,
        cogs: mul_money(product.unit_cost, Decimal::from(production), "cost of goods")?,
        marketing_cost: mul_money(product.marketing_spend_per_unit, sold, "marketing cost")?,
        storage_cost: mul_money(storage_per_quarter, Decimal::from(quarters), "storage cost")?,
    };
    debug!(
        product = %outcome.id,
        production = outcome.production,
        sales = outcome.sales,
        inventory = outcome.new_inventory,
        lost = outcome.lost_units,
        "product simulated"
    );
    Ok(outcome)
}

/// Simulate every product in `products` (callers pass only active ones).
pub fn simulate_products(
    products: &[Product],
    employees: u64,
    morale: Morale,
    quarters: u64,
    cfg: &EconomyConfig,
) -> Result<(Vec<ProductOutcome>, ProductionTotals), ValidationError> {
    let mut totals = ProductionTotals::default();
    let outcomes = products
        .iter()
        .map(|p| simulate_product(p, employees, morale, quarters, cfg))
        .collect::<Result<Vec<_>, _>>()?;
    for o in &outcomes {
        totals.add(o)?;
    }
    Ok((outcomes, totals))
}
