//! Read/write seams the orchestrator uses to reach each ledger.

use rust_decimal::Decimal;

use crate::product::{Product, ProductId};

/// Products visible to the simulation.
pub trait ProductSource {
    /// Products whose status is active, in ledger order.
    fn list_active_products(&self) -> Vec<Product>;
    /// Overwrite a product's inventory. Unknown ids are ignored.
    fn update_product_inventory(&mut self, id: &ProductId, inventory: u64);
}

/// Headcount and factory figures.
pub trait WorkforceSource {
    fn get_employee_count(&self) -> u64;
    fn get_factory_count(&self) -> u64;
}

/// Points awarded by one processed quarter of research.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResearchOutcome {
    pub rp_awarded: u64,
}

/// Research department, invoked once per processed quarter.
pub trait ResearchSource {
    fn process_quarter(&mut self) -> ResearchOutcome;
    fn researcher_count(&self) -> u64;
    fn current_points(&self) -> u64;
}

/// Partner upkeep, if the player has a partner who costs money.
pub trait PartnerSource {
    fn get_partner_upkeep(&self) -> Option<Decimal>;
}
