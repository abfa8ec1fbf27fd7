//! Products and the ledger that owns them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::sources::ProductSource;
use crate::ValidationError;

/// Unique product identifier, e.g. "widget-mk1".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a product. Only `Active` products are simulated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// In production and on sale.
    #[default]
    Active,
    /// Designed but not yet released.
    Development,
    /// Pulled from the market.
    Discontinued,
}

/// One manufacturable, sellable good.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Lifecycle state.
    #[serde(default)]
    pub status: ProductStatus,
    /// Production cost per unit.
    pub unit_cost: Decimal,
    /// Selling price per unit.
    pub selling_price: Decimal,
    /// Effort divisor for production capacity (> 0; non-positive falls back to default).
    pub complexity: Decimal,
    /// Units on hand.
    #[serde(default)]
    pub inventory: u64,
    /// Factory utilization percent, clamped to [0,100] when used.
    pub production_level: Decimal,
    /// Market demand percent, clamped to [0,100] when used.
    pub market_demand: Decimal,
    /// Marketing spend per unit sold.
    #[serde(default)]
    pub marketing_spend_per_unit: Decimal,
}

impl Product {
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }

    /// Utilization as a fraction in [0,1].
    pub fn utilization(&self) -> Decimal {
        percent_to_fraction(self.production_level)
    }

    /// Market demand as a fraction in [0,1].
    pub fn demand(&self) -> Decimal {
        percent_to_fraction(self.market_demand)
    }
}

fn percent_to_fraction(pct: Decimal) -> Decimal {
    pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED) / Decimal::ONE_HUNDRED
}

/// Owns every product the company has designed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductLedger {
    products: Vec<Product>,
}

impl ProductLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product; ids must be unique.
    pub fn insert(&mut self, product: Product) -> Result<(), ValidationError> {
        if self.get(&product.id).is_some() {
            return Err(ValidationError::DuplicateProduct(product.id.0));
        }
        crate::validate_product(&product)?;
        self.products.push(product);
        Ok(())
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Remove every product. Used by a full game reset.
    pub fn clear(&mut self) {
        self.products.clear();
    }
}

impl ProductSource for ProductLedger {
    fn list_active_products(&self) -> Vec<Product> {
        self.products.iter().filter(|p| p.is_active()).cloned().collect()
    }

    fn update_product_inventory(&mut self, id: &ProductId, inventory: u64) {
        if let Some(p) = self.products.iter_mut().find(|p| &p.id == id) {
            p.inventory = inventory;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(id: &str, status: ProductStatus) -> Product {
        Product {
            id: ProductId(id.to_string()),
            name: id.to_uppercase(),
            status,
            unit_cost: Decimal::new(10, 0),
            selling_price: Decimal::new(25, 0),
            complexity: Decimal::new(50, 0),
            inventory: 0,
            production_level: Decimal::new(50, 0),
            market_demand: Decimal::new(50, 0),
            marketing_spend_per_unit: Decimal::new(5, 0),
        }
    }

    #[test]
    fn lists_only_active_products() {
        let mut ledger = ProductLedger::new();
        ledger.insert(widget("a", ProductStatus::Active)).unwrap();
        ledger.insert(widget("b", ProductStatus::Development)).unwrap();
        ledger.insert(widget("c", ProductStatus::Discontinued)).unwrap();
        let active = ledger.list_active_products();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id.0, "a");
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut ledger = ProductLedger::new();
        ledger.insert(widget("a", ProductStatus::Active)).unwrap();
        assert_eq!(
            ledger.insert(widget("a", ProductStatus::Active)),
            Err(ValidationError::DuplicateProduct("a".to_string()))
        );
    }

    #[test]
    fn inventory_update_targets_one_product() {
        let mut ledger = ProductLedger::new();
        ledger.insert(widget("a", ProductStatus::Active)).unwrap();
        ledger.insert(widget("b", ProductStatus::Active)).unwrap();
        ledger.update_product_inventory(&ProductId("b".into()), 77);
        assert_eq!(ledger.get(&ProductId("a".into())).unwrap().inventory, 0);
        assert_eq!(ledger.get(&ProductId("b".into())).unwrap().inventory, 77);
    }

    #[test]
    fn percentages_clamp_to_fractions() {
        let mut p = widget("a", ProductStatus::Active);
        p.production_level = Decimal::new(150, 0);
        p.market_demand = Decimal::new(-20, 0);
        assert_eq!(p.utilization(), Decimal::ONE);
        assert_eq!(p.demand(), Decimal::ZERO);
    }

    #[test]
    fn status_serializes_lowercase() {
        let s = serde_json::to_string(&ProductStatus::Active).unwrap();
        assert_eq!(s, "\"active\"");
    }
}
