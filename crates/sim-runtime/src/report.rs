//! The value handed back to the UI after each advance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether the company survived the advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Active,
    Bankrupt,
}

/// Figures produced by one advance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    /// Units made across active products.
    pub total_production: u64,
    /// Units sold across active products.
    pub total_sales: u64,
    /// Sales revenue.
    pub total_revenue: Decimal,
    /// Operating costs plus company cost centers.
    pub total_expenses: Decimal,
    /// Revenue minus expenses.
    pub net_profit: Decimal,
    /// Units left on hand across active products.
    pub total_inventory: u64,
    /// Research points accumulated so far.
    pub current_research_points: u64,
    /// Low morale cost sales this advance.
    pub operational_setback: bool,
    /// Empty when there was no setback.
    pub setback_message: String,
    /// Revenue lost to low morale.
    pub lost_revenue: Decimal,
    /// Sales lost to low morale.
    pub lost_units: u64,
    /// Player cash after the advance.
    pub player_cash: Decimal,
    /// Company capital after the advance; negative when bankrupt.
    pub company_capital: Decimal,
    /// Cash, holdings and owned company share.
    pub player_net_worth: Decimal,
    /// Personal income over the whole advance.
    pub player_income: Decimal,
    /// Personal expenses over the whole advance.
    pub player_expenses: Decimal,
    /// Company valuation at the new capital.
    pub company_valuation: Decimal,
}

/// Result of one advance. Not persisted; the ledgers are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyReport {
    /// Whether the company survived.
    pub status: CompanyStatus,
    /// Why the company went bankrupt; absent otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Figures of the advance.
    pub data: ReportData,
}

impl QuarterlyReport {
    pub fn is_bankrupt(&self) -> bool {
        self.status == CompanyStatus::Bankrupt
    }
}
