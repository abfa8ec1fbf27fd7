//! Company financial state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Revenue and expense totals of the most recent advance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleFinancials {
    /// Months covered by the advance.
    pub months: u32,
    /// Sales revenue booked by the advance.
    pub revenue: Decimal,
    /// Operating plus company-level costs.
    pub expenses: Decimal,
    /// Revenue minus expenses; negative on a loss.
    pub net_profit: Decimal,
}

/// Financial state of the player's company.
///
/// `capital` is signed: a negative value means the company is bankrupt.
/// `valuation` is always `capital * multiplier` and is only written through
/// [`CompanyLedger::set_capital`] or [`CompanyLedger::revalue`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyLedger {
    /// Company name.
    pub name: String,
    /// Cash on the company books.
    pub capital: Decimal,
    /// Derived company worth.
    #[serde(default)]
    pub valuation: Decimal,
    /// Outstanding debt.
    #[serde(default)]
    pub debt_total: Decimal,
    /// Player's ownership share in percent, within [0,100].
    pub ownership_pct: Decimal,
    /// Snapshot of the last advance.
    #[serde(default)]
    pub last_cycle: CycleFinancials,
}

impl CompanyLedger {
    /// Create a ledger and derive its valuation.
    pub fn new(name: impl Into<String>, capital: Decimal, multiplier: Decimal) -> Result<Self, ValidationError> {
        let mut ledger = Self {
            name: name.into(),
            capital: Decimal::ZERO,
            valuation: Decimal::ZERO,
            debt_total: Decimal::ZERO,
            ownership_pct: Decimal::ONE_HUNDRED,
            last_cycle: CycleFinancials::default(),
        };
        ledger.set_capital(capital, multiplier)?;
        Ok(ledger)
    }

    /// Replace capital and its valuation together. On overflow the ledger is
    /// left as it was.
    pub fn set_capital(&mut self, capital: Decimal, multiplier: Decimal) -> Result<(), ValidationError> {
        self.valuation = valuation_of(capital, multiplier)?;
        self.capital = capital;
        Ok(())
    }

    /// Recompute valuation from capital.
    pub fn revalue(&mut self, multiplier: Decimal) -> Result<(), ValidationError> {
        self.set_capital(self.capital, multiplier)
    }

    pub fn is_bankrupt(&self) -> bool {
        self.capital < Decimal::ZERO
    }

    /// The player's share of the company valuation.
    pub fn owner_share(&self) -> Result<Decimal, ValidationError> {
        self.valuation
            .checked_mul(self.ownership_pct)
            .map(|v| v / Decimal::ONE_HUNDRED)
            .ok_or(ValidationError::Overflow("owner share"))
    }
}

/// Company worth at `capital`.
pub fn valuation_of(capital: Decimal, multiplier: Decimal) -> Result<Decimal, ValidationError> {
    capital
        .checked_mul(multiplier)
        .ok_or(ValidationError::Overflow("company valuation"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valuation_tracks_capital() {
        let mut c = CompanyLedger::new("Acme", Decimal::new(1000, 0), Decimal::new(15, 1)).unwrap();
        assert_eq!(c.valuation, Decimal::new(1500, 0));
        c.capital = Decimal::new(-200, 0);
        c.revalue(Decimal::new(15, 1)).unwrap();
        assert_eq!(c.valuation, Decimal::new(-300, 0));
        assert!(c.is_bankrupt());
    }

    #[test]
    fn overflowing_capital_leaves_ledger_alone() {
        let mut c = CompanyLedger::new("Acme", Decimal::new(1000, 0), Decimal::new(15, 1)).unwrap();
        assert_eq!(
            c.set_capital(Decimal::MAX, Decimal::new(15, 1)),
            Err(ValidationError::Overflow("company valuation"))
        );
        assert_eq!(c.capital, Decimal::new(1000, 0));
        assert_eq!(c.valuation, Decimal::new(1500, 0));
        assert!(CompanyLedger::new("Huge", Decimal::MAX, Decimal::new(2, 0)).is_err());
    }

    #[test]
    fn owner_share_uses_percentage() {
        let mut c = CompanyLedger::new("Acme", Decimal::new(1000, 0), Decimal::ONE).unwrap();
        c.ownership_pct = Decimal::new(40, 0);
        assert_eq!(c.owner_share(), Ok(Decimal::new(400, 0)));
    }
}
