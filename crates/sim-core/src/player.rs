//! The player: personal finances, clock, attributes, assets and partner.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::sources::PartnerSource;
use crate::ValidationError;

/// Personal attributes, each within [0,100].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    /// Physical wellbeing.
    pub health: u8,
    /// Mood and life satisfaction.
    pub happiness: u8,
    /// Raised by completed education.
    pub smarts: u8,
    /// Appearance.
    pub looks: u8,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            health: 80,
            happiness: 70,
            smarts: 50,
            looks: 50,
        }
    }
}

/// Signed changes to [`Attributes`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeDeltas {
    pub health: i16,
    pub happiness: i16,
    pub smarts: i16,
    pub looks: i16,
}

fn shift(value: u8, delta: i16) -> u8 {
    i16::from(value).saturating_add(delta).clamp(0, 100) as u8
}

impl Attributes {
    /// Apply deltas, clamping each attribute to [0,100].
    pub fn apply(&mut self, d: &AttributeDeltas) {
        self.health = shift(self.health, d.health);
        self.happiness = shift(self.happiness, d.happiness);
        self.smarts = shift(self.smarts, d.smarts);
        self.looks = shift(self.looks, d.looks);
    }

    /// Lower every attribute by `amount`, stopping at zero.
    pub fn decay(&mut self, amount: u8) {
        let d = -i16::from(amount);
        self.apply(&AttributeDeltas {
            health: d,
            happiness: d,
            smarts: d,
            looks: d,
        });
    }
}

/// Kinds of investable assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Bond,
    Stock,
    Crypto,
}

/// A position in an investable asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker or name.
    pub symbol: String,
    /// Asset class; decides whether a coupon is paid.
    pub kind: AssetKind,
    /// Units held (>= 0).
    pub units: Decimal,
    /// Current value of one unit (>= 0).
    pub unit_value: Decimal,
    /// Annual coupon rate; only bonds pay it.
    #[serde(default)]
    pub annual_coupon_rate: Decimal,
}

impl Holding {
    pub fn value(&self) -> Result<Decimal, ValidationError> {
        self.units
            .checked_mul(self.unit_value)
            .ok_or(ValidationError::Overflow("holding value"))
    }

    /// Coupon paid into personal income each month.
    pub fn monthly_coupon(&self) -> Result<Decimal, ValidationError> {
        match self.kind {
            AssetKind::Bond => self
                .value()?
                .checked_mul(self.annual_coupon_rate)
                .map(|annual| annual / Decimal::from(12u32))
                .ok_or(ValidationError::Overflow("bond coupon")),
            AssetKind::Stock | AssetKind::Crypto => Ok(Decimal::ZERO),
        }
    }
}

/// An education program in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    /// Program name; becomes a degree on completion.
    pub program: String,
    /// Months studied so far.
    pub months_completed: u32,
    /// Months needed to finish.
    pub months_required: u32,
}

/// A romantic partner with a living cost and attribute effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    /// Partner's name.
    pub name: String,
    /// Monthly upkeep; `None` means the partner costs nothing.
    #[serde(default)]
    pub monthly_upkeep: Option<Decimal>,
    /// Applied to the player once per quarterly advance.
    #[serde(default)]
    pub buffs: AttributeDeltas,
}

impl PartnerSource for Option<Partner> {
    fn get_partner_upkeep(&self) -> Option<Decimal> {
        self.as_ref().and_then(|p| p.monthly_upkeep)
    }
}

/// Personal finances and the game clock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerLedger {
    pub name: String,
    /// Cash on hand.
    pub cash: Decimal,
    /// Cached snapshot; recomputed on every advance.
    #[serde(default)]
    pub net_worth: Decimal,
    /// Monthly salary; `None` falls back to the configured default.
    #[serde(default)]
    pub monthly_salary: Option<Decimal>,
    /// Monthly living costs; `None` falls back to the configured default.
    #[serde(default)]
    pub monthly_living_expenses: Option<Decimal>,
    /// Income per month as of the last advance.
    #[serde(default)]
    pub monthly_income: Decimal,
    /// Expenses per month as of the last advance.
    #[serde(default)]
    pub monthly_expenses: Decimal,
    /// Calendar month, 1..=12.
    pub month: u8,
    /// Age in years.
    pub age: u32,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(default)]
    pub education: Option<Education>,
    #[serde(default)]
    pub degrees: Vec<String>,
    /// Once-per-month actions already taken this month.
    #[serde(default)]
    pub monthly_actions: BTreeSet<String>,
}

impl PlayerLedger {
    /// A player starting out at `age` in January.
    pub fn new(name: impl Into<String>, cash: Decimal, age: u32) -> Self {
        Self {
            name: name.into(),
            cash,
            net_worth: cash,
            monthly_salary: None,
            monthly_living_expenses: None,
            monthly_income: Decimal::ZERO,
            monthly_expenses: Decimal::ZERO,
            month: 1,
            age,
            attributes: Attributes::default(),
            holdings: Vec::new(),
            education: None,
            degrees: Vec::new(),
            monthly_actions: BTreeSet::new(),
        }
    }

    pub fn holdings_value(&self) -> Result<Decimal, ValidationError> {
        self.holdings.iter().try_fold(Decimal::ZERO, |total, h| {
            total
                .checked_add(h.value()?)
                .ok_or(ValidationError::Overflow("holdings value"))
        })
    }

    pub fn monthly_coupons(&self) -> Result<Decimal, ValidationError> {
        self.holdings.iter().try_fold(Decimal::ZERO, |total, h| {
            total
                .checked_add(h.monthly_coupon()?)
                .ok_or(ValidationError::Overflow("bond coupons"))
        })
    }

    /// Record a once-per-month action. Returns false if it was already taken.
    pub fn take_monthly_action(&mut self, action: impl Into<String>) -> bool {
        self.monthly_actions.insert(action.into())
    }
}
