//! Personal progression applied on quarterly advances: attribute decay,
//! partner buffs and education.

use sim_core::{EconomyConfig, Partner, PlayerLedger};

/// Decay attributes, then apply partner buffs if any.
pub fn apply_attribute_drift(player: &mut PlayerLedger, partner: Option<&Partner>, cfg: &EconomyConfig) {
    player.attributes.decay(cfg.attribute_decay);
    if let Some(p) = partner {
        player.attributes.apply(&p.buffs);
    }
}

/// Progress the current education program. Returns the program name when it
/// completes during this advance.
pub fn advance_education(player: &mut PlayerLedger, months: u32, cfg: &EconomyConfig) -> Option<String> {
    let edu = player.education.as_mut()?;
    edu.months_completed = edu.months_completed.saturating_add(months);
    if edu.months_completed < edu.months_required {
        return None;
    }
    let done = player.education.take()?;
    player.degrees.push(done.program.clone());
    let bonus = i16::from(cfg.education_smarts_bonus);
    player.attributes.apply(&sim_core::AttributeDeltas {
        smarts: bonus,
        ..Default::default()
    });
    Some(done.program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sim_core::{AttributeDeltas, Education};

    #[test]
    fn drift_then_buff() {
        let cfg = EconomyConfig::default();
        let mut p = PlayerLedger::new("Sam", Decimal::ZERO, 20);
        let partner = Partner {
            name: "Alex".into(),
            monthly_upkeep: None,
            buffs: AttributeDeltas {
                happiness: 5,
                ..Default::default()
            },
        };
        apply_attribute_drift(&mut p, Some(&partner), &cfg);
        assert_eq!(p.attributes.health, 78);
        assert_eq!(p.attributes.happiness, 73);
    }

    #[test]
    fn education_completes_once() {
        let cfg = EconomyConfig::default();
        let mut p = PlayerLedger::new("Sam", Decimal::ZERO, 20);
        p.education = Some(Education {
            program: "MBA".into(),
            months_completed: 18,
            months_required: 24,
        });
        assert_eq!(advance_education(&mut p, 3, &cfg), None);
        assert_eq!(advance_education(&mut p, 3, &cfg), Some("MBA".to_string()));
        assert!(p.education.is_none());
        assert_eq!(p.degrees, vec!["MBA".to_string()]);
        assert_eq!(p.attributes.smarts, 60);
        assert_eq!(advance_education(&mut p, 3, &cfg), None);
    }
}
