//! Skill combo table
//!
//! Ordered pairs of skills that chain into a bonus when used back to
//! back. Lookups are order-sensitive: slash into shield_bash is not
//! shield_bash into slash. A predecessor may chain into several
//! different followers.

use crate::combat::effects::{DotKind, EffectKind, Magnitude};

/// A registered two-skill chain
#[derive(Debug, Clone, Copy)]
pub struct ComboDef {
    pub first: &'static str,
    pub second: &'static str,
    /// Multiplier on the second skill's damage
    pub damage_multiplier: f32,
    /// Optional status applied to the opposing side
    pub bonus_effect: Option<(EffectKind, u32)>,
    pub description: &'static str,
}

pub static COMBOS: &[ComboDef] = &[
    ComboDef {
        first: "slash",
        second: "shield_bash",
        damage_multiplier: 1.3,
        bonus_effect: Some((EffectKind::Stun, 1)),
        description: "Shield Bash after Slash staggers the enemy",
    },
    ComboDef {
        first: "slash",
        second: "cleave",
        damage_multiplier: 1.25,
        bonus_effect: None,
        description: "Cleave follows through the opening Slash leaves",
    },
    ComboDef {
        first: "shield_bash",
        second: "cleave",
        damage_multiplier: 1.4,
        bonus_effect: None,
        description: "Cleave lands clean on a staggered enemy",
    },
    ComboDef {
        first: "cleave",
        second: "execute",
        damage_multiplier: 1.6,
        bonus_effect: None,
        description: "Execute finishes what Cleave started",
    },
    ComboDef {
        first: "war_cry",
        second: "reckless_strike",
        damage_multiplier: 1.4,
        bonus_effect: None,
        description: "Reckless Strike hits harder against a shaken enemy",
    },
    ComboDef {
        first: "ice_spike",
        second: "lightning_bolt",
        damage_multiplier: 1.25,
        bonus_effect: None,
        description: "Lightning chains through the frozen target",
    },
    ComboDef {
        first: "frost_nova",
        second: "fireball",
        damage_multiplier: 1.5,
        bonus_effect: Some((
            EffectKind::Dot {
                kind: DotKind::Burn,
                per_round: Magnitude::FractionOfMax(0.05),
            },
            3,
        )),
        description: "Thermal shock after Frost Nova ignites the target",
    },
    ComboDef {
        first: "fireball",
        second: "arcane_blast",
        damage_multiplier: 1.35,
        bonus_effect: Some((
            EffectKind::Dot {
                kind: DotKind::Burn,
                per_round: Magnitude::FractionOfMax(0.04),
            },
            3,
        )),
        description: "Arcane Blast fans the flames",
    },
    ComboDef {
        first: "backstab",
        second: "poison_strike",
        damage_multiplier: 1.3,
        bonus_effect: Some((
            EffectKind::Dot {
                kind: DotKind::Poison,
                per_round: Magnitude::FractionOfMax(0.05),
            },
            4,
        )),
        description: "Poison spreads through the Backstab wound",
    },
    ComboDef {
        first: "smoke_bomb",
        second: "backstab",
        damage_multiplier: 1.5,
        bonus_effect: None,
        description: "Backstab from the smoke is unseen",
    },
    ComboDef {
        first: "heal",
        second: "holy_strike",
        damage_multiplier: 1.3,
        bonus_effect: None,
        description: "Holy Strike is empowered by fresh healing",
    },
];

/// Look up the combo for an ordered skill pair
pub fn combo(first: &str, second: &str) -> Option<&'static ComboDef> {
    COMBOS
        .iter()
        .find(|c| c.first == first && c.second == second)
}
