//! Boss templates and phase abilities
//!
//! Each boss declares three phases with health-percentage triggers and
//! an ability pool per phase. Phase progression is handled by
//! [`crate::combat::phases`]; this module is pure data.

use crate::combat::effects::{DotKind, EffectKind, Magnitude};
use crate::combat::elements::Element;

/// A phase-specific boss attack
#[derive(Debug, Clone, Copy)]
pub struct AbilityDef {
    pub id: &'static str,
    pub name: &'static str,
    /// Multiplier on boss offense (after the global boss multiplier)
    pub damage: f32,
    pub element: Element,
    /// Optional status applied to the controlled side on hit
    pub effect: Option<(EffectKind, u32)>,
}

/// One phase of a boss encounter
#[derive(Debug, Clone, Copy)]
pub struct PhaseDef {
    /// Health percentage at or below which this phase begins
    pub trigger: u32,
    pub abilities: &'static [&'static str],
    pub description: &'static str,
}

/// A multi-phase boss
#[derive(Debug, Clone, Copy)]
pub struct BossTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub element: Element,
    pub phases: [PhaseDef; 3],
}

pub static BOSSES: &[BossTemplate] = &[
    BossTemplate {
        id: "inferno_lord",
        name: "Inferno Lord",
        element: Element::Fire,
        phases: [
            PhaseDef {
                trigger: 100,
                abilities: &["fire_lash", "heat_wave", "flame_strike"],
                description: "opens with sweeping flame attacks",
            },
            PhaseDef {
                trigger: 60,
                abilities: &["meteor_storm", "magma_surge"],
                description: "enters an enraged state",
            },
            PhaseDef {
                trigger: 30,
                abilities: &["apocalypse_fire", "final_inferno"],
                description: "makes a desperate final stand",
            },
        ],
    },
    BossTemplate {
        id: "frost_queen",
        name: "Frost Queen",
        element: Element::Ice,
        phases: [
            PhaseDef {
                trigger: 100,
                abilities: &["ice_shard", "blizzard"],
                description: "freezes the battlefield",
            },
            PhaseDef {
                trigger: 50,
                abilities: &["glacial_prison", "winter_wrath"],
                description: "calls down the deep winter",
            },
            PhaseDef {
                trigger: 25,
                abilities: &["eternal_winter"],
                description: "binds everything to a frozen fate",
            },
        ],
    },
    BossTemplate {
        id: "storm_titan",
        name: "Storm Titan",
        element: Element::Electric,
        phases: [
            PhaseDef {
                trigger: 100,
                abilities: &["arc_bolt", "static_field"],
                description: "strikes with raw electricity",
            },
            PhaseDef {
                trigger: 65,
                abilities: &["tempest", "thunder_dome"],
                description: "raises a field of lightning",
            },
            PhaseDef {
                trigger: 30,
                abilities: &["cataclysm_storm"],
                description: "becomes one with the storm",
            },
        ],
    },
];

pub static ABILITIES: &[AbilityDef] = &[
    // Fire
    AbilityDef {
        id: "fire_lash",
        name: "Fire Lash",
        damage: 1.2,
        element: Element::Fire,
        effect: None,
    },
    AbilityDef {
        id: "heat_wave",
        name: "Heat Wave",
        damage: 0.8,
        element: Element::Fire,
        effect: Some((
            EffectKind::Dot {
                kind: DotKind::Burn,
                per_round: Magnitude::FractionOfMax(0.06),
            },
            3,
        )),
    },
    AbilityDef {
        id: "flame_strike",
        name: "Flame Strike",
        damage: 1.4,
        element: Element::Fire,
        effect: None,
    },
    AbilityDef {
        id: "meteor_storm",
        name: "Meteor Storm",
        damage: 2.0,
        element: Element::Fire,
        effect: Some((EffectKind::Stun, 1)),
    },
    AbilityDef {
        id: "magma_surge",
        name: "Magma Surge",
        damage: 1.8,
        element: Element::Fire,
        effect: Some((
            EffectKind::Dot {
                kind: DotKind::Burn,
                per_round: Magnitude::FractionOfMax(0.08),
            },
            4,
        )),
    },
    AbilityDef {
        id: "apocalypse_fire",
        name: "Apocalypse Fire",
        damage: 2.8,
        element: Element::Fire,
        effect: Some((
            EffectKind::Dot {
                kind: DotKind::Burn,
                per_round: Magnitude::FractionOfMax(0.1),
            },
            5,
        )),
    },
    AbilityDef {
        id: "final_inferno",
        name: "Final Inferno",
        damage: 2.5,
        element: Element::Fire,
        effect: Some((EffectKind::Stun, 2)),
    },
    // Ice
    AbilityDef {
        id: "ice_shard",
        name: "Ice Shard",
        damage: 1.0,
        element: Element::Ice,
        effect: None,
    },
    AbilityDef {
        id: "blizzard",
        name: "Blizzard",
        damage: 1.5,
        element: Element::Ice,
        effect: Some((EffectKind::Slow, 3)),
    },
    AbilityDef {
        id: "glacial_prison",
        name: "Glacial Prison",
        damage: 1.6,
        element: Element::Ice,
        effect: Some((EffectKind::Stun, 2)),
    },
    AbilityDef {
        id: "winter_wrath",
        name: "Winter Wrath",
        damage: 2.1,
        element: Element::Ice,
        effect: Some((EffectKind::Slow, 4)),
    },
    AbilityDef {
        id: "eternal_winter",
        name: "Eternal Winter",
        damage: 2.7,
        element: Element::Ice,
        effect: Some((EffectKind::Stun, 2)),
    },
    // Electric
    AbilityDef {
        id: "arc_bolt",
        name: "Arc Bolt",
        damage: 1.1,
        element: Element::Electric,
        effect: None,
    },
    AbilityDef {
        id: "static_field",
        name: "Static Field",
        damage: 0.9,
        element: Element::Electric,
        effect: Some((EffectKind::Weakened { amount: 0.15 }, 2)),
    },
    AbilityDef {
        id: "tempest",
        name: "Tempest",
        damage: 1.9,
        element: Element::Electric,
        effect: None,
    },
    AbilityDef {
        id: "thunder_dome",
        name: "Thunder Dome",
        damage: 1.6,
        element: Element::Electric,
        effect: Some((EffectKind::Exposed { amount: 0.2 }, 2)),
    },
    AbilityDef {
        id: "cataclysm_storm",
        name: "Cataclysm Storm",
        damage: 2.6,
        element: Element::Electric,
        effect: Some((EffectKind::Stun, 1)),
    },
];

pub fn boss_template(id: &str) -> Option<&'static BossTemplate> {
    BOSSES.iter().find(|b| b.id == id)
}

pub fn ability(id: &str) -> Option<&'static AbilityDef> {
    ABILITIES.iter().find(|a| a.id == id)
}
