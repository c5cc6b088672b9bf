//! Environment catalog
//!
//! An environment is a list of effect templates rolled independently at
//! the start of every round. Hazards land on the controlled side, buffs
//! land on the controlled side with dedup by template id, obstacles are
//! narrative only.

use crate::combat::effects::{DotKind, EffectKind, Magnitude};

/// How a triggered template resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Hostile payload on the controlled side
    Hazard,
    /// Helpful payload on the controlled side, never stacking
    Buff,
    /// Logged only, no payload
    Obstacle,
}

/// One rollable environmental event
#[derive(Debug, Clone, Copy)]
pub struct EnvTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: TemplateKind,
    /// Independent per-round trigger probability
    pub chance: f32,
    /// Missing payloads are skipped with a log line, not an error
    pub payload: Option<(EffectKind, u32)>,
    pub description: &'static str,
}

/// A battlefield with its ambient events
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentDef {
    pub id: &'static str,
    pub name: &'static str,
    /// Extra symmetric damage variance while fighting here
    pub volatility: f32,
    pub templates: &'static [EnvTemplate],
}

pub static ENVIRONMENTS: &[EnvironmentDef] = &[
    EnvironmentDef {
        id: "ancient_forest",
        name: "Ancient Forest",
        volatility: 0.0,
        templates: &[
            EnvTemplate {
                id: "nature_favor",
                name: "Nature's Favor",
                kind: TemplateKind::Buff,
                chance: 0.25,
                payload: Some((
                    EffectKind::Regeneration {
                        per_round: Magnitude::FractionOfMax(0.04),
                    },
                    2,
                )),
                description: "The forest mends your wounds",
            },
            EnvTemplate {
                id: "thorn_thicket",
                name: "Thorn Thicket",
                kind: TemplateKind::Hazard,
                chance: 0.2,
                payload: Some((
                    EffectKind::Dot {
                        kind: DotKind::Bleed,
                        per_round: Magnitude::FractionOfMax(0.03),
                    },
                    2,
                )),
                description: "Thorns tear at you as you move",
            },
            EnvTemplate {
                id: "fallen_log",
                name: "Fallen Log",
                kind: TemplateKind::Obstacle,
                chance: 0.15,
                payload: None,
                description: "A massive log blocks part of the clearing",
            },
        ],
    },
    EnvironmentDef {
        id: "volcanic_cavern",
        name: "Volcanic Cavern",
        volatility: 0.05,
        templates: &[
            EnvTemplate {
                id: "lava_burst",
                name: "Lava Burst",
                kind: TemplateKind::Hazard,
                chance: 0.3,
                payload: Some((
                    EffectKind::Dot {
                        kind: DotKind::Burn,
                        per_round: Magnitude::FractionOfMax(0.05),
                    },
                    2,
                )),
                description: "Molten rock erupts underfoot",
            },
            EnvTemplate {
                id: "ash_cloud",
                name: "Ash Cloud",
                kind: TemplateKind::Hazard,
                chance: 0.2,
                payload: Some((EffectKind::Weakened { amount: 0.15 }, 2)),
                description: "Choking ash fills the air",
            },
            EnvTemplate {
                id: "unstable_ground",
                name: "Unstable Ground",
                kind: TemplateKind::Obstacle,
                chance: 0.25,
                payload: None,
                description: "The cavern floor shifts and cracks",
            },
        ],
    },
    EnvironmentDef {
        id: "frozen_tundra",
        name: "Frozen Tundra",
        volatility: 0.0,
        templates: &[
            EnvTemplate {
                id: "bitter_cold",
                name: "Bitter Cold",
                kind: TemplateKind::Hazard,
                chance: 0.25,
                payload: Some((EffectKind::Slow, 2)),
                description: "The cold saps your speed",
            },
            EnvTemplate {
                id: "ice_sheet",
                name: "Ice Sheet",
                kind: TemplateKind::Obstacle,
                chance: 0.2,
                payload: None,
                description: "Sheets of slick ice cover the ground",
            },
            EnvTemplate {
                id: "aurora_veil",
                name: "Aurora Veil",
                kind: TemplateKind::Buff,
                chance: 0.15,
                payload: Some((EffectKind::DamageReduction { amount: 0.1 }, 2)),
                description: "Shimmering light hardens the air around you",
            },
        ],
    },
    EnvironmentDef {
        id: "shadow_void",
        name: "Shadow Void",
        volatility: 0.1,
        templates: &[
            EnvTemplate {
                id: "creeping_darkness",
                name: "Creeping Darkness",
                kind: TemplateKind::Hazard,
                chance: 0.3,
                payload: Some((
                    EffectKind::Dot {
                        kind: DotKind::Poison,
                        per_round: Magnitude::FractionOfMax(0.04),
                    },
                    3,
                )),
                description: "The darkness itself gnaws at you",
            },
            // Payload intentionally absent; the processor logs and skips
            EnvTemplate {
                id: "whispering_dread",
                name: "Whispering Dread",
                kind: TemplateKind::Hazard,
                chance: 0.2,
                payload: None,
                description: "Voices whisper from beyond the veil",
            },
            EnvTemplate {
                id: "void_rift",
                name: "Void Rift",
                kind: TemplateKind::Obstacle,
                chance: 0.15,
                payload: None,
                description: "A rift in reality distorts the arena",
            },
        ],
    },
];

pub fn environment(id: &str) -> Option<&'static EnvironmentDef> {
    ENVIRONMENTS.iter().find(|e| e.id == id)
}
