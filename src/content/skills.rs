//! Static skill catalog - the global library every actor references
//!
//! Skills are looked up by id through [`skill`]; the engine never
//! mutates catalog entries.

use crate::combat::actor::{StatBlock, StatKind};
use crate::combat::effects::{DotKind, EffectKind, Magnitude};
use crate::combat::elements::Element;

/// How a skill's damage scales from a stat snapshot
#[derive(Debug, Clone, Copy)]
pub struct DamageScaling {
    pub stat: StatKind,
    /// Multiplier at skill level 1
    pub base: f32,
    /// Added to the multiplier per skill level above 1
    pub per_level: f32,
}

impl DamageScaling {
    pub fn damage(&self, stats: &StatBlock, level: u32) -> i32 {
        let multiplier = self.base + self.per_level * level.saturating_sub(1) as f32;
        (stats.get(self.stat) as f32 * multiplier).floor() as i32
    }
}

/// Which side a status payload lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTarget {
    /// The side that used the skill
    SelfSide,
    /// The side being attacked
    Foe,
}

/// Payload a skill carries beyond its damage
#[derive(Debug, Clone, Copy)]
pub enum SkillEffect {
    /// Immediate heal on the user's side
    Heal(Magnitude),
    /// Heal for a fraction of damage actually dealt
    Lifesteal(f32),
    /// Recoil on the user
    SelfDamage(Magnitude),
    /// Timed status effect
    Status {
        target: EffectTarget,
        kind: EffectKind,
        duration: u32,
    },
}

/// Definition of a usable skill
#[derive(Debug, Clone, Copy)]
pub struct SkillDef {
    pub id: &'static str,
    pub name: &'static str,
    pub element: Element,
    /// Base chance to connect; stance bonuses apply on top for the
    /// controlled side
    pub accuracy: f32,
    /// Rounds before the skill can be used again (0 = none)
    pub cooldown: u32,
    /// Chance of a critical hit (0.0 = this skill never crits)
    pub crit_chance: f32,
    /// None for pure utility skills
    pub damage: Option<DamageScaling>,
    pub effects: &'static [SkillEffect],
}

pub static SKILLS: &[SkillDef] = &[
    // === PHYSICAL ===
    SkillDef {
        id: "slash",
        name: "Slash",
        element: Element::Physical,
        accuracy: 0.95,
        cooldown: 0,
        crit_chance: 0.1,
        damage: Some(DamageScaling {
            stat: StatKind::Strength,
            base: 1.2,
            per_level: 0.1,
        }),
        effects: &[],
    },
    SkillDef {
        id: "shield_bash",
        name: "Shield Bash",
        element: Element::Physical,
        accuracy: 0.9,
        cooldown: 3,
        crit_chance: 0.0,
        damage: Some(DamageScaling {
            stat: StatKind::Strength,
            base: 0.9,
            per_level: 0.08,
        }),
        effects: &[SkillEffect::Status {
            target: EffectTarget::Foe,
            kind: EffectKind::Stun,
            duration: 1,
        }],
    },
    SkillDef {
        id: "cleave",
        name: "Cleave",
        element: Element::Physical,
        accuracy: 0.9,
        cooldown: 2,
        crit_chance: 0.1,
        damage: Some(DamageScaling {
            stat: StatKind::Strength,
            base: 1.4,
            per_level: 0.12,
        }),
        effects: &[],
    },
    SkillDef {
        id: "execute",
        name: "Execute",
        element: Element::Physical,
        accuracy: 0.85,
        cooldown: 4,
        crit_chance: 0.25,
        damage: Some(DamageScaling {
            stat: StatKind::Strength,
            base: 1.9,
            per_level: 0.15,
        }),
        effects: &[],
    },
    SkillDef {
        id: "reckless_strike",
        name: "Reckless Strike",
        element: Element::Physical,
        accuracy: 0.85,
        cooldown: 3,
        crit_chance: 0.15,
        damage: Some(DamageScaling {
            stat: StatKind::Strength,
            base: 1.8,
            per_level: 0.15,
        }),
        effects: &[SkillEffect::SelfDamage(Magnitude::FractionOfMax(0.08))],
    },
    SkillDef {
        id: "war_cry",
        name: "War Cry",
        element: Element::Physical,
        accuracy: 1.0,
        cooldown: 3,
        crit_chance: 0.0,
        damage: None,
        effects: &[SkillEffect::Status {
            target: EffectTarget::Foe,
            kind: EffectKind::Weakened { amount: 0.25 },
            duration: 2,
        }],
    },
    // === ARCANE / ELEMENTAL ===
    SkillDef {
        id: "fireball",
        name: "Fireball",
        element: Element::Fire,
        accuracy: 0.9,
        cooldown: 2,
        crit_chance: 0.1,
        damage: Some(DamageScaling {
            stat: StatKind::Intelligence,
            base: 1.5,
            per_level: 0.12,
        }),
        effects: &[SkillEffect::Status {
            target: EffectTarget::Foe,
            kind: EffectKind::Dot {
                kind: DotKind::Burn,
                per_round: Magnitude::FractionOfMax(0.04),
            },
            duration: 3,
        }],
    },
    SkillDef {
        id: "ice_spike",
        name: "Ice Spike",
        element: Element::Ice,
        accuracy: 0.92,
        cooldown: 2,
        crit_chance: 0.05,
        damage: Some(DamageScaling {
            stat: StatKind::Intelligence,
            base: 1.3,
            per_level: 0.1,
        }),
        effects: &[SkillEffect::Status {
            target: EffectTarget::Foe,
            kind: EffectKind::Slow,
            duration: 2,
        }],
    },
    SkillDef {
        id: "lightning_bolt",
        name: "Lightning Bolt",
        element: Element::Electric,
        accuracy: 0.88,
        cooldown: 3,
        crit_chance: 0.15,
        damage: Some(DamageScaling {
            stat: StatKind::Intelligence,
            base: 1.7,
            per_level: 0.13,
        }),
        effects: &[],
    },
    SkillDef {
        id: "arcane_blast",
        name: "Arcane Blast",
        element: Element::Arcane,
        accuracy: 0.95,
        cooldown: 3,
        crit_chance: 0.1,
        damage: Some(DamageScaling {
            stat: StatKind::Intelligence,
            base: 1.6,
            per_level: 0.12,
        }),
        effects: &[],
    },
    SkillDef {
        id: "frost_nova",
        name: "Frost Nova",
        element: Element::Ice,
        accuracy: 0.9,
        cooldown: 5,
        crit_chance: 0.0,
        damage: Some(DamageScaling {
            stat: StatKind::Intelligence,
            base: 0.8,
            per_level: 0.06,
        }),
        effects: &[SkillEffect::Status {
            target: EffectTarget::Foe,
            kind: EffectKind::Stun,
            duration: 1,
        }],
    },
    // === SHADOW / POISON ===
    SkillDef {
        id: "backstab",
        name: "Backstab",
        element: Element::Shadow,
        accuracy: 0.9,
        cooldown: 2,
        crit_chance: 0.2,
        damage: Some(DamageScaling {
            stat: StatKind::Agility,
            base: 1.6,
            per_level: 0.13,
        }),
        effects: &[],
    },
    SkillDef {
        id: "poison_strike",
        name: "Poison Strike",
        element: Element::Poison,
        accuracy: 0.9,
        cooldown: 3,
        crit_chance: 0.1,
        damage: Some(DamageScaling {
            stat: StatKind::Agility,
            base: 1.1,
            per_level: 0.09,
        }),
        effects: &[SkillEffect::Status {
            target: EffectTarget::Foe,
            kind: EffectKind::Dot {
                kind: DotKind::Poison,
                per_round: Magnitude::FractionOfMax(0.05),
            },
            duration: 4,
        }],
    },
    SkillDef {
        id: "smoke_bomb",
        name: "Smoke Bomb",
        element: Element::Shadow,
        accuracy: 1.0,
        cooldown: 4,
        crit_chance: 0.0,
        damage: None,
        effects: &[SkillEffect::Status {
            target: EffectTarget::SelfSide,
            kind: EffectKind::Dodge { chance: 0.3 },
            duration: 2,
        }],
    },
    SkillDef {
        id: "drain_life",
        name: "Drain Life",
        element: Element::Shadow,
        accuracy: 0.9,
        cooldown: 3,
        crit_chance: 0.0,
        damage: Some(DamageScaling {
            stat: StatKind::Intelligence,
            base: 1.2,
            per_level: 0.1,
        }),
        effects: &[SkillEffect::Lifesteal(0.5)],
    },
    // === HOLY / NATURE ===
    SkillDef {
        id: "holy_strike",
        name: "Holy Strike",
        element: Element::Holy,
        accuracy: 0.92,
        cooldown: 2,
        crit_chance: 0.1,
        damage: Some(DamageScaling {
            stat: StatKind::Wisdom,
            base: 1.5,
            per_level: 0.12,
        }),
        effects: &[],
    },
    SkillDef {
        id: "heal",
        name: "Heal",
        element: Element::Holy,
        accuracy: 1.0,
        cooldown: 4,
        crit_chance: 0.0,
        damage: None,
        effects: &[SkillEffect::Heal(Magnitude::FractionOfMax(0.3))],
    },
    SkillDef {
        id: "divine_protection",
        name: "Divine Protection",
        element: Element::Holy,
        accuracy: 1.0,
        cooldown: 5,
        crit_chance: 0.0,
        damage: None,
        effects: &[SkillEffect::Status {
            target: EffectTarget::SelfSide,
            kind: EffectKind::Ward { pool: 40 },
            duration: 3,
        }],
    },
    SkillDef {
        id: "regrowth",
        name: "Regrowth",
        element: Element::Nature,
        accuracy: 1.0,
        cooldown: 4,
        crit_chance: 0.0,
        damage: None,
        effects: &[SkillEffect::Status {
            target: EffectTarget::SelfSide,
            kind: EffectKind::Regeneration {
                per_round: Magnitude::FractionOfMax(0.08),
            },
            duration: 3,
        }],
    },
    SkillDef {
        id: "thorn_lash",
        name: "Thorn Lash",
        element: Element::Nature,
        accuracy: 0.92,
        cooldown: 2,
        crit_chance: 0.05,
        damage: Some(DamageScaling {
            stat: StatKind::Wisdom,
            base: 1.3,
            per_level: 0.1,
        }),
        effects: &[SkillEffect::Status {
            target: EffectTarget::Foe,
            kind: EffectKind::Dot {
                kind: DotKind::Bleed,
                per_round: Magnitude::FractionOfMax(0.03),
            },
            duration: 3,
        }],
    },
];

/// Look up a skill by id
pub fn skill(id: &str) -> Option<&'static SkillDef> {
    SKILLS.iter().find(|s| s.id == id)
}
