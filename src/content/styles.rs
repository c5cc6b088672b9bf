//! Combat styles
//!
//! A style is an optional per-encounter choice that boosts a small set
//! of skills. The multiplier applies in the damage pipeline alongside
//! stance modifiers.

/// Per-skill boost granted by a style
#[derive(Debug, Clone, Copy)]
pub struct StyleBonus {
    pub skill: &'static str,
    pub multiplier: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct StyleDef {
    pub id: &'static str,
    pub name: &'static str,
    pub bonuses: &'static [StyleBonus],
    pub description: &'static str,
}

pub static STYLES: &[StyleDef] = &[
    StyleDef {
        id: "berserker",
        name: "Berserker",
        bonuses: &[
            StyleBonus {
                skill: "reckless_strike",
                multiplier: 1.2,
            },
            StyleBonus {
                skill: "cleave",
                multiplier: 1.15,
            },
            StyleBonus {
                skill: "execute",
                multiplier: 1.1,
            },
        ],
        description: "All-out offense with heavy weapons",
    },
    StyleDef {
        id: "elementalist",
        name: "Elementalist",
        bonuses: &[
            StyleBonus {
                skill: "fireball",
                multiplier: 1.2,
            },
            StyleBonus {
                skill: "ice_spike",
                multiplier: 1.15,
            },
            StyleBonus {
                skill: "lightning_bolt",
                multiplier: 1.15,
            },
        ],
        description: "Channeled elemental magic",
    },
    StyleDef {
        id: "shadowdancer",
        name: "Shadowdancer",
        bonuses: &[
            StyleBonus {
                skill: "backstab",
                multiplier: 1.25,
            },
            StyleBonus {
                skill: "poison_strike",
                multiplier: 1.15,
            },
        ],
        description: "Strikes from concealment",
    },
    StyleDef {
        id: "templar",
        name: "Templar",
        bonuses: &[
            StyleBonus {
                skill: "holy_strike",
                multiplier: 1.2,
            },
            StyleBonus {
                skill: "shield_bash",
                multiplier: 1.1,
            },
        ],
        description: "Sanctified martial discipline",
    },
];

pub fn style(id: &str) -> Option<&'static StyleDef> {
    STYLES.iter().find(|s| s.id == id)
}

impl StyleDef {
    /// Multiplier this style grants a skill (1.0 if unlisted)
    pub fn multiplier_for(&self, skill_id: &str) -> f32 {
        self.bonuses
            .iter()
            .find(|b| b.skill == skill_id)
            .map(|b| b.multiplier)
            .unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::skills::skill;

    #[test]
    fn test_lookup_and_default_multiplier() {
        let s = style("berserker").unwrap();
        assert!(s.multiplier_for("cleave") > 1.0);
        assert_eq!(s.multiplier_for("heal"), 1.0);
    }

    #[test]
    fn test_bonus_skills_exist() {
        for s in STYLES {
            for b in s.bonuses {
                assert!(skill(b.skill).is_some(), "{} boosts missing skill {}", s.id, b.skill);
            }
        }
    }
}
