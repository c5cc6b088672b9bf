//! Combat stances for the controlled side
//!
//! Only the controlled side carries a stance. Opponents always fight
//! with balanced modifiers.

use serde::{Deserialize, Serialize};

/// Stance of the controlled side - always exactly one is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Stance {
    #[default]
    Balanced,
    Aggressive,
    Defensive,
    Focused,
    Evasive,
}

/// Multipliers and bonuses a stance contributes to the pipeline
#[derive(Debug, Clone, Copy)]
pub struct StanceModifiers {
    /// Multiplier on damage dealt
    pub damage_dealt: f32,
    /// Multiplier on damage taken
    pub damage_taken: f32,
    /// Added to action accuracy (may be negative)
    pub accuracy_bonus: f32,
    /// Added to skill critical chance
    pub crit_bonus: f32,
    /// Chance to fully evade an incoming hit
    pub dodge_chance: f32,
}

const BALANCED: StanceModifiers = StanceModifiers {
    damage_dealt: 1.0,
    damage_taken: 1.0,
    accuracy_bonus: 0.0,
    crit_bonus: 0.0,
    dodge_chance: 0.0,
};

impl Stance {
    pub fn modifiers(&self) -> StanceModifiers {
        match self {
            Stance::Balanced => BALANCED,
            Stance::Aggressive => StanceModifiers {
                damage_dealt: 1.15,
                damage_taken: 1.1,
                ..BALANCED
            },
            Stance::Defensive => StanceModifiers {
                damage_dealt: 0.9,
                damage_taken: 0.8,
                ..BALANCED
            },
            Stance::Focused => StanceModifiers {
                accuracy_bonus: 0.1,
                crit_bonus: 0.1,
                ..BALANCED
            },
            Stance::Evasive => StanceModifiers {
                accuracy_bonus: -0.1,
                dodge_chance: 0.1,
                ..BALANCED
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stance::Balanced => "balanced",
            Stance::Aggressive => "aggressive",
            Stance::Defensive => "defensive",
            Stance::Focused => "focused",
            Stance::Evasive => "evasive",
        }
    }

    /// Modifiers for a side with no stance (every opponent)
    pub fn neutral() -> StanceModifiers {
        BALANCED
    }
}
