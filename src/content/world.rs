//! Daily world modifiers
//!
//! Each in-game day one of eight day kinds is active, chosen
//! deterministically from a date-derived seed. The modifiers scale
//! damage, rewards, over-time ticks, and variance for every encounter
//! started that day.

use std::time::{SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: u64 = 86_400;

/// Multiplicative tweaks a day applies to combat resolution
#[derive(Debug, Clone, Copy)]
pub struct DayModifiers {
    pub player_damage: f32,
    pub enemy_damage: f32,
    pub gold: f32,
    pub xp: f32,
    /// Scales damage-over-time ticks on both sides
    pub dot: f32,
    /// Scales heals and regeneration ticks on both sides
    pub healing: f32,
    /// Added to the configured damage variance
    pub variance_bonus: f32,
}

/// Baseline modifiers; also used when no day state is in play
pub const NEUTRAL: DayModifiers = DayModifiers {
    player_damage: 1.0,
    enemy_damage: 1.0,
    gold: 1.0,
    xp: 1.0,
    dot: 1.0,
    healing: 1.0,
    variance_bonus: 0.0,
};

/// A named day kind
#[derive(Debug, Clone, Copy)]
pub struct DayState {
    pub id: &'static str,
    pub name: &'static str,
    pub modifiers: DayModifiers,
    pub description: &'static str,
}

pub static DAYS: &[DayState] = &[
    DayState {
        id: "normal",
        name: "Ordinary Day",
        modifiers: NEUTRAL,
        description: "Nothing unusual in the air",
    },
    DayState {
        id: "aggressive",
        name: "Day of Fury",
        modifiers: DayModifiers {
            player_damage: 1.2,
            enemy_damage: 1.2,
            ..NEUTRAL
        },
        description: "Every blow lands harder today",
    },
    DayState {
        id: "defensive",
        name: "Day of Stone",
        modifiers: DayModifiers {
            player_damage: 0.85,
            enemy_damage: 0.85,
            ..NEUTRAL
        },
        description: "Hides and armor seem tougher today",
    },
    DayState {
        id: "abundant",
        name: "Day of Plenty",
        modifiers: DayModifiers {
            gold: 1.5,
            xp: 1.25,
            ..NEUTRAL
        },
        description: "Fortune favors the victor today",
    },
    DayState {
        id: "scarce",
        name: "Lean Day",
        modifiers: DayModifiers {
            gold: 0.75,
            xp: 0.9,
            ..NEUTRAL
        },
        description: "Spoils are meager today",
    },
    DayState {
        id: "poison",
        name: "Miasma Day",
        modifiers: DayModifiers {
            dot: 1.5,
            ..NEUTRAL
        },
        description: "Lingering wounds fester faster today",
    },
    DayState {
        id: "healing",
        name: "Day of Grace",
        modifiers: DayModifiers {
            healing: 1.4,
            ..NEUTRAL
        },
        description: "Restorative magic flows freely today",
    },
    DayState {
        id: "chaotic",
        name: "Day of Chaos",
        modifiers: DayModifiers {
            variance_bonus: 0.1,
            ..NEUTRAL
        },
        description: "Outcomes swing wildly today",
    },
];

/// Day kind for a given date seed
pub fn day_for_seed(seed: u64) -> &'static DayState {
    &DAYS[(seed % DAYS.len() as u64) as usize]
}

/// Whole days since the Unix epoch; stable for a full calendar day
pub fn current_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() / SECONDS_PER_DAY)
        .unwrap_or(0)
}
