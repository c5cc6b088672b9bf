//! Skirmish - deterministic turn-based combat resolution

pub mod combat;
pub mod content;
pub mod core;

pub use crate::combat::{CombatEngine, EncounterOptions, OpponentSpec, PlayerAction, RoundOutcome};
pub use crate::core::{CombatError, EngineConfig, Result};
