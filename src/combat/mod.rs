//! Combat resolution
//!
//! Leaves first: elements and effects know nothing of the rest;
//! the pipeline composes them; sessions orchestrate rounds; the
//! engine owns sessions and the seeded randomness source.

pub mod action;
pub mod actor;
pub mod combo;
pub mod effects;
pub mod elements;
pub mod engine;
pub mod environment;
pub mod evaluate;
pub mod phases;
pub mod pipeline;
pub mod session;
pub mod stance;

pub use action::{Action, PlayerAction};
pub use actor::{ActorProfile, Combatant, Personality, StatBlock, StatKind};
pub use effects::{DotKind, Effect, EffectKind, Magnitude};
pub use elements::Element;
pub use engine::{
    CombatEngine, CustomOpponent, EncounterOptions, OpponentSpec, SkillAvailability,
};
pub use phases::BossState;
pub use session::{
    EncounterKind, EncounterResult, EncounterSession, Outcome, Rewards, RoundOutcome,
    RoundSummary, SideSummary,
};
pub use stance::{Stance, StanceModifiers};
