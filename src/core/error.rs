use thiserror::Error;

use crate::core::types::ActorId;

#[derive(Error, Debug)]
pub enum CombatError {
    #[error("no active encounter for {0:?}")]
    NoActiveEncounter(ActorId),

    #[error("{0:?} is already in an encounter")]
    AlreadyInEncounter(ActorId),

    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    #[error("skill {skill} is on cooldown for {remaining} more rounds")]
    SkillOnCooldown { skill: String, remaining: u32 },

    #[error("invalid opponent spec: {0}")]
    InvalidOpponentSpec(String),

    #[error("randomness source unavailable: {0}")]
    RandomnessUnavailable(String),
}

pub type Result<T> = std::result::Result<T, CombatError>;
