//! Round actions
//!
//! Actions are values produced fresh each round and consumed by the
//! resolver; nothing mutates an action in place.

use crate::combat::stance::Stance;
use crate::content::bosses::AbilityDef;
use crate::content::skills::SkillDef;

/// What the caller asks the controlled side to do this round
///
/// `None` passed to the engine instead of a `PlayerAction` hands the
/// choice to the automated evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    Skill { id: String },
    ChangeStance(Stance),
    /// Move to the next living roster opponent
    SwitchTarget,
}

/// Fully resolved action for one side of one round
#[derive(Debug, Clone, Copy)]
pub enum Action {
    BasicAttack,
    SkillUse {
        def: &'static SkillDef,
        level: u32,
    },
    StanceChange(Stance),
    SwitchTarget,
    /// Opponent-only; carries the pre-selected phase ability
    BossAbility(&'static AbilityDef),
}

impl Action {
    /// Human-readable label for logs and intent previews
    pub fn label(&self) -> &'static str {
        match self {
            Action::BasicAttack => "Attack",
            Action::SkillUse { def, .. } => def.name,
            Action::StanceChange(_) => "Change Stance",
            Action::SwitchTarget => "Switch Target",
            Action::BossAbility(ability) => ability.name,
        }
    }
}
