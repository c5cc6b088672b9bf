//! Engine entry point: session store and lifecycle operations
//!
//! The engine owns the identity-to-session map and the single seeded
//! randomness source every roll draws from. Multiple engines can exist
//! side by side; nothing here is global.

use std::time::Instant;

use ahash::AHashMap;
use rand::rngs::OsRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::combat::action::PlayerAction;
use crate::combat::actor::{ActorProfile, Combatant};
use crate::combat::combo::ComboTracker;
use crate::combat::elements::Element;
use crate::combat::phases::BossState;
use crate::combat::session::{
    EncounterKind, EncounterSession, RoundOutcome, RoundSummary,
};
use crate::combat::stance::Stance;
use crate::content::environments::EnvironmentDef;
use crate::content::groups;
use crate::content::skills::skill;
use crate::content::styles::StyleDef;
use crate::content::world;
use crate::core::config::EngineConfig;
use crate::core::error::{CombatError, Result};
use crate::core::types::{ActorId, SessionId};

/// Stats for a scripted, non-templated opponent
#[derive(Debug, Clone)]
pub struct CustomOpponent {
    pub name: String,
    pub level: u32,
    pub max_hp: i32,
    pub strength: i32,
    pub defense: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub elements: Vec<Element>,
    pub skills: Vec<String>,
}

/// What the controlled side is up against
#[derive(Debug, Clone)]
pub enum OpponentSpec {
    /// Level-scaled opponent built from baseline stats
    Scaled {
        name: String,
        level: u32,
        elements: Vec<Element>,
        skills: Vec<String>,
    },
    /// Fully caller-specified stat block
    Custom(CustomOpponent),
    /// Phase-templated boss from the catalog
    Boss { template: &'static str, level: u32 },
    /// Named multi-opponent roster
    Group { template: &'static str, level: u32 },
}

/// Per-encounter options beyond the opponent itself
#[derive(Debug, Clone, Copy, Default)]
pub struct EncounterOptions {
    pub kind: EncounterKind,
    pub environment: Option<&'static EnvironmentDef>,
    pub style: Option<&'static StyleDef>,
    /// Overrides the date-derived day seed (mainly for tests)
    pub day_seed: Option<u64>,
}

/// Ready/cooldown state of one known skill
#[derive(Debug, Clone)]
pub struct SkillAvailability {
    pub id: String,
    pub name: &'static str,
    pub ready: bool,
    pub cooldown_remaining: u32,
}

pub struct CombatEngine {
    config: EngineConfig,
    sessions: AHashMap<ActorId, EncounterSession>,
    rng: ChaCha8Rng,
    /// Monotonic clock origin for combo windows and staleness
    epoch: Instant,
}

impl CombatEngine {
    /// Engine with a fixed seed; identical inputs replay identically
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(EngineConfig::default(), ChaCha8Rng::seed_from_u64(seed))
    }

    /// Engine seeded from the operating system
    pub fn from_entropy() -> Result<Self> {
        let rng = ChaCha8Rng::from_rng(OsRng)
            .map_err(|e| CombatError::RandomnessUnavailable(e.to_string()))?;
        Ok(Self::with_config(EngineConfig::default(), rng))
    }

    pub fn with_config(config: EngineConfig, rng: ChaCha8Rng) -> Self {
        Self {
            config,
            sessions: AHashMap::new(),
            rng,
            epoch: Instant::now(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    pub fn is_in_encounter(&self, id: ActorId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Begin an encounter for this identity
    ///
    /// Fails with `AlreadyInEncounter` if one exists; the caller must
    /// `force_end` first if replacement is intended.
    pub fn start_encounter(
        &mut self,
        profile: &ActorProfile,
        opponent: OpponentSpec,
        options: EncounterOptions,
    ) -> Result<RoundSummary> {
        if self.sessions.contains_key(&profile.identity) {
            return Err(CombatError::AlreadyInEncounter(profile.identity));
        }

        let (roster, boss) = self.build_roster(&opponent, options.kind)?;
        let day = world::day_for_seed(options.day_seed.unwrap_or_else(world::current_seed));

        let mut session = EncounterSession {
            id: SessionId::new(),
            owner: profile.identity,
            player: Combatant::from_profile(profile),
            personality: profile.personality,
            stance: Stance::default(),
            style: options.style,
            roster,
            target: 0,
            boss,
            environment: options.environment,
            day,
            player_effects: Vec::new(),
            enemy_effects: Vec::new(),
            player_guard: 0,
            enemy_guard: 0,
            combo: ComboTracker::new(),
            round: 1,
            log: Vec::new(),
            last_action_ms: self.now_ms(),
        };

        session.log.push(format!(
            "{} faces {}! ({})",
            session.player.name,
            session.active_enemy().name,
            day.name
        ));
        if let Some(env) = session.environment {
            session.log.push(format!("Battlefield: {}", env.name));
        }
        if let Some(state) = &mut session.boss {
            state.prime_intent(&mut self.rng);
        }

        info!(
            session = ?session.id,
            opponent = %session.active_enemy().name,
            day = day.id,
            "encounter started"
        );
        let summary = session.summary(&self.config);
        self.sessions.insert(profile.identity, session);
        Ok(summary)
    }

    /// Run one round, choosing automatically when `action` is `None`
    pub fn advance_round(
        &mut self,
        id: ActorId,
        action: Option<PlayerAction>,
    ) -> Result<RoundOutcome> {
        let now = self.now_ms();
        self.advance_round_at(id, action, now)
    }

    /// Round advance with an explicit engine-clock timestamp
    pub fn advance_round_at(
        &mut self,
        id: ActorId,
        action: Option<PlayerAction>,
        now_ms: u64,
    ) -> Result<RoundOutcome> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(CombatError::NoActiveEncounter(id))?;
        let outcome = session.advance(action, now_ms, &self.config, &mut self.rng)?;
        match &outcome {
            RoundOutcome::Ongoing(summary) => {
                debug!(round = summary.round, "round resolved");
            }
            RoundOutcome::Ended(result) => {
                info!(outcome = ?result.outcome, rounds = result.rounds, "encounter ended");
                self.sessions.remove(&id);
            }
        }
        Ok(outcome)
    }

    /// Discard a session without computing rewards
    pub fn force_end(&mut self, id: ActorId) -> Result<()> {
        let session = self
            .sessions
            .remove(&id)
            .ok_or(CombatError::NoActiveEncounter(id))?;
        info!(session = ?session.id, "encounter aborted");
        Ok(())
    }

    /// Snapshot of the running encounter
    pub fn active_summary(&self, id: ActorId) -> Result<RoundSummary> {
        self.sessions
            .get(&id)
            .map(|s| s.summary(&self.config))
            .ok_or(CombatError::NoActiveEncounter(id))
    }

    /// Known skills of the controlled side with their readiness
    pub fn available_skills(&self, id: ActorId) -> Result<Vec<SkillAvailability>> {
        let session = self
            .sessions
            .get(&id)
            .ok_or(CombatError::NoActiveEncounter(id))?;
        Ok(session
            .player
            .skills
            .iter()
            .filter_map(|skill_id| {
                let def = skill(skill_id)?;
                let remaining = session.player.cooldown_remaining(skill_id);
                Some(SkillAvailability {
                    id: skill_id.clone(),
                    name: def.name,
                    ready: remaining == 0,
                    cooldown_remaining: remaining,
                })
            })
            .collect())
    }

    /// Drop sessions idle past the configured timeout, returning how
    /// many were removed
    pub fn sweep_stale(&mut self) -> usize {
        let now = self.now_ms();
        self.sweep_stale_at(now)
    }

    pub fn sweep_stale_at(&mut self, now_ms: u64) -> usize {
        let cutoff = self.config.stale_timeout_secs * 1000;
        let before = self.sessions.len();
        self.sessions
            .retain(|_, s| now_ms.saturating_sub(s.last_action_ms) <= cutoff);
        let removed = before - self.sessions.len();
        if removed > 0 {
            info!(removed, "swept stale encounters");
        }
        removed
    }

    fn build_roster(
        &self,
        opponent: &OpponentSpec,
        kind: EncounterKind,
    ) -> Result<(Vec<Combatant>, Option<BossState>)> {
        let (mut roster, boss) = match opponent {
            OpponentSpec::Scaled {
                name,
                level,
                elements,
                skills,
            } => {
                if *level == 0 {
                    return Err(CombatError::InvalidOpponentSpec(
                        "level must be at least 1".into(),
                    ));
                }
                (
                    vec![Combatant::scaled_opponent(
                        name,
                        *level,
                        false,
                        elements.clone(),
                        skills.clone(),
                        &self.config,
                    )],
                    None,
                )
            }
            OpponentSpec::Custom(custom) => {
                if custom.max_hp <= 0 {
                    return Err(CombatError::InvalidOpponentSpec(
                        "max_hp must be positive".into(),
                    ));
                }
                if custom.level == 0 {
                    return Err(CombatError::InvalidOpponentSpec(
                        "level must be at least 1".into(),
                    ));
                }
                let stats = [
                    custom.strength,
                    custom.defense,
                    custom.agility,
                    custom.intelligence,
                    custom.wisdom,
                ];
                if stats.iter().any(|s| *s < 0) {
                    return Err(CombatError::InvalidOpponentSpec(
                        "stats must not be negative".into(),
                    ));
                }
                let mut combatant = Combatant::scaled_opponent(
                    &custom.name,
                    custom.level,
                    false,
                    custom.elements.clone(),
                    custom.skills.clone(),
                    &self.config,
                );
                combatant.max_hp = custom.max_hp;
                combatant.hp = custom.max_hp;
                combatant.stats.strength = custom.strength;
                combatant.stats.defense = custom.defense;
                combatant.stats.agility = custom.agility;
                combatant.stats.intelligence = custom.intelligence;
                combatant.stats.wisdom = custom.wisdom;
                (vec![combatant], None)
            }
            OpponentSpec::Boss { template, level } => {
                let def = crate::content::bosses::boss_template(template).ok_or_else(|| {
                    CombatError::InvalidOpponentSpec(format!("unknown boss template {template}"))
                })?;
                let combatant = Combatant::scaled_opponent(
                    def.name,
                    (*level).max(1),
                    true,
                    vec![def.element],
                    Vec::new(),
                    &self.config,
                );
                (vec![combatant], Some(BossState::new(def)))
            }
            OpponentSpec::Group { template, level } => {
                let def = groups::group(template).ok_or_else(|| {
                    CombatError::InvalidOpponentSpec(format!("unknown group {template}"))
                })?;
                let roster = def
                    .members
                    .iter()
                    .map(|member| {
                        let member_level =
                            (*level as i32 + member.level_offset).max(1) as u32;
                        Combatant::scaled_opponent(
                            member.name,
                            member_level,
                            false,
                            member.elements.to_vec(),
                            member.skills.iter().map(|s| s.to_string()).collect(),
                            &self.config,
                        )
                    })
                    .collect();
                (roster, None)
            }
        };

        if kind == EncounterKind::Dungeon {
            for combatant in &mut roster {
                combatant.apply_dungeon_boost();
            }
        }
        Ok((roster, boss))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::actor::{Personality, StatBlock};

    fn profile() -> ActorProfile {
        ActorProfile {
            identity: ActorId::new(),
            name: "Hero".to_string(),
            level: 5,
            hp: 120,
            max_hp: 120,
            stats: StatBlock {
                strength: 18,
                defense: 12,
                agility: 10,
                intelligence: 14,
                wisdom: 8,
            },
            elements: vec![Element::Physical],
            skills: vec!["slash".to_string(), "fireball".to_string()],
            skill_levels: Default::default(),
            personality: Personality::default(),
        }
    }

    fn wolf() -> OpponentSpec {
        OpponentSpec::Scaled {
            name: "Dire Wolf".to_string(),
            level: 3,
            elements: vec![Element::Nature],
            skills: vec![],
        }
    }

    #[test]
    fn test_one_encounter_per_identity() {
        let mut engine = CombatEngine::with_seed(1);
        let p = profile();
        engine
            .start_encounter(&p, wolf(), EncounterOptions::default())
            .unwrap();
        let err = engine
            .start_encounter(&p, wolf(), EncounterOptions::default())
            .unwrap_err();
        assert!(matches!(err, CombatError::AlreadyInEncounter(_)));
    }

    #[test]
    fn test_force_end_releases_identity() {
        let mut engine = CombatEngine::with_seed(1);
        let p = profile();
        engine
            .start_encounter(&p, wolf(), EncounterOptions::default())
            .unwrap();
        engine.force_end(p.identity).unwrap();
        assert!(!engine.is_in_encounter(p.identity));
        assert!(engine
            .start_encounter(&p, wolf(), EncounterOptions::default())
            .is_ok());
    }

    #[test]
    fn test_round_without_encounter_fails() {
        let mut engine = CombatEngine::with_seed(1);
        let err = engine.advance_round(ActorId::new(), None).unwrap_err();
        assert!(matches!(err, CombatError::NoActiveEncounter(_)));
    }

    #[test]
    fn test_invalid_custom_opponent_rejected() {
        let mut engine = CombatEngine::with_seed(1);
        let p = profile();
        let glitch = |max_hp: i32, strength: i32, defense: i32| {
            OpponentSpec::Custom(CustomOpponent {
                name: "Glitch".to_string(),
                level: 1,
                max_hp,
                strength,
                defense,
                agility: 1,
                intelligence: 1,
                wisdom: 1,
                elements: vec![],
                skills: vec![],
            })
        };
        for bad in [
            glitch(0, 1, 1),
            // Negative defense would turn mitigation into bonus damage
            glitch(50, -50, -40),
            glitch(50, 1, -1),
        ] {
            let err = engine
                .start_encounter(&p, bad, EncounterOptions::default())
                .unwrap_err();
            assert!(matches!(err, CombatError::InvalidOpponentSpec(_)));
        }
        assert!(!engine.is_in_encounter(p.identity));
    }

    #[test]
    fn test_unknown_skill_rejected_before_state_changes() {
        let mut engine = CombatEngine::with_seed(1);
        let p = profile();
        engine
            .start_encounter(&p, wolf(), EncounterOptions::default())
            .unwrap();
        let before = engine.active_summary(p.identity).unwrap();
        let err = engine
            .advance_round(
                p.identity,
                Some(PlayerAction::Skill {
                    id: "meteor".to_string(),
                }),
            )
            .unwrap_err();
        assert!(matches!(err, CombatError::UnknownSkill(_)));
        let after = engine.active_summary(p.identity).unwrap();
        assert_eq!(before.round, after.round);
        assert_eq!(before.enemy.hp, after.enemy.hp);
    }

    #[test]
    fn test_sweep_removes_only_stale_sessions() {
        let mut engine = CombatEngine::with_seed(1);
        let p = profile();
        engine
            .start_encounter(&p, wolf(), EncounterOptions::default())
            .unwrap();
        // Fresh session survives
        assert_eq!(engine.sweep_stale_at(1000), 0);
        // Well past the idle cutoff
        assert_eq!(engine.sweep_stale_at(10 * 60 * 1000), 1);
        assert!(!engine.is_in_encounter(p.identity));
    }

    #[test]
    fn test_available_skills_report() {
        let mut engine = CombatEngine::with_seed(1);
        let p = profile();
        engine
            .start_encounter(&p, wolf(), EncounterOptions::default())
            .unwrap();
        let skills = engine.available_skills(p.identity).unwrap();
        assert_eq!(skills.len(), 2);
        assert!(skills.iter().all(|s| s.ready));
    }
}
