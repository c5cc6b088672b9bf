//! Encounter sessions and per-round orchestration
//!
//! A session is the aggregate root for one running encounter: both
//! sides' combat state, guard meters, effect lists, the append-only
//! log, and the roster bookkeeping for group fights. `advance` runs
//! one full round to completion synchronously.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::combat::action::{Action, PlayerAction};
use crate::combat::actor::{Combatant, Personality};
use crate::combat::combo::ComboTracker;
use crate::combat::effects::{self, Effect, TickEvent};
use crate::combat::environment;
use crate::combat::evaluate;
use crate::combat::phases::BossState;
use crate::combat::pipeline::{self, AttackContext};
use crate::combat::stance::Stance;
use crate::content::environments::EnvironmentDef;
use crate::content::skills::skill;
use crate::content::styles::StyleDef;
use crate::content::world::DayState;
use crate::core::config::EngineConfig;
use crate::core::error::{CombatError, Result};
use crate::core::types::{ActorId, Round, SessionId, Side};

/// Flavor of encounter; dungeons spawn boosted opponents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncounterKind {
    #[default]
    Normal,
    Dungeon,
}

/// How an encounter ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Reward amounts computed at victory; granting them is the caller's job
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rewards {
    pub xp: u32,
    pub gold: u32,
}

/// One side's state as exposed to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideSummary {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub hp_percent: u32,
    pub guard: u32,
    pub guard_max: u32,
    pub effects: Vec<String>,
}

/// Snapshot emitted to the caller after every round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: Round,
    pub player: SideSummary,
    pub stance: String,
    pub enemy: SideSummary,
    /// Living opponents still waiting in the roster, current included
    pub opponents_remaining: usize,
    /// Label of the boss's pre-selected ability for the coming round
    pub intent: Option<String>,
    pub log_tail: Vec<String>,
}

/// Terminal record returned when an encounter ends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterResult {
    pub outcome: Outcome,
    pub rounds: Round,
    pub rewards: Option<Rewards>,
    pub log_tail: Vec<String>,
}

/// Either the fight continues or it just ended
#[derive(Debug, Clone)]
pub enum RoundOutcome {
    Ongoing(RoundSummary),
    Ended(EncounterResult),
}

/// Live state of one encounter
#[derive(Debug)]
pub struct EncounterSession {
    pub id: SessionId,
    pub owner: ActorId,
    pub player: Combatant,
    pub personality: Personality,
    pub stance: Stance,
    pub style: Option<&'static StyleDef>,
    /// Ordered opponents; `target` indexes the active one
    pub roster: Vec<Combatant>,
    pub target: usize,
    pub boss: Option<BossState>,
    pub environment: Option<&'static EnvironmentDef>,
    pub day: &'static DayState,
    pub player_effects: Vec<Effect>,
    /// Effects on the active opponent only; cleared on target switch
    pub enemy_effects: Vec<Effect>,
    pub player_guard: u32,
    pub enemy_guard: u32,
    pub combo: ComboTracker,
    pub round: Round,
    pub log: Vec<String>,
    /// Engine-clock timestamp of the last caller interaction
    pub last_action_ms: u64,
}

enum KillFollowup {
    Switched,
    AllDown,
}

impl EncounterSession {
    pub fn active_enemy(&self) -> &Combatant {
        &self.roster[self.target]
    }

    fn living_remaining(&self) -> usize {
        self.roster.iter().filter(|c| c.is_alive()).count()
    }

    /// Run one complete round
    pub fn advance(
        &mut self,
        chosen: Option<PlayerAction>,
        now_ms: u64,
        config: &EngineConfig,
        rng: &mut ChaCha8Rng,
    ) -> Result<RoundOutcome> {
        // Validate the explicit choice before any state changes
        let player_action = self.resolve_player_action(chosen, config)?;
        self.last_action_ms = now_ms;
        self.log.push(format!("[Round {}]", self.round));

        // Environment rolls land before anything else
        if let Some(env) = self.environment {
            let lines = environment::process(env, &mut self.player_effects, rng);
            self.log.extend(lines);
        }

        // Over-time ticks, then duration decay, both sides
        if self.tick_side(Side::Player) {
            return Ok(RoundOutcome::Ended(self.finish_defeat(config)));
        }
        if self.tick_side(Side::Enemy) {
            match self.handle_enemy_down() {
                KillFollowup::AllDown => {
                    return Ok(RoundOutcome::Ended(self.finish_victory(config)))
                }
                KillFollowup::Switched => {}
            }
        }

        // Phase transitions use the active opponent's health
        if let Some(boss) = &mut self.boss {
            let pct = self.roster[self.target].hp_percent();
            if let Some(phase) = boss.check_transition(pct) {
                self.log.push(format!(
                    "{} {}!",
                    boss.template.name, phase.description
                ));
            }
        }

        // Controlled side acts
        if effects::has_stun(&self.player_effects) {
            self.log
                .push(format!("{} is stunned and cannot act!", self.player.name));
        } else {
            match player_action {
                Action::StanceChange(stance) => {
                    self.stance = stance;
                    self.log.push(format!(
                        "{} shifts to a {} stance",
                        self.player.name,
                        stance.name()
                    ));
                }
                Action::SwitchTarget => self.manual_switch(),
                action => {
                    self.player_attacks(&action, now_ms, config, rng);
                    if !self.roster[self.target].is_alive() {
                        match self.handle_enemy_down() {
                            KillFollowup::AllDown => {
                                return Ok(RoundOutcome::Ended(self.finish_victory(config)))
                            }
                            // The fresh opponent does not retaliate in
                            // the round its predecessor fell
                            KillFollowup::Switched => return Ok(self.end_of_round(config, rng)),
                        }
                    }
                    if !self.player.is_alive() {
                        return Ok(RoundOutcome::Ended(self.finish_defeat(config)));
                    }
                }
            }
        }

        // Opponent acts
        if effects::has_stun(&self.enemy_effects) {
            self.log.push(format!(
                "{} is stunned and cannot act!",
                self.roster[self.target].name
            ));
        } else {
            let enemy_action = match self.boss.as_mut().and_then(|b| b.take_intent()) {
                Some(ability) => Action::BossAbility(ability),
                None => evaluate::choose_enemy_action(&self.roster[self.target], config, rng),
            };
            self.enemy_attacks(&enemy_action, config, rng);
            if !self.player.is_alive() {
                return Ok(RoundOutcome::Ended(self.finish_defeat(config)));
            }
        }

        Ok(self.end_of_round(config, rng))
    }

    fn resolve_player_action(
        &self,
        chosen: Option<PlayerAction>,
        config: &EngineConfig,
    ) -> Result<Action> {
        match chosen {
            None => Ok(evaluate::choose_player_action(
                &self.player,
                self.active_enemy(),
                self.personality,
                config,
            )),
            Some(PlayerAction::Attack) => Ok(Action::BasicAttack),
            Some(PlayerAction::ChangeStance(stance)) => Ok(Action::StanceChange(stance)),
            Some(PlayerAction::SwitchTarget) => Ok(Action::SwitchTarget),
            Some(PlayerAction::Skill { id }) => {
                let def = skill(&id).ok_or_else(|| CombatError::UnknownSkill(id.clone()))?;
                if !self.player.skills.iter().any(|s| s == &id) {
                    return Err(CombatError::UnknownSkill(id));
                }
                let remaining = self.player.cooldown_remaining(&id);
                if remaining > 0 {
                    return Err(CombatError::SkillOnCooldown {
                        skill: id,
                        remaining,
                    });
                }
                Ok(Action::SkillUse {
                    def,
                    level: self.player.skill_level(&id),
                })
            }
        }
    }

    /// Apply DOT and regeneration then decay durations for one side.
    /// Returns true if the controlled side died (only possible for
    /// `Side::Player`; a dead opponent is reported via health).
    fn tick_side(&mut self, side: Side) -> bool {
        let modifiers = &self.day.modifiers;
        let (effect_list, combatant) = match side {
            Side::Player => (&mut self.player_effects, &mut self.player),
            Side::Enemy => (&mut self.enemy_effects, &mut self.roster[self.target]),
        };
        let events =
            effects::tick_over_time(effect_list, combatant.max_hp, modifiers.dot, modifiers.healing);
        let mut lines = Vec::new();
        for event in events {
            match event {
                TickEvent::Damage { amount, kind } => {
                    combatant.take_damage(amount);
                    lines.push(format!(
                        "{} takes {} {} damage",
                        combatant.name,
                        amount,
                        kind.label()
                    ));
                }
                TickEvent::Heal { amount } => {
                    combatant.heal(amount);
                    lines.push(format!("{} regenerates {} health", combatant.name, amount));
                }
            }
        }
        effects::decay(effect_list);
        self.log.extend(lines);
        side == Side::Player && !self.player.is_alive()
    }

    fn player_attacks(
        &mut self,
        action: &Action,
        now_ms: u64,
        config: &EngineConfig,
        rng: &mut ChaCha8Rng,
    ) {
        let combo = match action {
            Action::SkillUse { def, .. } => {
                if def.cooldown > 0 {
                    self.player
                        .cooldowns
                        .insert(def.id.to_string(), def.cooldown);
                }
                self.combo.on_skill_use(def.id, now_ms, config.combo_window_ms)
            }
            _ => None,
        };
        let ctx = AttackContext {
            config,
            day: &self.day.modifiers,
            volatility: self.environment.map(|e| e.volatility).unwrap_or(0.0),
            attacker_side: Side::Player,
            attacker_stance: self.stance.modifiers(),
            defender_stance: Stance::neutral(),
            style: self.style,
            combo,
        };
        pipeline::resolve(
            &ctx,
            action,
            &mut self.player,
            &mut self.roster[self.target],
            &mut self.player_effects,
            &mut self.enemy_effects,
            &mut self.enemy_guard,
            rng,
            &mut self.log,
        );
    }

    fn enemy_attacks(&mut self, action: &Action, config: &EngineConfig, rng: &mut ChaCha8Rng) {
        let ctx = AttackContext {
            config,
            day: &self.day.modifiers,
            volatility: self.environment.map(|e| e.volatility).unwrap_or(0.0),
            attacker_side: Side::Enemy,
            attacker_stance: Stance::neutral(),
            defender_stance: self.stance.modifiers(),
            style: None,
            combo: None,
        };
        pipeline::resolve(
            &ctx,
            action,
            &mut self.roster[self.target],
            &mut self.player,
            &mut self.enemy_effects,
            &mut self.player_effects,
            &mut self.player_guard,
            rng,
            &mut self.log,
        );
    }

    /// The active opponent just fell: bring in the next living one, or
    /// report the roster empty
    fn handle_enemy_down(&mut self) -> KillFollowup {
        self.log
            .push(format!("{} is defeated!", self.roster[self.target].name));
        self.combo.reset();
        for i in self.target + 1..self.roster.len() {
            if self.roster[i].is_alive() {
                self.target = i;
                self.enemy_effects.clear();
                self.enemy_guard = 0;
                self.log
                    .push(format!("{} steps forward!", self.roster[i].name));
                return KillFollowup::Switched;
            }
        }
        KillFollowup::AllDown
    }

    /// Caller-requested switch; cycles to the next living opponent
    fn manual_switch(&mut self) {
        let len = self.roster.len();
        for offset in 1..len {
            let i = (self.target + offset) % len;
            if self.roster[i].is_alive() {
                self.target = i;
                self.enemy_effects.clear();
                self.enemy_guard = 0;
                self.log
                    .push(format!("{} turns to face {}", self.player.name, self.roster[i].name));
                return;
            }
        }
        self.log.push("No other opponent to face".to_string());
    }

    fn end_of_round(&mut self, config: &EngineConfig, rng: &mut ChaCha8Rng) -> RoundOutcome {
        self.player.tick_cooldowns();
        if let Some(boss) = &mut self.boss {
            boss.prime_intent(rng);
        }
        self.round += 1;
        RoundOutcome::Ongoing(self.summary(config))
    }

    fn finish_victory(&mut self, config: &EngineConfig) -> EncounterResult {
        self.combo.reset();
        let base_xp: u32 = self
            .roster
            .iter()
            .map(|c| config.xp_per_level * c.level)
            .sum();
        let base_gold: u32 = self
            .roster
            .iter()
            .map(|c| config.gold_per_level * c.level)
            .sum();
        let rewards = Rewards {
            xp: (base_xp as f32 * self.day.modifiers.xp).floor() as u32,
            gold: (base_gold as f32 * self.day.modifiers.gold).floor() as u32,
        };
        self.log.push(format!(
            "Victory! {} earns {} experience and {} gold",
            self.player.name, rewards.xp, rewards.gold
        ));
        EncounterResult {
            outcome: Outcome::Victory,
            rounds: self.round,
            rewards: Some(rewards),
            log_tail: tail(&self.log, config.result_log_tail),
        }
    }

    fn finish_defeat(&mut self, config: &EngineConfig) -> EncounterResult {
        self.combo.reset();
        self.log
            .push(format!("{} has been defeated...", self.player.name));
        EncounterResult {
            outcome: Outcome::Defeat,
            rounds: self.round,
            rewards: None,
            log_tail: tail(&self.log, config.result_log_tail),
        }
    }

    /// Snapshot of the current state for the caller
    pub fn summary(&self, config: &EngineConfig) -> RoundSummary {
        let enemy = self.active_enemy();
        RoundSummary {
            round: self.round,
            player: side_summary(&self.player, self.player_guard, &self.player_effects, config),
            stance: self.stance.name().to_string(),
            enemy: side_summary(enemy, self.enemy_guard, &self.enemy_effects, config),
            opponents_remaining: self.living_remaining(),
            intent: self
                .boss
                .as_ref()
                .and_then(|b| b.intent)
                .map(|a| a.name.to_string()),
            log_tail: tail(&self.log, config.summary_log_tail),
        }
    }
}

fn side_summary(
    combatant: &Combatant,
    guard: u32,
    effect_list: &[Effect],
    config: &EngineConfig,
) -> SideSummary {
    SideSummary {
        name: combatant.name.clone(),
        hp: combatant.hp,
        max_hp: combatant.max_hp,
        hp_percent: combatant.hp_percent(),
        guard,
        guard_max: config.guard_max,
        effects: effect_list.iter().map(|e| e.kind.label().to_string()).collect(),
    }
}

fn tail(log: &[String], n: usize) -> Vec<String> {
    log.iter().rev().take(n).rev().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::effects::EffectKind;
    use crate::content::world;
    use rand::SeedableRng;

    fn session_vs_wolf(config: &EngineConfig) -> EncounterSession {
        let mut player =
            Combatant::scaled_opponent("Hero", 5, false, vec![], vec!["slash".to_string()], config);
        player.stats.strength = 30;
        EncounterSession {
            id: SessionId::new(),
            owner: ActorId::new(),
            player,
            personality: Personality::default(),
            stance: Stance::default(),
            style: None,
            roster: vec![Combatant::scaled_opponent(
                "Wolf",
                1,
                false,
                vec![],
                vec![],
                config,
            )],
            target: 0,
            boss: None,
            environment: None,
            day: world::day_for_seed(0),
            player_effects: Vec::new(),
            enemy_effects: Vec::new(),
            player_guard: 0,
            enemy_guard: 0,
            combo: ComboTracker::new(),
            round: 1,
            log: Vec::new(),
            last_action_ms: 0,
        }
    }

    #[test]
    fn test_stunned_player_skips_the_action() {
        let config = EngineConfig::default();
        let mut session = session_vs_wolf(&config);
        // Duration 2 so the stun survives the round-start decay
        session
            .player_effects
            .push(Effect::new(EffectKind::Stun, 2));
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let outcome = session
            .advance(Some(PlayerAction::Attack), 0, &config, &mut rng)
            .unwrap();
        assert!(session
            .log
            .iter()
            .any(|l| l == "Hero is stunned and cannot act!"));
        // The wolf was never attacked
        match outcome {
            RoundOutcome::Ongoing(summary) => assert_eq!(summary.enemy.hp, summary.enemy.max_hp),
            RoundOutcome::Ended(_) => panic!("one skipped round cannot end the fight"),
        }
    }

    #[test]
    fn test_log_tail_keeps_most_recent() {
        let log: Vec<String> = (0..10).map(|i| format!("line {i}")).collect();
        let t = tail(&log, 3);
        assert_eq!(t, vec!["line 7", "line 8", "line 9"]);
    }

    #[test]
    fn test_log_tail_shorter_than_limit() {
        let log = vec!["only".to_string()];
        assert_eq!(tail(&log, 6).len(), 1);
    }
}
