//! Automated action selection
//!
//! Controlled-side selection is a pure utility function over the two
//! stat snapshots and a personality vector, so the same situation
//! always yields the same choice. Opponent selection is the only place
//! randomness enters, and it draws from the engine's seeded source.

use ordered_float::OrderedFloat;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::combat::action::Action;
use crate::combat::actor::{Combatant, Personality};
use crate::content::skills::{skill, EffectTarget, SkillDef, SkillEffect};
use crate::core::config::EngineConfig;

/// Health fraction below which healing starts to look attractive
const HEAL_PRESSURE: f32 = 0.65;

/// Choose the best action for the controlled side
///
/// Scores every known off-cooldown skill and the basic attack, picking
/// the maximum. Falls back to basic attack when no skill qualifies.
pub fn choose_player_action(
    player: &Combatant,
    foe: &Combatant,
    personality: Personality,
    config: &EngineConfig,
) -> Action {
    let p = personality.clamped();

    let basic_estimate =
        (player.stats.strength as f32 * config.basic_attack_multiplier).floor();
    let basic_score = (basic_estimate / foe.hp.max(1) as f32).min(1.5)
        * (0.5 + p.aggression)
        * config.basic_attack_accuracy;

    let mut best = (OrderedFloat(basic_score), Action::BasicAttack);
    for id in &player.skills {
        if player.cooldown_remaining(id) > 0 {
            continue;
        }
        let Some(def) = skill(id) else { continue };
        let level = player.skill_level(id);
        let score = OrderedFloat(score_skill(def, level, player, foe, &p));
        if score > best.0 {
            best = (score, Action::SkillUse { def, level });
        }
    }
    best.1
}

/// Deterministic utility score for one skill in the current situation
fn score_skill(
    def: &'static SkillDef,
    level: u32,
    player: &Combatant,
    foe: &Combatant,
    p: &Personality,
) -> f32 {
    let own_hp = player.hp_fraction();
    let mut score = 0.0;

    if let Some(scaling) = def.damage {
        let estimate = scaling.damage(&player.stats, level);
        let fraction = estimate as f32 / foe.hp.max(1) as f32;
        score += fraction.min(1.5) * (0.5 + p.aggression);
        if estimate >= foe.hp {
            // Finisher
            score += 0.8 * (0.5 + p.aggression);
        }
    }

    for effect in def.effects {
        match effect {
            SkillEffect::Heal(magnitude) => {
                if own_hp < HEAL_PRESSURE {
                    let restored =
                        magnitude.resolve(player.max_hp) as f32 / player.max_hp.max(1) as f32;
                    score += (1.0 - own_hp) * restored.min(1.0) * (0.5 + p.defensiveness) * 3.0;
                }
            }
            SkillEffect::Lifesteal(fraction) => {
                score += fraction * (1.0 - own_hp) * (0.5 + p.defensiveness) * 0.5;
            }
            SkillEffect::SelfDamage(magnitude) => {
                let cost = magnitude.resolve(player.max_hp) as f32 / player.max_hp.max(1) as f32;
                score -= cost * 2.0 * (1.0 - p.risk_tolerance);
            }
            SkillEffect::Status { target, .. } => {
                let threat = foe.stats.strength as f32 / player.hp.max(1) as f32;
                match target {
                    EffectTarget::SelfSide => {
                        score += threat.min(1.5) * p.defensiveness * 0.8;
                    }
                    EffectTarget::Foe => {
                        score += 0.35 * (0.5 + p.tactical_awareness);
                    }
                }
            }
        }
    }

    score -= def.cooldown as f32 * 0.04 * p.cooldown_awareness;
    score * def.accuracy
}

/// Unscripted opponent behavior: sometimes a random known skill,
/// otherwise a basic attack
pub fn choose_enemy_action(
    enemy: &Combatant,
    config: &EngineConfig,
    rng: &mut ChaCha8Rng,
) -> Action {
    if !enemy.skills.is_empty() && rng.gen::<f64>() < config.enemy_skill_chance {
        let pick = rng.gen_range(0..enemy.skills.len());
        let id = &enemy.skills[pick];
        if let Some(def) = skill(id) {
            return Action::SkillUse {
                def,
                level: enemy.skill_level(id),
            };
        }
    }
    Action::BasicAttack
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::elements::Element;
    use rand::SeedableRng;

    fn fighter(skills: &[&str]) -> Combatant {
        let cfg = EngineConfig::default();
        let mut c = Combatant::scaled_opponent(
            "Fighter",
            5,
            false,
            vec![Element::Physical],
            skills.iter().map(|s| s.to_string()).collect(),
            &cfg,
        );
        c.stats.intelligence = c.stats.strength;
        c.stats.wisdom = c.stats.strength;
        c
    }

    #[test]
    fn test_selection_is_deterministic() {
        let cfg = EngineConfig::default();
        let player = fighter(&["slash", "cleave", "heal"]);
        let foe = fighter(&[]);
        let a = choose_player_action(&player, &foe, Personality::default(), &cfg);
        let b = choose_player_action(&player, &foe, Personality::default(), &cfg);
        assert_eq!(a.label(), b.label());
    }

    #[test]
    fn test_low_health_prefers_heal() {
        let cfg = EngineConfig::default();
        let mut player = fighter(&["slash", "heal"]);
        player.hp = player.max_hp / 10;
        let foe = fighter(&[]);
        let defensive = Personality {
            defensiveness: 1.0,
            aggression: 0.2,
            ..Personality::default()
        };
        let action = choose_player_action(&player, &foe, defensive, &cfg);
        assert_eq!(action.label(), "Heal");
    }

    #[test]
    fn test_full_health_never_heals() {
        let cfg = EngineConfig::default();
        let player = fighter(&["slash", "heal"]);
        let foe = fighter(&[]);
        let action = choose_player_action(&player, &foe, Personality::default(), &cfg);
        assert_ne!(action.label(), "Heal");
    }

    #[test]
    fn test_cooldown_excludes_skill() {
        let cfg = EngineConfig::default();
        let mut player = fighter(&["cleave"]);
        player.cooldowns.insert("cleave".to_string(), 2);
        let foe = fighter(&[]);
        let action = choose_player_action(&player, &foe, Personality::default(), &cfg);
        assert!(matches!(action, Action::BasicAttack));
    }

    #[test]
    fn test_skilless_enemy_always_attacks() {
        let cfg = EngineConfig::default();
        let enemy = fighter(&[]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..20 {
            assert!(matches!(
                choose_enemy_action(&enemy, &cfg, &mut rng),
                Action::BasicAttack
            ));
        }
    }

    #[test]
    fn test_enemy_mixes_skills_and_attacks() {
        let cfg = EngineConfig::default();
        let enemy = fighter(&["slash"]);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut skills = 0;
        let mut basics = 0;
        for _ in 0..200 {
            match choose_enemy_action(&enemy, &cfg, &mut rng) {
                Action::SkillUse { .. } => skills += 1,
                Action::BasicAttack => basics += 1,
                _ => {}
            }
        }
        assert!(skills > 50);
        assert!(basics > 20);
    }
}
