//! Damage resolution pipeline
//!
//! Stage order is fixed: accuracy, base damage, combo bonus,
//! stance/style multipliers, critical, variance, weakened, flat defense
//! mitigation, world day modifiers, type effectiveness, defender stance,
//! defensive effects, apply, then effect payloads. Each stage is a pure
//! function of its inputs; the accuracy, critical, variance, and dodge
//! rolls are the only randomness and all draw from the caller's seeded
//! source.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::combat::action::Action;
use crate::combat::actor::Combatant;
use crate::combat::effects::{self, Effect, EffectKind};
use crate::combat::elements::{effectiveness, effectiveness_text, Element};
use crate::combat::stance::StanceModifiers;
use crate::content::combos::ComboDef;
use crate::content::skills::{EffectTarget, SkillEffect};
use crate::content::styles::StyleDef;
use crate::content::world::DayModifiers;
use crate::core::config::EngineConfig;
use crate::core::types::Side;

/// Basic attacks never reach certainty even in an accurate stance
const ACCURACY_CAP: f32 = 0.99;

/// Shared per-attack context the session sets up once per action
pub struct AttackContext<'a> {
    pub config: &'a EngineConfig,
    pub day: &'a DayModifiers,
    /// Extra variance from the active environment
    pub volatility: f32,
    pub attacker_side: Side,
    pub attacker_stance: StanceModifiers,
    pub defender_stance: StanceModifiers,
    pub style: Option<&'static StyleDef>,
    /// Combo triggered by this skill use, if any
    pub combo: Option<&'static ComboDef>,
}

/// What one resolved attack did
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackOutcome {
    pub hit: bool,
    pub critical: bool,
    /// Health actually removed from the defender
    pub applied: i32,
    pub guard_broken: bool,
    pub defender_defeated: bool,
    /// Recoil payloads can defeat the attacker
    pub attacker_defeated: bool,
}

/// Base damage of a basic attack
pub fn basic_damage(offense: i32, multiplier: f32) -> i32 {
    (offense as f32 * multiplier).floor() as i32
}

/// Symmetric variance around the damage computed so far
pub fn apply_variance(damage: i32, fraction: f32, rng: &mut ChaCha8Rng) -> i32 {
    if fraction <= 0.0 || damage <= 0 {
        return damage;
    }
    let spread = damage as f32 * fraction;
    (damage as f32 - spread + rng.gen::<f32>() * spread * 2.0).floor() as i32
}

/// Subtract the flat defense term, clamped to the stage floor
pub fn flat_mitigation(damage: i32, defense: i32, fraction: f32, floor: i32) -> i32 {
    let reduction = (defense as f32 * fraction).floor() as i32;
    (damage - reduction).max(floor)
}

/// Resolve one attack-like action end to end, mutating both sides
#[allow(clippy::too_many_arguments)]
pub fn resolve(
    ctx: &AttackContext,
    action: &Action,
    attacker: &mut Combatant,
    defender: &mut Combatant,
    attacker_effects: &mut Vec<Effect>,
    defender_effects: &mut Vec<Effect>,
    defender_guard: &mut u32,
    rng: &mut ChaCha8Rng,
    log: &mut Vec<String>,
) -> AttackOutcome {
    let config = ctx.config;
    let mut outcome = AttackOutcome::default();

    let (accuracy, element, base, crit_chance, floor, variance) = match action {
        Action::BasicAttack => {
            let base_accuracy = match ctx.attacker_side {
                Side::Player => config.basic_attack_accuracy,
                Side::Enemy => config.enemy_attack_accuracy,
            };
            (
                (base_accuracy + ctx.attacker_stance.accuracy_bonus).min(ACCURACY_CAP),
                Element::Physical,
                basic_damage(attacker.stats.strength, config.basic_attack_multiplier),
                0.0,
                1,
                config.damage_variance + ctx.volatility + ctx.day.variance_bonus,
            )
        }
        Action::SkillUse { def, level } => (
            (def.accuracy + ctx.attacker_stance.accuracy_bonus).clamp(0.0, 1.0),
            def.element,
            def.damage
                .map(|scaling| scaling.damage(&attacker.stats, *level))
                .unwrap_or(0),
            def.crit_chance,
            0,
            config.damage_variance + ctx.volatility + ctx.day.variance_bonus,
        ),
        Action::BossAbility(ability) => (
            1.0,
            ability.element,
            (attacker.stats.strength as f32
                * config.boss_ability_multiplier
                * ability.damage)
                .floor() as i32,
            0.0,
            1,
            config.boss_ability_variance,
        ),
        // Stance changes and target switches never reach the pipeline
        Action::StanceChange(_) | Action::SwitchTarget => return outcome,
    };

    // Stage 1: accuracy
    if rng.gen::<f32>() >= accuracy {
        log.push(format!(
            "{}'s {} misses {}!",
            attacker.name,
            action.label(),
            defender.name
        ));
        return outcome;
    }
    outcome.hit = true;

    // Stages 2-3: base damage, combo bonus
    let mut damage = base;
    if let Some(chain) = ctx.combo {
        damage = (damage as f32 * chain.damage_multiplier).floor() as i32;
        log.push(format!(
            "Combo! {} into {}: {}",
            chain.first, chain.second, chain.description
        ));
    }

    // Stage 4: attacker stance and combat style
    let style_multiplier = match (action, ctx.style) {
        (Action::SkillUse { def, .. }, Some(style)) => style.multiplier_for(def.id),
        _ => 1.0,
    };
    damage =
        (damage as f32 * ctx.attacker_stance.damage_dealt * style_multiplier).floor() as i32;

    // Stage 5: critical
    if crit_chance > 0.0 {
        let chance = crit_chance + ctx.attacker_stance.crit_bonus;
        if rng.gen::<f32>() < chance {
            damage = (damage as f32 * config.critical_multiplier).floor() as i32;
            outcome.critical = true;
        }
    }

    // Stage 6: variance
    damage = apply_variance(damage, variance, rng);

    // Weakened reduces output before mitigation
    damage = effects::outgoing(attacker_effects, damage);

    // Stage 7: flat defense mitigation
    damage = flat_mitigation(damage, defender.stats.defense, config.defense_mitigation, floor);

    // Stage 8: day modifiers
    let day_multiplier = match ctx.attacker_side {
        Side::Player => ctx.day.player_damage,
        Side::Enemy => ctx.day.enemy_damage,
    };
    damage = (damage as f32 * day_multiplier).floor() as i32;

    // Stage 9: type effectiveness
    let type_multiplier = effectiveness(element, &defender.elements);
    damage = (damage as f32 * type_multiplier).floor() as i32;
    if let Some(line) = effectiveness_text(type_multiplier) {
        log.push(line.to_string());
    }

    // Stage 10: defender stance
    damage = (damage as f32 * ctx.defender_stance.damage_taken).floor() as i32;

    // Stage 11: defensive effects
    let mitigation = effects::mitigate(
        defender_effects,
        damage,
        ctx.defender_stance.dodge_chance,
        rng,
    );
    if mitigation.dodged || mitigation.stance_evade {
        log.push(format!(
            "{} evades {}'s {}!",
            defender.name,
            attacker.name,
            action.label()
        ));
        return outcome;
    }
    if mitigation.absorbed > 0 {
        log.push(format!(
            "{}'s shield absorbs {} damage",
            defender.name, mitigation.absorbed
        ));
    }

    // Stage 12: apply damage and guard gain
    outcome.applied = mitigation.damage;
    if mitigation.damage > 0 {
        outcome.defender_defeated = defender.take_damage(mitigation.damage);
        let crit_note = if outcome.critical { " (critical!)" } else { "" };
        log.push(format!(
            "{} hits {} with {} for {} damage{}",
            attacker.name,
            defender.name,
            action.label(),
            mitigation.damage,
            crit_note
        ));

        let gain = ((mitigation.damage as f32 * config.guard_gain_fraction).floor() as u32).max(1);
        *defender_guard += gain;
        if *defender_guard >= config.guard_max {
            *defender_guard = 0;
            defender_effects.push(Effect::new(
                EffectKind::Broken {
                    amount: config.guard_break_amplify,
                },
                config.guard_break_duration,
            ));
            outcome.guard_broken = true;
            log.push(format!("{}'s guard shatters!", defender.name));
        }
    } else {
        log.push(format!(
            "{}'s {} is fully absorbed by {}",
            attacker.name,
            action.label(),
            defender.name
        ));
    }

    // Stage 13: action payloads
    match action {
        Action::SkillUse { def, .. } => {
            for payload in def.effects {
                apply_payload(
                    payload,
                    outcome.applied,
                    ctx.day,
                    attacker,
                    defender,
                    attacker_effects,
                    defender_effects,
                    log,
                );
                if !attacker.is_alive() {
                    outcome.attacker_defeated = true;
                }
            }
        }
        Action::BossAbility(ability) => {
            if let Some((kind, duration)) = ability.effect {
                defender_effects.push(Effect::new(kind, duration));
                log.push(format!("{} is afflicted: {}", defender.name, kind.label()));
            }
        }
        _ => {}
    }
    if let Some(chain) = ctx.combo {
        if let Some((kind, duration)) = chain.bonus_effect {
            defender_effects.push(Effect::new(kind, duration));
            log.push(format!(
                "The combo leaves {} {}",
                defender.name,
                kind.label()
            ));
        }
    }

    outcome
}

#[allow(clippy::too_many_arguments)]
fn apply_payload(
    payload: &SkillEffect,
    applied: i32,
    day: &DayModifiers,
    attacker: &mut Combatant,
    defender: &Combatant,
    attacker_effects: &mut Vec<Effect>,
    defender_effects: &mut Vec<Effect>,
    log: &mut Vec<String>,
) {
    match payload {
        SkillEffect::Heal(magnitude) => {
            let amount =
                (magnitude.resolve(attacker.max_hp) as f32 * day.healing).floor() as i32;
            attacker.heal(amount);
            log.push(format!("{} recovers {} health", attacker.name, amount));
        }
        SkillEffect::Lifesteal(fraction) => {
            let amount = ((applied as f32 * fraction).floor() as f32 * day.healing).floor() as i32;
            if amount > 0 {
                attacker.heal(amount);
                log.push(format!("{} drains {} health", attacker.name, amount));
            }
        }
        SkillEffect::SelfDamage(magnitude) => {
            let amount = magnitude.resolve(attacker.max_hp);
            attacker.take_damage(amount);
            log.push(format!("{} suffers {} recoil damage", attacker.name, amount));
        }
        SkillEffect::Status {
            target,
            kind,
            duration,
        } => {
            let effect = Effect::new(*kind, *duration);
            match target {
                EffectTarget::SelfSide => {
                    attacker_effects.push(effect);
                    log.push(format!("{} gains {}", attacker.name, kind.label()));
                }
                EffectTarget::Foe => {
                    defender_effects.push(effect);
                    log.push(format!("{} is afflicted: {}", defender.name, kind.label()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::stance::Stance;
    use crate::content::skills::skill;
    use crate::content::world::NEUTRAL;
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0)
    }

    fn combatant(strength: i32, defense: i32) -> Combatant {
        let cfg = EngineConfig::default();
        let mut c = Combatant::scaled_opponent("Dummy", 1, false, vec![], vec![], &cfg);
        c.stats.strength = strength;
        c.stats.defense = defense;
        c.max_hp = 500;
        c.hp = 500;
        c
    }

    fn no_variance_config() -> EngineConfig {
        EngineConfig {
            damage_variance: 0.0,
            basic_attack_accuracy: 0.99,
            ..EngineConfig::default()
        }
    }

    fn neutral_ctx<'a>(config: &'a EngineConfig, side: Side) -> AttackContext<'a> {
        AttackContext {
            config,
            day: &NEUTRAL,
            volatility: 0.0,
            attacker_side: side,
            attacker_stance: Stance::neutral(),
            defender_stance: Stance::neutral(),
            style: None,
            combo: None,
        }
    }

    #[test]
    fn test_basic_mitigation_arithmetic() {
        // offense 20 at 1.1 is 22, minus floor(10 * 0.3) leaves 19
        assert_eq!(basic_damage(20, 1.1), 22);
        assert_eq!(flat_mitigation(22, 10, 0.3, 1), 19);
    }

    #[test]
    fn test_mitigation_floor_holds() {
        assert_eq!(flat_mitigation(2, 100, 0.3, 1), 1);
        assert_eq!(flat_mitigation(2, 100, 0.3, 0), 0);
    }

    #[test]
    fn test_variance_bounds() {
        let mut r = rng();
        for _ in 0..500 {
            let v = apply_variance(100, 0.15, &mut r);
            assert!((84..=115).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn test_zero_variance_is_identity() {
        assert_eq!(apply_variance(57, 0.0, &mut rng()), 57);
    }

    #[test]
    fn test_basic_attack_end_to_end() {
        let config = no_variance_config();
        let ctx = neutral_ctx(&config, Side::Player);
        let mut attacker = combatant(20, 0);
        let mut defender = combatant(5, 10);
        let start_hp = defender.hp;
        let mut guard = 0;
        let mut log = Vec::new();
        let mut attacker_fx = Vec::new();
        let mut defender_fx = Vec::new();

        // Accuracy 0.99 can still miss; try until a hit lands
        let mut r = rng();
        let outcome = loop {
            let o = resolve(
                &ctx,
                &Action::BasicAttack,
                &mut attacker,
                &mut defender,
                &mut attacker_fx,
                &mut defender_fx,
                &mut guard,
                &mut r,
                &mut log,
            );
            if o.hit {
                break o;
            }
        };
        assert_eq!(outcome.applied, 19);
        assert_eq!(defender.hp, start_hp - 19);
        // Guard gained half of the applied damage
        assert_eq!(guard, 9);
    }

    #[test]
    fn test_guard_break_resets_and_marks() {
        let config = no_variance_config();
        let ctx = neutral_ctx(&config, Side::Player);
        let mut attacker = combatant(50, 0);
        let mut defender = combatant(5, 0);
        let mut guard = 95;
        let mut log = Vec::new();
        let mut attacker_fx = Vec::new();
        let mut defender_fx = Vec::new();
        let mut r = rng();

        let outcome = loop {
            let o = resolve(
                &ctx,
                &Action::BasicAttack,
                &mut attacker,
                &mut defender,
                &mut attacker_fx,
                &mut defender_fx,
                &mut guard,
                &mut r,
                &mut log,
            );
            if o.hit {
                break o;
            }
        };
        assert!(outcome.guard_broken);
        assert_eq!(guard, 0);
        assert!(defender_fx
            .iter()
            .any(|e| matches!(e.kind, EffectKind::Broken { .. })));
    }

    #[test]
    fn test_skill_payload_lands_on_foe() {
        let config = no_variance_config();
        let ctx = neutral_ctx(&config, Side::Player);
        let mut attacker = combatant(10, 0);
        attacker.stats.intelligence = 20;
        let mut defender = combatant(5, 0);
        let mut guard = 0;
        let mut log = Vec::new();
        let mut attacker_fx = Vec::new();
        let mut defender_fx = Vec::new();
        let mut r = rng();
        let def = skill("fireball").unwrap();

        let action = Action::SkillUse { def, level: 1 };
        loop {
            let o = resolve(
                &ctx,
                &action,
                &mut attacker,
                &mut defender,
                &mut attacker_fx,
                &mut defender_fx,
                &mut guard,
                &mut r,
                &mut log,
            );
            if o.hit {
                break;
            }
        }
        assert!(defender_fx
            .iter()
            .any(|e| matches!(e.kind, EffectKind::Dot { .. })));
    }

    #[test]
    fn test_weakened_attacker_deals_less() {
        let config = no_variance_config();
        let ctx = neutral_ctx(&config, Side::Player);
        let mut r = rng();
        let mut guard = 0;
        let mut log = Vec::new();
        let mut defender_fx = Vec::new();

        let mut attacker = combatant(20, 0);
        let mut defender = combatant(5, 0);
        let mut weakened = vec![Effect::new(EffectKind::Weakened { amount: 0.5 }, 2)];
        let outcome = loop {
            let o = resolve(
                &ctx,
                &Action::BasicAttack,
                &mut attacker,
                &mut defender,
                &mut weakened,
                &mut defender_fx,
                &mut guard,
                &mut r,
                &mut log,
            );
            if o.hit {
                break o;
            }
        };
        // 22 halved to 11, no defense to subtract
        assert_eq!(outcome.applied, 11);
    }
}
