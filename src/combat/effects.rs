//! Status effects and their resolution
//!
//! Effects are a closed sum type so the over-time and mitigation
//! resolvers can match exhaustively; adding a kind is a compile-time
//! checked change everywhere it matters.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Magnitude of a heal, damage tick, or recoil
///
/// Content expresses small sustained amounts as fractions of max
/// health and one-off amounts as flat values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Magnitude {
    Flat(i32),
    FractionOfMax(f32),
}

impl Magnitude {
    pub fn resolve(&self, max_hp: i32) -> i32 {
        match self {
            Magnitude::Flat(v) => *v,
            Magnitude::FractionOfMax(f) => (max_hp as f32 * f).floor() as i32,
        }
    }
}

/// Flavor of damage-over-time; only the log label differs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DotKind {
    Poison,
    Bleed,
    Burn,
}

impl DotKind {
    pub fn label(&self) -> &'static str {
        match self {
            DotKind::Poison => "poison",
            DotKind::Bleed => "bleed",
            DotKind::Burn => "burn",
        }
    }
}

/// Effect kind with its kind-specific payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Periodic damage at the start of each round
    Dot { kind: DotKind, per_round: Magnitude },
    /// Periodic healing at the start of each round
    Regeneration { per_round: Magnitude },
    /// Skip the affected side's action entirely
    Stun,
    /// Sluggish; currently narrative-only, reserved for initiative rules
    Slow,
    /// Reduces the affected side's outgoing damage by a fraction
    Weakened { amount: f32 },
    /// Amplifies damage taken by a fraction (applied after reductions)
    Exposed { amount: f32 },
    /// Reduces incoming damage by a fraction, floored at 1
    DefenseBoost { amount: f32 },
    /// Reduces incoming damage by a fraction
    DamageReduction { amount: f32 },
    /// Chance to fully negate an incoming hit
    Dodge { chance: f32 },
    /// Absorption pool consumed before health, resolved before Absorb
    Ward { pool: i32 },
    /// Generic absorption pool consumed before health
    Absorb { pool: i32 },
    /// Guard-broken: amplifies damage taken, applied last
    Broken { amount: f32 },
}

impl EffectKind {
    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::Dot { kind, .. } => kind.label(),
            EffectKind::Regeneration { .. } => "regeneration",
            EffectKind::Stun => "stun",
            EffectKind::Slow => "slow",
            EffectKind::Weakened { .. } => "weakened",
            EffectKind::Exposed { .. } => "exposed",
            EffectKind::DefenseBoost { .. } => "defense up",
            EffectKind::DamageReduction { .. } => "damage reduction",
            EffectKind::Dodge { .. } => "dodge",
            EffectKind::Ward { .. } => "ward",
            EffectKind::Absorb { .. } => "absorb",
            EffectKind::Broken { .. } => "broken",
        }
    }
}

/// An active effect on one side
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    /// Remaining rounds; strictly positive while active
    pub duration: u32,
    /// Template id for ambient (environment) effects, used for dedup
    pub source: Option<&'static str>,
}

impl Effect {
    pub fn new(kind: EffectKind, duration: u32) -> Self {
        Self {
            kind,
            duration,
            source: None,
        }
    }

    pub fn ambient(kind: EffectKind, duration: u32, source: &'static str) -> Self {
        Self {
            kind,
            duration,
            source: Some(source),
        }
    }
}

/// Append an effect, replacing any prior instance from the same
/// ambient source (environment auras must not stack)
pub fn apply(effects: &mut Vec<Effect>, effect: Effect) {
    if let Some(src) = effect.source {
        effects.retain(|e| e.source != Some(src));
    }
    effects.push(effect);
}

pub fn has_stun(effects: &[Effect]) -> bool {
    effects
        .iter()
        .any(|e| matches!(e.kind, EffectKind::Stun) && e.duration > 0)
}

/// One resolved over-time tick
#[derive(Debug, Clone, Copy)]
pub enum TickEvent {
    Damage { amount: i32, kind: DotKind },
    Heal { amount: i32 },
}

/// Resolve DOT and regeneration ticks for one side
///
/// Returns the events to apply; the caller owns health mutation and
/// logging. Day modifiers scale DOT and healing independently.
pub fn tick_over_time(
    effects: &[Effect],
    max_hp: i32,
    dot_multiplier: f32,
    healing_multiplier: f32,
) -> Vec<TickEvent> {
    let mut events = Vec::new();
    for effect in effects {
        match effect.kind {
            EffectKind::Dot { kind, per_round } => {
                let raw = per_round.resolve(max_hp);
                let amount = (raw as f32 * dot_multiplier).floor() as i32;
                if amount > 0 {
                    events.push(TickEvent::Damage { amount, kind });
                }
            }
            EffectKind::Regeneration { per_round } => {
                let raw = per_round.resolve(max_hp);
                let amount = (raw as f32 * healing_multiplier).floor() as i32;
                if amount > 0 {
                    events.push(TickEvent::Heal { amount });
                }
            }
            _ => {}
        }
    }
    events
}

/// Decrement every duration by exactly 1 and drop expired effects
pub fn decay(effects: &mut Vec<Effect>) {
    for effect in effects.iter_mut() {
        effect.duration = effect.duration.saturating_sub(1);
    }
    effects.retain(|e| e.duration > 0);
}

/// Outgoing damage after the attacker's own debuffs (weakened)
pub fn outgoing(effects: &[Effect], damage: i32) -> i32 {
    let mut result = damage;
    for effect in effects {
        if let EffectKind::Weakened { amount } = effect.kind {
            result = (result as f32 * (1.0 - amount)).floor() as i32;
        }
    }
    result.max(0)
}

/// Outcome of defensive resolution
#[derive(Debug, Clone, Copy)]
pub struct Mitigation {
    pub damage: i32,
    /// Negated by a dodge effect
    pub dodged: bool,
    /// Negated by the controlled side's stance
    pub stance_evade: bool,
    /// Total soaked by ward/absorb pools
    pub absorbed: i32,
}

/// Resolve the defender's effects against incoming damage
///
/// Order: percentage reduction, flat defense boost, dodge, stance dodge,
/// ward pool, absorb pool, then the exposed/broken amplifiers last.
/// Pools are consumed in place.
pub fn mitigate(
    effects: &mut [Effect],
    damage: i32,
    stance_dodge: f32,
    rng: &mut ChaCha8Rng,
) -> Mitigation {
    let mut result = damage;

    if let Some(amount) = effects.iter().find_map(|e| match e.kind {
        EffectKind::DamageReduction { amount } => Some(amount),
        _ => None,
    }) {
        result = (result as f32 * (1.0 - amount)).floor() as i32;
    }

    if let Some(amount) = effects.iter().find_map(|e| match e.kind {
        EffectKind::DefenseBoost { amount } => Some(amount),
        _ => None,
    }) {
        result = (result - (result as f32 * amount).floor() as i32).max(1);
    }

    if let Some(chance) = effects.iter().find_map(|e| match e.kind {
        EffectKind::Dodge { chance } => Some(chance),
        _ => None,
    }) {
        if rng.gen::<f32>() < chance {
            return Mitigation {
                damage: 0,
                dodged: true,
                stance_evade: false,
                absorbed: 0,
            };
        }
    }

    if stance_dodge > 0.0 && rng.gen::<f32>() < stance_dodge {
        return Mitigation {
            damage: 0,
            dodged: false,
            stance_evade: true,
            absorbed: 0,
        };
    }

    let mut absorbed_total = 0;
    for effect in effects.iter_mut() {
        match &mut effect.kind {
            EffectKind::Ward { pool } if *pool > 0 => {
                let soaked = (*pool).min(result);
                *pool -= soaked;
                result -= soaked;
                absorbed_total += soaked;
            }
            _ => {}
        }
    }
    for effect in effects.iter_mut() {
        match &mut effect.kind {
            EffectKind::Absorb { pool } if *pool > 0 => {
                let soaked = (*pool).min(result);
                *pool -= soaked;
                result -= soaked;
                absorbed_total += soaked;
            }
            _ => {}
        }
    }

    for effect in effects.iter() {
        match effect.kind {
            EffectKind::Exposed { amount } | EffectKind::Broken { amount } => {
                result = (result as f32 * (1.0 + amount)).floor() as i32;
            }
            _ => {}
        }
    }

    Mitigation {
        damage: result.max(0),
        dodged: false,
        stance_evade: false,
        absorbed: absorbed_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_durations_decrement_and_expire() {
        let mut effects = vec![
            Effect::new(EffectKind::Stun, 1),
            Effect::new(EffectKind::Slow, 2),
        ];
        decay(&mut effects);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].duration, 1);
        decay(&mut effects);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_absorb_pool_consumed_before_health() {
        // An absorb pool of 15 against 10 incoming leaves 5 in the pool
        let mut effects = vec![Effect::new(EffectKind::Absorb { pool: 15 }, 3)];
        let m = mitigate(&mut effects, 10, 0.0, &mut rng());
        assert_eq!(m.damage, 0);
        assert_eq!(m.absorbed, 10);
        assert_eq!(effects[0].kind, EffectKind::Absorb { pool: 5 });
    }

    #[test]
    fn test_ward_consumed_before_absorb() {
        let mut effects = vec![
            Effect::new(EffectKind::Absorb { pool: 10 }, 3),
            Effect::new(EffectKind::Ward { pool: 4 }, 3),
        ];
        let m = mitigate(&mut effects, 12, 0.0, &mut rng());
        assert_eq!(m.damage, 0);
        assert_eq!(effects[1].kind, EffectKind::Ward { pool: 0 });
        assert_eq!(effects[0].kind, EffectKind::Absorb { pool: 2 });
    }

    #[test]
    fn test_exposed_amplifies_after_reduction() {
        let mut effects = vec![
            Effect::new(EffectKind::DamageReduction { amount: 0.5 }, 2),
            Effect::new(EffectKind::Exposed { amount: 0.5 }, 2),
        ];
        // 100 -> 50 after reduction -> 75 after exposed
        let m = mitigate(&mut effects, 100, 0.0, &mut rng());
        assert_eq!(m.damage, 75);
    }

    #[test]
    fn test_weakened_reduces_outgoing() {
        let effects = vec![Effect::new(EffectKind::Weakened { amount: 0.25 }, 2)];
        assert_eq!(outgoing(&effects, 100), 75);
        assert_eq!(outgoing(&[], 100), 100);
    }

    #[test]
    fn test_dot_tick_scales_with_day_modifier() {
        let effects = vec![Effect::new(
            EffectKind::Dot {
                kind: DotKind::Poison,
                per_round: Magnitude::FractionOfMax(0.1),
            },
            3,
        )];
        let events = tick_over_time(&effects, 200, 1.25, 1.0);
        assert_eq!(events.len(), 1);
        match events[0] {
            TickEvent::Damage { amount, kind } => {
                assert_eq!(amount, 25);
                assert_eq!(kind, DotKind::Poison);
            }
            _ => panic!("expected damage tick"),
        }
    }

    #[test]
    fn test_ambient_effects_deduplicate_by_source() {
        let mut effects = Vec::new();
        apply(
            &mut effects,
            Effect::ambient(
                EffectKind::Regeneration {
                    per_round: Magnitude::FractionOfMax(0.05),
                },
                999,
                "nature_favor",
            ),
        );
        apply(
            &mut effects,
            Effect::ambient(
                EffectKind::Regeneration {
                    per_round: Magnitude::FractionOfMax(0.05),
                },
                999,
                "nature_favor",
            ),
        );
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_stun_detection() {
        let effects = vec![Effect::new(EffectKind::Stun, 1)];
        assert!(has_stun(&effects));
        assert!(!has_stun(&[]));
    }
}
