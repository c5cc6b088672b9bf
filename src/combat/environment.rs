//! Environmental hazard processing
//!
//! At the start of each round every template of the active environment
//! is rolled independently. Hazards land on the controlled side, buffs
//! land on the controlled side without stacking, obstacles only leave a
//! log line.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::combat::effects::{self, Effect};
use crate::content::environments::{EnvironmentDef, TemplateKind};

/// Roll the environment's templates and apply triggered payloads to the
/// controlled side, returning the log lines produced
pub fn process(
    env: &'static EnvironmentDef,
    player_effects: &mut Vec<Effect>,
    rng: &mut ChaCha8Rng,
) -> Vec<String> {
    let mut lines = Vec::new();
    for template in env.templates {
        if rng.gen::<f32>() >= template.chance {
            continue;
        }
        match template.kind {
            TemplateKind::Hazard => match template.payload {
                Some((kind, duration)) => {
                    player_effects.push(Effect::new(kind, duration));
                    lines.push(format!("{}! {}", template.name, template.description));
                }
                None => {
                    lines.push(format!("{} stirs, but nothing comes of it", template.name));
                }
            },
            TemplateKind::Buff => match template.payload {
                Some((kind, duration)) => {
                    effects::apply(
                        player_effects,
                        Effect::ambient(kind, duration, template.id),
                    );
                    lines.push(format!("{}! {}", template.name, template.description));
                }
                None => {
                    lines.push(format!("{} stirs, but nothing comes of it", template.name));
                }
            },
            TemplateKind::Obstacle => {
                lines.push(format!("{}: {}", template.name, template.description));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::effects::EffectKind;
    use crate::content::environments::environment;
    use rand::SeedableRng;

    #[test]
    fn test_buffs_never_stack() {
        let env = environment("ancient_forest").unwrap();
        let mut effects = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            process(env, &mut effects, &mut rng);
        }
        let regen_count = effects
            .iter()
            .filter(|e| e.source == Some("nature_favor"))
            .count();
        assert!(regen_count <= 1);
    }

    #[test]
    fn test_obstacles_apply_no_effect() {
        let env = environment("frozen_tundra").unwrap();
        let mut effects = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            process(env, &mut effects, &mut rng);
        }
        // Only the slow hazard and the aurora buff can land
        assert!(effects.iter().all(|e| {
            matches!(
                e.kind,
                EffectKind::Slow | EffectKind::DamageReduction { .. }
            )
        }));
    }

    #[test]
    fn test_missing_payload_logs_and_skips() {
        let env = environment("shadow_void").unwrap();
        let mut effects = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut saw_dud = false;
        for _ in 0..100 {
            for line in process(env, &mut effects, &mut rng) {
                if line.contains("Whispering Dread") {
                    saw_dud = true;
                    assert!(line.contains("nothing comes of it"));
                }
            }
        }
        assert!(saw_dud);
    }

    #[test]
    fn test_rolls_are_seed_deterministic() {
        let env = environment("volcanic_cavern").unwrap();
        let mut a_effects = Vec::new();
        let mut b_effects = Vec::new();
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        let la: Vec<_> = (0..20)
            .flat_map(|_| process(env, &mut a_effects, &mut a))
            .collect();
        let lb: Vec<_> = (0..20)
            .flat_map(|_| process(env, &mut b_effects, &mut b))
            .collect();
        assert_eq!(la, lb);
    }
}
