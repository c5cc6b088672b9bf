//! Engine configuration with documented constants
//!
//! All combat tuning values are collected here with explanations of their
//! purpose and how they interact with each other.

/// Tunable constants for the combat engine
///
/// These values have been balanced around a level-1-to-50 progression
/// curve. Changing them shifts how long fights last and how much stance,
/// guard, and effect play matters relative to raw stats.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    // === DAMAGE PIPELINE ===
    /// Multiplier applied to attacker offense for basic attacks
    ///
    /// At 1.1, a basic attack from 20 offense deals 22 before mitigation.
    pub basic_attack_multiplier: f32,

    /// Base accuracy of the controlled side's basic attack
    ///
    /// Stance accuracy bonuses are added on top, capped at 0.99 so a
    /// basic attack is never a guaranteed hit.
    pub basic_attack_accuracy: f32,

    /// Base accuracy of an opponent's basic attack
    pub enemy_attack_accuracy: f32,

    /// Symmetric damage variance fraction (±)
    ///
    /// At 0.15 a 100-damage hit lands anywhere in [85, 115] before
    /// flooring. World "volatility" modifiers add to this.
    pub damage_variance: f32,

    /// Fraction of defender defense subtracted from damage
    ///
    /// At 0.3, 10 defense removes 3 damage flat. Applied after all
    /// outgoing multipliers, before world/type modifiers.
    pub defense_mitigation: f32,

    /// Damage multiplier on a successful critical roll
    pub critical_multiplier: f32,

    // === GUARD METER ===
    /// Guard meter cap for both sides
    ///
    /// Reaching the cap resets the meter and applies a "broken" effect.
    pub guard_max: u32,

    /// Fraction of damage dealt that accrues to the defender's guard
    pub guard_gain_fraction: f32,

    /// Extra-damage-taken fraction while guard-broken
    pub guard_break_amplify: f32,

    /// Rounds the guard-broken effect lasts
    pub guard_break_duration: u32,

    // === OPPONENT BEHAVIOR ===
    /// Probability an unscripted opponent picks a random known skill
    /// instead of a basic attack
    pub enemy_skill_chance: f64,

    /// Multiplier on boss offense for phase abilities, before the
    /// ability's own damage multiplier
    pub boss_ability_multiplier: f32,

    /// Variance fraction for boss abilities (independent of
    /// `damage_variance`; boss swings are steadier)
    pub boss_ability_variance: f32,

    // === OPPONENT SCALING ===
    /// Per-level stat growth for templated opponents
    ///
    /// At 0.18, a level 10 opponent has 1 + 9 * 0.18 = 2.62x base stats.
    pub level_scaling: f32,

    /// Stat multiplier for boss opponents
    pub boss_stat_multiplier: f32,

    // === COMBOS ===
    /// Window after a skill use in which a registered follow-up still
    /// chains, in milliseconds
    pub combo_window_ms: u64,

    // === LIFECYCLE ===
    /// Seconds of inactivity before a session is eligible for the
    /// staleness sweep
    pub stale_timeout_secs: u64,

    /// Log lines included in a per-round summary
    pub summary_log_tail: usize,

    /// Log lines included in the end-of-encounter result
    pub result_log_tail: usize,

    // === REWARDS ===
    /// Base XP per opponent level on victory (scaled by day modifiers)
    pub xp_per_level: u32,

    /// Base gold per opponent level on victory (scaled by day modifiers)
    pub gold_per_level: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            basic_attack_multiplier: 1.1,
            basic_attack_accuracy: 0.95,
            enemy_attack_accuracy: 0.9,
            damage_variance: 0.15,
            defense_mitigation: 0.3,
            critical_multiplier: 1.5,

            guard_max: 100,
            guard_gain_fraction: 0.5,
            guard_break_amplify: 0.25,
            guard_break_duration: 1,

            enemy_skill_chance: 0.55,
            boss_ability_multiplier: 1.5,
            boss_ability_variance: 0.15,

            level_scaling: 0.18,
            boss_stat_multiplier: 2.5,

            combo_window_ms: 5000,

            stale_timeout_secs: 300,
            summary_log_tail: 6,
            result_log_tail: 10,

            xp_per_level: 50,
            gold_per_level: 25,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.guard_max == 0 {
            return Err("guard_max must be positive".into());
        }
        if !(0.0..=1.0).contains(&self.guard_gain_fraction) {
            return Err(format!(
                "guard_gain_fraction ({}) must be within [0, 1]",
                self.guard_gain_fraction
            ));
        }
        if !(0.0..1.0).contains(&self.damage_variance) {
            return Err(format!(
                "damage_variance ({}) must be within [0, 1)",
                self.damage_variance
            ));
        }
        if self.critical_multiplier < 1.0 {
            return Err("critical_multiplier must be >= 1".into());
        }
        if !(0.0..=1.0).contains(&self.enemy_skill_chance) {
            return Err("enemy_skill_chance must be a probability".into());
        }
        Ok(())
    }
}
