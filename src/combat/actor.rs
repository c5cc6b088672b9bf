//! Combatants and stat snapshots
//!
//! The engine owns a per-encounter snapshot of each side; the
//! authoritative long-lived actor record belongs to the caller and is
//! only re-synchronized from the end-of-encounter result.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::combat::elements::Element;
use crate::core::config::EngineConfig;
use crate::core::types::ActorId;

/// Named stat a damage formula can scale from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatKind {
    Strength,
    Defense,
    Agility,
    Intelligence,
    Wisdom,
}

/// Fixed set of combat stats
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StatBlock {
    pub strength: i32,
    pub defense: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub wisdom: i32,
}

impl StatBlock {
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Defense => self.defense,
            StatKind::Agility => self.agility,
            StatKind::Intelligence => self.intelligence,
            StatKind::Wisdom => self.wisdom,
        }
    }

    fn scaled(&self, factor: f32) -> StatBlock {
        StatBlock {
            strength: (self.strength as f32 * factor).floor() as i32,
            defense: (self.defense as f32 * factor).floor() as i32,
            agility: (self.agility as f32 * factor).floor() as i32,
            intelligence: (self.intelligence as f32 * factor).floor() as i32,
            wisdom: (self.wisdom as f32 * factor).floor() as i32,
        }
    }
}

/// Behavioral tendencies steering automated action selection (0.0 to 1.0)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Personality {
    /// Preference for raw damage and finishing blows
    pub aggression: f32,
    /// Willingness to use inaccurate or self-damaging skills
    pub risk_tolerance: f32,
    /// Preference for heals and shields when pressured
    pub defensiveness: f32,
    /// Reluctance to burn long-cooldown skills early
    pub cooldown_awareness: f32,
    /// Preference for control and debuff setups
    pub tactical_awareness: f32,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            aggression: 0.5,
            risk_tolerance: 0.5,
            defensiveness: 0.5,
            cooldown_awareness: 0.5,
            tactical_awareness: 0.5,
        }
    }
}

impl Personality {
    /// Clamp every tendency into [0, 1]
    pub fn clamped(self) -> Self {
        Self {
            aggression: self.aggression.clamp(0.0, 1.0),
            risk_tolerance: self.risk_tolerance.clamp(0.0, 1.0),
            defensiveness: self.defensiveness.clamp(0.0, 1.0),
            cooldown_awareness: self.cooldown_awareness.clamp(0.0, 1.0),
            tactical_awareness: self.tactical_awareness.clamp(0.0, 1.0),
        }
    }
}

/// Controlled-actor snapshot supplied by the caller's stat provider
///
/// Stats already include equipment/class/talent bonuses; the engine
/// never recomputes derived stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorProfile {
    pub identity: ActorId,
    pub name: String,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub stats: StatBlock,
    pub elements: Vec<Element>,
    /// Known skill ids, in preference order
    pub skills: Vec<String>,
    /// Per-skill levels; unlisted skills default to 1
    pub skill_levels: AHashMap<String, u32>,
    pub personality: Personality,
}

/// One side of an encounter for its duration
#[derive(Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub stats: StatBlock,
    pub elements: Vec<Element>,
    pub skills: Vec<String>,
    pub skill_levels: AHashMap<String, u32>,
    /// Rounds until each skill is available again
    pub cooldowns: AHashMap<String, u32>,
}

// Baseline stats for a level-1 templated opponent
const BASE_HP: f32 = 70.0;
const BASE_STRENGTH: f32 = 10.0;
const BASE_DEFENSE: f32 = 8.0;
const BASE_AGILITY: f32 = 6.0;
const BASE_INTELLIGENCE: f32 = 6.0;
const BASE_WISDOM: f32 = 5.0;

impl Combatant {
    pub fn from_profile(profile: &ActorProfile) -> Self {
        Self {
            name: profile.name.clone(),
            level: profile.level,
            hp: profile.hp.min(profile.max_hp),
            max_hp: profile.max_hp,
            stats: profile.stats,
            elements: profile.elements.clone(),
            skills: profile.skills.clone(),
            skill_levels: profile.skill_levels.clone(),
            cooldowns: AHashMap::new(),
        }
    }

    /// Level-scaled templated opponent
    pub fn scaled_opponent(
        name: &str,
        level: u32,
        is_boss: bool,
        elements: Vec<Element>,
        skills: Vec<String>,
        config: &EngineConfig,
    ) -> Self {
        let level_factor = 1.0 + (level.saturating_sub(1)) as f32 * config.level_scaling;
        let boss_factor = if is_boss {
            config.boss_stat_multiplier
        } else {
            1.0
        };
        let factor = level_factor * boss_factor;

        let max_hp = (BASE_HP * factor).floor() as i32;
        let stats = StatBlock {
            strength: BASE_STRENGTH as i32,
            defense: BASE_DEFENSE as i32,
            agility: BASE_AGILITY as i32,
            intelligence: BASE_INTELLIGENCE as i32,
            wisdom: BASE_WISDOM as i32,
        }
        .scaled(factor);

        Self {
            name: name.to_string(),
            level,
            hp: max_hp,
            max_hp,
            stats,
            elements,
            skills,
            skill_levels: AHashMap::new(),
            cooldowns: AHashMap::new(),
        }
    }

    /// Dungeon encounters spawn hardier opponents
    pub fn apply_dungeon_boost(&mut self) {
        self.max_hp = (self.max_hp as f32 * 2.5).floor() as i32;
        self.hp = self.max_hp;
        self.stats.strength = (self.stats.strength as f32 * 1.5).floor() as i32;
        self.stats.defense = (self.stats.defense as f32 * 1.5).floor() as i32;
        self.stats.agility = (self.stats.agility as f32 * 1.3).floor() as i32;
        self.stats.intelligence = (self.stats.intelligence as f32 * 1.3).floor() as i32;
    }

    /// Returns true if this reduced the combatant to zero
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp = (self.hp - amount.max(0)).max(0);
        self.hp == 0
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn hp_percent(&self) -> u32 {
        if self.max_hp <= 0 {
            return 0;
        }
        ((self.hp.max(0) as f64 / self.max_hp as f64) * 100.0).round() as u32
    }

    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        self.hp.max(0) as f32 / self.max_hp as f32
    }

    pub fn skill_level(&self, skill_id: &str) -> u32 {
        self.skill_levels.get(skill_id).copied().unwrap_or(1)
    }

    pub fn cooldown_remaining(&self, skill_id: &str) -> u32 {
        self.cooldowns.get(skill_id).copied().unwrap_or(0)
    }

    pub fn tick_cooldowns(&mut self) {
        for remaining in self.cooldowns.values_mut() {
            *remaining = remaining.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_opponent_grows_with_level() {
        let cfg = EngineConfig::default();
        let low = Combatant::scaled_opponent("Wolf", 1, false, vec![], vec![], &cfg);
        let high = Combatant::scaled_opponent("Wolf", 10, false, vec![], vec![], &cfg);
        assert!(high.max_hp > low.max_hp);
        assert!(high.stats.strength > low.stats.strength);
        // level 10: 1 + 9 * 0.18 = 2.62x
        assert_eq!(high.max_hp, (70.0f32 * 2.62).floor() as i32);
    }

    #[test]
    fn test_boss_multiplier_applies() {
        let cfg = EngineConfig::default();
        let normal = Combatant::scaled_opponent("Drake", 5, false, vec![], vec![], &cfg);
        let boss = Combatant::scaled_opponent("Drake", 5, true, vec![], vec![], &cfg);
        assert!(boss.max_hp > normal.max_hp * 2);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let cfg = EngineConfig::default();
        let mut c = Combatant::scaled_opponent("Rat", 1, false, vec![], vec![], &cfg);
        let died = c.take_damage(c.max_hp + 50);
        assert!(died);
        assert_eq!(c.hp, 0);
        assert_eq!(c.hp_percent(), 0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let cfg = EngineConfig::default();
        let mut c = Combatant::scaled_opponent("Rat", 1, false, vec![], vec![], &cfg);
        c.take_damage(10);
        c.heal(9999);
        assert_eq!(c.hp, c.max_hp);
    }

    #[test]
    fn test_cooldowns_tick_down_and_clamp() {
        let cfg = EngineConfig::default();
        let mut c = Combatant::scaled_opponent("Rat", 1, false, vec![], vec![], &cfg);
        c.cooldowns.insert("slash".to_string(), 1);
        c.tick_cooldowns();
        assert_eq!(c.cooldown_remaining("slash"), 0);
        c.tick_cooldowns();
        assert_eq!(c.cooldown_remaining("slash"), 0);
    }

    #[test]
    fn test_personality_clamped() {
        let p = Personality {
            aggression: 1.7,
            risk_tolerance: -0.3,
            ..Personality::default()
        }
        .clamped();
        assert_eq!(p.aggression, 1.0);
        assert_eq!(p.risk_tolerance, 0.0);
    }
}
