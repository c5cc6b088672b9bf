//! Static content catalogs
//!
//! Everything here is immutable global data looked up by id. The
//! engine holds `&'static` references into these tables for the life
//! of an encounter.

pub mod bosses;
pub mod combos;
pub mod environments;
pub mod groups;
pub mod skills;
pub mod styles;
pub mod world;

pub use bosses::{ability, boss_template, AbilityDef, BossTemplate, PhaseDef};
pub use combos::{combo, ComboDef};
pub use environments::{environment, EnvTemplate, EnvironmentDef, TemplateKind};
pub use groups::{group, GroupDef, GroupMember};
pub use skills::{skill, DamageScaling, EffectTarget, SkillDef, SkillEffect};
pub use styles::{style, StyleDef};
pub use world::{current_seed, day_for_seed, DayModifiers, DayState, NEUTRAL};
