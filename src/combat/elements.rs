//! Elemental type effectiveness
//!
//! A fixed chart of attacker element vs defender element. Defenders may
//! carry several elements; the multipliers stack multiplicatively.

use serde::{Deserialize, Serialize};

/// Attack and defense element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Element {
    #[default]
    Neutral,
    Physical,
    Arcane,
    Fire,
    Water,
    Nature,
    Electric,
    Ice,
    Holy,
    Shadow,
    Poison,
}

impl Element {
    pub fn name(&self) -> &'static str {
        match self {
            Element::Neutral => "neutral",
            Element::Physical => "physical",
            Element::Arcane => "arcane",
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Nature => "nature",
            Element::Electric => "electric",
            Element::Ice => "ice",
            Element::Holy => "holy",
            Element::Shadow => "shadow",
            Element::Poison => "poison",
        }
    }
}

/// Multiplier for one attacker element against one defender element
fn pair_multiplier(attack: Element, defend: Element) -> f32 {
    use Element::*;
    match (attack, defend) {
        (Fire, Nature) | (Fire, Ice) => 2.0,
        (Fire, Water) | (Fire, Fire) => 0.5,

        (Water, Fire) => 2.0,
        (Water, Electric) | (Water, Nature) | (Water, Water) => 0.5,

        (Nature, Water) => 2.0,
        (Nature, Fire) | (Nature, Ice) | (Nature, Nature) => 0.5,

        (Electric, Water) => 2.0,
        (Electric, Nature) | (Electric, Electric) => 0.5,

        (Ice, Nature) => 2.0,
        (Ice, Fire) | (Ice, Ice) => 0.5,

        (Holy, Shadow) => 2.0,
        (Holy, Holy) => 0.5,

        (Shadow, Holy) => 2.0,
        (Shadow, Shadow) => 0.5,

        (Poison, Physical) => 1.2,
        (Poison, Poison) => 0.5,

        (Arcane, Physical) => 1.1,
        (Arcane, Arcane) => 0.5,

        (Physical, Arcane) => 1.1,
        (Physical, Physical) => 0.9,

        _ => 1.0,
    }
}

/// Combined multiplier against a defender's full element set
///
/// An empty defender set is treated as plain Neutral.
pub fn effectiveness(attack: Element, defender: &[Element]) -> f32 {
    if defender.is_empty() {
        return 1.0;
    }
    defender
        .iter()
        .map(|d| pair_multiplier(attack, *d))
        .product()
}

/// Log line for multipliers outside the neutral band, if any
pub fn effectiveness_text(multiplier: f32) -> Option<&'static str> {
    if multiplier >= 1.5 {
        Some("It's super effective!")
    } else if multiplier <= 0.75 {
        Some("It's not very effective...")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_beats_nature() {
        assert_eq!(effectiveness(Element::Fire, &[Element::Nature]), 2.0);
    }

    #[test]
    fn test_same_element_resists() {
        assert_eq!(effectiveness(Element::Fire, &[Element::Fire]), 0.5);
        assert_eq!(effectiveness(Element::Holy, &[Element::Holy]), 0.5);
    }

    #[test]
    fn test_dual_element_stacks() {
        // Fire vs Nature+Ice: 2.0 * 2.0
        let m = effectiveness(Element::Fire, &[Element::Nature, Element::Ice]);
        assert_eq!(m, 4.0);
        // Fire vs Nature+Water: 2.0 * 0.5 back to neutral
        let m = effectiveness(Element::Fire, &[Element::Nature, Element::Water]);
        assert_eq!(m, 1.0);
    }

    #[test]
    fn test_empty_defender_is_neutral() {
        assert_eq!(effectiveness(Element::Fire, &[]), 1.0);
    }

    #[test]
    fn test_effectiveness_text_bands() {
        assert!(effectiveness_text(2.0).is_some());
        assert!(effectiveness_text(0.5).is_some());
        assert!(effectiveness_text(1.0).is_none());
        assert!(effectiveness_text(1.2).is_none());
    }
}
