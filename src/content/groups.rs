//! Multi-opponent encounter rosters
//!
//! A group is an ordered list of member templates fought one at a time.
//! Members are spawned through [`crate::combat::actor::Combatant`]
//! scaling at encounter start.

use crate::combat::elements::Element;

/// One roster slot
#[derive(Debug, Clone, Copy)]
pub struct GroupMember {
    pub name: &'static str,
    /// Added to the encounter's base level (may be negative)
    pub level_offset: i32,
    pub elements: &'static [Element],
    pub skills: &'static [&'static str],
}

/// A named opponent group
#[derive(Debug, Clone, Copy)]
pub struct GroupDef {
    pub id: &'static str,
    pub name: &'static str,
    pub members: &'static [GroupMember],
}

pub static GROUPS: &[GroupDef] = &[
    GroupDef {
        id: "goblin_scout_party",
        name: "Goblin Scout Party",
        members: &[
            GroupMember {
                name: "Goblin Scout",
                level_offset: -1,
                elements: &[Element::Physical],
                skills: &["slash"],
            },
            GroupMember {
                name: "Goblin Scout",
                level_offset: -1,
                elements: &[Element::Physical],
                skills: &["slash"],
            },
            GroupMember {
                name: "Goblin Chieftain",
                level_offset: 1,
                elements: &[Element::Physical],
                skills: &["cleave", "war_cry"],
            },
        ],
    },
    GroupDef {
        id: "skeleton_patrol",
        name: "Skeleton Patrol",
        members: &[
            GroupMember {
                name: "Skeleton Warrior",
                level_offset: 0,
                elements: &[Element::Shadow],
                skills: &["slash", "shield_bash"],
            },
            GroupMember {
                name: "Skeleton Mage",
                level_offset: 0,
                elements: &[Element::Shadow, Element::Arcane],
                skills: &["arcane_blast", "drain_life"],
            },
        ],
    },
    GroupDef {
        id: "bandit_ambush",
        name: "Bandit Ambush",
        members: &[
            GroupMember {
                name: "Bandit Thug",
                level_offset: 0,
                elements: &[Element::Physical],
                skills: &["slash", "reckless_strike"],
            },
            GroupMember {
                name: "Bandit Knife",
                level_offset: 0,
                elements: &[Element::Physical],
                skills: &["backstab", "poison_strike"],
            },
            GroupMember {
                name: "Bandit Leader",
                level_offset: 2,
                elements: &[Element::Physical],
                skills: &["cleave", "execute", "war_cry"],
            },
        ],
    },
];

pub fn group(id: &str) -> Option<&'static GroupDef> {
    GROUPS.iter().find(|g| g.id == id)
}
