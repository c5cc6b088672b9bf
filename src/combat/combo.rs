//! Skill-chain tracking for one controlling identity
//!
//! The tracker remembers the last skill used and when. A follow-up
//! inside the window that matches a registered pair triggers the combo
//! and consumes the predecessor, so a single registration can never
//! chain three times.

use crate::content::combos::{combo, ComboDef};

#[derive(Debug, Clone, Default)]
pub struct ComboTracker {
    last_skill: Option<&'static str>,
    last_at_ms: u64,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a skill use at `now_ms`, returning the combo it
    /// completes, if any
    pub fn on_skill_use(
        &mut self,
        skill_id: &'static str,
        now_ms: u64,
        window_ms: u64,
    ) -> Option<&'static ComboDef> {
        if let Some(prev) = self.last_skill {
            if now_ms.saturating_sub(self.last_at_ms) < window_ms {
                if let Some(chain) = combo(prev, skill_id) {
                    // Consumed: the follow-up does not itself become a
                    // predecessor
                    self.last_skill = None;
                    return Some(chain);
                }
            }
        }
        self.last_skill = Some(skill_id);
        self.last_at_ms = now_ms;
        None
    }

    /// Forget the predecessor (encounter end, opponent defeated)
    pub fn reset(&mut self) {
        self.last_skill = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: u64 = 5000;

    #[test]
    fn test_chain_inside_window() {
        let mut t = ComboTracker::new();
        assert!(t.on_skill_use("slash", 1000, WINDOW).is_none());
        let chain = t.on_skill_use("shield_bash", 4000, WINDOW);
        assert!(chain.is_some());
    }

    #[test]
    fn test_window_boundary_is_strict() {
        let mut t = ComboTracker::new();
        t.on_skill_use("slash", 0, WINDOW);
        // Exactly the window is too late
        assert!(t.on_skill_use("shield_bash", 5000, WINDOW).is_none());

        let mut t = ComboTracker::new();
        t.on_skill_use("slash", 0, WINDOW);
        assert!(t.on_skill_use("shield_bash", 4999, WINDOW).is_some());
    }

    #[test]
    fn test_predecessor_consumed_on_trigger() {
        let mut t = ComboTracker::new();
        t.on_skill_use("slash", 0, WINDOW);
        assert!(t.on_skill_use("cleave", 100, WINDOW).is_some());
        // cleave was not recorded as a new predecessor
        assert!(t.on_skill_use("execute", 200, WINDOW).is_none());
    }

    #[test]
    fn test_unregistered_pair_replaces_predecessor() {
        let mut t = ComboTracker::new();
        t.on_skill_use("slash", 0, WINDOW);
        assert!(t.on_skill_use("fireball", 100, WINDOW).is_none());
        // fireball is now the predecessor
        assert!(t.on_skill_use("arcane_blast", 200, WINDOW).is_some());
    }

    #[test]
    fn test_reset_clears_predecessor() {
        let mut t = ComboTracker::new();
        t.on_skill_use("slash", 0, WINDOW);
        t.reset();
        assert!(t.on_skill_use("shield_bash", 100, WINDOW).is_none());
    }
}
