//! Boss phase state machine
//!
//! Phase numbers only ever climb. Health regained after a transition
//! never drops the boss back to an earlier phase, and the intent for
//! the coming round is always drawn from the recorded phase's pool.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::content::bosses::{ability, AbilityDef, BossTemplate, PhaseDef};

#[derive(Debug, Clone)]
pub struct BossState {
    pub template: &'static BossTemplate,
    /// Recorded phase number, 1-based, monotonically non-decreasing
    pub phase: usize,
    /// Pre-selected ability for the upcoming round
    pub intent: Option<&'static AbilityDef>,
}

impl BossState {
    pub fn new(template: &'static BossTemplate) -> Self {
        Self {
            template,
            phase: 1,
            intent: None,
        }
    }

    pub fn current_phase(&self) -> &'static PhaseDef {
        &self.template.phases[self.phase - 1]
    }

    /// Phase the boss would be in at this health percentage: the
    /// deepest phase whose trigger still covers it
    fn computed_phase(&self, hp_percent: u32) -> usize {
        let mut phase = 1;
        for (i, def) in self.template.phases.iter().enumerate() {
            if def.trigger >= hp_percent {
                phase = i + 1;
            }
        }
        phase
    }

    /// Advance the recorded phase if health has crossed a threshold,
    /// returning the newly entered phase for logging
    pub fn check_transition(&mut self, hp_percent: u32) -> Option<&'static PhaseDef> {
        let computed = self.computed_phase(hp_percent);
        if computed > self.phase {
            self.phase = computed;
            Some(self.current_phase())
        } else {
            None
        }
    }

    /// Pick the next round's intent from the current phase's pool
    pub fn prime_intent(&mut self, rng: &mut ChaCha8Rng) {
        let pool = self.current_phase().abilities;
        let id = pool[rng.gen_range(0..pool.len())];
        self.intent = ability(id);
    }

    /// Consume the primed intent
    pub fn take_intent(&mut self) -> Option<&'static AbilityDef> {
        self.intent.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::bosses::boss_template;
    use rand::SeedableRng;

    fn state() -> BossState {
        BossState::new(boss_template("inferno_lord").unwrap())
    }

    #[test]
    fn test_full_health_stays_in_phase_one() {
        let mut s = state();
        assert!(s.check_transition(100).is_none());
        assert!(s.check_transition(65).is_none());
        assert_eq!(s.phase, 1);
    }

    #[test]
    fn test_single_transition_crossing_threshold() {
        // Triggers 100/60/30: 65% is phase 1, 55% is phase 2
        let mut s = state();
        assert!(s.check_transition(65).is_none());
        assert!(s.check_transition(55).is_some());
        assert_eq!(s.phase, 2);
        // Same health again does not re-fire
        assert!(s.check_transition(55).is_none());
    }

    #[test]
    fn test_phase_never_regresses_on_heal() {
        let mut s = state();
        s.check_transition(25);
        assert_eq!(s.phase, 3);
        assert!(s.check_transition(90).is_none());
        assert_eq!(s.phase, 3);
    }

    #[test]
    fn test_deep_drop_skips_to_final_phase() {
        let mut s = state();
        assert!(s.check_transition(5).is_some());
        assert_eq!(s.phase, 3);
    }

    #[test]
    fn test_intent_drawn_from_current_pool() {
        let mut s = state();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        s.check_transition(55);
        for _ in 0..20 {
            s.prime_intent(&mut rng);
            let intent = s.intent.unwrap();
            assert!(s.current_phase().abilities.contains(&intent.id));
        }
    }
}
