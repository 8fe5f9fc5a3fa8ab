use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    color::distance,
    mixture::{AssistBudget, MixtureState},
    round::Round,
    score::Score,
    solver::{AutoSolve, best_ingredient_index},
};

/// The one explicit owner of game state: current round, cauldron state, the
/// seeded RNG, and the auto-solve in-progress guard. The engine holds no
/// process-wide state; a presentation layer drives this struct and
/// re-renders from the states it returns.
///
/// All state-observing defensive cases (out-of-range index, exhausted
/// allowance) are silent no-ops returning the unchanged state — the UI is
/// expected to disable the matching affordance.
pub struct Session {
    round: Round,
    state: MixtureState,
    auto_mix_budget: AssistBudget,
    solving: bool,
    rng: ChaCha8Rng,
}

impl Session {
    /// Session seeded from the OS; starts with a generated round.
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_os_rng())
    }

    /// Deterministic session: the same seed replays the same rounds.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: ChaCha8Rng) -> Self {
        let round = Round::generate(&mut rng);
        Self {
            round,
            state: MixtureState::new(AssistBudget::Unlimited),
            auto_mix_budget: AssistBudget::Unlimited,
            solving: false,
            rng,
        }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn state(&self) -> &MixtureState {
        &self.state
    }

    /// Per-round auto-mix allowance; takes effect immediately and on every
    /// following round.
    pub fn set_auto_mix_budget(&mut self, budget: AssistBudget) {
        self.auto_mix_budget = budget;
        self.state.auto_mix = budget;
    }

    /// Generate a fresh target and ingredient set, reset the cauldron to
    /// baseline and restore the boost and auto-mix allowances.
    pub fn start_round(&mut self) -> &Round {
        self.round = Round::generate(&mut self.rng);
        self.state = MixtureState::new(self.auto_mix_budget);
        tracing::debug!(round_target = %self.round.target, "new round");
        &self.round
    }

    /// The primary mutating action: drop ingredient `index` into the
    /// cauldron. Consumes an armed boost. An out-of-range index is a no-op.
    pub fn apply_ingredient(&mut self, index: usize) -> MixtureState {
        let Some(ingredient) = self.round.ingredients.get(index) else {
            return self.state.clone();
        };
        let boosted = self.state.boost_armed;
        self.state.apply(ingredient, boosted);
        self.state.clone()
    }

    /// Drop a uniformly random ingredient of the round.
    pub fn apply_random_ingredient(&mut self) -> MixtureState {
        if self.round.ingredients.is_empty() {
            return self.state.clone();
        }
        let index = self.rng.random_range(0..self.round.ingredients.len());
        self.apply_ingredient(index)
    }

    /// Arm the one-shot strength boost for the next drop. Succeeds only
    /// while the round's boost is still available; re-arming an armed boost
    /// is a successful no-op.
    pub fn arm_boost(&mut self) -> bool {
        if !self.state.boost_available {
            return false;
        }
        self.state.boost_armed = true;
        true
    }

    /// Single-step assist: apply the locally optimal ingredient, unboosted,
    /// spending one auto-mix use. `None` when the allowance is exhausted or
    /// there is nothing to select.
    pub fn auto_mix_once(&mut self) -> Option<MixtureState> {
        if self.state.auto_mix.is_exhausted() {
            return None;
        }
        let index =
            best_ingredient_index(self.state.mixture, &self.round.ingredients, self.round.target)?;
        if !self.state.auto_mix.try_consume() {
            return None;
        }
        self.state.apply(&self.round.ingredients[index], false);
        Some(self.state.clone())
    }

    /// Start a lazy auto-solve run over the current round. `None` while a
    /// run is already in progress. Dropping the returned iterator cancels
    /// the run; auto-mix uses and an armed boost are never spent by it.
    pub fn auto_solve(&mut self) -> Option<AutoSolve<'_>> {
        if self.solving {
            return None;
        }
        Some(AutoSolve::new(
            &mut self.state,
            &self.round,
            &mut self.solving,
        ))
    }

    /// The explicit cheat: set the cauldron straight to the target.
    pub fn force_match(&mut self) -> MixtureState {
        self.state.force_match(self.round.target);
        self.state.clone()
    }

    /// Cauldron back to baseline, drops to zero. Keeps the current target
    /// and ingredients; does not restore boost or auto-mix allowances.
    pub fn reset(&mut self) -> MixtureState {
        self.state.reset();
        self.state.clone()
    }

    pub fn current_score(&self) -> Score {
        Score::from_distance(distance(self.state.mixture, self.round.target))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_index_is_a_no_op() {
        let mut session = Session::with_seed(1);
        let before = session.state().clone();
        let after = session.apply_ingredient(99);
        assert_eq!(after.drops, before.drops);
        assert_eq!(after.mixture, before.mixture);
        assert!(after.boost_available);
    }

    #[test]
    fn seeded_sessions_replay_identically() {
        let mut a = Session::with_seed(9);
        let mut b = Session::with_seed(9);
        assert_eq!(a.round().target, b.round().target);
        let sa = a.apply_ingredient(0);
        let sb = b.apply_ingredient(0);
        assert_eq!(sa.mixture, sb.mixture);
        a.start_round();
        b.start_round();
        assert_eq!(a.round().target, b.round().target);
    }

    #[test]
    fn random_apply_counts_a_drop() {
        let mut session = Session::with_seed(2);
        let state = session.apply_random_ingredient();
        assert_eq!(state.drops, 1);
    }
}
