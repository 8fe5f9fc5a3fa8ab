use crate::{
    color::{Rgb, distance},
    ingredient::Ingredient,
    mixture::MixtureState,
    round::Round,
};

/// The mixture counts as matched once its distance to the target drops to
/// this or below.
pub const MATCH_THRESHOLD: f64 = 4.0;

/// Hard cap on auto-solve steps. Pathological ingredient sets may never
/// converge; the loop must still terminate.
pub const MAX_SOLVE_STEPS: u32 = 40;

/// Greedy one-step lookahead: simulate each ingredient at its unboosted
/// strength through the real application chain and pick the index that
/// minimizes distance to `target`. Ties break on first occurrence; `None`
/// when `ingredients` is empty.
///
/// Boost is never assumed during search, even when one is armed.
#[tracing::instrument(skip(ingredients), level = "debug")]
pub fn best_ingredient_index(mixture: Rgb, ingredients: &[Ingredient], target: Rgb) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, ing) in ingredients.iter().enumerate() {
        let predicted = ing.mixed_into(mixture, ing.strength);
        let d = distance(predicted, target);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Lazy auto-solve run: each `next()` applies the current best ingredient
/// (unboosted) and yields the new state, stopping at [`MATCH_THRESHOLD`],
/// at [`MAX_SOLVE_STEPS`], or when no ingredient can be selected.
///
/// The iterator is synchronous; any visible pacing between steps belongs to
/// the caller. Dropping it mid-run cancels the solve and releases the
/// session's in-progress guard.
pub struct AutoSolve<'a> {
    state: &'a mut MixtureState,
    round: &'a Round,
    in_progress: &'a mut bool,
    steps: u32,
}

impl<'a> AutoSolve<'a> {
    pub(crate) fn new(
        state: &'a mut MixtureState,
        round: &'a Round,
        in_progress: &'a mut bool,
    ) -> Self {
        *in_progress = true;
        Self {
            state,
            round,
            in_progress,
            steps: 0,
        }
    }

    fn finish(&mut self) {
        *self.in_progress = false;
    }
}

impl Iterator for AutoSolve<'_> {
    type Item = MixtureState;

    fn next(&mut self) -> Option<MixtureState> {
        if !*self.in_progress {
            return None;
        }
        if self.steps >= MAX_SOLVE_STEPS {
            self.finish();
            return None;
        }
        if distance(self.state.mixture, self.round.target) <= MATCH_THRESHOLD {
            self.finish();
            return None;
        }
        let Some(idx) =
            best_ingredient_index(self.state.mixture, &self.round.ingredients, self.round.target)
        else {
            self.finish();
            return None;
        };

        let ingredient = &self.round.ingredients[idx];
        self.state.apply(ingredient, false);
        self.steps += 1;
        tracing::debug!(
            step = self.steps,
            ingredient = %ingredient.id,
            distance = distance(self.state.mixture, self.round.target),
            "auto-solve step"
        );
        Some(self.state.clone())
    }
}

impl Drop for AutoSolve<'_> {
    fn drop(&mut self) {
        *self.in_progress = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixture::AssistBudget;

    fn ing(id: &str, color: Rgb, strength: f64) -> Ingredient {
        Ingredient {
            id: id.to_string(),
            name: id.to_string(),
            color,
            strength,
            effect: None,
            description: String::new(),
        }
    }

    #[test]
    fn empty_set_has_no_best() {
        assert_eq!(
            best_ingredient_index(Rgb::new(0.0, 0.0, 0.0), &[], Rgb::new(1.0, 1.0, 1.0)),
            None
        );
    }

    #[test]
    fn exact_ingredient_wins_and_zeroes_distance() {
        let target = Rgb::new(180.0, 80.0, 200.0);
        let set = vec![
            ing("red", Rgb::new(255.0, 0.0, 0.0), 0.4),
            ing("exact", target, 1.0),
            ing("blue", Rgb::new(0.0, 0.0, 255.0), 0.4),
        ];
        let mixture = Rgb::new(12.0, 12.0, 12.0);
        let idx = best_ingredient_index(mixture, &set, target).unwrap();
        assert_eq!(idx, 1);
        let predicted = set[idx].mixed_into(mixture, set[idx].strength);
        assert!(distance(predicted, target) < 1e-9);
    }

    #[test]
    fn ties_break_on_first_occurrence() {
        let target = Rgb::new(100.0, 100.0, 100.0);
        let same = Rgb::new(200.0, 200.0, 200.0);
        let set = vec![ing("a", same, 0.3), ing("b", same, 0.3)];
        assert_eq!(
            best_ingredient_index(Rgb::new(0.0, 0.0, 0.0), &set, target),
            Some(0)
        );
    }

    #[test]
    fn solve_on_empty_ingredients_yields_nothing() {
        let round = Round {
            target: Rgb::new(128.0, 128.0, 128.0),
            ingredients: vec![],
        };
        let mut state = MixtureState::new(AssistBudget::Unlimited);
        let mut guard = false;
        let mut solve = AutoSolve::new(&mut state, &round, &mut guard);
        assert!(solve.next().is_none());
    }

    #[test]
    fn solve_caps_at_max_steps_when_target_is_unreachable() {
        // A single dark, weak ingredient can never pull the mixture near a
        // bright target; the loop must still terminate at the cap.
        let round = Round {
            target: Rgb::new(235.0, 235.0, 235.0),
            ingredients: vec![ing("dark", Rgb::new(10.0, 10.0, 12.0), 0.09)],
        };
        let mut state = MixtureState::new(AssistBudget::Unlimited);
        let mut guard = false;
        let yielded = AutoSolve::new(&mut state, &round, &mut guard).count();
        assert_eq!(yielded as u32, MAX_SOLVE_STEPS);
        assert_eq!(state.drops, u64::from(MAX_SOLVE_STEPS));
        assert!(distance(state.mixture, round.target) > MATCH_THRESHOLD);
        assert!(!guard);
    }

    #[test]
    fn solve_stops_once_threshold_is_reached() {
        let target = Rgb::new(150.0, 90.0, 60.0);
        let round = Round {
            target,
            ingredients: vec![ing("exact", target, 1.0)],
        };
        let mut state = MixtureState::new(AssistBudget::Unlimited);
        let mut guard = false;
        let states: Vec<_> = AutoSolve::new(&mut state, &round, &mut guard).collect();
        assert_eq!(states.len(), 1);
        assert!(distance(state.mixture, target) <= MATCH_THRESHOLD);
        assert!(!guard);
    }
}
