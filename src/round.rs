use rand::{Rng, seq::SliceRandom};

use crate::{
    color::Rgb,
    error::{ChromabrewError, ChromabrewResult},
    ingredient::{Ingredient, base_pool},
};

/// Ingredients offered per round, drawn from the pool without replacement.
pub const ROUND_INGREDIENT_COUNT: usize = 5;

/// Target channels stay away from the cube corners so every round is
/// reachable from the near-black baseline.
pub const TARGET_CHANNEL_MIN: f64 = 20.0;
pub const TARGET_CHANNEL_MAX: f64 = 235.0;

/// One-time per-round strength jitter: multiplier range and the clamp
/// applied after it.
pub const STRENGTH_JITTER_MIN: f64 = 0.85;
pub const STRENGTH_JITTER_MAX: f64 = 1.25;
pub const STRENGTH_FLOOR: f64 = 0.09;
pub const STRENGTH_CEIL: f64 = 0.6;

/// A target color and the fixed set of ingredients available to reach it.
/// Rounds are superseded by the next round, never mutated.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Round {
    pub target: Rgb,
    pub ingredients: Vec<Ingredient>,
}

impl Round {
    /// Generate a fresh round: a random in-bounds target plus
    /// [`ROUND_INGREDIENT_COUNT`] distinct pool entries with jittered
    /// strengths. Independent of any prior state.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let target = Rgb::new(
            rng.random_range(TARGET_CHANNEL_MIN..=TARGET_CHANNEL_MAX).round(),
            rng.random_range(TARGET_CHANNEL_MIN..=TARGET_CHANNEL_MAX).round(),
            rng.random_range(TARGET_CHANNEL_MIN..=TARGET_CHANNEL_MAX).round(),
        );

        let mut pool = base_pool();
        pool.shuffle(rng);
        pool.truncate(ROUND_INGREDIENT_COUNT);
        for ing in &mut pool {
            let jitter = rng.random_range(STRENGTH_JITTER_MIN..STRENGTH_JITTER_MAX);
            ing.strength = (ing.strength * jitter).clamp(STRENGTH_FLOOR, STRENGTH_CEIL);
        }

        Self {
            target,
            ingredients: pool,
        }
    }

    pub fn validate(&self) -> ChromabrewResult<()> {
        if self.ingredients.len() != ROUND_INGREDIENT_COUNT {
            return Err(ChromabrewError::round(format!(
                "round must offer exactly {ROUND_INGREDIENT_COUNT} ingredients"
            )));
        }
        for (i, ing) in self.ingredients.iter().enumerate() {
            ing.validate()?;
            if self.ingredients[i + 1..].iter().any(|other| other.id == ing.id) {
                return Err(ChromabrewError::round(format!(
                    "duplicate ingredient id '{}'",
                    ing.id
                )));
            }
        }
        for v in [self.target.r, self.target.g, self.target.b] {
            if !(TARGET_CHANNEL_MIN..=TARGET_CHANNEL_MAX).contains(&v) {
                return Err(ChromabrewError::round(
                    "target channel out of [20, 235]",
                ));
            }
        }
        Ok(())
    }
}
