use crate::{
    color::{self, Rgb},
    error::{ChromabrewError, ChromabrewResult},
};

/// Fixed magnitude of every secondary transform. The effects are
/// intentionally mild: they nudge the mixture after the blend, they do not
/// dominate it.
pub const DESATURATE_AMOUNT: f64 = 0.12;
pub const BRIGHTEN_FACTOR: f64 = 1.06;
pub const SATURATE_PUSH_AMOUNT: f64 = 0.08;
pub const SOFTEN_FACTOR: f64 = 0.98;

/// Secondary transform bundled with some ingredients, applied to the
/// mixture after blending. A closed set; "no effect" is `Option::None` on
/// the ingredient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Desaturate,
    Brighten,
    Saturate,
    Soften,
}

impl Effect {
    pub fn apply(self, c: Rgb) -> Rgb {
        match self {
            Self::Desaturate => color::desaturate(c, DESATURATE_AMOUNT),
            Self::Brighten => color::adjust_brightness(c, BRIGHTEN_FACTOR),
            Self::Saturate => color::saturate_push(c, SATURATE_PUSH_AMOUNT),
            Self::Soften => color::soften(c, SOFTEN_FACTOR),
        }
    }
}

/// A discrete color-and-effect unit the player can drop into the cauldron.
///
/// Ingredients are created fresh per round (the pool entry is copied and its
/// strength jittered once); they are never mutated afterwards.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub color: Rgb,
    pub strength: f64, // blend weight in (0, 1]
    pub effect: Option<Effect>,
    pub description: String,
}

impl Ingredient {
    pub fn validate(&self) -> ChromabrewResult<()> {
        if self.id.trim().is_empty() {
            return Err(ChromabrewError::validation("ingredient id must be non-empty"));
        }
        if !self.strength.is_finite() || self.strength <= 0.0 || self.strength > 1.0 {
            return Err(ChromabrewError::validation(format!(
                "ingredient '{}' strength must be in (0, 1]",
                self.id
            )));
        }
        for v in [self.color.r, self.color.g, self.color.b] {
            if !(0.0..=255.0).contains(&v) {
                return Err(ChromabrewError::validation(format!(
                    "ingredient '{}' color channel out of [0, 255]",
                    self.id
                )));
            }
        }
        Ok(())
    }

    /// One application step against `base`: blend at `strength`, run the
    /// effect if any, clamp. The engine and the solver's simulation share
    /// this chain so a simulated step predicts the real one exactly.
    pub fn mixed_into(&self, base: Rgb, strength: f64) -> Rgb {
        let blended = color::blend(base, self.color, strength);
        match self.effect {
            Some(effect) => effect.apply(blended),
            None => blended,
        }
        .clamped()
    }
}

/// The full ingredient pool a round draws from.
pub fn base_pool() -> Vec<Ingredient> {
    fn ing(
        id: &str,
        name: &str,
        color: (f64, f64, f64),
        strength: f64,
        effect: Option<Effect>,
        description: &str,
    ) -> Ingredient {
        Ingredient {
            id: id.to_string(),
            name: name.to_string(),
            color: Rgb::new(color.0, color.1, color.2),
            strength,
            effect,
            description: description.to_string(),
        }
    }

    vec![
        ing(
            "dragon",
            "Dragonfruit Extract",
            (238.0, 77.0, 162.0),
            0.45,
            None,
            "Bright pink, strong.",
        ),
        ing(
            "moss",
            "Swamp Moss",
            (49.0, 87.0, 41.0),
            0.18,
            Some(Effect::Desaturate),
            "Dark green, weak. Slightly desaturates.",
        ),
        ing(
            "sky",
            "Sky Dew",
            (142.0, 197.0, 255.0),
            0.28,
            None,
            "Light blue, medium.",
        ),
        ing(
            "ember",
            "Ember Spice",
            (255.0, 132.0, 62.0),
            0.34,
            Some(Effect::Brighten),
            "Warm orange, medium-strong. Brightens.",
        ),
        ing(
            "moon",
            "Moonmilk",
            (240.0, 245.0, 255.0),
            0.12,
            Some(Effect::Soften),
            "Pale and softens contrast.",
        ),
        ing(
            "void",
            "Void Salt",
            (24.0, 24.0, 30.0),
            0.22,
            Some(Effect::Desaturate),
            "Desaturates and darkens.",
        ),
        ing(
            "sun",
            "Sunberry Juice",
            (255.0, 225.0, 98.0),
            0.30,
            Some(Effect::Brighten),
            "Makes mixtures warmer and brighter.",
        ),
        ing(
            "glimmer",
            "Glimmer Dust",
            (193.0, 128.0, 255.0),
            0.2,
            Some(Effect::Saturate),
            "Adds vividness.",
        ),
    ]
}
