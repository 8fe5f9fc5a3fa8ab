use crate::{color::Rgb, ingredient::Ingredient};

/// One-shot strength multiplier and the hard cap applied after it, so even a
/// boosted drop never fully replaces the mixture.
pub const BOOST_MULTIPLIER: f64 = 1.6;
pub const BOOST_STRENGTH_CAP: f64 = 0.95;

/// The cauldron starts near-black, slightly lifted off pure zero.
pub fn baseline() -> Rgb {
    Rgb::new(12.0, 12.0, 12.0)
}

/// Remaining uses of the auto-mix assist. `Unlimited` mirrors the default
/// game mode; `Limited` counts down to a silent no-op at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AssistBudget {
    Unlimited,
    Limited(u32),
}

impl AssistBudget {
    /// Take one use. Returns false (and stays at zero) when exhausted;
    /// `Unlimited` never decrements.
    pub fn try_consume(&mut self) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Limited(0) => false,
            Self::Limited(n) => {
                *n -= 1;
                true
            }
        }
    }

    pub fn is_exhausted(self) -> bool {
        self == Self::Limited(0)
    }
}

impl std::fmt::Display for AssistBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unlimited => write!(f, "∞"),
            Self::Limited(n) => write!(f, "{n}"),
        }
    }
}

/// The mutable cauldron state for one round. Mutated exclusively by
/// [`MixtureState::apply`] and the explicit reset / force-match actions.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MixtureState {
    pub mixture: Rgb,
    pub drops: u64,
    pub boost_armed: bool,
    pub boost_available: bool,
    pub auto_mix: AssistBudget,
}

impl MixtureState {
    /// Fresh per-round state: baseline mixture, zero drops, boost restored,
    /// full assist allowance.
    pub fn new(auto_mix: AssistBudget) -> Self {
        Self {
            mixture: baseline(),
            drops: 0,
            boost_armed: false,
            boost_available: true,
            auto_mix,
        }
    }

    /// Apply one ingredient: blend at the effective strength, run its
    /// effect, clamp, count the drop. A boosted application consumes the
    /// round's one-shot boost.
    pub fn apply(&mut self, ingredient: &Ingredient, boosted: bool) {
        let strength = effective_strength(ingredient.strength, boosted);
        self.mixture = ingredient.mixed_into(self.mixture, strength);
        self.drops += 1;
        if boosted {
            self.boost_armed = false;
            self.boost_available = false;
        }
    }

    /// Back to the baseline mixture and zero drops. Boost state and the
    /// auto-mix allowance are deliberately untouched.
    pub fn reset(&mut self) {
        self.mixture = baseline();
        self.drops = 0;
    }

    /// Set the mixture directly to `target`, bypassing the blend pipeline.
    /// Drops and boost state are left as they are.
    pub fn force_match(&mut self, target: Rgb) {
        self.mixture = target;
    }
}

pub fn effective_strength(strength: f64, boosted: bool) -> f64 {
    if boosted {
        (strength * BOOST_MULTIPLIER).clamp(0.0, BOOST_STRENGTH_CAP)
    } else {
        strength
    }
}
