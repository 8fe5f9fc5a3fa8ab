use crate::color::max_distance;

/// Star thresholds on raw RGB distance, strict `<` at every boundary.
pub const THREE_STAR_DISTANCE: f64 = 10.0;
pub const TWO_STAR_DISTANCE: f64 = 30.0;
pub const ONE_STAR_DISTANCE: f64 = 60.0;

/// Discrete rating for a finished (or in-progress) mixture. `None` is the
/// no-match sentinel, rendered as a dash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarRating {
    None,
    One,
    Two,
    Three,
}

impl StarRating {
    pub fn from_distance(distance: f64) -> Self {
        if distance < THREE_STAR_DISTANCE {
            Self::Three
        } else if distance < TWO_STAR_DISTANCE {
            Self::Two
        } else if distance < ONE_STAR_DISTANCE {
            Self::One
        } else {
            Self::None
        }
    }

    pub fn count(self) -> u8 {
        match self {
            Self::None => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl std::fmt::Display for StarRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "—"),
            _ => {
                for _ in 0..self.count() {
                    write!(f, "⭐")?;
                }
                Ok(())
            }
        }
    }
}

/// Distance mapped onto [0, 100]: 100 at a perfect match, 0 across the full
/// diagonal of the RGB cube.
pub fn match_percent(distance: f64) -> f64 {
    (100.0 - distance / max_distance() * 100.0).max(0.0)
}

/// Everything the presentation layer needs to show for the current mixture.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Score {
    pub distance: f64,
    pub match_percent: f64,
    pub stars: StarRating,
}

impl Score {
    pub fn from_distance(distance: f64) -> Self {
        Self {
            distance,
            match_percent: match_percent(distance),
            stars: StarRating::from_distance(distance),
        }
    }
}
