use crate::error::{ChromabrewError, ChromabrewResult};

/// Flat RGB color, each channel held in [0, 255].
///
/// This is deliberately *not* a perceptual color space: the whole game is
/// scored in plain Euclidean RGB distance, so the math stays linear and
/// unweighted throughout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }.clamped()
    }

    /// Mean of the three channels; the "gray" the saturation ops move
    /// toward or away from.
    pub fn channel_mean(self) -> f64 {
        (self.r + self.g + self.b) / 3.0
    }

    pub fn clamped(self) -> Self {
        Self {
            r: clamp_channel(self.r),
            g: clamp_channel(self.g),
            b: clamp_channel(self.b),
        }
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }

    pub fn to_hex(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            self.r.round() as u8,
            self.g.round() as u8,
            self.b.round() as u8
        )
    }

    pub fn from_hex(hex: &str) -> ChromabrewResult<Self> {
        let h = hex.trim_start_matches('#');
        if h.len() != 6 {
            return Err(ChromabrewError::validation(format!(
                "hex color '{hex}' must have 6 digits"
            )));
        }
        let packed = u32::from_str_radix(h, 16)
            .map_err(|_| ChromabrewError::validation(format!("hex color '{hex}' is not hex")))?;
        Ok(Self {
            r: f64::from((packed >> 16) & 255),
            g: f64::from((packed >> 8) & 255),
            b: f64::from(packed & 255),
        })
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rgb({}, {}, {})",
            self.r.round() as i64,
            self.g.round() as i64,
            self.b.round() as i64
        )
    }
}

pub fn clamp_channel(v: f64) -> f64 {
    v.clamp(0.0, 255.0)
}

/// Upper bound of [`distance`]: the main diagonal of the RGB cube,
/// √(255²·3) ≈ 441.67.
pub fn max_distance() -> f64 {
    (255.0f64 * 255.0 * 3.0).sqrt()
}

/// Per-channel linear interpolation `current*(1-weight) + added*weight`.
///
/// `weight` must already lie in [0, 1]; strengths (boosted or not) are
/// clamped to [0, 0.95] before they reach this function.
pub fn blend(current: Rgb, added: Rgb, weight: f64) -> Rgb {
    Rgb {
        r: current.r * (1.0 - weight) + added.r * weight,
        g: current.g * (1.0 - weight) + added.g * weight,
        b: current.b * (1.0 - weight) + added.b * weight,
    }
    .clamped()
}

/// Move every channel toward the channel mean by `amount` in [0, 1].
pub fn desaturate(c: Rgb, amount: f64) -> Rgb {
    let mean = c.channel_mean();
    c.map(|v| v + (mean - v) * amount).clamped()
}

/// Scale every channel by `factor`, clamping the result.
pub fn adjust_brightness(c: Rgb, factor: f64) -> Rgb {
    c.map(|v| v * factor).clamped()
}

/// Push every channel away from the channel mean by `amount` (additive
/// strength, unbounded before the clamp).
pub fn saturate_push(c: Rgb, amount: f64) -> Rgb {
    let mean = c.channel_mean();
    c.map(|v| v + (v - mean) * amount).clamped()
}

/// Scale channels uniformly toward zero; a crude contrast reduction.
pub fn soften(c: Rgb, factor: f64) -> Rgb {
    c.map(|v| v * factor).clamped()
}

/// Euclidean distance in 3D channel space. No weighting, no gamma.
pub fn distance(a: Rgb, b: Rgb) -> f64 {
    let dr = a.r - b.r;
    let dg = a.g - b.g;
    let db = a.b - b.b;
    (dr * dr + dg * dg + db * db).sqrt()
}
