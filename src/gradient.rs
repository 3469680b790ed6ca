//! Color ramp used to tint vertices by elevation.

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

/// Linear RGBA color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// 8-bit RGB for image previews.
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// One stop of a [`ColorGradient`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: f32,
    pub color: Color,
}

impl GradientStop {
    pub fn new(position: f32, color: Color) -> Self {
        Self { position, color }
    }
}

/// How colors are picked between stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientMode {
    /// Linear interpolation between the bracketing stops
    #[default]
    Blend,
    /// Hard steps: the color of the first stop at or after the sample
    Fixed,
}

#[derive(Serialize, Deserialize)]
struct GradientRepr {
    #[serde(default)]
    mode: GradientMode,
    stops: Vec<GradientStop>,
}

/// Ordered color stops sampled by position.
///
/// Samples below the first stop or above the last clamp to the endpoint
/// color. Height samples are raw accumulated noise, so stop positions
/// should cover the range the heightmap actually produces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GradientRepr", into = "GradientRepr")]
pub struct ColorGradient {
    mode: GradientMode,
    stops: Vec<GradientStop>,
}

impl ColorGradient {
    pub fn new(stops: Vec<GradientStop>) -> Result<Self, TerrainError> {
        Self::with_mode(stops, GradientMode::Blend)
    }

    pub fn with_mode(
        mut stops: Vec<GradientStop>,
        mode: GradientMode,
    ) -> Result<Self, TerrainError> {
        if stops.is_empty() {
            return Err(TerrainError::InvalidConfiguration(
                "color gradient needs at least one stop".to_string(),
            ));
        }
        if stops.iter().any(|s| !s.position.is_finite()) {
            return Err(TerrainError::InvalidConfiguration(
                "gradient stop positions must be finite".to_string(),
            ));
        }
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(Self { mode, stops })
    }

    /// Water → sand → grass → rock → snow over `[0, 1]`.
    pub fn terrain() -> Self {
        Self {
            mode: GradientMode::Blend,
            stops: vec![
                GradientStop::new(0.0, Color::rgb(0.12, 0.28, 0.55)),
                GradientStop::new(0.3, Color::rgb(0.86, 0.80, 0.58)),
                GradientStop::new(0.45, Color::rgb(0.30, 0.58, 0.22)),
                GradientStop::new(0.75, Color::rgb(0.45, 0.40, 0.36)),
                GradientStop::new(1.0, Color::WHITE),
            ],
        }
    }

    pub fn mode(&self) -> GradientMode {
        self.mode
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Sample the gradient at `t`. A NaN sample yields the first stop's color.
    pub fn evaluate(&self, t: f32) -> Color {
        let first = &self.stops[0];
        let last = &self.stops[self.stops.len() - 1];
        if t.is_nan() || t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        let upper = self.stops.partition_point(|s| s.position < t);
        let b = &self.stops[upper];
        match self.mode {
            GradientMode::Fixed => b.color,
            GradientMode::Blend => {
                let a = &self.stops[upper - 1];
                let frac = (t - a.position) / (b.position - a.position);
                a.color.lerp(b.color, frac)
            }
        }
    }
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self::terrain()
    }
}

impl TryFrom<GradientRepr> for ColorGradient {
    type Error = TerrainError;

    fn try_from(repr: GradientRepr) -> Result<Self, Self::Error> {
        Self::with_mode(repr.stops, repr.mode)
    }
}

impl From<ColorGradient> for GradientRepr {
    fn from(gradient: ColorGradient) -> Self {
        GradientRepr {
            mode: gradient.mode,
            stops: gradient.stops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_stop() -> ColorGradient {
        ColorGradient::new(vec![
            GradientStop::new(0.0, Color::BLACK),
            GradientStop::new(1.0, Color::WHITE),
        ])
        .unwrap()
    }

    #[test]
    fn test_blend_midpoint() {
        let c = two_stop().evaluate(0.5);
        assert!((c.r - 0.5).abs() < 1e-6);
        assert!((c.g - 0.5).abs() < 1e-6);
        assert!((c.b - 0.5).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_clamps_to_endpoints() {
        let gradient = two_stop();
        assert_eq!(gradient.evaluate(-0.4), Color::BLACK);
        assert_eq!(gradient.evaluate(1.6), Color::WHITE);
    }

    #[test]
    fn test_nan_sample_returns_first_stop() {
        assert_eq!(two_stop().evaluate(f32::NAN), Color::BLACK);
        let terrain = ColorGradient::default();
        assert_eq!(terrain.evaluate(f32::NAN), terrain.stops()[0].color);
        let fixed = ColorGradient::with_mode(
            vec![GradientStop::new(0.0, Color::BLACK), GradientStop::new(1.0, Color::WHITE)],
            GradientMode::Fixed,
        )
        .unwrap();
        assert_eq!(fixed.evaluate(f32::NAN), Color::BLACK);
    }

    #[test]
    fn test_bracketing_pair_selected() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let green = Color::rgb(0.0, 1.0, 0.0);
        let blue = Color::rgb(0.0, 0.0, 1.0);
        let gradient = ColorGradient::new(vec![
            GradientStop::new(0.8, blue),
            GradientStop::new(0.0, red),
            GradientStop::new(0.4, green),
        ])
        .unwrap();

        let c = gradient.evaluate(0.6);
        assert!(c.r.abs() < 1e-6);
        assert!((c.g - 0.5).abs() < 1e-6);
        assert!((c.b - 0.5).abs() < 1e-6);
        assert_eq!(gradient.evaluate(0.4), green);
    }

    #[test]
    fn test_fixed_mode_steps() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let blue = Color::rgb(0.0, 0.0, 1.0);
        let gradient = ColorGradient::with_mode(
            vec![GradientStop::new(0.0, red), GradientStop::new(0.5, blue)],
            GradientMode::Fixed,
        )
        .unwrap();
        assert_eq!(gradient.evaluate(0.1), blue);
        assert_eq!(gradient.evaluate(0.0), red);
    }

    #[test]
    fn test_empty_gradient_rejected() {
        assert!(ColorGradient::new(Vec::new()).is_err());
    }

    #[test]
    fn test_to_rgb8() {
        assert_eq!(Color::rgb(1.0, 0.5, 0.0).to_rgb8(), [255, 128, 0]);
        assert_eq!(Color::rgb(2.0, -1.0, 0.0).to_rgb8(), [255, 0, 0]);
    }

    #[test]
    fn test_deserialize_defaults_mode_and_alpha() {
        let json = r#"{"stops": [{"position": 0.0, "color": {"r": 0.0, "g": 0.0, "b": 0.0}}]}"#;
        let gradient: ColorGradient = serde_json::from_str(json).unwrap();
        assert_eq!(gradient.mode(), GradientMode::Blend);
        assert_eq!(gradient.evaluate(3.0), Color::BLACK);
    }
}
