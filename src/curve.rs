//! Height response curve: a piecewise-linear scalar function.

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

/// A single control point of a [`HeightCurve`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

impl CurveKey {
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Maps a raw height sample to a multiplier.
///
/// Keys are kept sorted by `time`. Between keys the value is linearly
/// interpolated; before the first key and after the last the curve holds
/// the endpoint value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct HeightCurve {
    keys: Vec<CurveKey>,
}

impl HeightCurve {
    /// Build a curve from control points in any order.
    pub fn new(mut keys: Vec<CurveKey>) -> Result<Self, TerrainError> {
        if keys.is_empty() {
            return Err(TerrainError::InvalidConfiguration(
                "height curve needs at least one key".to_string(),
            ));
        }
        if keys.iter().any(|k| !k.time.is_finite() || !k.value.is_finite()) {
            return Err(TerrainError::InvalidConfiguration(
                "height curve keys must be finite".to_string(),
            ));
        }
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self { keys })
    }

    /// `f(t) = t` over `[0, 1]`, clamped outside.
    pub fn linear() -> Self {
        Self {
            keys: vec![CurveKey::new(0.0, 0.0), CurveKey::new(1.0, 1.0)],
        }
    }

    /// A flat curve returning `value` everywhere.
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![CurveKey::new(0.0, value)],
        }
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Sample the curve at `t`. A NaN sample yields the first key's value.
    pub fn evaluate(&self, t: f32) -> f32 {
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if t.is_nan() || t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t, so a.time < b.time
        let upper = self.keys.partition_point(|k| k.time <= t);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let frac = (t - a.time) / (b.time - a.time);
        a.value + (b.value - a.value) * frac
    }
}

impl Default for HeightCurve {
    fn default() -> Self {
        Self::linear()
    }
}

impl TryFrom<Vec<CurveKey>> for HeightCurve {
    type Error = TerrainError;

    fn try_from(keys: Vec<CurveKey>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<HeightCurve> for Vec<CurveKey> {
    fn from(curve: HeightCurve) -> Self {
        curve.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_curve() {
        let curve = HeightCurve::linear();
        assert!((curve.evaluate(0.25) - 0.25).abs() < 1e-6);
        assert!((curve.evaluate(0.8) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_clamps_outside_keys() {
        let curve = HeightCurve::linear();
        assert_eq!(curve.evaluate(-3.0), 0.0);
        assert_eq!(curve.evaluate(1.7), 1.0);
    }

    #[test]
    fn test_nan_sample_returns_first_key() {
        let curve =
            HeightCurve::new(vec![CurveKey::new(0.2, 0.7), CurveKey::new(1.0, 2.0)]).unwrap();
        assert_eq!(curve.evaluate(f32::NAN), 0.7);
        assert_eq!(HeightCurve::linear().evaluate(f32::NAN), 0.0);
    }

    #[test]
    fn test_infinite_samples_clamp() {
        let curve = HeightCurve::linear();
        assert_eq!(curve.evaluate(f32::INFINITY), 1.0);
        assert_eq!(curve.evaluate(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_keys_sorted_on_construction() {
        let curve = HeightCurve::new(vec![
            CurveKey::new(1.0, 2.0),
            CurveKey::new(0.0, 0.0),
            CurveKey::new(0.5, 0.1),
        ])
        .unwrap();
        let times: Vec<f32> = curve.keys().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
        // Halfway between 0.5 and 1.0
        assert!((curve.evaluate(0.75) - 1.05).abs() < 1e-5);
    }

    #[test]
    fn test_empty_curve_rejected() {
        assert!(matches!(
            HeightCurve::new(Vec::new()),
            Err(TerrainError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_constant_curve() {
        let curve = HeightCurve::constant(0.4);
        assert_eq!(curve.evaluate(-10.0), 0.4);
        assert_eq!(curve.evaluate(10.0), 0.4);
    }

    #[test]
    fn test_deserialize_from_key_list() {
        let curve: HeightCurve =
            serde_json::from_str(r#"[{"time": 1.0, "value": 3.0}, {"time": 0.0, "value": 1.0}]"#)
                .unwrap();
        assert!((curve.evaluate(0.5) - 2.0).abs() < 1e-6);
        assert!(serde_json::from_str::<HeightCurve>("[]").is_err());
    }
}
