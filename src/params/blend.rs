use serde::{Deserialize, Serialize};

use crate::foundation::error::{FractalError, FractalResult};

/// Tolerance used when checking that blend weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// One of the three blended curve families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveFamily {
    /// Expanding helix along the z axis.
    Spiral,
    /// Flat ring with a doubled vertical twist.
    Mobius,
    /// (2,3) torus knot.
    Trefoil,
}

impl CurveFamily {
    /// All families in weight order.
    pub const ALL: [Self; 3] = [Self::Spiral, Self::Mobius, Self::Trefoil];

    fn slot(self) -> usize {
        match self {
            Self::Spiral => 0,
            Self::Mobius => 1,
            Self::Trefoil => 2,
        }
    }
}

/// How the three curve positions are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMethod {
    /// Weighted sum using the blend weights.
    #[default]
    Linear,
    /// Smoothstepped cascade along the curve parameter.
    SmoothStep,
    /// Cascade driven by distance from the parameter-space center.
    Radial,
}

/// Normalized blend weights plus the blend method.
///
/// The weights are kept private so the sum-to-one invariant survives every edit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BlendParametersRepr", into = "BlendParametersRepr")]
pub struct BlendParameters {
    weights: [f64; 3],
    /// Blend method used by the renderer.
    pub method: BlendMethod,
}

#[derive(Serialize, Deserialize)]
struct BlendParametersRepr {
    spiral: f64,
    mobius: f64,
    trefoil: f64,
    #[serde(default)]
    method: BlendMethod,
}

impl TryFrom<BlendParametersRepr> for BlendParameters {
    type Error = FractalError;

    fn try_from(r: BlendParametersRepr) -> Result<Self, Self::Error> {
        Self::from_weights([r.spiral, r.mobius, r.trefoil], r.method)
    }
}

impl From<BlendParameters> for BlendParametersRepr {
    fn from(p: BlendParameters) -> Self {
        Self {
            spiral: p.weights[0],
            mobius: p.weights[1],
            trefoil: p.weights[2],
            method: p.method,
        }
    }
}

impl Default for BlendParameters {
    fn default() -> Self {
        Self {
            weights: [0.33, 0.33, 0.34],
            method: BlendMethod::Linear,
        }
    }
}

impl BlendParameters {
    /// Build from arbitrary non-negative weights, rescaling them to sum to one.
    pub fn from_weights(weights: [f64; 3], method: BlendMethod) -> FractalResult<Self> {
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(FractalError::validation(
                "blend weights must be finite and non-negative",
            ));
        }
        let sum: f64 = weights.iter().sum();
        if sum <= 0.0 {
            return Err(FractalError::validation(
                "blend weights must not all be zero",
            ));
        }
        Ok(Self {
            weights: weights.map(|w| w / sum),
            method,
        })
    }

    /// Current normalized weights in `[spiral, mobius, trefoil]` order.
    pub fn weights(&self) -> [f64; 3] {
        self.weights
    }

    /// Weight of a single family.
    pub fn weight(&self, family: CurveFamily) -> f64 {
        self.weights[family.slot()]
    }

    /// Set one weight and rescale all three proportionally so they sum to one.
    ///
    /// `value` is clamped to `[0, 1]`. An edit that leaves every weight at zero resets to the
    /// equal split.
    pub fn update_blend_factor(&mut self, family: CurveFamily, value: f64) -> FractalResult<()> {
        if value.is_nan() {
            return Err(FractalError::validation("blend factor must not be NaN"));
        }
        let mut next = self.weights;
        next[family.slot()] = value.clamp(0.0, 1.0);
        let sum: f64 = next.iter().sum();
        self.weights = if sum <= 0.0 {
            [1.0 / 3.0; 3]
        } else {
            next.map(|w| w / sum)
        };
        Ok(())
    }

    /// Check the sum-to-one invariant.
    pub fn validate(&self) -> FractalResult<()> {
        let sum: f64 = self.weights.iter().sum();
        if self.weights.iter().any(|w| *w < 0.0) || (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(FractalError::validation(format!(
                "blend weights must be non-negative and sum to 1, got {:?}",
                self.weights
            )));
        }
        Ok(())
    }

    /// Weights as an `f32` vector for the curve evaluator.
    pub(crate) fn weights_vec3(&self) -> glam::Vec3 {
        glam::Vec3::new(
            self.weights[0] as f32,
            self.weights[1] as f32,
            self.weights[2] as f32,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/blend.rs"]
mod tests;
