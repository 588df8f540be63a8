//! # Curve Sampling
//!
//! Data series for the charts a front end draws next to a prediction: the
//! χ(λ̄) buckling curve, the load-slenderness curve χ·N_pl with the
//! prediction marked on it, and the deflected shape of the member along
//! its length. Rendering is left to the caller.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::calculations::buckling::SupportCondition;
use crate::calculations::prediction::PredictionResult;
use crate::equations::reduction_factor;
use crate::errors::{CalcError, CalcResult};

/// Upper end of the default relative-slenderness axis
pub const DEFAULT_MAX_SLENDERNESS: f64 = 2.5;
/// Default sample count per curve
pub const DEFAULT_CURVE_POINTS: usize = 100;

/// One sample of a curve over relative slenderness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub relative_slenderness: f64,
    pub value: f64,
}

/// χ·N_pl over λ̄, plus the prediction's own point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSlendernessCurve {
    pub points: Vec<CurvePoint>,
    /// (λ̄, max_load_kN) of the prediction
    pub marker: CurvePoint,
}

/// One sample of the deflected axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapePoint {
    /// Position along the member, 0 at the base (mm)
    pub z_mm: f64,
    /// Lateral deflection (mm)
    pub y_mm: f64,
}

fn check_points(points: usize) -> CalcResult<()> {
    if points < 2 {
        return Err(CalcError::invalid_input(
            "points",
            points.to_string(),
            "At least two samples are required",
        ));
    }
    Ok(())
}

/// `points` evenly spaced values over `[0, max]`, both ends included
fn linspace(max: f64, points: usize) -> impl Iterator<Item = f64> {
    let step = max / (points - 1) as f64;
    (0..points).map(move |i| if i == points - 1 { max } else { i as f64 * step })
}

/// Sample χ(λ̄) for imperfection factor `alpha` over `[0, max_slenderness]`.
pub fn reduction_factor_curve(alpha: f64, max_slenderness: f64, points: usize) -> CalcResult<Vec<CurvePoint>> {
    check_points(points)?;
    if !(max_slenderness.is_finite() && max_slenderness > 0.0) {
        return Err(CalcError::invalid_input(
            "max_slenderness",
            max_slenderness.to_string(),
            "Slenderness range must be positive",
        ));
    }

    linspace(max_slenderness, points)
        .map(|lambda| {
            Ok(CurvePoint {
                relative_slenderness: lambda,
                value: reduction_factor(alpha, lambda)?,
            })
        })
        .collect()
}

/// Sample χ·N_pl for a result's imperfection factor and plastic resistance.
///
/// The axis spans the default range, widened to include the result's own
/// slenderness when it lies beyond 2.5.
pub fn load_slenderness_curve(result: &PredictionResult, points: usize) -> CalcResult<LoadSlendernessCurve> {
    let q = &result.buckling;
    let max = DEFAULT_MAX_SLENDERNESS.max(q.relative_slenderness);
    let points = reduction_factor_curve(q.imperfection_coefficient, max, points)?
        .into_iter()
        .map(|p| CurvePoint {
            relative_slenderness: p.relative_slenderness,
            value: p.value * q.plastic_resistance_kn,
        })
        .collect();

    Ok(LoadSlendernessCurve {
        points,
        marker: CurvePoint {
            relative_slenderness: q.relative_slenderness,
            value: result.max_load_kn,
        },
    })
}

/// Normalized buckled shape at ξ = z/L, in [0, 1].
///
/// | Support | Shape |
/// |---------|-------|
/// | Pinned-pinned, unspecified | sin(πξ) |
/// | Fixed-fixed | sin(2πξ) |
/// | Fixed-pinned | sin(0.7πξ) |
/// | Fixed-free | 1 − cos(πξ/2) |
pub fn mode_shape(support: &SupportCondition, xi: f64) -> f64 {
    match support {
        SupportCondition::PinnedPinned | SupportCondition::Unspecified(_) => (PI * xi).sin(),
        SupportCondition::FixedFixed => (2.0 * PI * xi).sin(),
        SupportCondition::FixedPinned => (0.7 * PI * xi).sin(),
        SupportCondition::FixedFree => 1.0 - (PI * xi / 2.0).cos(),
    }
}

/// Deflected member axis scaled by the result's lateral displacement.
pub fn deflected_shape(result: &PredictionResult, points: usize) -> CalcResult<Vec<ShapePoint>> {
    check_points(points)?;
    let length = result.length_mm;
    let amplitude = result.displacement.lateral_displacement_mm;

    Ok(linspace(1.0, points)
        .map(|xi| ShapePoint {
            z_mm: xi * length,
            y_mm: amplitude * mode_shape(&result.support_condition, xi),
        })
        .collect())
}
