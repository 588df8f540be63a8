//! # Flexural Buckling Formulas
//!
//! Closed-form column stability relations: Euler's elastic critical load,
//! the EN 1993-1-1 buckling-curve reduction factor (Ayrton-Perry form), the
//! plastic squash load, and the second-order amplification of an initial
//! bow imperfection.
//!
//! ## Units
//!
//! E and fy in MPa (N/mm²), lengths in mm, I in mm⁴, A in mm². Euler's load
//! therefore comes out in newtons; resistances returned in kN say so in
//! their name.
//!
//! ## References
//!
//! - EN 1993-1-1:2005 Section 6.3.1.2, Eq. 6.49 and Table 6.1
//! - Timoshenko & Gere, Theory of Elastic Stability, Chapter 2

use std::f64::consts::PI;

use crate::errors::{CalcError, CalcResult};

/// Relative slenderness below which buckling is ignored (χ = 1)
pub const PLATEAU_SLENDERNESS: f64 = 0.2;

/// Initial bow imperfection e₀ = L / 500
pub const INITIAL_BOW_DIVISOR: f64 = 500.0;

/// Amplification applied to e₀ for stocky members (λ̄ < 0.2)
pub const STOCKY_AMPLIFICATION: f64 = 1.1;

/// Upper bound on the second-order amplification 1/(1 − P/N_cr).
///
/// Reached at P/N_cr = 0.99; loads at or beyond that ratio (including
/// P ≥ N_cr, where the expression is singular or negative) report this cap.
pub const MAX_AMPLIFICATION: f64 = 100.0;

/// Rounding slack tolerated on the φ² − λ̄² discriminant before it is
/// treated as a genuine domain error.
const DISCRIMINANT_TOLERANCE: f64 = 1e-12;

/// Euler reference slenderness λ₁ = π·√(E/fy)
///
/// # Example
/// ```rust
/// use strut_core::equations::buckling::euler_reference_slenderness;
///
/// // S235: λ₁ ≈ 93.9
/// let l1 = euler_reference_slenderness(210_000.0, 235.0);
/// assert!((l1 - 93.91).abs() < 0.01);
/// ```
#[inline]
pub fn euler_reference_slenderness(e_mpa: f64, fy_mpa: f64) -> f64 {
    PI * (e_mpa / fy_mpa).sqrt()
}

/// Euler critical load N_cr = π²·E·I / L_cr² (newtons)
#[inline]
pub fn euler_critical_load_n(e_mpa: f64, i_mm4: f64, buckling_length_mm: f64) -> f64 {
    PI.powi(2) * e_mpa * i_mm4 / buckling_length_mm.powi(2)
}

/// Plastic resistance N_pl = A·fy, returned in kN
#[inline]
pub fn plastic_resistance_kn(area_mm2: f64, fy_mpa: f64) -> f64 {
    area_mm2 * fy_mpa / 1000.0
}

/// Auxiliary value φ = 0.5·(1 + α·(λ̄ − 0.2) + λ̄²)
#[inline]
pub fn phi(alpha: f64, relative_slenderness: f64) -> f64 {
    0.5 * (1.0 + alpha * (relative_slenderness - PLATEAU_SLENDERNESS) + relative_slenderness.powi(2))
}

/// Buckling reduction factor χ (EN 1993-1-1 Eq. 6.49)
///
/// χ = 1 for λ̄ ≤ 0.2 (inclusive). Otherwise
/// χ = 1 / (φ + √(φ² − λ̄²)), never above 1.0.
///
/// For α ≥ 0, φ − λ̄ = ½·((1 − λ̄)² + α·(λ̄ − 0.2)) ≥ 0, so the discriminant
/// (φ − λ̄)(φ + λ̄) cannot go negative; a negative value means a negative
/// imperfection factor. Rounding noise within 1e-12·φ² is clamped
/// to zero; anything larger fails with `NumericDomain`.
///
/// # Example
/// ```rust
/// use strut_core::equations::buckling::reduction_factor;
///
/// assert_eq!(reduction_factor(0.34, 0.2).unwrap(), 1.0);
///
/// // Curve b at λ̄ = 1.0 → χ ≈ 0.597 (EN 1993-1-1 Figure 6.4)
/// let chi = reduction_factor(0.34, 1.0).unwrap();
/// assert!((chi - 0.597).abs() < 0.001);
/// ```
pub fn reduction_factor(alpha: f64, relative_slenderness: f64) -> CalcResult<f64> {
    if !alpha.is_finite() || !relative_slenderness.is_finite() {
        return Err(CalcError::numeric_domain(
            "reduction_factor",
            format!("non-finite input (alpha = {}, relative slenderness = {})", alpha, relative_slenderness),
        ));
    }
    if relative_slenderness <= PLATEAU_SLENDERNESS {
        return Ok(1.0);
    }

    let phi = phi(alpha, relative_slenderness);
    let mut discriminant = phi.powi(2) - relative_slenderness.powi(2);
    if discriminant < 0.0 {
        if discriminant >= -DISCRIMINANT_TOLERANCE * phi.powi(2) {
            discriminant = 0.0;
        } else {
            return Err(CalcError::numeric_domain(
                "reduction_factor",
                format!(
                    "phi^2 - lambda^2 = {:.6e} is negative (alpha = {}, relative slenderness = {})",
                    discriminant, alpha, relative_slenderness
                ),
            ));
        }
    }

    let chi = 1.0 / (phi + discriminant.sqrt());
    Ok(chi.min(1.0))
}

/// Second-order amplification 1 / (1 − P/N_cr), capped at [`MAX_AMPLIFICATION`].
///
/// Returns `(factor, capped)`.
pub fn amplification_factor(load_kn: f64, critical_load_kn: f64) -> (f64, bool) {
    let ratio = load_kn / critical_load_kn;
    let limit = 1.0 - 1.0 / MAX_AMPLIFICATION;
    // NaN ratios fall through to the cap as well
    if ratio < limit {
        (1.0 / (1.0 - ratio), false)
    } else {
        (MAX_AMPLIFICATION, true)
    }
}
