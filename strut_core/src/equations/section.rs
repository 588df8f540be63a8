//! # Cross-Section Property Formulas
//!
//! Formulas for the geometric properties of the steel cross-sections the
//! buckling engine supports. All inputs and outputs are in consistent units
//! (mm in, mm² / mm⁴ out).
//!
//! ## Notation
//!
//! - `A` = Cross-sectional area
//! - `I` = Moment of inertia (second moment of area), strong axis
//! - `i` = Radius of gyration (√(I/A))
//! - `h` = Overall section height
//! - `b` = Flange width
//! - `tw` = Web thickness
//! - `tf` = Flange thickness
//! - `D` = Outer dimension (side or diameter) of a hollow section
//! - `t` = Wall thickness of a hollow section
//!
//! ## References
//!
//! - EN 1993-1-1 Section 6.3.1: Uniform members in compression
//! - Roark's Formulas for Stress and Strain, 8th Edition, Appendix A

use std::f64::consts::PI;

// =============================================================================
// DOUBLY-SYMMETRIC FLANGED SECTIONS
// I/H rolled shapes, also applied to channels, angles and tees
// =============================================================================

/// Calculate cross-sectional area of a flanged section
///
/// ```text
///     ┌───────────┐  ← tf
///     └────┐ ┌────┘
///          │ │  ← tw
///        h │ │
///     ┌────┘ └────┐
///     └───────────┘
///           b
/// ```
///
/// # Formula
/// A = 2·b·tf + (h − 2·tf)·tw
///
/// # Example
/// ```rust
/// use strut_core::equations::section::flanged_area;
///
/// // IPE 200 plates (root fillets ignored)
/// let a = flanged_area(200.0, 100.0, 5.6, 8.5);
/// assert!((a - 2724.8).abs() < 1e-9);
/// ```
#[inline]
pub fn flanged_area(h: f64, b: f64, tw: f64, tf: f64) -> f64 {
    2.0 * b * tf + (h - 2.0 * tf) * tw
}

/// Calculate strong-axis moment of inertia of a flanged section
///
/// Gross rectangle minus the two voids beside the web.
///
/// # Formula
/// I = b·h³/12 − (b − tw)·(h − 2·tf)³/12
#[inline]
pub fn flanged_moment_of_inertia(h: f64, b: f64, tw: f64, tf: f64) -> f64 {
    b * h.powi(3) / 12.0 - (b - tw) * (h - 2.0 * tf).powi(3) / 12.0
}

/// Moment of inertia of the bounding rectangle, b·h³/12
///
/// Used for profile families without a dedicated model. Ignores the web
/// correction entirely, so it overestimates I for any real open section.
#[inline]
pub fn bounding_rectangle_moment_of_inertia(h: f64, b: f64) -> f64 {
    b * h.powi(3) / 12.0
}

// =============================================================================
// HOLLOW SECTIONS
// =============================================================================

/// Area of a square hollow section, D² − (D − 2t)²
///
/// # Example
/// ```rust
/// use strut_core::equations::section::square_hollow_area;
///
/// let a = square_hollow_area(150.0, 8.0);
/// assert_eq!(a, 4544.0);
/// ```
#[inline]
pub fn square_hollow_area(d: f64, t: f64) -> f64 {
    d.powi(2) - (d - 2.0 * t).powi(2)
}

/// Moment of inertia of a square hollow section, (D⁴ − (D − 2t)⁴)/12
#[inline]
pub fn square_hollow_moment_of_inertia(d: f64, t: f64) -> f64 {
    (d.powi(4) - (d - 2.0 * t).powi(4)) / 12.0
}

/// Area of a circular hollow section, π(r_o² − r_i²)
#[inline]
pub fn circular_hollow_area(d: f64, t: f64) -> f64 {
    let r_o = d / 2.0;
    let r_i = r_o - t;
    PI * (r_o.powi(2) - r_i.powi(2))
}

/// Moment of inertia of a circular hollow section, π(r_o⁴ − r_i⁴)/4
#[inline]
pub fn circular_hollow_moment_of_inertia(d: f64, t: f64) -> f64 {
    let r_o = d / 2.0;
    let r_i = r_o - t;
    PI * (r_o.powi(4) - r_i.powi(4)) / 4.0
}

// =============================================================================
// DERIVED PROPERTIES
// =============================================================================

/// Radius of gyration i = √(I/A)
///
/// Callers must guarantee `area > 0`.
#[inline]
pub fn radius_of_gyration(moment_of_inertia: f64, area: f64) -> f64 {
    (moment_of_inertia / area).sqrt()
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6 * b.abs().max(1.0)
    }

    #[test]
    fn test_flanged_area() {
        // 2·100·8.5 + (200 − 17)·5.6 = 1700 + 1024.8
        let a = flanged_area(200.0, 100.0, 5.6, 8.5);
        assert!(approx_eq(a, 2724.8), "A = {}", a);
    }

    #[test]
    fn test_flanged_inertia_matches_plate_sum() {
        // Flanges by parallel axis + web, computed independently
        let (h, b, tw, tf): (f64, f64, f64, f64) = (300.0, 150.0, 7.1, 10.7);
        let flange_own = b * tf.powi(3) / 12.0;
        let flange_offset = b * tf * ((h - tf) / 2.0).powi(2);
        let web = tw * (h - 2.0 * tf).powi(3) / 12.0;
        let expected = 2.0 * (flange_own + flange_offset) + web;

        let i = flanged_moment_of_inertia(h, b, tw, tf);
        assert!(approx_eq(i, expected), "I = {} (expected {})", i, expected);
    }

    #[test]
    fn test_bounding_rectangle_exceeds_flanged() {
        let i_full = bounding_rectangle_moment_of_inertia(200.0, 100.0);
        let i_flanged = flanged_moment_of_inertia(200.0, 100.0, 5.6, 8.5);
        assert!(i_full > i_flanged);
    }

    #[test]
    fn test_square_hollow() {
        // 150² − 134² = 22500 − 17956
        assert_eq!(square_hollow_area(150.0, 8.0), 4544.0);
        let i = square_hollow_moment_of_inertia(150.0, 8.0);
        let expected = (150.0_f64.powi(4) - 134.0_f64.powi(4)) / 12.0;
        assert!(approx_eq(i, expected));
    }

    #[test]
    fn test_circular_hollow() {
        // D = 100, t = 5 → r_o = 50, r_i = 45
        let a = circular_hollow_area(100.0, 5.0);
        assert!(approx_eq(a, PI * (2500.0 - 2025.0)));
        let i = circular_hollow_moment_of_inertia(100.0, 5.0);
        assert!(approx_eq(i, PI * (50.0_f64.powi(4) - 45.0_f64.powi(4)) / 4.0));
    }

    #[test]
    fn test_radius_of_gyration_consistency() {
        // I = A · i²
        let a = square_hollow_area(200.0, 10.0);
        let i = square_hollow_moment_of_inertia(200.0, 10.0);
        let r = radius_of_gyration(i, a);
        assert!(approx_eq(a * r * r, i));
    }
}
