//! # Buckling-Mechanics Calculator
//!
//! Flexural buckling quantities for a steel member in axial compression,
//! following EN 1993-1-1 Section 6.3.1:
//!
//! 1. Effective length L_cr = k·L from the end-support condition
//! 2. Slenderness λ = L_cr / i and relative slenderness λ̄ = λ / λ₁
//! 3. Buckling curve and imperfection factor α from the profile family
//! 4. Euler load N_cr, reduction factor χ, plastic resistance N_pl
//!
//! The lateral displacement estimate needs the maximum load, which comes
//! from the load model, so it is a separate step ([`lateral_displacement`])
//! applied after prediction. Everything here is pure and deterministic.
//!
//! ## Example
//!
//! ```rust
//! use strut_core::calculations::buckling::{calculate_buckling, SupportCondition};
//! use strut_core::calculations::section::{resolve_section, Dimensions, ProfileFamily};
//! use strut_core::materials::SteelGrade;
//!
//! let section = resolve_section(&ProfileFamily::Ipe, &Dimensions::flanged(200.0, 100.0, 5.6, 8.5)).unwrap();
//! let q = calculate_buckling(
//!     &ProfileFamily::Ipe,
//!     &section.properties,
//!     &SteelGrade::S275.properties(),
//!     3000.0,
//!     &SupportCondition::PinnedPinned,
//! ).unwrap();
//! assert_eq!(q.buckling_length_mm, 3000.0);
//! assert!(q.reduction_factor < 1.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::section::{ProfileFamily, SectionProperties};
use crate::equations::buckling::{
    amplification_factor, euler_critical_load_n, euler_reference_slenderness, plastic_resistance_kn,
    reduction_factor, INITIAL_BOW_DIVISOR, PLATEAU_SLENDERNESS, STOCKY_AMPLIFICATION,
};
use crate::errors::{CalcError, CalcResult};
use crate::materials::SteelProperties;

/// End-support condition of the member.
///
/// Serialized with the labels the load model was fitted on. Unknown labels
/// deserialize to [`SupportCondition::Unspecified`], which keeps the text
/// and behaves as pinned-pinned (k = 1.0).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SupportCondition {
    FixedFixed,
    FixedPinned,
    PinnedPinned,
    FixedFree,
    Unspecified(String),
}

impl SupportCondition {
    /// The four recognized conditions, for UI selection
    pub const ALL: [SupportCondition; 4] = [
        SupportCondition::FixedFixed,
        SupportCondition::FixedPinned,
        SupportCondition::PinnedPinned,
        SupportCondition::FixedFree,
    ];

    /// Label used in saved files and model features
    pub fn label(&self) -> &str {
        match self {
            SupportCondition::FixedFixed => "Empotrado-Empotrado",
            SupportCondition::FixedPinned => "Empotrado-Articulado",
            SupportCondition::PinnedPinned => "Articulado-Articulado",
            SupportCondition::FixedFree => "Empotrado-Libre",
            SupportCondition::Unspecified(label) => label.as_str(),
        }
    }

    /// Parse from labels and English aliases. Never fails.
    pub fn from_str_flexible(s: &str) -> Self {
        match s.trim().to_uppercase().replace([' ', '_'], "-").as_str() {
            "EMPOTRADO-EMPOTRADO" | "BIEMPOTRADO" | "FIXED-FIXED" => SupportCondition::FixedFixed,
            "EMPOTRADO-ARTICULADO" | "FIXED-PINNED" => SupportCondition::FixedPinned,
            "ARTICULADO-ARTICULADO" | "BIARTICULADO" | "PINNED-PINNED" => SupportCondition::PinnedPinned,
            "EMPOTRADO-LIBRE" | "FIXED-FREE" | "CANTILEVER" => SupportCondition::FixedFree,
            _ => SupportCondition::Unspecified(s.to_string()),
        }
    }

    /// Effective length factor k (L_cr = k·L)
    pub fn effective_length_factor(&self) -> f64 {
        match self {
            SupportCondition::FixedFixed => 0.5,
            SupportCondition::FixedPinned => 0.7,
            SupportCondition::PinnedPinned => 1.0,
            SupportCondition::FixedFree => 2.0,
            SupportCondition::Unspecified(_) => 1.0,
        }
    }
}

impl From<String> for SupportCondition {
    fn from(s: String) -> Self {
        match SupportCondition::from_str_flexible(&s) {
            SupportCondition::Unspecified(_) => SupportCondition::Unspecified(s),
            known => known,
        }
    }
}

impl From<SupportCondition> for String {
    fn from(condition: SupportCondition) -> Self {
        match condition {
            SupportCondition::Unspecified(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for SupportCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for SupportCondition {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SupportCondition::from_str_flexible(s))
    }
}

/// EN 1993-1-1 buckling curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucklingCurve {
    A0,
    A,
    B,
    C,
    D,
}

impl BucklingCurve {
    /// Curve assigned to a profile family
    pub fn for_family(family: &ProfileFamily) -> Self {
        match family {
            ProfileFamily::Ipe | ProfileFamily::Heb | ProfileFamily::Hea => BucklingCurve::B,
            ProfileFamily::Hem | ProfileFamily::SquareHollow | ProfileFamily::CircularHollow => BucklingCurve::A,
            ProfileFamily::Upn | ProfileFamily::Tee => BucklingCurve::C,
            ProfileFamily::Angle => BucklingCurve::D,
            ProfileFamily::Custom(_) => BucklingCurve::C,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BucklingCurve::A0 => "a0",
            BucklingCurve::A => "a",
            BucklingCurve::B => "b",
            BucklingCurve::C => "c",
            BucklingCurve::D => "d",
        }
    }

    /// Imperfection factor α (EN 1993-1-1 Table 6.1)
    pub fn imperfection_coefficient(&self) -> f64 {
        match self {
            BucklingCurve::A0 => 0.13,
            BucklingCurve::A => 0.21,
            BucklingCurve::B => 0.34,
            BucklingCurve::C => 0.49,
            BucklingCurve::D => 0.76,
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "a0" => Some(BucklingCurve::A0),
            "a" => Some(BucklingCurve::A),
            "b" => Some(BucklingCurve::B),
            "c" => Some(BucklingCurve::C),
            "d" => Some(BucklingCurve::D),
            _ => None,
        }
    }
}

impl std::fmt::Display for BucklingCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Imperfection factor for a curve label; unknown labels fall back to curve b (0.34).
pub fn imperfection_for_label(label: &str) -> f64 {
    BucklingCurve::from_label(label)
        .unwrap_or(BucklingCurve::B)
        .imperfection_coefficient()
}

/// Model-independent buckling quantities
///
/// ## JSON Example
///
/// ```json
/// {
///   "effective_length_factor": 1.0,
///   "buckling_length_mm": 3000.0,
///   "mechanical_slenderness": 36.6,
///   "euler_reference_slenderness": 86.8,
///   "relative_slenderness": 0.42,
///   "buckling_curve": "b",
///   "imperfection_coefficient": 0.34,
///   "reduction_factor": 0.91,
///   "euler_critical_load_kN": 4040.0,
///   "plastic_resistance_kN": 749.3,
///   "initial_eccentricity_mm": 6.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucklingQuantities {
    /// Effective length factor k
    pub effective_length_factor: f64,
    /// Buckling length L_cr = k·L (mm)
    pub buckling_length_mm: f64,
    /// λ = L_cr / i
    pub mechanical_slenderness: f64,
    /// λ₁ = π·√(E/fy)
    pub euler_reference_slenderness: f64,
    /// λ̄ = λ / λ₁
    pub relative_slenderness: f64,
    pub buckling_curve: BucklingCurve,
    /// α
    pub imperfection_coefficient: f64,
    /// χ
    pub reduction_factor: f64,
    /// N_cr (kN)
    #[serde(rename = "euler_critical_load_kN")]
    pub euler_critical_load_kn: f64,
    /// N_pl = A·fy (kN)
    #[serde(rename = "plastic_resistance_kN")]
    pub plastic_resistance_kn: f64,
    /// e₀ = L / 500 (mm)
    pub initial_eccentricity_mm: f64,
}

impl BucklingQuantities {
    /// Closed-form design resistance χ·N_pl (kN)
    pub fn buckling_resistance_kn(&self) -> f64 {
        self.reduction_factor * self.plastic_resistance_kn
    }
}

/// Second-order lateral displacement estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateralDisplacement {
    /// Displacement at mid-length (mm)
    pub lateral_displacement_mm: f64,
    /// Factor applied to e₀
    pub amplification: f64,
    /// True when the load is at or beyond 99% of N_cr and the amplification was capped
    pub displacement_capped: bool,
}

/// Compute the buckling quantities for a resolved section.
///
/// # Arguments
///
/// * `family` - Profile family (selects the buckling curve)
/// * `section` - Resolved section properties
/// * `material` - Steel properties
/// * `length_mm` - Member length L
/// * `support` - End-support condition (selects k)
///
/// # Errors
///
/// * `InvalidInput` - non-positive length
/// * `NumericDomain` - the reduction factor left the real domain
pub fn calculate_buckling(
    family: &ProfileFamily,
    section: &SectionProperties,
    material: &SteelProperties,
    length_mm: f64,
    support: &SupportCondition,
) -> CalcResult<BucklingQuantities> {
    if !(length_mm.is_finite() && length_mm > 0.0) {
        return Err(CalcError::invalid_input(
            "length_mm",
            length_mm.to_string(),
            "Length must be positive",
        ));
    }

    let e = material.elastic_modulus_mpa;
    let fy = material.yield_strength_mpa;

    let k = support.effective_length_factor();
    let buckling_length_mm = length_mm * k;
    let mechanical_slenderness = buckling_length_mm / section.radius_of_gyration_mm;
    let reference = euler_reference_slenderness(e, fy);
    let relative_slenderness = mechanical_slenderness / reference;

    let curve = BucklingCurve::for_family(family);
    let alpha = curve.imperfection_coefficient();

    let euler_critical_load_kn = euler_critical_load_n(e, section.moment_of_inertia_mm4, buckling_length_mm) / 1000.0;
    let chi = reduction_factor(alpha, relative_slenderness)?;
    let plastic_resistance_kn = plastic_resistance_kn(section.area_mm2, fy);

    debug!(
        k,
        slenderness = mechanical_slenderness,
        relative_slenderness,
        curve = curve.label(),
        chi,
        n_cr_kn = euler_critical_load_kn,
        "Computed buckling quantities"
    );

    Ok(BucklingQuantities {
        effective_length_factor: k,
        buckling_length_mm,
        mechanical_slenderness,
        euler_reference_slenderness: reference,
        relative_slenderness,
        buckling_curve: curve,
        imperfection_coefficient: alpha,
        reduction_factor: chi,
        euler_critical_load_kn,
        plastic_resistance_kn,
        initial_eccentricity_mm: length_mm / INITIAL_BOW_DIVISOR,
    })
}

/// Estimate lateral displacement under the maximum load `load_kn`.
///
/// Stocky members (λ̄ < 0.2) use 1.1·e₀. Otherwise e₀ is amplified by
/// 1/(1 − P/N_cr), capped near the Euler load.
pub fn lateral_displacement(quantities: &BucklingQuantities, load_kn: f64) -> LateralDisplacement {
    let e0 = quantities.initial_eccentricity_mm;
    if quantities.relative_slenderness < PLATEAU_SLENDERNESS {
        return LateralDisplacement {
            lateral_displacement_mm: e0 * STOCKY_AMPLIFICATION,
            amplification: STOCKY_AMPLIFICATION,
            displacement_capped: false,
        };
    }

    let (amplification, capped) = amplification_factor(load_kn, quantities.euler_critical_load_kn);
    if capped {
        warn!(
            load_kn,
            n_cr_kn = quantities.euler_critical_load_kn,
            amplification,
            "Load at or beyond the Euler load; lateral displacement amplification capped"
        );
    }

    LateralDisplacement {
        lateral_displacement_mm: e0 * amplification,
        amplification,
        displacement_capped: capped,
    }
}
