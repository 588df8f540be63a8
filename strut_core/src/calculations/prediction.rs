//! # Buckling Load Prediction
//!
//! The full pipeline for one member:
//!
//! ```text
//! InputParameters
//!   → resolve_section        (A, I, i, normalized dimensions)
//!   → calculate_buckling     (k, λ, λ̄, χ, N_cr, N_pl, e₀)
//!   → FeatureRecord          (23 features, model order)
//!   → LoadPredictor          (max load, kN)
//!   → lateral_displacement   (second-order estimate under that load)
//!   → PredictionResult
//! ```
//!
//! Every call is independent and side-effect free apart from logging. Any
//! failure fails the whole call; no partial result is returned.
//!
//! ## Example
//!
//! ```rust
//! use strut_core::calculations::prediction::{predict, InputParameters};
//! use strut_core::calculations::buckling::SupportCondition;
//! use strut_core::calculations::section::{Dimensions, ProfileFamily};
//! use strut_core::materials::SteelGrade;
//! use strut_core::model::ReferencePredictor;
//!
//! let params = InputParameters {
//!     profile_family: ProfileFamily::Ipe,
//!     steel_grade: SteelGrade::S275,
//!     length_mm: 3000.0,
//!     support_condition: SupportCondition::PinnedPinned,
//!     dimensions: Dimensions::flanged(200.0, 100.0, 5.6, 8.5),
//! };
//! let model = ReferencePredictor::new();
//! let result = predict(&params, Some(&model)).unwrap();
//! assert!(result.max_load_kn > 0.0);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calculations::buckling::{
    calculate_buckling, lateral_displacement, BucklingQuantities, LateralDisplacement, SupportCondition,
};
use crate::calculations::section::{resolve_section, Dimensions, NormalizedDimensions, ProfileFamily, SectionProperties};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{SteelGrade, SteelProperties};
use crate::model::{ArtifactLocator, FeatureRecord, LoadPredictor, ModelLoader};
use crate::units::{ForceUnit, KN_TO_KG, KN_TO_TON};

/// Shortest accepted member length (mm)
pub const MIN_LENGTH_MM: f64 = 100.0;
/// Longest accepted member length (mm)
pub const MAX_LENGTH_MM: f64 = 20_000.0;

/// Member description supplied by the caller.
///
/// Dimension fields sit at the top level of the JSON form; only the group
/// relevant to the family needs to be present.
///
/// ## JSON Example
///
/// ```json
/// {
///   "profile_family": "IPE",
///   "steel_grade": "S275",
///   "length_mm": 3000.0,
///   "support_condition": "Articulado-Articulado",
///   "section_height_mm": 200.0,
///   "flange_width_mm": 100.0,
///   "web_thickness_mm": 5.6,
///   "flange_thickness_mm": 8.5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputParameters {
    pub profile_family: ProfileFamily,
    pub steel_grade: SteelGrade,
    /// Member length L (mm)
    pub length_mm: f64,
    pub support_condition: SupportCondition,
    #[serde(flatten)]
    pub dimensions: Dimensions,
}

impl Default for InputParameters {
    fn default() -> Self {
        InputParameters {
            profile_family: ProfileFamily::Ipe,
            steel_grade: SteelGrade::S275,
            length_mm: 3000.0,
            support_condition: SupportCondition::PinnedPinned,
            dimensions: Dimensions::flanged(200.0, 100.0, 5.6, 8.5),
        }
    }
}

impl InputParameters {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.length_mm.is_finite() || self.length_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "length_mm",
                self.length_mm.to_string(),
                "Length must be positive",
            ));
        }
        if !(MIN_LENGTH_MM..=MAX_LENGTH_MM).contains(&self.length_mm) {
            return Err(CalcError::invalid_input(
                "length_mm",
                self.length_mm.to_string(),
                format!("Length must be between {} and {} mm", MIN_LENGTH_MM, MAX_LENGTH_MM),
            ));
        }
        self.dimensions.validate()
    }
}

/// Model-independent part of a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicsReport {
    pub material: SteelProperties,
    pub section: SectionProperties,
    pub dimensions: NormalizedDimensions,
    pub buckling: BucklingQuantities,
}

/// Complete result of one prediction.
///
/// Echoes the inputs (with normalized dimensions) next to every derived
/// quantity, so the record is self-describing once serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub profile_family: ProfileFamily,
    pub steel_grade: SteelGrade,
    pub length_mm: f64,
    pub support_condition: SupportCondition,
    pub dimensions: NormalizedDimensions,
    pub material: SteelProperties,
    pub section: SectionProperties,
    #[serde(flatten)]
    pub buckling: BucklingQuantities,
    #[serde(flatten)]
    pub displacement: LateralDisplacement,
    /// Predicted maximum load (kN)
    #[serde(rename = "max_load_kN")]
    pub max_load_kn: f64,
    /// Predicted maximum load (kgf)
    pub max_load_kg: f64,
    /// Predicted maximum load (metric tons)
    pub max_load_ton: f64,
}

impl PredictionResult {
    /// Maximum load in the requested unit
    pub fn max_load(&self, unit: ForceUnit) -> f64 {
        ForceUnit::Kilonewton.convert(self.max_load_kn, unit)
    }

    /// Ratio of the predicted load to the closed-form resistance χ·N_pl
    pub fn model_to_design_ratio(&self) -> f64 {
        self.max_load_kn / self.buckling.buckling_resistance_kn()
    }

    /// Load utilization against the Euler load, P/N_cr
    pub fn euler_utilization(&self) -> f64 {
        self.max_load_kn / self.buckling.euler_critical_load_kn
    }
}

/// Resolve the section and compute buckling quantities. No model needed.
pub fn analyze_mechanics(params: &InputParameters) -> CalcResult<MechanicsReport> {
    params.validate()?;

    let material = params.steel_grade.properties();
    let resolved = resolve_section(&params.profile_family, &params.dimensions)?;
    let buckling = calculate_buckling(
        &params.profile_family,
        &resolved.properties,
        &material,
        params.length_mm,
        &params.support_condition,
    )?;

    Ok(MechanicsReport {
        material,
        section: resolved.properties,
        dimensions: resolved.dimensions,
        buckling,
    })
}

/// Run the full prediction pipeline.
///
/// # Errors
///
/// * `ModelUnavailable` - `model` is `None`
/// * `InvalidInput` - length out of range or a bad dimension
/// * `MissingDimension` / `DegenerateSection` - from the section resolver
/// * `NumericDomain` - a derived quantity left the real domain
/// * `PredictionFailed` - the model errored or returned a non-finite value
pub fn predict(params: &InputParameters, model: Option<&dyn LoadPredictor>) -> CalcResult<PredictionResult> {
    let model = model.ok_or_else(|| CalcError::model_unavailable("no load model is loaded"))?;

    let report = analyze_mechanics(params)?;
    let features = FeatureRecord::assemble(
        &params.profile_family,
        params.steel_grade,
        params.length_mm,
        &params.support_condition,
        &report.material,
        &report.section,
        &report.dimensions,
        &report.buckling,
    )?;
    debug!(model = %model.describe(), "Invoking load model");

    let max_load_kn = model.predict(&features)?;
    if !max_load_kn.is_finite() {
        return Err(CalcError::prediction_failed(format!(
            "model returned a non-finite load ({})",
            max_load_kn
        )));
    }
    if max_load_kn < 0.0 {
        warn!(max_load_kn, "Model predicted a negative load");
    }

    let displacement = lateral_displacement(&report.buckling, max_load_kn);
    debug!(
        max_load_kn,
        lateral_displacement_mm = displacement.lateral_displacement_mm,
        "Prediction complete"
    );

    Ok(PredictionResult {
        profile_family: params.profile_family.clone(),
        steel_grade: params.steel_grade,
        length_mm: params.length_mm,
        support_condition: params.support_condition.clone(),
        dimensions: report.dimensions,
        material: report.material,
        section: report.section,
        buckling: report.buckling,
        displacement,
        max_load_kn,
        max_load_kg: max_load_kn * KN_TO_KG,
        max_load_ton: max_load_kn * KN_TO_TON,
    })
}

/// Prediction session holding an optional model handle.
///
/// Cloning shares the handle.
#[derive(Clone, Default)]
pub struct BucklingPredictor {
    model: Option<Arc<dyn LoadPredictor>>,
}

impl std::fmt::Debug for BucklingPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucklingPredictor")
            .field("model", &self.model.as_ref().map(|m| m.describe()))
            .finish()
    }
}

impl BucklingPredictor {
    /// Session without a model; only [`BucklingPredictor::analyze`] works.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: Arc<dyn LoadPredictor>) -> Self {
        BucklingPredictor { model: Some(model) }
    }

    /// Locate an artifact and load it.
    ///
    /// Returns `ModelUnavailable` when no artifact is found; loader errors
    /// are passed through.
    pub fn load(locator: &ArtifactLocator, loader: &dyn ModelLoader) -> CalcResult<Self> {
        let path = locator.locate().ok_or_else(|| {
            CalcError::model_unavailable(format!(
                "no file matching {}*{} in {} search director{}",
                locator.prefix,
                locator.suffix,
                locator.search_dirs.len(),
                if locator.search_dirs.len() == 1 { "y" } else { "ies" }
            ))
        })?;
        let model = loader.load(&path)?;
        info!(path = %path.display(), model = %model.describe(), "Loaded load model");
        Ok(Self::with_model(model))
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn predict(&self, params: &InputParameters) -> CalcResult<PredictionResult> {
        predict(params, self.model.as_deref())
    }

    pub fn analyze(&self, params: &InputParameters) -> CalcResult<MechanicsReport> {
        analyze_mechanics(params)
    }
}
