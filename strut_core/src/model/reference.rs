//! Closed-form stand-in for a trained load model.
//!
//! Predicts the EN 1993-1-1 design buckling resistance χ·A·fy from the
//! features the trained model receives. Used by the command line when no
//! artifact loader is available, and as a deterministic model in tests.

use crate::equations::{plastic_resistance_kn, reduction_factor};
use crate::errors::{CalcError, CalcResult};
use crate::model::{FeatureRecord, LoadPredictor};

/// χ·N_pl predictor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePredictor {
    /// Multiplier on the closed-form resistance (1.0 = χ·N_pl)
    pub scale: f64,
}

impl Default for ReferencePredictor {
    fn default() -> Self {
        ReferencePredictor { scale: 1.0 }
    }
}

impl ReferencePredictor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scale(scale: f64) -> Self {
        ReferencePredictor { scale }
    }
}

fn required(features: &FeatureRecord, name: &str) -> CalcResult<f64> {
    features
        .number(name)
        .ok_or_else(|| CalcError::prediction_failed(format!("feature '{}' missing or not numeric", name)))
}

impl LoadPredictor for ReferencePredictor {
    fn predict(&self, features: &FeatureRecord) -> CalcResult<f64> {
        let alpha = required(features, "coef_imperfeccion")?;
        let relative_slenderness = required(features, "esbeltez_relativa")?;
        let area = required(features, "area_mm2")?;
        let fy = required(features, "limite_elastico_MPa")?;

        let chi = reduction_factor(alpha, relative_slenderness)?;
        Ok(self.scale * chi * plastic_resistance_kn(area, fy))
    }

    fn describe(&self) -> String {
        format!("closed-form reference (scale {})", self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::buckling::{calculate_buckling, SupportCondition};
    use crate::calculations::section::{resolve_section, Dimensions, ProfileFamily};
    use crate::materials::SteelGrade;

    fn record(length_mm: f64) -> (FeatureRecord, f64) {
        let family = ProfileFamily::SquareHollow;
        let grade = SteelGrade::S235;
        let material = grade.properties();
        let section = resolve_section(&family, &Dimensions::hollow(150.0, 8.0)).unwrap();
        let q = calculate_buckling(&family, &section.properties, &material, length_mm, &SupportCondition::PinnedPinned)
            .unwrap();
        let features = FeatureRecord::assemble(
            &family,
            grade,
            length_mm,
            &SupportCondition::PinnedPinned,
            &material,
            &section.properties,
            &section.dimensions,
            &q,
        )
        .unwrap();
        (features, q.buckling_resistance_kn())
    }

    #[test]
    fn test_matches_closed_form_resistance() {
        let (features, expected) = record(5000.0);
        let predicted = ReferencePredictor::new().predict(&features).unwrap();
        assert!((predicted - expected).abs() < 1e-9);
    }

    #[test]
    fn test_stocky_member_reaches_squash_load() {
        // 150 × 8 SHS in S235: N_pl = 4544 × 235 / 1000
        let (features, _) = record(200.0);
        let predicted = ReferencePredictor::new().predict(&features).unwrap();
        assert!((predicted - 1067.84).abs() < 1e-6);
    }

    #[test]
    fn test_scale() {
        let (features, expected) = record(3000.0);
        let predicted = ReferencePredictor::with_scale(0.5).predict(&features).unwrap();
        assert!((predicted - 0.5 * expected).abs() < 1e-9);
    }
}
