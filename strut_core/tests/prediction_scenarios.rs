use std::sync::Arc;

use strut_core::calculations::buckling::SupportCondition;
use strut_core::calculations::section::{Dimensions, ProfileFamily};
use strut_core::equations::euler_reference_slenderness;
use strut_core::materials::SteelGrade;
use strut_core::model::{FeatureRecord, LoadPredictor, ReferencePredictor};
use strut_core::units::KG_TO_KN;
use strut_core::{analyze_mechanics, predict, BucklingPredictor, CalcResult, InputParameters};

/// Stand-in for a trained model: a fixed fraction of the squash load
struct SquashFraction(f64);

impl LoadPredictor for SquashFraction {
    fn predict(&self, features: &FeatureRecord) -> CalcResult<f64> {
        let area = features.number("area_mm2").unwrap_or(0.0);
        let fy = features.number("limite_elastico_MPa").unwrap_or(0.0);
        Ok(self.0 * area * fy / 1000.0)
    }
}

fn ipe200(length_mm: f64, support: SupportCondition) -> InputParameters {
    InputParameters {
        profile_family: ProfileFamily::Ipe,
        steel_grade: SteelGrade::S275,
        length_mm,
        support_condition: support,
        dimensions: Dimensions::flanged(200.0, 100.0, 5.6, 8.5),
    }
}

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

#[test]
fn ipe200_s275_pinned_three_meters() {
    let model = ReferencePredictor::new();
    let result = predict(&ipe200(3000.0, SupportCondition::PinnedPinned), Some(&model)).unwrap();

    assert!(approx_eq(result.section.area_mm2, 2724.8, 1e-9));
    assert!(approx_eq(result.section.radius_of_gyration_mm, 82.3001, 1e-3));
    assert_eq!(result.buckling.effective_length_factor, 1.0);
    assert_eq!(result.buckling.buckling_length_mm, 3000.0);
    assert!(approx_eq(result.buckling.relative_slenderness, 0.41988, 1e-4));
    assert!(approx_eq(result.buckling.reduction_factor, 0.91811, 1e-4));
    assert!(approx_eq(result.buckling.plastic_resistance_kn, 749.32, 1e-9));
    assert!(approx_eq(result.buckling.euler_critical_load_kn, 4250.22, 0.01));
    assert_eq!(result.buckling.initial_eccentricity_mm, 6.0);
    assert!(approx_eq(result.max_load_kn, 687.956, 1e-3));

    // Amplified displacement: e₀ / (1 − P/N_cr)
    let expected = 6.0 / (1.0 - result.max_load_kn / result.buckling.euler_critical_load_kn);
    assert!(approx_eq(result.displacement.lateral_displacement_mm, expected, 1e-9));
    assert!(!result.displacement.displacement_capped);
}

#[test]
fn square_hollow_section_defaults() {
    let params = InputParameters {
        profile_family: ProfileFamily::SquareHollow,
        steel_grade: SteelGrade::S355,
        length_mm: 2000.0,
        support_condition: SupportCondition::FixedFixed,
        dimensions: Dimensions::default(),
    };
    let report = analyze_mechanics(&params).unwrap();
    assert_eq!(report.section.area_mm2, 4544.0);
    assert_eq!(report.dimensions.outer_dimension_mm, 150.0);
    assert_eq!(report.dimensions.wall_thickness_mm, 8.0);
    assert_eq!(report.dimensions.section_height_mm, 150.0);
    assert_eq!(report.buckling.buckling_curve.label(), "a");
}

#[test]
fn prediction_is_idempotent() {
    let session = BucklingPredictor::with_model(Arc::new(SquashFraction(0.8)));
    let params = ipe200(4500.0, SupportCondition::FixedPinned);
    let first = session.predict(&params).unwrap();
    let second = session.predict(&params).unwrap();
    assert_eq!(first, second);
}

#[test]
fn euler_load_strictly_decreases_with_length() {
    for support in SupportCondition::ALL {
        let mut previous = f64::INFINITY;
        for length in [500.0, 1500.0, 3000.0, 6000.0, 12_000.0] {
            let report = analyze_mechanics(&ipe200(length, support.clone())).unwrap();
            assert!(report.buckling.euler_critical_load_kn < previous);
            previous = report.buckling.euler_critical_load_kn;
        }
    }
}

#[test]
fn kilogram_load_round_trips_to_kilonewtons() {
    let model = SquashFraction(0.65);
    let result = predict(&ipe200(2500.0, SupportCondition::PinnedPinned), Some(&model)).unwrap();
    let back = result.max_load_kg * KG_TO_KN;
    assert!(((back - result.max_load_kn) / result.max_load_kn).abs() < 1e-6);
}

#[test]
fn reduction_factor_is_one_at_boundary_slenderness() {
    // λ̄ = 0.2 exactly when L = 0.2 · λ₁ · i
    let report = analyze_mechanics(&ipe200(3000.0, SupportCondition::PinnedPinned)).unwrap();
    let lambda_1 = euler_reference_slenderness(210_000.0, 275.0);
    let length = 0.2 * lambda_1 * report.section.radius_of_gyration_mm;

    let at_boundary = analyze_mechanics(&ipe200(length, SupportCondition::PinnedPinned)).unwrap();
    assert!(approx_eq(at_boundary.buckling.relative_slenderness, 0.2, 1e-12));
    assert!(approx_eq(at_boundary.buckling.reduction_factor, 1.0, 1e-9));
}

#[test]
fn missing_section_height_is_reported() {
    let mut params = ipe200(3000.0, SupportCondition::PinnedPinned);
    params.dimensions.section_height_mm = None;
    let err = predict(&params, Some(&ReferencePredictor::new())).unwrap_err();
    assert_eq!(err.error_code(), "MISSING_DIMENSION");
    assert!(err.to_string().contains("section_height_mm"));
}

#[test]
fn mechanics_available_without_a_model() {
    let session = BucklingPredictor::new();
    let params = ipe200(3000.0, SupportCondition::FixedFree);
    assert_eq!(session.predict(&params).unwrap_err().error_code(), "MODEL_UNAVAILABLE");

    let report = session.analyze(&params).unwrap();
    assert_eq!(report.buckling.buckling_length_mm, 6000.0);
}

#[test]
fn displacement_capped_when_model_exceeds_euler_load() {
    // Slender member, model predicts the full squash load (> N_cr)
    let model = SquashFraction(1.0);
    let result = predict(&ipe200(12_000.0, SupportCondition::FixedFree), Some(&model)).unwrap();
    assert!(result.max_load_kn > result.buckling.euler_critical_load_kn);
    assert!(result.displacement.displacement_capped);
    assert!(result.displacement.lateral_displacement_mm.is_finite());
    assert!(result.displacement.lateral_displacement_mm > 0.0);
}

#[test]
fn unknown_labels_from_json() {
    let json = r#"{
        "profile_family": "W",
        "steel_grade": "S235",
        "length_mm": 3000.0,
        "support_condition": "Apoyo elástico",
        "section_height_mm": 200.0,
        "flange_width_mm": 100.0,
        "web_thickness_mm": 5.6,
        "flange_thickness_mm": 8.5
    }"#;
    let params: InputParameters = serde_json::from_str(json).unwrap();
    assert_eq!(params.profile_family, ProfileFamily::Custom("W".to_string()));
    assert_eq!(params.support_condition, SupportCondition::Unspecified("Apoyo elástico".to_string()));

    let report = analyze_mechanics(&params).unwrap();
    assert_eq!(report.buckling.effective_length_factor, 1.0);
    assert_eq!(report.buckling.buckling_curve.label(), "c");
    // Bounding-rectangle inertia for unrecognized families
    assert!(approx_eq(report.section.moment_of_inertia_mm4, 100.0 * 200.0_f64.powi(3) / 12.0, 1e-3));

    // The caller's labels survive into the result record
    let result = predict(&params, Some(&ReferencePredictor::new())).unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["profile_family"], "W");
    assert_eq!(value["support_condition"], "Apoyo elástico");
}

#[test]
fn errors_serialize_with_type_tag() {
    let err = predict(&ipe200(3000.0, SupportCondition::PinnedPinned), None).unwrap_err();
    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(value["type"], "ModelUnavailable");
}
