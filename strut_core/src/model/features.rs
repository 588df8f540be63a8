//! Feature record passed to the load model.
//!
//! The model was fitted on 23 named columns in a fixed order. The record
//! keeps that order and the names exactly; categorical columns carry the
//! text labels of the profile family, grade, support and buckling curve.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::calculations::buckling::{BucklingQuantities, SupportCondition};
use crate::calculations::section::{NormalizedDimensions, ProfileFamily, SectionProperties};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{SteelGrade, SteelProperties};

/// Kind of a schema column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Category,
    Number,
}

/// Column names and kinds, in model order
pub const FEATURE_SCHEMA: [(&str, FeatureKind); 23] = [
    ("tipo_perfil", FeatureKind::Category),
    ("tipo_acero", FeatureKind::Category),
    ("longitud_mm", FeatureKind::Number),
    ("condicion_apoyo", FeatureKind::Category),
    ("factor_longitud_efectiva", FeatureKind::Number),
    ("longitud_pandeo_mm", FeatureKind::Number),
    ("area_mm2", FeatureKind::Number),
    ("inercia_mm4", FeatureKind::Number),
    ("radio_giro_mm", FeatureKind::Number),
    ("esbeltez_mecanica", FeatureKind::Number),
    ("modulo_elasticidad_MPa", FeatureKind::Number),
    ("limite_elastico_MPa", FeatureKind::Number),
    ("tension_rotura_MPa", FeatureKind::Number),
    ("excentricidad_inicial_mm", FeatureKind::Number),
    ("curva_pandeo", FeatureKind::Category),
    ("coef_imperfeccion", FeatureKind::Number),
    ("esbeltez_relativa", FeatureKind::Number),
    ("altura_perfil_mm", FeatureKind::Number),
    ("ancho_alas_mm", FeatureKind::Number),
    ("espesor_alma_mm", FeatureKind::Number),
    ("espesor_alas_mm", FeatureKind::Number),
    ("dimension_exterior_mm", FeatureKind::Number),
    ("espesor_mm", FeatureKind::Number),
];

/// One feature value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Category(String),
    Number(f64),
}

impl FeatureValue {
    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureValue::Category(_) => FeatureKind::Category,
            FeatureValue::Number(_) => FeatureKind::Number,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(v) => Some(*v),
            FeatureValue::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            FeatureValue::Category(s) => Some(s),
            FeatureValue::Number(_) => None,
        }
    }
}

/// Ordered, schema-checked feature record
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: Vec<FeatureValue>,
}

impl FeatureRecord {
    /// Build a record from values in schema order.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - wrong column count or a kind mismatch
    /// * `NumericDomain` - a numeric column is NaN or infinite
    pub fn from_values(values: Vec<FeatureValue>) -> CalcResult<Self> {
        if values.len() != FEATURE_SCHEMA.len() {
            return Err(CalcError::invalid_input(
                "features",
                values.len().to_string(),
                format!("Expected {} features", FEATURE_SCHEMA.len()),
            ));
        }
        for ((name, kind), value) in FEATURE_SCHEMA.iter().zip(&values) {
            if value.kind() != *kind {
                return Err(CalcError::invalid_input(
                    *name,
                    format!("{:?}", value),
                    format!("Expected a {:?} feature", kind),
                ));
            }
            if let FeatureValue::Number(v) = value {
                if !v.is_finite() {
                    return Err(CalcError::numeric_domain(*name, format!("non-finite feature value {}", v)));
                }
            }
        }
        Ok(FeatureRecord { values })
    }

    /// Assemble the record from the pipeline's intermediate results.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        family: &ProfileFamily,
        grade: SteelGrade,
        length_mm: f64,
        support: &SupportCondition,
        material: &SteelProperties,
        section: &SectionProperties,
        dimensions: &NormalizedDimensions,
        buckling: &BucklingQuantities,
    ) -> CalcResult<Self> {
        use FeatureValue::{Category, Number};

        Self::from_values(vec![
            Category(family.label().to_string()),
            Category(grade.code().to_string()),
            Number(length_mm),
            Category(support.label().to_string()),
            Number(buckling.effective_length_factor),
            Number(buckling.buckling_length_mm),
            Number(section.area_mm2),
            Number(section.moment_of_inertia_mm4),
            Number(section.radius_of_gyration_mm),
            Number(buckling.mechanical_slenderness),
            Number(material.elastic_modulus_mpa),
            Number(material.yield_strength_mpa),
            Number(material.ultimate_strength_mpa),
            Number(buckling.initial_eccentricity_mm),
            Category(buckling.buckling_curve.label().to_string()),
            Number(buckling.imperfection_coefficient),
            Number(buckling.relative_slenderness),
            Number(dimensions.section_height_mm),
            Number(dimensions.flange_width_mm),
            Number(dimensions.web_thickness_mm),
            Number(dimensions.flange_thickness_mm),
            Number(dimensions.outer_dimension_mm),
            Number(dimensions.wall_thickness_mm),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        FEATURE_SCHEMA
            .iter()
            .position(|(n, _)| *n == name)
            .map(|idx| &self.values[idx])
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FeatureValue::as_number)
    }

    pub fn category(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FeatureValue::as_category)
    }

    /// `(name, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FeatureValue)> {
        FEATURE_SCHEMA.iter().map(|(name, _)| *name).zip(self.values.iter())
    }

    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// Serialized as a JSON object in schema order
impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
