//! Structural Steel Grades (EN 10025)
//!
//! Nominal mechanical properties for the hot-rolled structural steel grades
//! the buckling engine supports. All grades share the same elastic modulus;
//! yield and ultimate strengths are the nominal values for t ≤ 40 mm.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::Megapascals;

/// Elastic modulus of structural steel (MPa), identical for every grade
pub const ELASTIC_MODULUS_MPA: f64 = 210_000.0;

/// Structural steel grades per EN 10025-2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteelGrade {
    /// fy = 235 MPa
    S235,
    /// fy = 275 MPa
    S275,
    /// fy = 355 MPa
    S355,
}

impl SteelGrade {
    /// All steel grade variants for UI selection
    pub const ALL: [SteelGrade; 3] = [SteelGrade::S235, SteelGrade::S275, SteelGrade::S355];

    /// Grade designation as written on drawings (e.g., "S275")
    pub fn code(&self) -> &'static str {
        match self {
            SteelGrade::S235 => "S235",
            SteelGrade::S275 => "S275",
            SteelGrade::S355 => "S355",
        }
    }

    /// Parse from common string representations ("S275", "s275", "S275JR")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.trim().to_uppercase();
        let digits: String = normalized
            .trim_start_matches('S')
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        match digits.as_str() {
            "235" => Ok(SteelGrade::S235),
            "275" => Ok(SteelGrade::S275),
            "355" => Ok(SteelGrade::S355),
            _ => Err(CalcError::invalid_input(
                "steel_grade",
                s,
                "Expected one of S235, S275, S355",
            )),
        }
    }

    /// Look up the nominal properties for this grade
    pub fn properties(&self) -> SteelProperties {
        let (fy, fu) = match self {
            SteelGrade::S235 => (235.0, 360.0),
            SteelGrade::S275 => (275.0, 430.0),
            SteelGrade::S355 => (355.0, 510.0),
        };
        SteelProperties {
            elastic_modulus_mpa: ELASTIC_MODULUS_MPA,
            yield_strength_mpa: fy,
            ultimate_strength_mpa: fu,
        }
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for SteelGrade {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SteelGrade::from_str_flexible(s)
    }
}

/// Mechanical properties of a steel grade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelProperties {
    /// Elastic modulus E (MPa)
    pub elastic_modulus_mpa: f64,
    /// Yield strength fy (MPa)
    pub yield_strength_mpa: f64,
    /// Ultimate tensile strength fu (MPa)
    pub ultimate_strength_mpa: f64,
}

impl SteelProperties {
    pub fn yield_strength(&self) -> Megapascals {
        Megapascals(self.yield_strength_mpa)
    }

    /// Yield strain εy = fy / E
    pub fn yield_strain(&self) -> f64 {
        self.yield_strength_mpa / self.elastic_modulus_mpa
    }
}
