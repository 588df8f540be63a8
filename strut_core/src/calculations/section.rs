//! # Section-Property Resolver
//!
//! Turns a profile family plus whatever raw dimensions the caller supplied
//! into cross-section properties (A, I, i) and a complete, normalized
//! dimension record.
//!
//! ## Dimension Groups
//!
//! Each family has one authoritative dimension group:
//!
//! | Family                         | Authoritative group          |
//! |--------------------------------|------------------------------|
//! | IPE, HEB, HEA, HEM, UPN, L, T  | `h`, `b`, `tw`, `tf`         |
//! | Square / circular hollow       | `D`, `t` (defaults 150 / 8)  |
//! | Custom                         | `h`, `b`, `tw`, `tf`         |
//!
//! The other group is back-filled with cosmetic defaults so that consumers
//! (tables, 3D views) always see all six fields. Back-filled values never
//! feed back into the area or inertia of the family that produced them.
//!
//! ## Example
//!
//! ```rust
//! use strut_core::calculations::section::{resolve_section, Dimensions, ProfileFamily};
//!
//! let dims = Dimensions::hollow(150.0, 8.0);
//! let resolved = resolve_section(&ProfileFamily::SquareHollow, &dims).unwrap();
//! assert_eq!(resolved.properties.area_mm2, 4544.0);
//! assert_eq!(resolved.dimensions.section_height_mm, 150.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::section::{
    bounding_rectangle_moment_of_inertia, circular_hollow_area, circular_hollow_moment_of_inertia,
    flanged_area, flanged_moment_of_inertia, radius_of_gyration, square_hollow_area,
    square_hollow_moment_of_inertia,
};
use crate::errors::{CalcError, CalcResult};

/// Default outer dimension for hollow sections when none is given (mm)
pub const DEFAULT_HOLLOW_OUTER_MM: f64 = 150.0;

/// Default wall thickness for hollow sections when none is given (mm)
pub const DEFAULT_HOLLOW_WALL_MM: f64 = 8.0;

/// Back-filled outer dimension for open sections, as a fraction of h
pub const BACKFILL_OUTER_RATIO: f64 = 0.8;

/// Back-filled wall thickness for open sections, as a multiple of tw
pub const BACKFILL_WALL_RATIO: f64 = 1.2;

/// Steel profile family.
///
/// Serialized with the labels the trained load model was fitted on
/// (`"Tubular cuadrado"` etc.). Any label outside the known set
/// deserializes to [`ProfileFamily::Custom`], which keeps the text as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProfileFamily {
    /// European I-beam, light series
    Ipe,
    /// Wide flange, heavy series
    Heb,
    /// Wide flange, light series
    Hea,
    /// Wide flange, extra heavy series
    Hem,
    /// European channel
    Upn,
    /// Square hollow section
    SquareHollow,
    /// Circular hollow section
    CircularHollow,
    /// Angle
    Angle,
    /// Tee
    Tee,
    /// Any other open shape, approximated by its bounding rectangle
    Custom(String),
}

impl ProfileFamily {
    /// The recognized profile families, for UI selection
    pub const ALL: [ProfileFamily; 9] = [
        ProfileFamily::Ipe,
        ProfileFamily::Heb,
        ProfileFamily::Hea,
        ProfileFamily::Hem,
        ProfileFamily::Upn,
        ProfileFamily::SquareHollow,
        ProfileFamily::CircularHollow,
        ProfileFamily::Angle,
        ProfileFamily::Tee,
    ];

    /// Label used in saved files and model features
    pub fn label(&self) -> &str {
        match self {
            ProfileFamily::Ipe => "IPE",
            ProfileFamily::Heb => "HEB",
            ProfileFamily::Hea => "HEA",
            ProfileFamily::Hem => "HEM",
            ProfileFamily::Upn => "UPN",
            ProfileFamily::SquareHollow => "Tubular cuadrado",
            ProfileFamily::CircularHollow => "Tubular circular",
            ProfileFamily::Angle => "L",
            ProfileFamily::Tee => "T",
            ProfileFamily::Custom(label) => label.as_str(),
        }
    }

    /// Parse from labels and common aliases. Never fails: unknown text is `Custom`.
    pub fn from_str_flexible(s: &str) -> Self {
        match s.trim().to_uppercase().replace([' ', '_'], "-").as_str() {
            "IPE" => ProfileFamily::Ipe,
            "HEB" => ProfileFamily::Heb,
            "HEA" => ProfileFamily::Hea,
            "HEM" => ProfileFamily::Hem,
            "UPN" => ProfileFamily::Upn,
            "TUBULAR-CUADRADO" | "SQUARE-HOLLOW" | "SHS" => ProfileFamily::SquareHollow,
            "TUBULAR-CIRCULAR" | "CIRCULAR-HOLLOW" | "CHS" => ProfileFamily::CircularHollow,
            "L" | "ANGLE" => ProfileFamily::Angle,
            "T" | "TEE" => ProfileFamily::Tee,
            _ => ProfileFamily::Custom(s.to_string()),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProfileFamily::Ipe => "IPE (I-beam)",
            ProfileFamily::Heb => "HEB (wide flange)",
            ProfileFamily::Hea => "HEA (wide flange)",
            ProfileFamily::Hem => "HEM (wide flange)",
            ProfileFamily::Upn => "UPN (channel)",
            ProfileFamily::SquareHollow => "Square hollow",
            ProfileFamily::CircularHollow => "Circular hollow",
            ProfileFamily::Angle => "L (angle)",
            ProfileFamily::Tee => "T (tee)",
            ProfileFamily::Custom(_) => "Custom",
        }
    }

    /// Check if the family is a hollow (tubular) section
    pub fn is_hollow(&self) -> bool {
        matches!(self, ProfileFamily::SquareHollow | ProfileFamily::CircularHollow)
    }
}

impl From<String> for ProfileFamily {
    fn from(s: String) -> Self {
        match ProfileFamily::from_str_flexible(&s) {
            ProfileFamily::Custom(_) => ProfileFamily::Custom(s),
            known => known,
        }
    }
}

impl From<ProfileFamily> for String {
    fn from(family: ProfileFamily) -> Self {
        match family {
            ProfileFamily::Custom(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for ProfileFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ProfileFamily {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ProfileFamily::from_str_flexible(s))
    }
}

/// Raw dimensions as supplied by the caller (mm). Absent and zero are
/// treated the same.
///
/// ## JSON Example
///
/// ```json
/// {
///   "section_height_mm": 200.0,
///   "flange_width_mm": 100.0,
///   "web_thickness_mm": 5.6,
///   "flange_thickness_mm": 8.5
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_height_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flange_width_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_thickness_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flange_thickness_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_dimension_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_thickness_mm: Option<f64>,
}

impl Dimensions {
    /// Open/flanged group only
    pub fn flanged(h: f64, b: f64, tw: f64, tf: f64) -> Self {
        Dimensions {
            section_height_mm: Some(h),
            flange_width_mm: Some(b),
            web_thickness_mm: Some(tw),
            flange_thickness_mm: Some(tf),
            ..Default::default()
        }
    }

    /// Hollow group only
    pub fn hollow(outer: f64, wall: f64) -> Self {
        Dimensions {
            outer_dimension_mm: Some(outer),
            wall_thickness_mm: Some(wall),
            ..Default::default()
        }
    }

    fn fields(&self) -> [(&'static str, Option<f64>); 6] {
        [
            ("section_height_mm", self.section_height_mm),
            ("flange_width_mm", self.flange_width_mm),
            ("web_thickness_mm", self.web_thickness_mm),
            ("flange_thickness_mm", self.flange_thickness_mm),
            ("outer_dimension_mm", self.outer_dimension_mm),
            ("wall_thickness_mm", self.wall_thickness_mm),
        ]
    }

    /// Reject negative or non-finite values in any supplied field.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in self.fields() {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(CalcError::invalid_input(
                        field,
                        v.to_string(),
                        "Dimension must be a finite, non-negative number",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Complete dimension record after back-fill (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDimensions {
    pub section_height_mm: f64,
    pub flange_width_mm: f64,
    pub web_thickness_mm: f64,
    pub flange_thickness_mm: f64,
    pub outer_dimension_mm: f64,
    pub wall_thickness_mm: f64,
}

/// Geometric properties of a cross-section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Cross-sectional area A (mm²)
    pub area_mm2: f64,
    /// Moment of inertia I (mm⁴)
    pub moment_of_inertia_mm4: f64,
    /// Radius of gyration i = √(I/A) (mm)
    pub radius_of_gyration_mm: f64,
}

/// Output of [`resolve_section`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSection {
    pub properties: SectionProperties,
    pub dimensions: NormalizedDimensions,
}

/// A supplied, non-zero value
fn given(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn require(family: &ProfileFamily, field: &str, value: Option<f64>) -> CalcResult<f64> {
    given(value).ok_or_else(|| CalcError::missing_dimension(family.label(), field))
}

/// Resolve section properties and normalized dimensions for a family.
///
/// # Errors
///
/// * `InvalidInput` - a supplied dimension is negative or non-finite
/// * `MissingDimension` - an open/custom family lacks h, b, tw or tf
/// * `DegenerateSection` - the geometry has no positive area or inertia
pub fn resolve_section(family: &ProfileFamily, dims: &Dimensions) -> CalcResult<ResolvedSection> {
    dims.validate()?;

    let (area, inertia, normalized) = if family.is_hollow() {
        resolve_hollow(family, dims)?
    } else {
        resolve_flanged(family, dims)?
    };

    if area <= 0.0 {
        return Err(CalcError::degenerate_section(
            family.label(),
            format!("area {:.3} mm² is not positive", area),
        ));
    }
    if inertia <= 0.0 {
        return Err(CalcError::degenerate_section(
            family.label(),
            format!("moment of inertia {:.3} mm⁴ is not positive", inertia),
        ));
    }

    let radius = radius_of_gyration(inertia, area);
    debug!(
        family = family.label(),
        area_mm2 = area,
        inertia_mm4 = inertia,
        radius_mm = radius,
        "Resolved section properties"
    );

    Ok(ResolvedSection {
        properties: SectionProperties {
            area_mm2: area,
            moment_of_inertia_mm4: inertia,
            radius_of_gyration_mm: radius,
        },
        dimensions: normalized,
    })
}

fn resolve_flanged(family: &ProfileFamily, dims: &Dimensions) -> CalcResult<(f64, f64, NormalizedDimensions)> {
    let h = require(family, "section_height_mm", dims.section_height_mm)?;
    let b = require(family, "flange_width_mm", dims.flange_width_mm)?;
    let tw = require(family, "web_thickness_mm", dims.web_thickness_mm)?;
    let tf = require(family, "flange_thickness_mm", dims.flange_thickness_mm)?;

    if h < 2.0 * tf {
        return Err(CalcError::degenerate_section(
            family.label(),
            format!("height {} mm is less than two flanges of {} mm", h, tf),
        ));
    }

    let area = flanged_area(h, b, tw, tf);
    let inertia = match family {
        ProfileFamily::Custom(_) => bounding_rectangle_moment_of_inertia(h, b),
        _ => flanged_moment_of_inertia(h, b, tw, tf),
    };

    let normalized = NormalizedDimensions {
        section_height_mm: h,
        flange_width_mm: b,
        web_thickness_mm: tw,
        flange_thickness_mm: tf,
        outer_dimension_mm: given(dims.outer_dimension_mm).unwrap_or(h * BACKFILL_OUTER_RATIO),
        wall_thickness_mm: given(dims.wall_thickness_mm).unwrap_or(tw * BACKFILL_WALL_RATIO),
    };

    Ok((area, inertia, normalized))
}

fn resolve_hollow(family: &ProfileFamily, dims: &Dimensions) -> CalcResult<(f64, f64, NormalizedDimensions)> {
    let d = given(dims.outer_dimension_mm).unwrap_or(DEFAULT_HOLLOW_OUTER_MM);
    let t = given(dims.wall_thickness_mm).unwrap_or(DEFAULT_HOLLOW_WALL_MM);

    if 2.0 * t > d {
        return Err(CalcError::degenerate_section(
            family.label(),
            format!("wall thickness {} mm exceeds half the outer dimension of {} mm", t, d),
        ));
    }

    let (area, inertia) = match family {
        ProfileFamily::SquareHollow => (square_hollow_area(d, t), square_hollow_moment_of_inertia(d, t)),
        _ => (circular_hollow_area(d, t), circular_hollow_moment_of_inertia(d, t)),
    };

    let normalized = NormalizedDimensions {
        section_height_mm: given(dims.section_height_mm).unwrap_or(d),
        flange_width_mm: given(dims.flange_width_mm).unwrap_or(d),
        web_thickness_mm: given(dims.web_thickness_mm).unwrap_or(t),
        flange_thickness_mm: given(dims.flange_thickness_mm).unwrap_or(t),
        outer_dimension_mm: d,
        wall_thickness_mm: t,
    };

    Ok((area, inertia, normalized))
}
