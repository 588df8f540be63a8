//! # Unit Types
//!
//! Type-safe wrappers for the SI units the buckling engine works in, plus
//! the force/length/pressure conversions used when presenting results.
//!
//! ## Internal Units
//!
//! - Length: millimeters (mm)
//! - Force: kilonewtons (kN)
//! - Stress: megapascals (MPa = N/mm²)
//!
//! Force is also reported as kilograms-force and metric tons, assuming
//! standard gravity (1 kgf = 9.80665 N).
//!
//! ## Example
//!
//! ```rust
//! use strut_core::units::{Kilonewtons, KilogramsForce, Meters, Millimeters};
//!
//! let length: Meters = Millimeters(3000.0).into();
//! assert_eq!(length.0, 3.0);
//!
//! let load: KilogramsForce = Kilonewtons(10.0).into();
//! assert!((load.0 - 1019.716).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use crate::errors::CalcError;

/// kN to kilograms-force
pub const KN_TO_KG: f64 = 101.9716;
/// kN to metric tons (force)
pub const KN_TO_TON: f64 = 0.1019716;
/// kilograms-force to kN
pub const KG_TO_KN: f64 = 0.00980665;
/// metric tons (force) to kN
pub const TON_TO_KN: f64 = 9.80665;
/// kilograms to metric tons
pub const KG_TO_TON: f64 = 0.001;

/// MPa to kPa
pub const MPA_TO_KPA: f64 = 1000.0;
/// MPa to psi
pub const MPA_TO_PSI: f64 = 145.038;
/// kPa to psi
pub const KPA_TO_PSI: f64 = 0.145038;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Centimeters {
    fn from(mm: Millimeters) -> Self {
        Centimeters(mm.0 * 0.1)
    }
}

impl From<Centimeters> for Millimeters {
    fn from(cm: Centimeters) -> Self {
        Millimeters(cm.0 * 10.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

/// Force in kilograms-force (kgf)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilogramsForce(pub f64);

/// Force in metric tons (tonne-force)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricTons(pub f64);

impl From<Kilonewtons> for KilogramsForce {
    fn from(kn: Kilonewtons) -> Self {
        KilogramsForce(kn.0 * KN_TO_KG)
    }
}

impl From<KilogramsForce> for Kilonewtons {
    fn from(kg: KilogramsForce) -> Self {
        Kilonewtons(kg.0 * KG_TO_KN)
    }
}

impl From<Kilonewtons> for MetricTons {
    fn from(kn: Kilonewtons) -> Self {
        MetricTons(kn.0 * KN_TO_TON)
    }
}

impl From<MetricTons> for Kilonewtons {
    fn from(t: MetricTons) -> Self {
        Kilonewtons(t.0 * TON_TO_KN)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

/// Stress in kilopascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilopascals(pub f64);

/// Stress in pounds per square inch
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psi(pub f64);

impl From<Megapascals> for Kilopascals {
    fn from(mpa: Megapascals) -> Self {
        Kilopascals(mpa.0 * MPA_TO_KPA)
    }
}

impl From<Megapascals> for Psi {
    fn from(mpa: Megapascals) -> Self {
        Psi(mpa.0 * MPA_TO_PSI)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(Kilonewtons);
impl_arithmetic!(KilogramsForce);
impl_arithmetic!(MetricTons);
impl_arithmetic!(Megapascals);
impl_arithmetic!(Kilopascals);
impl_arithmetic!(Psi);

// ============================================================================
// Display Units (runtime-selected)
// ============================================================================

/// Force unit selectable for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForceUnit {
    #[default]
    #[serde(rename = "kN")]
    Kilonewton,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "ton")]
    Ton,
}

impl ForceUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            ForceUnit::Kilonewton => "kN",
            ForceUnit::Kilogram => "kg",
            ForceUnit::Ton => "ton",
        }
    }

    /// Factor taking a value in this unit to kN
    fn to_kn(self) -> f64 {
        match self {
            ForceUnit::Kilonewton => 1.0,
            ForceUnit::Kilogram => KG_TO_KN,
            ForceUnit::Ton => TON_TO_KN,
        }
    }

    /// Convert `value` expressed in `self` into `target`.
    ///
    /// kN pairs use the published factors directly; kg and ton are related
    /// by the exact 1/1000 ratio; anything else goes through kN.
    pub fn convert(self, value: f64, target: ForceUnit) -> f64 {
        use ForceUnit::*;
        match (self, target) {
            (a, b) if a == b => value,
            (Kilonewton, Kilogram) => value * KN_TO_KG,
            (Kilonewton, Ton) => value * KN_TO_TON,
            (Kilogram, Ton) => value * KG_TO_TON,
            (Ton, Kilogram) => value / KG_TO_TON,
            (from, Kilonewton) => value * from.to_kn(),
            (from, to) => Kilonewton.convert(value * from.to_kn(), to),
        }
    }

    /// Format a value already expressed in this unit
    pub fn format(&self, value: f64, decimals: usize) -> String {
        format_with_unit(value, self.symbol(), decimals)
    }
}

/// Length unit selectable for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "m")]
    Meter,
}

impl LengthUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Meter => "m",
        }
    }

    fn mm_per_unit(self) -> f64 {
        match self {
            LengthUnit::Millimeter => 1.0,
            LengthUnit::Centimeter => 10.0,
            LengthUnit::Meter => 1000.0,
        }
    }

    /// Convert `value` expressed in `self` into `target`
    pub fn convert(self, value: f64, target: LengthUnit) -> f64 {
        if self == target {
            return value;
        }
        value * self.mm_per_unit() / target.mm_per_unit()
    }

    pub fn format(&self, value: f64, decimals: usize) -> String {
        format_with_unit(value, self.symbol(), decimals)
    }
}

/// Pressure/stress unit selectable for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PressureUnit {
    #[default]
    #[serde(rename = "MPa")]
    Megapascal,
    #[serde(rename = "kPa")]
    Kilopascal,
    #[serde(rename = "psi")]
    Psi,
}

impl PressureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            PressureUnit::Megapascal => "MPa",
            PressureUnit::Kilopascal => "kPa",
            PressureUnit::Psi => "psi",
        }
    }

    /// Factor taking a value in this unit to MPa
    fn to_mpa(self) -> f64 {
        match self {
            PressureUnit::Megapascal => 1.0,
            PressureUnit::Kilopascal => 0.001,
            PressureUnit::Psi => 0.00689476,
        }
    }

    /// Convert `value` expressed in `self` into `target`
    pub fn convert(self, value: f64, target: PressureUnit) -> f64 {
        use PressureUnit::*;
        match (self, target) {
            (a, b) if a == b => value,
            (Megapascal, Kilopascal) => value * MPA_TO_KPA,
            (Megapascal, Psi) => value * MPA_TO_PSI,
            (Kilopascal, Psi) => value * KPA_TO_PSI,
            (Psi, Kilopascal) => value * 6.89476,
            (from, Megapascal) => value * from.to_mpa(),
            (from, to) => Megapascal.convert(value * from.to_mpa(), to),
        }
    }

    pub fn format(&self, value: f64, decimals: usize) -> String {
        format_with_unit(value, self.symbol(), decimals)
    }
}

fn format_with_unit(value: f64, symbol: &str, decimals: usize) -> String {
    format!("{:.*} {}", decimals, value, symbol)
}

impl fmt::Display for ForceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for ForceUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kn" => Ok(ForceUnit::Kilonewton),
            "kg" | "kgf" => Ok(ForceUnit::Kilogram),
            "ton" | "t" => Ok(ForceUnit::Ton),
            _ => Err(CalcError::invalid_input("force_unit", s, "Expected kN, kg or ton")),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" => Ok(LengthUnit::Millimeter),
            "cm" => Ok(LengthUnit::Centimeter),
            "m" => Ok(LengthUnit::Meter),
            _ => Err(CalcError::invalid_input("length_unit", s, "Expected mm, cm or m")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_mm_to_m() {
        let m: Meters = Millimeters(2500.0).into();
        assert_eq!(m.0, 2.5);
        let back: Millimeters = m.into();
        assert_eq!(back.0, 2500.0);
    }

    #[test]
    fn test_kn_to_kg_and_back() {
        let kg: KilogramsForce = Kilonewtons(100.0).into();
        assert!(approx_eq(kg.0, 10197.16));
        // Published factors are rounded, so the round trip is close but not exact
        let kn: Kilonewtons = kg.into();
        assert!((kn.0 - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_force_unit_conversion() {
        assert!(approx_eq(ForceUnit::Kilonewton.convert(1.0, ForceUnit::Ton), 0.1019716));
        assert!(approx_eq(ForceUnit::Kilogram.convert(2500.0, ForceUnit::Ton), 2.5));
        assert!(approx_eq(ForceUnit::Ton.convert(1.0, ForceUnit::Kilonewton), 9.80665));
        assert!(approx_eq(ForceUnit::Ton.convert(3.0, ForceUnit::Kilogram), 3000.0));
        assert_eq!(ForceUnit::Kilogram.convert(42.0, ForceUnit::Kilogram), 42.0);
    }

    #[test]
    fn test_length_unit_conversion() {
        assert!(approx_eq(LengthUnit::Millimeter.convert(3000.0, LengthUnit::Meter), 3.0));
        assert!(approx_eq(LengthUnit::Centimeter.convert(12.0, LengthUnit::Millimeter), 120.0));
        assert!(approx_eq(LengthUnit::Meter.convert(1.5, LengthUnit::Centimeter), 150.0));
    }

    #[test]
    fn test_pressure_unit_conversion() {
        assert!(approx_eq(PressureUnit::Megapascal.convert(235.0, PressureUnit::Kilopascal), 235_000.0));
        assert!(approx_eq(PressureUnit::Megapascal.convert(1.0, PressureUnit::Psi), 145.038));
        assert!(approx_eq(PressureUnit::Kilopascal.convert(1000.0, PressureUnit::Megapascal), 1.0));
    }

    #[test]
    fn test_format() {
        assert_eq!(ForceUnit::Kilonewton.format(773.0, 2), "773.00 kN");
        assert_eq!(LengthUnit::Meter.format(3.0, 1), "3.0 m");
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("KN".parse::<ForceUnit>().unwrap(), ForceUnit::Kilonewton);
        assert_eq!("cm".parse::<LengthUnit>().unwrap(), LengthUnit::Centimeter);
        assert!("lbf".parse::<ForceUnit>().is_err());
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&Millimeters(12.5)).unwrap(), "12.5");
        assert_eq!(serde_json::to_string(&ForceUnit::Ton).unwrap(), "\"ton\"");
    }
}
