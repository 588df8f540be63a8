//! # Structural Mechanics Equations
//!
//! This module contains the closed-form equations the buckling engine uses.
//! Having equations in one place enables:
//! - Easy verification against code references (EN 1993-1-1)
//! - Documentation of units and assumptions
//! - Consistent implementation between the calculators and the curve samplers
//!
//! ## Modules
//!
//! - [`section`] - Cross-section properties (A, I, i)
//! - [`buckling`] - Euler load, reduction factor, plastic resistance, amplification
//!
//! ## Conventions
//!
//! - **Lengths**: millimeters
//! - **Stresses**: MPa (N/mm²)
//! - **Compression**: positive
//!
//! ## References
//!
//! - EN 1993-1-1:2005: Design of steel structures, General rules
//! - Roark's Formulas for Stress and Strain, 8th Edition

pub mod buckling;
pub mod section;

// Re-export commonly used items
pub use buckling::{
    amplification_factor,
    euler_critical_load_n,
    euler_reference_slenderness,
    phi,
    plastic_resistance_kn,
    reduction_factor,
    INITIAL_BOW_DIVISOR,
    MAX_AMPLIFICATION,
    PLATEAU_SLENDERNESS,
    STOCKY_AMPLIFICATION,
};

pub use section::{
    bounding_rectangle_moment_of_inertia,
    circular_hollow_area,
    circular_hollow_moment_of_inertia,
    flanged_area,
    flanged_moment_of_inertia,
    radius_of_gyration,
    square_hollow_area,
    square_hollow_moment_of_inertia,
};
