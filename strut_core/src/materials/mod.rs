//! # Materials Database
//!
//! Material definitions for the buckling engine. Only structural steel is
//! supported; properties are a static lookup keyed by grade.
//!
//! ## Example
//!
//! ```rust
//! use strut_core::materials::SteelGrade;
//!
//! let props = SteelGrade::S355.properties();
//! println!("fy = {} MPa, E = {} MPa", props.yield_strength_mpa, props.elastic_modulus_mpa);
//! ```

pub mod steel;

pub use steel::{SteelGrade, SteelProperties, ELASTIC_MODULUS_MPA};
