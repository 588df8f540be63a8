//! # strut_core - Steel Column Buckling Prediction Engine
//!
//! `strut_core` predicts the maximum axial load a steel member can carry
//! before buckling. A trained load model supplies the prediction; the crate
//! surrounds it with the closed-form mechanics (section properties, Euler
//! load, EN 1993-1-1 reduction factor, plastic resistance, lateral
//! displacement) so every result is consistent and physically grounded.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: Inputs, results and errors implement Serialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Opaque Model**: The load model sits behind the [`model::LoadPredictor`] trait
//!
//! ## Quick Start
//!
//! ```rust
//! use strut_core::calculations::{predict, InputParameters};
//! use strut_core::model::ReferencePredictor;
//!
//! let params = InputParameters::default(); // IPE 200, S275, 3 m, pinned
//! let result = predict(&params, Some(&ReferencePredictor::new())).unwrap();
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("max_load_kN"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Section resolver, buckling mechanics, prediction pipeline, curves
//! - [`equations`] - Closed-form formulas
//! - [`model`] - Load model trait, feature record, artifact discovery
//! - [`materials`] - Steel grades
//! - [`units`] - Type-safe unit wrappers and display units
//! - [`project`] - Saved configuration documents
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod calculations;
pub mod equations;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod materials;
pub mod model;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze_mechanics, predict, BucklingPredictor, InputParameters, PredictionResult};
pub use errors::{CalcError, CalcResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_config, save_config, FileLock};
pub use model::LoadPredictor;
pub use project::{ColumnConfig, ConfigMetadata, DisplaySettings};
