//! # Column Calculations
//!
//! The buckling prediction pipeline, split by stage. Each stage follows the
//! same pattern:
//!
//! - Plain input types (JSON-serializable)
//! - Plain result types (JSON-serializable)
//! - A pure function returning `CalcResult<_>`
//!
//! ## Stages
//!
//! - [`section`] - Section-property resolver (A, I, i, normalized dimensions)
//! - [`buckling`] - Buckling mechanics (k, λ̄, χ, N_cr, N_pl, e₀, displacement)
//! - [`prediction`] - Input parameters, model invocation, assembled result
//! - [`curves`] - Chart series derived from a result

pub mod buckling;
pub mod curves;
pub mod prediction;
pub mod section;

// Re-export commonly used types
pub use buckling::{BucklingCurve, BucklingQuantities, LateralDisplacement, SupportCondition};
pub use prediction::{analyze_mechanics, predict, BucklingPredictor, InputParameters, MechanicsReport, PredictionResult};
pub use section::{Dimensions, NormalizedDimensions, ProfileFamily, ResolvedSection, SectionProperties};
