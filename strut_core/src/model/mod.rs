//! # Load Model Seam
//!
//! The maximum load comes from a trained regression model the engine treats
//! as a black box: given a [`FeatureRecord`], return a scalar load in kN.
//!
//! - [`features`] - Fixed-schema feature record handed to the model
//! - [`locator`] - Finds a model artifact on disk by naming convention
//! - [`reference`] - Closed-form stand-in predictor (χ·N_pl)
//!
//! How an artifact is deserialized is left to a [`ModelLoader`]
//! implementation supplied by the embedding application.

pub mod features;
pub mod locator;
pub mod reference;

use std::path::Path;
use std::sync::Arc;

use crate::errors::CalcResult;

pub use features::{FeatureKind, FeatureRecord, FeatureValue, FEATURE_SCHEMA};
pub use locator::{ArtifactLocator, DEFAULT_ARTIFACT_PREFIX, DEFAULT_ARTIFACT_SUFFIX};
pub use reference::ReferencePredictor;

/// A loaded load model.
///
/// Implementations must be read-only after construction; one handle is
/// shared across threads behind an `Arc`.
pub trait LoadPredictor: Send + Sync {
    /// Predict the maximum axial load (kN) for one feature record.
    fn predict(&self, features: &FeatureRecord) -> CalcResult<f64>;

    /// Short human-readable description, used in logs.
    fn describe(&self) -> String {
        "load model".to_string()
    }
}

/// Turns a located artifact into a predictor handle.
pub trait ModelLoader {
    fn load(&self, path: &Path) -> CalcResult<Arc<dyn LoadPredictor>>;
}
