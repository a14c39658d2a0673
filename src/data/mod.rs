//! Training data containers.
//!
//! # Overview
//!
//! - [`Dataset`]: feature matrix, class labels and optional weights
//! - [`DatasetSchema`] / [`FeatureMeta`] / [`FeatureType`]: the per-dimension
//!   type table (numeric vs categorical with K categories)
//! - [`WeightsView`]: optional per-sample weights, reading as ones when absent
//! - [`DatasetError`]: precondition violations
//!
//! # Storage Layout
//!
//! Features are stored in **feature-major** layout: `[n_features, n_samples]`.
//! Categorical values are dense indices `0..K` stored as `f64`.

mod dataset;
mod error;
mod schema;
mod views;

pub use dataset::{Dataset, DatasetBuilder};
pub use error::DatasetError;
pub use schema::{float_to_category, DatasetSchema, FeatureMeta, FeatureType};
pub use views::WeightsView;
