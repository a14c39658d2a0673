//! arbor: decision tree classification for mixed numeric and categorical data.
//!
//! Trees are grown by recursive partitioning. At every node each feature is
//! offered to its split strategy (a best-threshold binary split for numeric
//! features, a one-child-per-category split for categorical ones), and the
//! split with the highest impurity gain wins if it beats leaving the node as
//! a leaf.
//!
//! # Key Types
//!
//! - [`data::Dataset`]: feature matrix, labels and optional weights
//! - [`training::TreeBuilder`]: recursive tree construction
//! - [`repr::DecisionTree`] / [`repr::TreeNode`]: the trained tree
//! - [`inference::Classifier`]: single-point and batch classification
//! - [`model::DecisionTreeModel`]: train/predict facade driven by
//!   [`model::TreeConfig`]
//!
//! # Storage Layout
//!
//! Feature matrices are feature-major: `[n_features, n_samples]`. Batch
//! probabilities are `[n_classes, n_points]`.

pub mod data;
pub mod inference;
pub mod model;
pub mod repr;
pub mod testing;
pub mod training;
pub mod utils;

pub use data::{Dataset, DatasetBuilder, DatasetError, DatasetSchema, FeatureMeta, FeatureType, WeightsView};
pub use inference::{BatchPrediction, Classifier};
pub use model::{ConfigError, DecisionTreeModel, TrainError, TreeConfig};
pub use repr::{DecisionTree, SplitDescriptor, TreeNode};
pub use training::{Impurity, TreeBuilder, Verbosity};
pub use utils::{run_with_threads, Parallelism};
