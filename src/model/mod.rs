//! High-level model API.
//!
//! [`DecisionTreeModel`] trains a tree from a [`Dataset`](crate::data::Dataset)
//! and a [`TreeConfig`], then predicts labels and class probabilities.
//!
//! # Example
//!
//! ```
//! use arbor::data::Dataset;
//! use arbor::model::{DecisionTreeModel, TrainError, TreeConfig};
//! use ndarray::array;
//!
//! fn fit() -> Result<DecisionTreeModel, TrainError> {
//!     let features = array![[0.0, 1.0, 2.0, 3.0]];
//!     let ds = Dataset::new(features.view(), array![0, 0, 1, 1].view())?;
//!     let config = TreeConfig::builder().min_leaf_size(1).build()?;
//!     DecisionTreeModel::train(&ds, None, config)
//! }
//!
//! let model = fit().unwrap();
//! let prediction = model.predict(array![[0.5, 2.5]].view(), 1).unwrap();
//! assert_eq!(prediction.labels.to_vec(), vec![0, 1]);
//! ```

mod config;
mod tree_model;

pub use config::{ConfigError, TreeConfig, TreeConfigBuilder};
pub use tree_model::DecisionTreeModel;

use crate::data::DatasetError;

/// Errors returned by [`DecisionTreeModel::train`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrainError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
