//! Inference for trained classification trees.
//!
//! [`Classifier`] walks a [`DecisionTree`](crate::repr::DecisionTree) from the
//! root to a leaf for a single point, or for every column of a feature-major
//! batch.
//!
//! # Quick Start
//!
//! ```
//! use arbor::data::Dataset;
//! use arbor::inference::Classifier;
//! use arbor::training::{Impurity, TreeBuilder};
//! use arbor::Parallelism;
//! use ndarray::array;
//!
//! let features = array![[0.0, 1.0, 2.0, 3.0]];
//! let ds = Dataset::new(features.view(), array![0, 0, 1, 1].view()).unwrap();
//! let tree = TreeBuilder::new(Impurity::Gini, 1)
//!     .build(&ds, 2, Parallelism::Sequential)
//!     .unwrap();
//!
//! let (label, probabilities) = Classifier::new(&tree).classify(&[2.5]);
//! assert_eq!(label, 1);
//! assert_eq!(probabilities, &[0.0, 1.0]);
//! ```

mod classify;

pub use classify::{argmax, BatchPrediction, Classifier};
