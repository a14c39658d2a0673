//! Decision tree induction.
//!
//! # Overview
//!
//! - [`impurity`]: Gini and Information metrics ([`ImpurityFn`], [`Impurity`])
//! - [`split`]: per-feature split strategies
//! - [`partition`]: in-place regrouping of sample indices into child ranges
//! - [`TreeBuilder`]: the recursive build
//! - [`metrics`]: accuracy
//! - [`TrainingLogger`] / [`Verbosity`]: progress reporting through `tracing`

pub mod builder;
pub mod impurity;
pub mod logger;
pub mod metrics;
pub mod partition;
pub mod split;

pub use builder::TreeBuilder;
pub use impurity::{ClassWeights, GiniGain, Impurity, ImpurityFn, InformationGain};
pub use logger::{TrainingLogger, Verbosity};
pub use metrics::{accuracy, weighted_accuracy};
pub use partition::RowPartitioner;
pub use split::{
    AllCategoricalSplit, BestBinaryNumericSplit, CategoricalSplit, CategoricalSplitter, NodeSamples,
    NumericSplit, NumericSplitter, SplitCandidate,
};
