//! Split search strategies.
//!
//! A strategy inspects one feature column over the samples of a node and
//! reports a split only when it is strictly better than the incoming best
//! gain:
//!
//! - [`BestBinaryNumericSplit`]: best threshold over a continuous feature
//! - [`AllCategoricalSplit`]: one child per category of a categorical feature
//!
//! Strategies are infallible. A column that cannot be split (constant
//! values, too few samples per side) yields `None`.

mod categorical;
mod numeric;

use ndarray::ArrayView1;

pub use categorical::{AllCategoricalSplit, CategoricalSplit};
pub use numeric::{BestBinaryNumericSplit, NumericSplit};

use super::impurity::ImpurityFn;
use crate::data::WeightsView;
use crate::repr::SplitDescriptor;

// =============================================================================
// Node samples
// =============================================================================

/// The samples of one node as seen by a split strategy.
///
/// `indices` selects the node's samples; `labels` and `weights` are indexed
/// by sample id (not by position in `indices`).
#[derive(Clone, Copy, Debug)]
pub struct NodeSamples<'a> {
    pub indices: &'a [u32],
    pub labels: ArrayView1<'a, usize>,
    pub weights: WeightsView<'a>,
    pub n_classes: usize,
    pub min_leaf_size: usize,
}

impl NodeSamples<'_> {
    /// Number of samples in the node.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

// =============================================================================
// Strategy traits
// =============================================================================

/// Split strategy for continuous features.
pub trait NumericSplitter: Send + Sync {
    /// Search `values` (indexed by sample id) for a threshold whose gain
    /// exceeds `best_gain`.
    fn split_if_better<I: ImpurityFn>(
        &self,
        impurity: &I,
        best_gain: f64,
        values: ArrayView1<f64>,
        node: &NodeSamples<'_>,
    ) -> Option<NumericSplit>;
}

/// Split strategy for categorical features with `n_categories` categories.
pub trait CategoricalSplitter: Send + Sync {
    fn split_if_better<I: ImpurityFn>(
        &self,
        impurity: &I,
        best_gain: f64,
        values: ArrayView1<f64>,
        n_categories: usize,
        node: &NodeSamples<'_>,
    ) -> Option<CategoricalSplit>;
}

// =============================================================================
// SplitCandidate
// =============================================================================

/// The winning split of a node across all features.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitCandidate {
    /// Weight-proportional average score of the children.
    pub gain: f64,
    /// Decision rule to store in the node.
    pub split: SplitDescriptor,
}

impl SplitCandidate {
    pub fn numeric(feature: usize, split: NumericSplit) -> Self {
        Self {
            gain: split.gain,
            split: SplitDescriptor::Numeric {
                feature,
                threshold: split.threshold,
            },
        }
    }

    pub fn categorical(feature: usize, split: CategoricalSplit) -> Self {
        Self {
            gain: split.gain,
            split: SplitDescriptor::Categorical {
                feature,
                n_categories: split.n_categories,
            },
        }
    }

    /// Number of children the split creates.
    #[inline]
    pub fn n_children(&self) -> usize {
        self.split.n_children()
    }
}
