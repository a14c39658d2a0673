//! K-way split over a categorical feature.

use ndarray::ArrayView1;

use super::{CategoricalSplitter, NodeSamples};
use crate::data::float_to_category;
use crate::training::impurity::{ClassWeights, ImpurityFn};

/// Result of a successful categorical split.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoricalSplit {
    /// Weight-proportional average score of the children.
    pub gain: f64,
    /// Number of children (one per category).
    pub n_categories: usize,
}

/// Splits a node into one child per category.
///
/// There is nothing to search: the partition is fixed by the category values.
/// The split is rejected when there are fewer than two categories or when any
/// category holds fewer than `min_leaf_size` samples.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllCategoricalSplit;

impl CategoricalSplitter for AllCategoricalSplit {
    fn split_if_better<I: ImpurityFn>(
        &self,
        impurity: &I,
        best_gain: f64,
        values: ArrayView1<f64>,
        n_categories: usize,
        node: &NodeSamples<'_>,
    ) -> Option<CategoricalSplit> {
        if n_categories < 2 {
            return None;
        }

        let mut counts = vec![0usize; n_categories];
        let mut children = vec![ClassWeights::new(node.n_classes); n_categories];
        for &idx in node.indices {
            let idx = idx as usize;
            let category = float_to_category(values[idx], n_categories)?;
            counts[category] += 1;
            children[category].add(node.labels[idx], node.weights.get(idx));
        }

        let min_leaf = node.min_leaf_size.max(1);
        if counts.iter().any(|&count| count < min_leaf) {
            return None;
        }

        let total: f64 = children.iter().map(ClassWeights::total).sum();
        if total <= 0.0 {
            return None;
        }

        let gain = children
            .iter()
            .map(|child| child.total() * impurity.score_stats(child))
            .sum::<f64>()
            / total;

        (gain > best_gain).then_some(CategoricalSplit { gain, n_categories })
    }
}
