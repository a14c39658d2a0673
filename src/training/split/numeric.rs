//! Best binary split over a continuous feature.

use std::cmp::Ordering;

use ndarray::ArrayView1;

use super::{NodeSamples, NumericSplitter};
use crate::training::impurity::{ClassWeights, ImpurityFn};

/// Result of a successful numeric split search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericSplit {
    /// Weight-proportional average score of the two children.
    pub gain: f64,
    /// Samples with `value <= threshold` go left.
    pub threshold: f64,
}

/// Exhaustive threshold search.
///
/// # Algorithm
///
/// 1. Sort the node's samples by value (stable for ties, NaN last)
/// 2. Sweep the sorted order, moving one sample at a time from the right
///    accumulator into the left one
/// 3. At every position where the value strictly increases and both sides
///    hold at least `min_leaf_size` samples, score the cut
/// 4. Keep the first cut whose gain beats the current best
///
/// The threshold is the midpoint between the two adjacent distinct values.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestBinaryNumericSplit;

impl NumericSplitter for BestBinaryNumericSplit {
    fn split_if_better<I: ImpurityFn>(
        &self,
        impurity: &I,
        best_gain: f64,
        values: ArrayView1<f64>,
        node: &NodeSamples<'_>,
    ) -> Option<NumericSplit> {
        let n = node.len();
        let min_leaf = node.min_leaf_size.max(1);
        if n < 2 * min_leaf {
            return None;
        }

        let mut order = node.indices.to_vec();
        order.sort_by(|&a, &b| nan_last(values[a as usize], values[b as usize]));

        let mut right = ClassWeights::from_indices(&order, node.labels, node.n_classes, node.weights);
        let total = right.total();
        if total <= 0.0 {
            return None;
        }
        let mut left = ClassWeights::new(node.n_classes);

        let mut best: Option<NumericSplit> = None;
        let mut best_gain = best_gain;

        for pos in 0..n - 1 {
            let idx = order[pos] as usize;
            let weight = node.weights.get(idx);
            left.add(node.labels[idx], weight);
            right.sub(node.labels[idx], weight);

            let n_left = pos + 1;
            if n_left < min_leaf {
                continue;
            }
            if n - n_left < min_leaf {
                break;
            }

            let lo = values[idx];
            let hi = values[order[pos + 1] as usize];
            if !(lo < hi) {
                continue;
            }

            let gain = (left.total() * impurity.score_stats(&left)
                + right.total() * impurity.score_stats(&right))
                / total;

            if gain > best_gain {
                best_gain = gain;
                best = Some(NumericSplit {
                    gain,
                    threshold: midpoint(lo, hi),
                });
            }
        }

        best
    }
}

/// Total order with every NaN (of either sign) after all numbers.
///
/// Traversal routes NaN to the right child, so NaN samples must stay on the
/// right of every scored cut.
#[inline]
fn nan_last(a: f64, b: f64) -> Ordering {
    a.is_nan().cmp(&b.is_nan()).then(a.total_cmp(&b))
}

/// A value in `[lo, hi)`, preferring the midpoint.
#[inline]
fn midpoint(lo: f64, hi: f64) -> f64 {
    let mid = (lo + hi) / 2.0;
    if mid >= lo && mid < hi {
        mid
    } else {
        lo
    }
}
