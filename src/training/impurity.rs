//! Impurity metrics for classification splits.
//!
//! Scores are expressed as *gains*: larger is purer, and a pure distribution
//! scores exactly 0. Gini returns `-(1 - Σ p²)`, Information returns
//! `Σ p·log2(p)`.
//!
//! Both metrics read a [`ClassWeights`] accumulator, so the weighted and the
//! unweighted case share one code path: an unweighted sample contributes 1.0.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::data::WeightsView;

// =============================================================================
// Class weight accumulator
// =============================================================================

/// Per-class weight sums of a set of samples.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassWeights {
    sums: Vec<f64>,
    total: f64,
}

impl ClassWeights {
    /// Empty accumulator over `n_classes` classes.
    pub fn new(n_classes: usize) -> Self {
        Self {
            sums: vec![0.0; n_classes],
            total: 0.0,
        }
    }

    /// Accumulate a full label vector.
    pub fn from_labels(labels: ArrayView1<usize>, n_classes: usize, weights: WeightsView<'_>) -> Self {
        let mut stats = Self::new(n_classes);
        for (i, &label) in labels.iter().enumerate() {
            stats.add(label, weights.get(i));
        }
        stats
    }

    /// Accumulate the samples named by `indices`.
    pub fn from_indices(
        indices: &[u32],
        labels: ArrayView1<usize>,
        n_classes: usize,
        weights: WeightsView<'_>,
    ) -> Self {
        let mut stats = Self::new(n_classes);
        for &idx in indices {
            let idx = idx as usize;
            stats.add(labels[idx], weights.get(idx));
        }
        stats
    }

    #[inline]
    pub fn add(&mut self, label: usize, weight: f64) {
        self.sums[label] += weight;
        self.total += weight;
    }

    #[inline]
    pub fn sub(&mut self, label: usize, weight: f64) {
        self.sums[label] -= weight;
        self.total -= weight;
    }

    /// Weight sum per class.
    #[inline]
    pub fn sums(&self) -> &[f64] {
        &self.sums
    }

    /// Total weight.
    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.sums.len()
    }

    /// Normalized class distribution.
    ///
    /// Falls back to the uniform distribution when the total weight is zero.
    pub fn distribution(&self) -> Vec<f64> {
        let n_classes = self.sums.len();
        if self.total > 0.0 {
            self.sums.iter().map(|&w| w / self.total).collect()
        } else {
            vec![1.0 / n_classes as f64; n_classes]
        }
    }
}

// =============================================================================
// ImpurityFn Trait
// =============================================================================

/// A class-distribution impurity metric.
pub trait ImpurityFn: Send + Sync {
    /// Score of a class-weight distribution. Pure distributions score 0.
    ///
    /// Returns 0 when `total` is zero.
    fn score(&self, class_weights: &[f64], total: f64) -> f64;

    /// Metric name.
    fn name(&self) -> &'static str;

    /// Score an accumulated distribution.
    #[inline]
    fn score_stats(&self, stats: &ClassWeights) -> f64 {
        self.score(stats.sums(), stats.total())
    }

    /// Score a label vector with optional weights.
    ///
    /// `labels` may be empty; `weights` is either `None` or aligned with
    /// `labels`.
    fn evaluate(&self, labels: ArrayView1<usize>, n_classes: usize, weights: WeightsView<'_>) -> f64 {
        self.score_stats(&ClassWeights::from_labels(labels, n_classes, weights))
    }
}

// =============================================================================
// Gini
// =============================================================================

/// Gini gain: `-(1 - Σ p_c²)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GiniGain;

impl ImpurityFn for GiniGain {
    #[inline]
    fn score(&self, class_weights: &[f64], total: f64) -> f64 {
        if total <= 0.0 {
            return 0.0;
        }
        let sum_sq: f64 = class_weights
            .iter()
            .map(|&w| {
                let p = w / total;
                p * p
            })
            .sum();
        sum_sq - 1.0
    }

    fn name(&self) -> &'static str {
        "gini"
    }
}

// =============================================================================
// Information
// =============================================================================

/// Information gain: `Σ p_c · log2(p_c)`, with `0 · log2(0) = 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InformationGain;

impl ImpurityFn for InformationGain {
    #[inline]
    fn score(&self, class_weights: &[f64], total: f64) -> f64 {
        if total <= 0.0 {
            return 0.0;
        }
        class_weights
            .iter()
            .filter(|&&w| w > 0.0)
            .map(|&w| {
                let p = w / total;
                p * p.log2()
            })
            .sum()
    }

    fn name(&self) -> &'static str {
        "information"
    }
}

// =============================================================================
// Impurity Enum
// =============================================================================

/// Runtime-selectable impurity metric, chosen once per tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impurity {
    #[default]
    Gini,
    Information,
}

impl ImpurityFn for Impurity {
    #[inline]
    fn score(&self, class_weights: &[f64], total: f64) -> f64 {
        match self {
            Impurity::Gini => GiniGain.score(class_weights, total),
            Impurity::Information => InformationGain.score(class_weights, total),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Impurity::Gini => GiniGain.name(),
            Impurity::Information => InformationGain.name(),
        }
    }
}
