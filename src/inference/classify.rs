//! Tree traversal for classification.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::data::DatasetError;
use crate::repr::{DecisionTree, TreeNode};
use crate::utils::Parallelism;

/// Batches smaller than this are classified sequentially.
const MIN_PARALLEL_POINTS: usize = 1024;

/// Labels and class probabilities for a batch of points.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchPrediction {
    /// Predicted class per point.
    pub labels: Array1<usize>,
    /// Class probabilities, shape `[n_classes, n_points]`.
    pub probabilities: Array2<f64>,
}

/// Read-only classifier over a trained tree.
///
/// Traversal never mutates the tree, so one classifier may serve any number
/// of concurrent queries.
#[derive(Clone, Copy, Debug)]
pub struct Classifier<'t> {
    tree: &'t DecisionTree,
}

impl<'t> Classifier<'t> {
    pub fn new(tree: &'t DecisionTree) -> Self {
        Self { tree }
    }

    #[inline]
    pub fn tree(&self) -> &'t DecisionTree {
        self.tree
    }

    /// Class distribution for one point.
    ///
    /// Numeric splits send `value <= threshold` to the first child. A
    /// categorical value without a matching child stops traversal and
    /// returns the distribution stored on that node.
    ///
    /// # Panics
    /// Panics if the point has fewer features than a visited split reads.
    pub fn probabilities<'p>(&self, point: impl Into<ArrayView1<'p, f64>>) -> &'t [f64] {
        let point = point.into();
        let mut node = self.tree.root();
        loop {
            match node {
                TreeNode::Leaf { probabilities } => return probabilities,
                TreeNode::Internal {
                    split,
                    probabilities,
                    children,
                } => match split.child_index(point[split.feature()]).and_then(|c| children.get(c)) {
                    Some(child) => node = child,
                    None => return probabilities,
                },
            }
        }
    }

    /// Predicted label and class distribution for one point.
    pub fn classify<'p>(&self, point: impl Into<ArrayView1<'p, f64>>) -> (usize, &'t [f64]) {
        let probabilities = self.probabilities(point);
        (argmax(probabilities), probabilities)
    }

    /// Like [`classify`](Self::classify), but rejects a point whose length is
    /// not the tree's feature count instead of panicking.
    pub fn try_classify<'p>(
        &self,
        point: impl Into<ArrayView1<'p, f64>>,
    ) -> Result<(usize, &'t [f64]), DatasetError> {
        let point = point.into();
        let n_features = self.tree.n_features();
        if point.len() != n_features {
            return Err(DatasetError::FeatureCountMismatch {
                expected: n_features,
                got: point.len(),
            });
        }
        Ok(self.classify(point))
    }

    /// Classify every column of `points` (shape `[n_features, n_points]`).
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::FeatureCountMismatch`] if `points` does not have
    /// the number of features the tree was trained on.
    pub fn classify_batch(
        &self,
        points: ArrayView2<f64>,
        parallelism: Parallelism,
    ) -> Result<BatchPrediction, DatasetError> {
        let n_features = self.tree.n_features();
        if points.nrows() != n_features {
            return Err(DatasetError::FeatureCountMismatch {
                expected: n_features,
                got: points.nrows(),
            });
        }

        let n_points = points.ncols();
        let leaves: Vec<&[f64]> = parallelism
            .for_workload(n_points, MIN_PARALLEL_POINTS)
            .maybe_par_map(0..n_points, |i| self.probabilities(points.column(i)));

        let mut labels = Array1::zeros(n_points);
        let mut probabilities = Array2::zeros((self.tree.n_classes(), n_points));
        for (i, leaf) in leaves.into_iter().enumerate() {
            labels[i] = argmax(leaf);
            probabilities
                .column_mut(i)
                .assign(&ArrayView1::from(leaf));
        }

        Ok(BatchPrediction {
            labels,
            probabilities,
        })
    }
}

/// Index of the largest probability; the lowest index wins ties.
#[inline]
pub fn argmax(probabilities: &[f64]) -> usize {
    let mut best = 0;
    for (i, &p) in probabilities.iter().enumerate().skip(1) {
        if p > probabilities[best] {
            best = i;
        }
    }
    best
}
