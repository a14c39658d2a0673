//! Recursive tree construction.
//!
//! # Algorithm
//!
//! For the samples of a node:
//!
//! 1. Score the node's class distribution (the baseline)
//! 2. Ask every feature's strategy (numeric or categorical, per schema) for a
//!    split strictly better than the baseline; the highest gain wins, the
//!    lowest feature index on ties
//! 3. Without a winner, or with fewer than `2 * min_leaf_size` samples, the
//!    node becomes a leaf holding its class distribution
//! 4. Otherwise the node's index range is regrouped by child and each child
//!    range is built recursively
//!
//! Child ranges are disjoint after regrouping, so sibling subtrees may be
//! built in parallel.

use crate::data::{Dataset, DatasetError, FeatureType};
use crate::repr::{DecisionTree, TreeNode};
use crate::utils::Parallelism;

use super::impurity::{ClassWeights, Impurity, ImpurityFn};
use super::logger::{TrainingLogger, Verbosity};
use super::partition::{split_into_children, RowPartitioner};
use super::split::{
    AllCategoricalSplit, BestBinaryNumericSplit, CategoricalSplitter, NodeSamples, NumericSplitter,
    SplitCandidate,
};

/// Nodes with fewer samples build their children sequentially.
const MIN_PARALLEL_SAMPLES: usize = 4096;

/// Builds a [`DecisionTree`] from a [`Dataset`].
///
/// The split strategies are type parameters; the impurity metric is chosen
/// per builder.
///
/// # Example
///
/// ```
/// use arbor::data::Dataset;
/// use arbor::training::{Impurity, TreeBuilder};
/// use arbor::Parallelism;
/// use ndarray::array;
///
/// let features = array![[0.0, 1.0, 2.0, 3.0]];
/// let labels = array![0, 0, 1, 1];
/// let ds = Dataset::new(features.view(), labels.view()).unwrap();
///
/// let tree = TreeBuilder::new(Impurity::Gini, 1)
///     .build(&ds, 2, Parallelism::Sequential)
///     .unwrap();
/// assert_eq!(tree.root().n_children(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct TreeBuilder<N = BestBinaryNumericSplit, C = AllCategoricalSplit> {
    impurity: Impurity,
    min_leaf_size: usize,
    max_depth: Option<usize>,
    verbosity: Verbosity,
    numeric: N,
    categorical: C,
}

impl TreeBuilder {
    /// Builder with the default split strategies.
    ///
    /// A `min_leaf_size` of 0 is treated as 1.
    pub fn new(impurity: Impurity, min_leaf_size: usize) -> Self {
        Self::with_splitters(
            impurity,
            min_leaf_size,
            BestBinaryNumericSplit,
            AllCategoricalSplit,
        )
    }
}

impl<N: NumericSplitter, C: CategoricalSplitter> TreeBuilder<N, C> {
    /// Builder with custom split strategies.
    pub fn with_splitters(impurity: Impurity, min_leaf_size: usize, numeric: N, categorical: C) -> Self {
        Self {
            impurity,
            min_leaf_size: min_leaf_size.max(1),
            max_depth: None,
            verbosity: Verbosity::Silent,
            numeric,
            categorical,
        }
    }

    /// Stop splitting at `depth` (`Some(1)` builds a decision stump).
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[inline]
    pub fn impurity(&self) -> Impurity {
        self.impurity
    }

    #[inline]
    pub fn min_leaf_size(&self) -> usize {
        self.min_leaf_size
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Build a tree over all samples of `dataset`.
    ///
    /// # Errors
    ///
    /// Fails if `n_classes` is 0, the dataset is empty, or a label is not in
    /// `[0, n_classes)`.
    pub fn build(
        &self,
        dataset: &Dataset,
        n_classes: usize,
        parallelism: Parallelism,
    ) -> Result<DecisionTree, DatasetError> {
        dataset.validate_for_training(n_classes)?;

        let mut logger = TrainingLogger::new(self.verbosity);
        logger.start_training(
            dataset.n_samples(),
            dataset.n_features(),
            n_classes,
            self.min_leaf_size,
        );

        let mut partitioner = RowPartitioner::new(dataset.n_samples());
        let ctx = BuildContext {
            dataset,
            n_classes,
            logger: &logger,
        };
        let root = self.build_node(&ctx, partitioner.root_mut(), 0, parallelism);

        if root.is_leaf() {
            logger.log_unsplittable_root(dataset.n_samples());
        }
        let tree = DecisionTree::new(root, n_classes, dataset.n_features());
        logger.finish_training(tree.n_nodes(), tree.n_leaves(), tree.depth());
        Ok(tree)
    }

    fn build_node(
        &self,
        ctx: &BuildContext<'_>,
        indices: &mut [u32],
        depth: usize,
        parallelism: Parallelism,
    ) -> TreeNode {
        let dataset = ctx.dataset;
        let stats = ClassWeights::from_indices(indices, dataset.labels(), ctx.n_classes, dataset.weights());
        let probabilities = stats.distribution();

        let n_samples = indices.len();
        let depth_reached = self.max_depth.is_some_and(|max| depth >= max);
        if n_samples < 2 * self.min_leaf_size || depth_reached {
            return TreeNode::leaf(probabilities);
        }

        let baseline = self.impurity.score_stats(&stats);
        let node = NodeSamples {
            indices: &*indices,
            labels: dataset.labels(),
            weights: dataset.weights(),
            n_classes: ctx.n_classes,
            min_leaf_size: self.min_leaf_size,
        };
        let Some(best) = self.find_best_split(dataset, &node, baseline) else {
            return TreeNode::leaf(probabilities);
        };
        ctx.logger
            .log_split(depth, n_samples, best.split.feature(), best.n_children(), best.gain);

        let split = best.split;
        let column = dataset.feature(split.feature());
        let children = split_into_children(indices, split.n_children(), |idx| {
            split.child_index(column[idx as usize]).unwrap_or(0)
        });

        let children = parallelism
            .for_workload(n_samples, MIN_PARALLEL_SAMPLES)
            .maybe_par_map(children, |child| {
                self.build_node(ctx, child, depth + 1, parallelism)
            });

        TreeNode::internal(split, probabilities, children)
    }

    /// Best split across all features, if any beats `baseline`.
    fn find_best_split(
        &self,
        dataset: &Dataset,
        node: &NodeSamples<'_>,
        baseline: f64,
    ) -> Option<SplitCandidate> {
        let mut best: Option<SplitCandidate> = None;

        for feature in 0..dataset.n_features() {
            let values = dataset.feature(feature);
            let candidate = match dataset.schema().feature_type(feature) {
                FeatureType::Numeric => self
                    .numeric
                    .split_if_better(&self.impurity, baseline, values, node)
                    .map(|s| SplitCandidate::numeric(feature, s)),
                FeatureType::Categorical { n_categories } => self
                    .categorical
                    .split_if_better(&self.impurity, baseline, values, n_categories, node)
                    .map(|s| SplitCandidate::categorical(feature, s)),
            };

            if let Some(candidate) = candidate {
                if best.as_ref().map_or(true, |b| candidate.gain > b.gain) {
                    best = Some(candidate);
                }
            }
        }

        best
    }
}

/// Read-only state shared by every node of one build.
struct BuildContext<'a> {
    dataset: &'a Dataset,
    n_classes: usize,
    logger: &'a TrainingLogger,
}
