//! Decision tree model.
//!
//! High-level wrapper around [`DecisionTree`] with training and prediction.

use ndarray::{ArrayView1, ArrayView2};

use crate::data::{Dataset, DatasetError};
use crate::inference::{BatchPrediction, Classifier};
use crate::repr::DecisionTree;
use crate::training::{accuracy, weighted_accuracy, TrainingLogger, Verbosity};
use crate::utils::{run_with_threads, Parallelism};

use super::{TrainError, TreeConfig};

/// A trained classification tree plus the configuration it was built with.
#[derive(Clone, Debug)]
pub struct DecisionTreeModel {
    tree: DecisionTree,
    config: TreeConfig,
}

impl DecisionTreeModel {
    /// Wrap an existing tree.
    pub fn from_tree(tree: DecisionTree) -> Self {
        Self {
            tree,
            config: TreeConfig::default(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn into_tree(self) -> DecisionTree {
        self.tree
    }

    pub fn n_classes(&self) -> usize {
        self.tree.n_classes()
    }

    pub fn classifier(&self) -> Classifier<'_> {
        Classifier::new(&self.tree)
    }

    // =========================================================================
    // Training
    // =========================================================================

    /// Train a tree on `dataset`.
    ///
    /// `n_classes` defaults to the largest label plus one.
    ///
    /// # Errors
    ///
    /// Returns [`TrainError::Dataset`] if the dataset violates a training
    /// precondition (empty, no classes, label out of range).
    pub fn train(
        dataset: &Dataset,
        n_classes: Option<usize>,
        config: TreeConfig,
    ) -> Result<Self, TrainError> {
        if dataset.n_samples() == 0 {
            return Err(DatasetError::EmptyDataset.into());
        }
        let n_classes = n_classes.unwrap_or_else(|| dataset.infer_n_classes());
        run_with_threads(config.n_threads, |parallelism| {
            Self::train_inner(dataset, n_classes, config, parallelism)
        })
    }

    fn train_inner(
        dataset: &Dataset,
        n_classes: usize,
        config: TreeConfig,
        parallelism: Parallelism,
    ) -> Result<Self, TrainError> {
        let tree = config.to_builder().build(dataset, n_classes, parallelism)?;
        let model = Self { tree, config };

        if model.config.verbosity >= Verbosity::Info {
            let predicted = model
                .classifier()
                .classify_batch(dataset.features(), parallelism)?;
            let logger = TrainingLogger::new(model.config.verbosity);
            logger.log_accuracy(score(&predicted, dataset));
        }

        Ok(model)
    }

    // =========================================================================
    // Prediction
    // =========================================================================

    /// Predict labels and class probabilities for every column of `features`.
    ///
    /// # Arguments
    ///
    /// * `features` - Feature matrix with shape `[n_features, n_points]` (feature-major)
    /// * `n_threads` - Thread count: 0 = auto, 1 = sequential, >1 = exact count
    pub fn predict(
        &self,
        features: ArrayView2<f64>,
        n_threads: usize,
    ) -> Result<BatchPrediction, DatasetError> {
        run_with_threads(n_threads, |parallelism| {
            self.classifier().classify_batch(features, parallelism)
        })
    }

    /// Predict the label and class probabilities of one point.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::FeatureCountMismatch`] if the point does not
    /// have the number of features the tree was trained on.
    pub fn predict_point<'p>(
        &self,
        point: impl Into<ArrayView1<'p, f64>>,
    ) -> Result<(usize, &[f64]), DatasetError> {
        self.classifier().try_classify(point)
    }

    /// Fraction of `dataset` samples whose label is predicted correctly.
    ///
    /// Weighted datasets count each sample by its weight.
    pub fn accuracy(&self, dataset: &Dataset, n_threads: usize) -> Result<f64, DatasetError> {
        let predicted = self.predict(dataset.features(), n_threads)?;
        Ok(score(&predicted, dataset))
    }
}

fn score(predicted: &BatchPrediction, dataset: &Dataset) -> f64 {
    match dataset.weights().as_array() {
        Some(weights) => weighted_accuracy(predicted.labels.view(), dataset.labels(), weights),
        None => accuracy(predicted.labels.view(), dataset.labels()),
    }
}
