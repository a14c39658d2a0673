//! Dataset container and builder.
//!
//! This module provides [`Dataset`] and [`DatasetBuilder`].

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use super::error::DatasetError;
use super::schema::{float_to_category, DatasetSchema, FeatureMeta, FeatureType};
use super::views::WeightsView;

/// Labelled training data for decision tree induction.
///
/// # Storage Layout
///
/// Features are stored in **feature-major** layout: `[n_features, n_samples]`.
/// Each feature's values across all samples are contiguous in memory, which is
/// what the per-dimension split search reads.
///
/// Labels are dense class ids, one per sample. Weights are optional; their
/// absence is equivalent to a vector of ones.
///
/// # Example
///
/// ```
/// use arbor::data::Dataset;
/// use ndarray::array;
///
/// // 2 features, 3 samples
/// let features = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
/// let labels = array![0, 1, 0];
/// let ds = Dataset::new(features.view(), labels.view()).unwrap();
///
/// assert_eq!(ds.n_samples(), 3);
/// assert_eq!(ds.n_features(), 2);
/// assert_eq!(ds.infer_n_classes(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature data: `[n_features, n_samples]` (feature-major).
    features: Array2<f64>,

    /// Per-feature type table.
    schema: DatasetSchema,

    /// Class label per sample.
    labels: Array1<usize>,

    /// Sample weights: length = n_samples.
    weights: Option<Array1<f64>>,
}

impl Dataset {
    /// Create a numeric-only dataset from feature-major data and labels.
    ///
    /// For categorical features use [`Dataset::with_schema`] or
    /// [`Dataset::builder`].
    pub fn new(features: ArrayView2<f64>, labels: ArrayView1<usize>) -> Result<Self, DatasetError> {
        if labels.len() != features.ncols() {
            return Err(DatasetError::ShapeMismatch {
                field: "labels",
                expected: features.ncols(),
                got: labels.len(),
            });
        }

        Ok(Self {
            schema: DatasetSchema::all_numeric(features.nrows()),
            features: features.to_owned(),
            labels: labels.to_owned(),
            weights: None,
        })
    }

    /// Assemble a dataset from parts that are already known to be consistent.
    pub(crate) fn from_parts(features: Array2<f64>, schema: DatasetSchema, labels: Array1<usize>) -> Self {
        debug_assert_eq!(features.ncols(), labels.len());
        debug_assert_eq!(features.nrows(), schema.n_features());
        Self {
            features,
            schema,
            labels,
            weights: None,
        }
    }

    /// Create a dataset whose last feature row holds the labels.
    ///
    /// The label row must contain non-negative integers; it is removed from
    /// the features.
    pub fn from_labelled_features(matrix: ArrayView2<f64>) -> Result<Self, DatasetError> {
        let rows = matrix.nrows();
        if rows < 2 {
            return Err(DatasetError::MissingLabelRow { rows });
        }

        let label_row = matrix.row(rows - 1);
        let mut labels = Array1::zeros(label_row.len());
        for (sample, (&value, label)) in label_row.iter().zip(labels.iter_mut()).enumerate() {
            if !(value.is_finite() && value >= 0.0 && value.fract() == 0.0) {
                return Err(DatasetError::InvalidLabelValue { sample, value });
            }
            *label = value as usize;
        }

        let features = matrix.slice_axis(Axis(0), (0..rows - 1).into());
        Self::new(features, labels.view())
    }

    /// Create a builder for mixed-type dataset construction.
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::new()
    }

    /// Attach per-sample weights.
    ///
    /// Weights must be finite and non-negative.
    pub fn with_weights(mut self, weights: ArrayView1<f64>) -> Result<Self, DatasetError> {
        validate_weights(weights, self.n_samples())?;
        self.weights = Some(weights.to_owned());
        Ok(self)
    }

    /// Replace the all-numeric type table with an explicit schema.
    ///
    /// Every value of a categorical feature must be an integer category index
    /// in `[0, n_categories)`.
    pub fn with_schema(mut self, schema: DatasetSchema) -> Result<Self, DatasetError> {
        validate_schema(&schema, self.features.view())?;
        self.schema = schema;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of samples.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.features.ncols()
    }

    /// Number of features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.nrows()
    }

    /// Get the schema.
    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    /// Check if any feature is categorical.
    pub fn has_categorical(&self) -> bool {
        self.schema.has_categorical()
    }

    /// Check if dataset has weights.
    pub fn has_weights(&self) -> bool {
        self.weights.is_some()
    }

    /// Feature matrix, shape `[n_features, n_samples]`.
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    /// All sample values of one feature.
    pub fn feature(&self, feature: usize) -> ArrayView1<'_, f64> {
        self.features.row(feature)
    }

    /// Class labels.
    pub fn labels(&self) -> ArrayView1<'_, usize> {
        self.labels.view()
    }

    /// Sample weights (`WeightsView::None` when unweighted).
    pub fn weights(&self) -> WeightsView<'_> {
        WeightsView::from_optional(self.weights.as_ref().map(|w| w.view()))
    }

    /// Number of classes implied by the labels (max label + 1).
    ///
    /// Returns 0 for an empty dataset.
    pub fn infer_n_classes(&self) -> usize {
        self.labels.iter().max().map_or(0, |&max| max + 1)
    }

    /// A new dataset holding the samples at `indices`, in that order.
    ///
    /// # Panics
    /// Panics if an index is out of range.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: self.features.select(Axis(1), indices),
            schema: self.schema.clone(),
            labels: self.labels.select(Axis(0), indices),
            weights: self.weights.as_ref().map(|w| w.select(Axis(0), indices)),
        }
    }

    /// Check the preconditions for building a tree with `n_classes` classes.
    pub fn validate_for_training(&self, n_classes: usize) -> Result<(), DatasetError> {
        if n_classes == 0 {
            return Err(DatasetError::NoClasses);
        }
        if self.n_samples() == 0 {
            return Err(DatasetError::EmptyDataset);
        }
        check_sample_count(self.n_samples())?;
        for (sample, &label) in self.labels.iter().enumerate() {
            if label >= n_classes {
                return Err(DatasetError::LabelOutOfRange {
                    sample,
                    label,
                    n_classes,
                });
            }
        }
        Ok(())
    }
}

/// Tree building indexes samples with `u32`.
fn check_sample_count(n_samples: usize) -> Result<(), DatasetError> {
    let max = u32::MAX as usize;
    if n_samples > max {
        return Err(DatasetError::TooManySamples { n_samples, max });
    }
    Ok(())
}

fn validate_weights(weights: ArrayView1<f64>, n_samples: usize) -> Result<(), DatasetError> {
    if weights.len() != n_samples {
        return Err(DatasetError::ShapeMismatch {
            field: "weights",
            expected: n_samples,
            got: weights.len(),
        });
    }
    for (sample, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(DatasetError::InvalidWeight { sample, weight });
        }
    }
    Ok(())
}

fn validate_schema(schema: &DatasetSchema, features: ArrayView2<f64>) -> Result<(), DatasetError> {
    if schema.n_features() != features.nrows() {
        return Err(DatasetError::SchemaLenMismatch {
            schema: schema.n_features(),
            data: features.nrows(),
        });
    }

    for (feature, meta) in schema.iter().enumerate() {
        let FeatureType::Categorical { n_categories } = meta.feature_type else {
            continue;
        };
        if n_categories == 0 {
            return Err(DatasetError::TooFewCategories { feature });
        }
        for (sample, &value) in features.row(feature).iter().enumerate() {
            if float_to_category(value, n_categories).is_none() {
                return Err(DatasetError::InvalidCategory {
                    feature,
                    sample,
                    value,
                    n_categories,
                });
            }
        }
    }
    Ok(())
}

/// Builder for mixed-type dataset construction.
///
/// # Example
///
/// ```
/// use arbor::data::DatasetBuilder;
/// use ndarray::array;
///
/// let ds = DatasetBuilder::new()
///     .add_feature("age", array![25.0, 30.0, 35.0].view())
///     .add_categorical("color", 3, array![0.0, 1.0, 2.0].view())
///     .labels(array![0, 1, 0].view())
///     .build()
///     .unwrap();
///
/// assert_eq!(ds.n_features(), 2);
/// assert!(ds.has_categorical());
/// ```
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    columns: Vec<Array1<f64>>,
    metas: Vec<FeatureMeta>,
    labels: Option<Array1<usize>>,
    weights: Option<Array1<f64>>,
}

impl DatasetBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numeric feature column.
    pub fn add_feature(mut self, name: &str, values: ArrayView1<f64>) -> Self {
        self.columns.push(values.to_owned());
        self.metas.push(FeatureMeta::numeric_named(name));
        self
    }

    /// Add an unnamed numeric feature column.
    pub fn add_feature_unnamed(mut self, values: ArrayView1<f64>) -> Self {
        self.columns.push(values.to_owned());
        self.metas.push(FeatureMeta::numeric());
        self
    }

    /// Add a categorical feature column with `n_categories` categories.
    ///
    /// Values must be category indices encoded as floats (0.0, 1.0, ...).
    pub fn add_categorical(mut self, name: &str, n_categories: usize, values: ArrayView1<f64>) -> Self {
        self.columns.push(values.to_owned());
        self.metas
            .push(FeatureMeta::categorical_named(name, n_categories));
        self
    }

    /// Add a categorical feature column given as string levels.
    ///
    /// Levels are mapped to dense indices in order of first appearance.
    pub fn add_categorical_levels<S: AsRef<str>>(mut self, name: &str, values: &[S]) -> Self {
        let mut levels: Vec<String> = Vec::new();
        let encoded: Array1<f64> = values
            .iter()
            .map(|value| {
                let value = value.as_ref();
                let index = match levels.iter().position(|l| l == value) {
                    Some(index) => index,
                    None => {
                        levels.push(value.to_owned());
                        levels.len() - 1
                    }
                };
                index as f64
            })
            .collect();

        self.columns.push(encoded);
        self.metas
            .push(FeatureMeta::categorical_with_levels(levels).with_name(name));
        self
    }

    /// Set class labels.
    pub fn labels(mut self, labels: ArrayView1<usize>) -> Self {
        self.labels = Some(labels.to_owned());
        self
    }

    /// Set sample weights.
    pub fn weights(mut self, weights: ArrayView1<f64>) -> Self {
        self.weights = Some(weights.to_owned());
        self
    }

    /// Build the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if columns have inconsistent sample counts,
    /// labels or weights have the wrong length, weights are invalid, or a
    /// categorical column holds a value outside its categories.
    pub fn build(self) -> Result<Dataset, DatasetError> {
        let labels = self.labels.unwrap_or_default();
        let n_samples = labels.len();

        let mut features = Array2::zeros((self.columns.len(), n_samples));
        for (mut row, column) in features.outer_iter_mut().zip(&self.columns) {
            if column.len() != n_samples {
                return Err(DatasetError::ShapeMismatch {
                    field: "features",
                    expected: n_samples,
                    got: column.len(),
                });
            }
            row.assign(column);
        }

        let schema = DatasetSchema::from_features(self.metas);
        validate_schema(&schema, features.view())?;
        if let Some(ref weights) = self.weights {
            validate_weights(weights.view(), n_samples)?;
        }

        Ok(Dataset {
            features,
            schema,
            labels,
            weights: self.weights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn new_rejects_label_length_mismatch() {
        let features = array![[1.0, 2.0, 3.0]];
        let labels = array![0, 1];
        let err = Dataset::new(features.view(), labels.view()).unwrap_err();
        assert_eq!(
            err,
            DatasetError::ShapeMismatch {
                field: "labels",
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn with_weights_validates_values() {
        let features = array![[1.0, 2.0]];
        let labels = array![0, 1];
        let ds = Dataset::new(features.view(), labels.view()).unwrap();

        let short = array![1.0];
        assert!(matches!(
            ds.clone().with_weights(short.view()),
            Err(DatasetError::ShapeMismatch { field: "weights", .. })
        ));

        let negative = array![1.0, -0.5];
        assert!(matches!(
            ds.clone().with_weights(negative.view()),
            Err(DatasetError::InvalidWeight { sample: 1, .. })
        ));

        let nan = array![f64::NAN, 1.0];
        assert!(matches!(
            ds.clone().with_weights(nan.view()),
            Err(DatasetError::InvalidWeight { sample: 0, .. })
        ));

        let ok = ds.with_weights(array![0.0, 2.0].view()).unwrap();
        assert!(ok.has_weights());
        assert_eq!(ok.weights().get(1), 2.0);
    }

    #[test]
    fn with_schema_checks_categories() {
        let features = array![[0.0, 1.0, 2.0], [0.5, 0.1, 0.3]];
        let labels = array![0, 1, 1];
        let ds = Dataset::new(features.view(), labels.view()).unwrap();

        let schema = DatasetSchema::from_features(vec![
            FeatureMeta::categorical(2),
            FeatureMeta::numeric(),
        ]);
        assert!(matches!(
            ds.clone().with_schema(schema),
            Err(DatasetError::InvalidCategory {
                feature: 0,
                sample: 2,
                ..
            })
        ));

        let schema = DatasetSchema::from_features(vec![FeatureMeta::categorical(3)]);
        assert_eq!(
            ds.clone().with_schema(schema).unwrap_err(),
            DatasetError::SchemaLenMismatch { schema: 1, data: 2 }
        );

        let schema = DatasetSchema::from_features(vec![
            FeatureMeta::categorical(3),
            FeatureMeta::numeric(),
        ]);
        let ds = ds.with_schema(schema).unwrap();
        assert!(ds.has_categorical());
    }

    #[test]
    fn from_labelled_features_splits_last_row() {
        let matrix = array![[0.1, 0.2, 0.3], [5.0, 6.0, 7.0], [0.0, 2.0, 1.0]];
        let ds = Dataset::from_labelled_features(matrix.view()).unwrap();
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.labels().to_vec(), vec![0, 2, 1]);
        assert_eq!(ds.infer_n_classes(), 3);

        let bad = array![[0.1, 0.2], [1.0, 0.5]];
        assert!(matches!(
            Dataset::from_labelled_features(bad.view()),
            Err(DatasetError::InvalidLabelValue { sample: 1, .. })
        ));

        let single = array![[1.0, 0.0]];
        assert_eq!(
            Dataset::from_labelled_features(single.view()).unwrap_err(),
            DatasetError::MissingLabelRow { rows: 1 }
        );
    }

    #[test]
    fn validate_for_training_checks_preconditions() {
        let features = array![[1.0, 2.0]];
        let ds = Dataset::new(features.view(), array![0, 3].view()).unwrap();
        assert_eq!(ds.validate_for_training(0), Err(DatasetError::NoClasses));
        assert_eq!(
            ds.validate_for_training(3),
            Err(DatasetError::LabelOutOfRange {
                sample: 1,
                label: 3,
                n_classes: 3
            })
        );
        assert!(ds.validate_for_training(4).is_ok());

        let empty = Dataset::new(
            Array2::<f64>::zeros((2, 0)).view(),
            Array1::<usize>::zeros(0).view(),
        )
        .unwrap();
        assert_eq!(empty.validate_for_training(2), Err(DatasetError::EmptyDataset));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn sample_count_must_fit_u32_indices() {
        let max = u32::MAX as usize;
        assert!(check_sample_count(max).is_ok());
        assert_eq!(
            check_sample_count(max + 1),
            Err(DatasetError::TooManySamples {
                n_samples: max + 1,
                max
            })
        );
    }

    #[test]
    fn builder_encodes_string_levels() {
        let ds = DatasetBuilder::new()
            .add_feature("x", array![0.5, 1.5, 2.5, 3.5].view())
            .add_categorical_levels("shape", &["circle", "square", "circle", "star"])
            .labels(array![0, 1, 0, 1].view())
            .build()
            .unwrap();

        assert_eq!(ds.feature(1).to_vec(), vec![0.0, 1.0, 0.0, 2.0]);
        assert_eq!(ds.schema().feature_type(1).n_categories(), Some(3));
        assert_eq!(ds.schema().category_index(1, "star"), Some(2));
    }

    #[test]
    fn builder_rejects_ragged_columns() {
        let result = DatasetBuilder::new()
            .add_feature_unnamed(array![1.0, 2.0].view())
            .labels(array![0, 1, 1].view())
            .build();
        assert!(matches!(
            result,
            Err(DatasetError::ShapeMismatch { field: "features", .. })
        ));
    }
}
