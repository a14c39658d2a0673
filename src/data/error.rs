//! Dataset validation errors.

/// Errors raised when a dataset violates the preconditions of tree building
/// or prediction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset has no samples")]
    EmptyDataset,

    #[error("dataset has {n_samples} samples, at most {max} are supported")]
    TooManySamples { n_samples: usize, max: usize },

    #[error("number of classes must be at least 1")]
    NoClasses,

    #[error("shape mismatch for {field}: expected {expected} samples, got {got}")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("schema describes {schema} features but the data has {data}")]
    SchemaLenMismatch { schema: usize, data: usize },

    #[error("label {label} of sample {sample} is outside [0, {n_classes})")]
    LabelOutOfRange {
        sample: usize,
        label: usize,
        n_classes: usize,
    },

    #[error("weight {weight} of sample {sample} is negative or not finite")]
    InvalidWeight { sample: usize, weight: f64 },

    #[error("categorical feature {feature} must declare at least one category")]
    TooFewCategories { feature: usize },

    #[error(
        "value {value} of categorical feature {feature} (sample {sample}) is not a category in [0, {n_categories})"
    )]
    InvalidCategory {
        feature: usize,
        sample: usize,
        value: f64,
        n_categories: usize,
    },

    #[error("expected {expected} features, got {got}")]
    FeatureCountMismatch { expected: usize, got: usize },

    #[error("labelled feature matrix needs at least two rows (features and labels), got {rows}")]
    MissingLabelRow { rows: usize },

    #[error("value {value} in the label row (sample {sample}) is not a non-negative integer")]
    InvalidLabelValue { sample: usize, value: f64 },
}
