//! Feature type definitions.
//!
//! This module defines the schema types that describe dataset structure: the
//! per-dimension type table and, for categorical dimensions, the number of
//! categories and (optionally) their string labels.

/// Logical feature types.
///
/// Features are stored as `f64` regardless of type. The `FeatureType` indicates
/// how to interpret the values during splitting and traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FeatureType {
    /// Continuous numeric feature.
    #[default]
    Numeric,

    /// Categorical feature stored as float, interpreted as a dense category index.
    ///
    /// Valid categories: `0.0, 1.0, ..., n_categories - 1.0`
    Categorical {
        /// Number of distinct categories (K).
        n_categories: usize,
    },
}

impl FeatureType {
    /// Returns true if this is a categorical feature.
    #[inline]
    pub fn is_categorical(&self) -> bool {
        matches!(self, FeatureType::Categorical { .. })
    }

    /// Returns true if this is a numeric feature.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, FeatureType::Numeric)
    }

    /// Number of categories, or `None` for numeric features.
    #[inline]
    pub fn n_categories(&self) -> Option<usize> {
        match self {
            FeatureType::Numeric => None,
            FeatureType::Categorical { n_categories } => Some(*n_categories),
        }
    }
}

/// Interpret a float as a category index in `[0, n_categories)`.
///
/// Returns `None` for negative, fractional, non-finite or out-of-range values.
#[inline]
pub fn float_to_category(value: f64, n_categories: usize) -> Option<usize> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < n_categories as f64 {
        Some(value as usize)
    } else {
        None
    }
}

/// Metadata for a single feature.
#[derive(Clone, Debug, Default)]
pub struct FeatureMeta {
    /// Feature name (optional).
    pub name: Option<String>,

    /// Feature type.
    pub feature_type: FeatureType,

    /// String labels of the categories, indexed by category id.
    pub levels: Option<Vec<String>>,
}

impl FeatureMeta {
    /// Create metadata for a numeric feature.
    pub fn numeric() -> Self {
        Self::default()
    }

    /// Create metadata for a numeric feature with a name.
    pub fn numeric_named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Create metadata for a categorical feature with `n_categories` categories.
    pub fn categorical(n_categories: usize) -> Self {
        Self {
            name: None,
            feature_type: FeatureType::Categorical { n_categories },
            levels: None,
        }
    }

    /// Create metadata for a categorical feature with a name.
    pub fn categorical_named(name: impl Into<String>, n_categories: usize) -> Self {
        Self::categorical(n_categories).with_name(name)
    }

    /// Create metadata for a categorical feature from its string levels.
    ///
    /// The category index of a level is its position in `levels`.
    pub fn categorical_with_levels<S: Into<String>>(levels: impl IntoIterator<Item = S>) -> Self {
        let levels: Vec<String> = levels.into_iter().map(Into::into).collect();
        Self {
            name: None,
            feature_type: FeatureType::Categorical {
                n_categories: levels.len(),
            },
            levels: Some(levels),
        }
    }

    /// Set the feature name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Look up the category index of a string level.
    pub fn category_index(&self, level: &str) -> Option<usize> {
        self.levels.as_ref()?.iter().position(|l| l == level)
    }

    /// Look up the string level of a category index.
    pub fn category_level(&self, index: usize) -> Option<&str> {
        self.levels.as_ref()?.get(index).map(String::as_str)
    }
}

/// Schema describing the dataset structure.
///
/// This is the dimension type table: one [`FeatureMeta`] per dimension.
#[derive(Clone, Debug, Default)]
pub struct DatasetSchema {
    features: Vec<FeatureMeta>,
}

impl DatasetSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schema with the given feature metadata.
    pub fn from_features(features: Vec<FeatureMeta>) -> Self {
        Self { features }
    }

    /// Create a schema where all features are numeric.
    pub fn all_numeric(n_features: usize) -> Self {
        Self::from_features(vec![FeatureMeta::numeric(); n_features])
    }

    /// Number of features in the schema.
    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    /// Get metadata for a feature by index.
    pub fn get(&self, index: usize) -> Option<&FeatureMeta> {
        self.features.get(index)
    }

    /// Get the feature type for a feature by index.
    ///
    /// Features beyond the schema are treated as numeric.
    pub fn feature_type(&self, index: usize) -> FeatureType {
        self.features
            .get(index)
            .map(|m| m.feature_type)
            .unwrap_or(FeatureType::Numeric)
    }

    /// Check if any feature is categorical.
    pub fn has_categorical(&self) -> bool {
        self.features.iter().any(|m| m.feature_type.is_categorical())
    }

    /// Get feature index by name.
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.features
            .iter()
            .position(|m| m.name.as_deref() == Some(name))
    }

    /// Map a string level of a categorical feature to its category index.
    pub fn category_index(&self, feature: usize, level: &str) -> Option<usize> {
        self.features.get(feature)?.category_index(level)
    }

    /// Iterate over feature metadata.
    pub fn iter(&self) -> impl Iterator<Item = &FeatureMeta> {
        self.features.iter()
    }
}
