//! Decision tree training configuration with builder pattern.
//!
//! [`TreeConfig`] uses the `bon` crate for builder generation; the finishing
//! `build()` validates the parameters.
//!
//! # Example
//!
//! ```
//! use arbor::model::TreeConfig;
//! use arbor::training::Impurity;
//!
//! // All defaults
//! let config = TreeConfig::builder().build().unwrap();
//! assert_eq!(config.min_leaf_size, 10);
//!
//! // Information gain, decision stump
//! let config = TreeConfig::builder()
//!     .impurity(Impurity::Information)
//!     .min_leaf_size(1)
//!     .max_depth(1)
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;

use crate::training::{Impurity, TreeBuilder, Verbosity};

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("min_leaf_size must be at least 1")]
    InvalidMinLeafSize,

    #[error("max_depth must be at least 1 when set")]
    InvalidMaxDepth,
}

// =============================================================================
// TreeConfig
// =============================================================================

/// Configuration for training a single classification tree.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(derive(Clone, Debug), finish_fn(vis = "", name = __build_internal))]
pub struct TreeConfig {
    /// Impurity metric. Default: Gini.
    #[builder(default)]
    pub impurity: Impurity,

    /// Minimum number of samples in every child of a split. Default: 10.
    #[builder(default = 10)]
    pub min_leaf_size: usize,

    /// Maximum depth. `None` grows until no split improves.
    pub max_depth: Option<usize>,

    /// Thread count: 0 = auto, 1 = sequential, >1 = exact count. Default: 0.
    #[builder(default)]
    pub n_threads: usize,

    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

/// Custom finishing function that validates the config.
impl<S: tree_config_builder::IsComplete> TreeConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `min_leaf_size == 0` or `max_depth == Some(0)`.
    pub fn build(self) -> Result<TreeConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl TreeConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_leaf_size == 0 {
            return Err(ConfigError::InvalidMinLeafSize);
        }
        if self.max_depth == Some(0) {
            return Err(ConfigError::InvalidMaxDepth);
        }
        Ok(())
    }

    /// Tree builder with this configuration's parameters.
    pub fn to_builder(&self) -> TreeBuilder {
        TreeBuilder::new(self.impurity, self.min_leaf_size)
            .with_max_depth(self.max_depth)
            .with_verbosity(self.verbosity)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            impurity: Impurity::default(),
            min_leaf_size: 10,
            max_depth: None,
            n_threads: 0,
            verbosity: Verbosity::default(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
