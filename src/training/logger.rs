//! Training progress logging.
//!
//! Events go through `tracing`; the library never installs a subscriber.

use std::time::Instant;

/// How much the trainer reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Warnings only.
    Warning,
    /// Build summary and training accuracy.
    Info,
    /// Per-node split decisions.
    Debug,
}

/// Verbosity-gated training events.
#[derive(Debug)]
pub struct TrainingLogger {
    verbosity: Verbosity,
    started: Option<Instant>,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            started: None,
        }
    }

    #[inline]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn start_training(
        &mut self,
        n_samples: usize,
        n_features: usize,
        n_classes: usize,
        min_leaf_size: usize,
    ) {
        self.started = Some(Instant::now());
        if self.verbosity >= Verbosity::Info {
            tracing::info!(
                n_samples,
                n_features,
                n_classes,
                min_leaf_size,
                "building decision tree"
            );
        }
    }

    /// Report a split chosen at `depth` over `n_samples` samples.
    pub fn log_split(&self, depth: usize, n_samples: usize, feature: usize, n_children: usize, gain: f64) {
        if self.verbosity >= Verbosity::Debug {
            tracing::debug!(depth, n_samples, feature, n_children, gain, "split node");
        }
    }

    pub fn log_unsplittable_root(&self, n_samples: usize) {
        if self.verbosity >= Verbosity::Warning {
            tracing::warn!(n_samples, "no split improves the root; tree is a single leaf");
        }
    }

    pub fn log_accuracy(&self, accuracy: f64) {
        if self.verbosity >= Verbosity::Info {
            tracing::info!(accuracy, "training accuracy");
        }
    }

    pub fn finish_training(&self, n_nodes: usize, n_leaves: usize, depth: usize) {
        if self.verbosity >= Verbosity::Info {
            let elapsed_ms = self
                .started
                .map(|t| t.elapsed().as_secs_f64() * 1e3)
                .unwrap_or_default();
            tracing::info!(n_nodes, n_leaves, depth, elapsed_ms, "decision tree built");
        }
    }
}
