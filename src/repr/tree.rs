//! A trained decision tree.

use serde::{Deserialize, Serialize};

use super::node::{SplitDescriptor, TreeNode};

/// Structural problems found by [`DecisionTree::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeValidationError {
    #[error("node at depth {depth} has {got} class probabilities, expected {expected}")]
    ProbabilityLength {
        depth: usize,
        expected: usize,
        got: usize,
    },

    #[error("node at depth {depth} has probabilities summing to {sum}")]
    ProbabilitySum { depth: usize, sum: f64 },

    #[error("node at depth {depth} has {got} children, its split needs {expected}")]
    ChildCount {
        depth: usize,
        expected: usize,
        got: usize,
    },

    #[error("split at depth {depth} reads feature {feature}, tree has {n_features}")]
    FeatureOutOfRange {
        depth: usize,
        feature: usize,
        n_features: usize,
    },
}

/// A classification tree: the root node plus the shape it was trained on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    root: TreeNode,
    n_classes: usize,
    n_features: usize,
}

impl DecisionTree {
    const SUM_TOLERANCE: f64 = 1e-6;

    pub fn new(root: TreeNode, n_classes: usize, n_features: usize) -> Self {
        Self {
            root,
            n_classes,
            n_features,
        }
    }

    #[inline]
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Number of features a query point must have.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn n_nodes(&self) -> usize {
        self.root.n_nodes()
    }

    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    /// Consume the tree, returning its root.
    pub fn into_root(self) -> TreeNode {
        self.root
    }

    /// Check the structure of every node.
    ///
    /// Every node must hold `n_classes` probabilities summing to 1, and every
    /// internal node must have as many children as its split produces.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            let probabilities = node.probabilities();
            if probabilities.len() != self.n_classes {
                return Err(TreeValidationError::ProbabilityLength {
                    depth,
                    expected: self.n_classes,
                    got: probabilities.len(),
                });
            }
            let sum: f64 = probabilities.iter().sum();
            if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
                return Err(TreeValidationError::ProbabilitySum { depth, sum });
            }

            if let Some(split) = node.split() {
                self.validate_split(split, node.n_children(), depth)?;
                stack.extend(node.children().iter().map(|child| (child, depth + 1)));
            }
        }
        Ok(())
    }

    fn validate_split(
        &self,
        split: &SplitDescriptor,
        n_children: usize,
        depth: usize,
    ) -> Result<(), TreeValidationError> {
        if split.feature() >= self.n_features {
            return Err(TreeValidationError::FeatureOutOfRange {
                depth,
                feature: split.feature(),
                n_features: self.n_features,
            });
        }
        let expected = split.n_children();
        if expected < 2 || n_children != expected {
            return Err(TreeValidationError::ChildCount {
                depth,
                expected,
                got: n_children,
            });
        }
        Ok(())
    }
}
