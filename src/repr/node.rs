//! Tree nodes and split descriptors.

use serde::{Deserialize, Serialize};

use crate::data::float_to_category;

// =============================================================================
// SplitDescriptor
// =============================================================================

/// Decision rule stored at an internal node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SplitDescriptor {
    /// Two children: `value <= threshold` goes to child 0, everything else
    /// (including NaN) to child 1.
    Numeric { feature: usize, threshold: f64 },

    /// One child per category; category `c` goes to child `c`.
    Categorical { feature: usize, n_categories: usize },
}

impl SplitDescriptor {
    /// Feature index this split reads.
    #[inline]
    pub fn feature(&self) -> usize {
        match *self {
            SplitDescriptor::Numeric { feature, .. } => feature,
            SplitDescriptor::Categorical { feature, .. } => feature,
        }
    }

    /// Number of children this split produces.
    #[inline]
    pub fn n_children(&self) -> usize {
        match *self {
            SplitDescriptor::Numeric { .. } => 2,
            SplitDescriptor::Categorical { n_categories, .. } => n_categories,
        }
    }

    #[inline]
    pub fn is_categorical(&self) -> bool {
        matches!(self, SplitDescriptor::Categorical { .. })
    }

    /// Child index a feature value is routed to.
    ///
    /// Returns `None` for a categorical value that is not an integer in
    /// `[0, n_categories)`. Numeric splits always route.
    #[inline]
    pub fn child_index(&self, value: f64) -> Option<usize> {
        match *self {
            SplitDescriptor::Numeric { threshold, .. } => {
                Some(if value <= threshold { 0 } else { 1 })
            }
            SplitDescriptor::Categorical { n_categories, .. } => {
                float_to_category(value, n_categories)
            }
        }
    }
}

// =============================================================================
// TreeNode
// =============================================================================

/// A node of a classification tree.
///
/// Each node exclusively owns its children. Both variants carry the class
/// distribution of the training samples that reached the node; for internal
/// nodes it is the fallback answer when a categorical query value has no
/// matching child.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        probabilities: Vec<f64>,
    },
    Internal {
        split: SplitDescriptor,
        probabilities: Vec<f64>,
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    /// Create a leaf.
    pub fn leaf(probabilities: Vec<f64>) -> Self {
        TreeNode::Leaf { probabilities }
    }

    /// Create an internal node.
    pub fn internal(split: SplitDescriptor, probabilities: Vec<f64>, children: Vec<TreeNode>) -> Self {
        TreeNode::Internal {
            split,
            probabilities,
            children,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Class distribution of the training samples at this node.
    #[inline]
    pub fn probabilities(&self) -> &[f64] {
        match self {
            TreeNode::Leaf { probabilities } => probabilities,
            TreeNode::Internal { probabilities, .. } => probabilities,
        }
    }

    /// Split rule, or `None` for leaves.
    #[inline]
    pub fn split(&self) -> Option<&SplitDescriptor> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Internal { split, .. } => Some(split),
        }
    }

    /// Ordered children (empty for leaves).
    #[inline]
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Leaf { .. } => &[],
            TreeNode::Internal { children, .. } => children,
        }
    }

    /// Number of children.
    #[inline]
    pub fn n_children(&self) -> usize {
        self.children().len()
    }

    /// Child by index, or `None` when out of range.
    #[inline]
    pub fn child(&self, index: usize) -> Option<&TreeNode> {
        self.children().get(index)
    }

    /// Length of the longest path to a leaf (0 for a leaf).
    pub fn depth(&self) -> usize {
        self.children()
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of nodes in this subtree.
    pub fn n_nodes(&self) -> usize {
        1 + self.children().iter().map(TreeNode::n_nodes).sum::<usize>()
    }

    /// Number of leaves in this subtree.
    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { children, .. } => children.iter().map(TreeNode::n_leaves).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> TreeNode {
        TreeNode::internal(
            SplitDescriptor::Numeric {
                feature: 0,
                threshold: 0.5,
            },
            vec![0.5, 0.5],
            vec![TreeNode::leaf(vec![1.0, 0.0]), TreeNode::leaf(vec![0.0, 1.0])],
        )
    }

    #[test]
    fn numeric_routing() {
        let split = SplitDescriptor::Numeric {
            feature: 2,
            threshold: 1.0,
        };
        assert_eq!(split.feature(), 2);
        assert_eq!(split.n_children(), 2);
        assert_eq!(split.child_index(1.0), Some(0));
        assert_eq!(split.child_index(0.0), Some(0));
        assert_eq!(split.child_index(1.5), Some(1));
        assert_eq!(split.child_index(f64::NAN), Some(1));
    }

    #[test]
    fn categorical_routing() {
        let split = SplitDescriptor::Categorical {
            feature: 0,
            n_categories: 3,
        };
        assert!(split.is_categorical());
        assert_eq!(split.n_children(), 3);
        assert_eq!(split.child_index(2.0), Some(2));
        assert_eq!(split.child_index(3.0), None);
        assert_eq!(split.child_index(-1.0), None);
        assert_eq!(split.child_index(0.5), None);
    }

    #[test]
    fn introspection() {
        let root = stump();
        assert!(!root.is_leaf());
        assert_eq!(root.n_children(), 2);
        assert_eq!(root.child(1).map(TreeNode::probabilities), Some(&[0.0, 1.0][..]));
        assert!(root.child(2).is_none());
        assert_eq!(root.depth(), 1);
        assert_eq!(root.n_nodes(), 3);
        assert_eq!(root.n_leaves(), 2);

        let leaf = TreeNode::leaf(vec![1.0]);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.n_children(), 0);
        assert!(leaf.child(0).is_none());
        assert!(leaf.split().is_none());
        assert_eq!(leaf.depth(), 0);
    }
}
