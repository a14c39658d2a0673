//! Canonical representation of a trained classification tree.
//!
//! [`TreeNode`] is a sum type: a leaf with a class distribution, or an
//! internal node with a [`SplitDescriptor`] and its owned, ordered children.
//! [`DecisionTree`] wraps the root together with the number of classes and
//! features it was trained on.

mod node;
mod tree;

pub use node::{SplitDescriptor, TreeNode};
pub use tree::{DecisionTree, TreeValidationError};
