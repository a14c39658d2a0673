//! Sample-index partitioning for tree building.
//!
//! A node does not copy the data it is trained on. It owns a contiguous range
//! of one shared buffer of sample indices. Once a split is chosen, the range
//! is regrouped in place so that the samples of each child are contiguous,
//! and each child receives its own disjoint sub-range.
//!
//! ```text
//! Node range (split on category, K = 3):
//!   indices: [0, 1, 2, 3, 4, 5, 6]
//!   child:    2  0  1  0  2  1  0
//!
//! After regroup (stable within each child):
//!   indices: [1, 3, 6, 2, 5, 0, 4]
//!   lengths: [3, 2, 2]
//! ```

use crate::utils::split_lengths_mut;

/// Owns the sample-index buffer of one tree build.
#[derive(Clone, Debug)]
pub struct RowPartitioner {
    indices: Box<[u32]>,
}

impl RowPartitioner {
    /// Create a partitioner holding `0..n_samples`.
    ///
    /// `n_samples` must fit in `u32`; [`Dataset::validate_for_training`]
    /// rejects larger datasets.
    ///
    /// [`Dataset::validate_for_training`]: crate::data::Dataset::validate_for_training
    pub fn new(n_samples: usize) -> Self {
        debug_assert!(u32::try_from(n_samples).is_ok());
        Self {
            indices: (0..n_samples as u32).collect(),
        }
    }

    /// Mutable access to the root range.
    #[inline]
    pub fn root_mut(&mut self) -> &mut [u32] {
        &mut self.indices
    }
}

/// Stably regroup `indices` by child.
///
/// `child_of` maps a sample index to its child in `0..n_children`. After the
/// call the samples of child 0 come first, then those of child 1, and so on,
/// each group in its original relative order. Returns the length of each
/// child's group.
///
/// # Panics
/// Panics if `child_of` returns a value `>= n_children`.
pub fn regroup<F>(indices: &mut [u32], n_children: usize, scratch: &mut Vec<u32>, child_of: F) -> Vec<usize>
where
    F: Fn(u32) -> usize,
{
    let mut lengths = vec![0usize; n_children];
    let children: Vec<usize> = indices
        .iter()
        .map(|&idx| {
            let child = child_of(idx);
            lengths[child] += 1;
            child
        })
        .collect();

    let mut offsets = Vec::with_capacity(n_children);
    let mut acc = 0;
    for &len in &lengths {
        offsets.push(acc);
        acc += len;
    }

    scratch.clear();
    scratch.resize(indices.len(), 0);
    for (&idx, &child) in indices.iter().zip(&children) {
        scratch[offsets[child]] = idx;
        offsets[child] += 1;
    }
    indices.copy_from_slice(scratch);

    lengths
}

/// Regroup `indices` by child and hand out one disjoint range per child.
pub fn split_into_children<'a, F>(
    indices: &'a mut [u32],
    n_children: usize,
    child_of: F,
) -> Vec<&'a mut [u32]>
where
    F: Fn(u32) -> usize,
{
    let mut scratch = Vec::new();
    let lengths = regroup(indices, n_children, &mut scratch, child_of);
    split_lengths_mut(indices, &lengths)
}
