//! View types for algorithm access.

use ndarray::ArrayView1;

/// Read-only view of per-sample weights.
///
/// `None` means every sample has weight 1.0. There is a single weighted code
/// path everywhere in the crate: unweighted data is just the `None` case of
/// this view, which reads back as a vector of ones.
#[derive(Clone, Copy, Debug, Default)]
pub enum WeightsView<'a> {
    /// No weights - all samples have implicit weight 1.0.
    #[default]
    None,
    /// Explicit weights per sample.
    Some(ArrayView1<'a, f64>),
}

impl<'a> WeightsView<'a> {
    /// Create from weights array.
    #[inline]
    pub fn from_array(weights: ArrayView1<'a, f64>) -> Self {
        WeightsView::Some(weights)
    }

    /// Create from optional array.
    #[inline]
    pub fn from_optional(weights: Option<ArrayView1<'a, f64>>) -> Self {
        match weights {
            Some(w) => WeightsView::Some(w),
            None => WeightsView::None,
        }
    }

    /// Get weight for a sample.
    ///
    /// Returns 1.0 for uniform weights, or the stored weight for weighted.
    #[inline]
    pub fn get(&self, idx: usize) -> f64 {
        match self {
            WeightsView::None => 1.0,
            WeightsView::Some(w) => w[idx],
        }
    }

    /// Get the underlying array view if weighted.
    #[inline]
    pub fn as_array(&self) -> Option<ArrayView1<'a, f64>> {
        match self {
            WeightsView::None => None,
            WeightsView::Some(w) => Some(*w),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn none_reads_as_ones() {
        let w = WeightsView::from_optional(None);
        assert_eq!(w.get(0), 1.0);
        assert_eq!(w.get(1_000), 1.0);
        assert!(w.as_array().is_none());
    }

    #[test]
    fn some_reads_stored_values() {
        let weights = array![0.5, 2.0];
        let w = WeightsView::from_array(weights.view());
        assert_eq!(w.get(0), 0.5);
        assert_eq!(w.get(1), 2.0);
        assert_eq!(w.as_array(), Some(weights.view()));
    }
}
