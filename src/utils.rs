//! Common utilities used across the crate.
//!
//! This module provides parallelism configuration and slice helpers used by
//! the tree builder and the batch classifier.

use rayon::prelude::*;

// =============================================================================
// Parallelism Configuration
// =============================================================================

/// Whether parallel execution is allowed.
///
/// This is a simple flag passed through training and inference components.
/// When `Parallel`, components may use `rayon` parallel iterators.
/// When `Sequential`, components must use sequential iteration.
///
/// The actual thread pool is set up at the model API level via `n_threads`.
/// Components don't manage thread pools - they just respect this flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Parallelism {
    #[default]
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics.
    ///
    /// - 0 = auto (parallel if rayon pool has multiple threads, sequential otherwise)
    /// - 1 = sequential
    /// - >1 = parallel
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// Returns `true` if parallel execution is allowed.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// Downgrade to sequential when the workload is below `min_items`.
    #[inline]
    pub fn for_workload(self, n_items: usize, min_items: usize) -> Self {
        if n_items < min_items {
            Parallelism::Sequential
        } else {
            self
        }
    }

    #[inline]
    pub fn maybe_par_map<T, B, I, F>(self, iter: I, f: F) -> Vec<B>
    where
        T: Send,
        B: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) -> B + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().map(f).collect()
        } else {
            iter.into_iter().map(f).collect()
        }
    }
}

// =============================================================================
// Thread Pool Setup
// =============================================================================

/// Run a closure with the appropriate thread pool.
///
/// Thread count semantics:
/// - `0` = auto (use all available cores)
/// - `1` = sequential (no thread pool)
/// - `n > 1` = use exactly `n` threads
///
/// If a dedicated pool cannot be created, the closure runs on the global
/// rayon pool instead.
///
/// # Example
///
/// ```
/// use arbor::run_with_threads;
///
/// let n = run_with_threads(1, |parallelism| {
///     assert!(!parallelism.is_parallel());
///     42
/// });
/// assert_eq!(n, 42);
/// ```
#[inline]
pub fn run_with_threads<T: Send>(n_threads: usize, f: impl FnOnce(Parallelism) -> T + Send) -> T {
    match Parallelism::from_threads(n_threads) {
        Parallelism::Sequential => f(Parallelism::Sequential),
        Parallelism::Parallel => {
            match rayon::ThreadPoolBuilder::new().num_threads(n_threads).build() {
                Ok(pool) => pool.install(|| f(Parallelism::Parallel)),
                Err(err) => {
                    tracing::warn!("falling back to the global thread pool: {err}");
                    f(Parallelism::Parallel)
                }
            }
        }
    }
}

// =============================================================================
// Slice Utilities
// =============================================================================

/// Split a mutable slice into consecutive, disjoint chunks of the given lengths.
///
/// The chunk lengths must sum to `slice.len()`.
///
/// # Panics
/// Panics if the lengths exceed the slice length.
pub fn split_lengths_mut<'a, T>(mut slice: &'a mut [T], lengths: &[usize]) -> Vec<&'a mut [T]> {
    debug_assert_eq!(
        lengths.iter().sum::<usize>(),
        slice.len(),
        "chunk lengths must cover the slice"
    );

    let mut chunks = Vec::with_capacity(lengths.len());
    for &len in lengths {
        let (head, tail) = std::mem::take(&mut slice).split_at_mut(len);
        chunks.push(head);
        slice = tail;
    }
    chunks
}
