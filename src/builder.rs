use rayon::ThreadPoolBuilder;

use crate::error::IndexError;
use crate::indexer::Indexer;

/// Worker count used unless [`IndexerBuilder::threads`] says otherwise.
pub const DEFAULT_THREADS: usize = 20;

// ---------------------------------------------------------------------------
// IndexerBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring an [`Indexer`].
///
/// Created via [`windex::indexer()`](crate::indexer). Configure with chained
/// builder methods, then call [`build()`](IndexerBuilder::build).
///
/// # Example
///
/// ```rust
/// let indexer = windex::indexer()
///     .threads(4)
///     .verbose(true)
///     .collect_errors(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(indexer.threads(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct IndexerBuilder {
    threads:        usize,
    verbose:        bool,
    collect_errors: bool,
}

impl Default for IndexerBuilder {
    fn default() -> Self {
        Self {
            threads:        DEFAULT_THREADS,
            verbose:        false,
            collect_errors: false,
        }
    }
}

impl IndexerBuilder {
    /// Number of worker threads in the pool.
    ///
    /// The pool is fixed-size: deep or wide trees queue tasks rather than
    /// adding threads. Defaults to [`DEFAULT_THREADS`].
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = n;
        self
    }

    /// Report each swallowed failure (operation and path) as a
    /// `log::warn!` record. Off by default, in which case failures are silent.
    pub fn verbose(mut self, yes: bool) -> Self {
        self.verbose = yes;
        self
    }

    /// Collect swallowed failures into [`IndexReport::failures`](crate::IndexReport::failures).
    ///
    /// Disabled by default. Collecting never changes what gets indexed.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    /// Start the worker pool and return an empty indexer.
    ///
    /// # Errors
    ///
    /// Returns `Err` for a zero thread count or when the pool's threads
    /// cannot be spawned.
    pub fn build(self) -> Result<Indexer, IndexError> {
        if self.threads == 0 {
            return Err(IndexError::InvalidThreadCount(self.threads));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("windex-worker-{i}"))
            .build()
            .map_err(|e| IndexError::ThreadPool(e.to_string()))?;

        Ok(Indexer::from_parts(pool, self.verbose, self.collect_errors))
    }
}
