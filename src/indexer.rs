use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use rayon::ThreadPool;

use crate::builder::IndexerBuilder;
use crate::engine::{run, EngineOptions, Task};
use crate::error::IndexError;
use crate::index::{FileRef, WordIndex};
use crate::results::IndexReport;

// ---------------------------------------------------------------------------
// Indexer
// ---------------------------------------------------------------------------

/// A word index plus the worker pool that fills it.
///
/// Created via [`windex::indexer()`](crate::indexer) or [`Indexer::new`].
/// The index starts empty and only grows; the pool's workers exit when the
/// `Indexer` is dropped.
///
/// All methods take `&self`. Share an `Indexer` across threads (behind an
/// `Arc`, or with scoped threads) to index several roots at once; each call
/// waits only for its own tasks.
pub struct Indexer {
    index: Arc<WordIndex>,
    pool:  ThreadPool,
    opts:  EngineOptions,
}

impl Indexer {
    /// Build an indexer with the default pool size.
    ///
    /// `verbose` reports every swallowed failure as a `log::warn!` record.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the worker pool cannot be started.
    pub fn new(verbose: bool) -> Result<Self, IndexError> {
        IndexerBuilder::default().verbose(verbose).build()
    }

    pub(crate) fn from_parts(pool: ThreadPool, verbose: bool, collect_errors: bool) -> Self {
        Self {
            index: Arc::new(WordIndex::new()),
            pool,
            opts: EngineOptions {
                verbose,
                collect_errors,
            },
        }
    }

    /// Index a single file.
    ///
    /// Blocks until the file has been read. Never fails: an unreadable file
    /// is left unindexed (or partly indexed, if reading broke off midway).
    pub fn index_file(&self, path: impl AsRef<Path>) -> IndexReport {
        run(
            &self.pool,
            &self.index,
            &self.opts,
            Task::IndexFile(path.as_ref().to_path_buf()),
        )
    }

    /// Index every file under `path`, at any depth.
    ///
    /// Blocks until the whole subtree has been indexed, including work that
    /// was discovered while waiting. Unreadable entries are skipped without
    /// affecting their siblings. If `path` is not a directory it is indexed
    /// as a single file.
    pub fn index_directory(&self, path: impl AsRef<Path>) -> IndexReport {
        run(
            &self.pool,
            &self.index,
            &self.opts,
            Task::Traverse(path.as_ref().to_path_buf()),
        )
    }

    /// Files containing `word` as a whole whitespace-delimited token,
    /// compared case-insensitively.
    ///
    /// Accepts `&str` or `Option<&str>`; `None`, the empty string and
    /// unknown words all yield an empty set.
    pub fn search_word<'a>(&self, word: impl Into<Option<&'a str>>) -> HashSet<FileRef> {
        self.index.lookup(word.into())
    }

    /// Number of workers in the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}
