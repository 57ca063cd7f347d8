//! # windex
//!
//! Concurrent in-memory word index: "which files mention word W?"
//!
//! windex walks a directory tree on a fixed-size worker pool and records
//! every whitespace-delimited word of every file it finds, lower-cased,
//! against that file's path. Each directory level and each file is its own
//! task, so arbitrarily deep trees never grow the call stack; the calling
//! thread blocks until the whole, still-growing task tree has finished.
//!
//! Indexing is best-effort. A missing file, an unreadable directory or a
//! file that is not valid UTF-8 is skipped without disturbing the rest of
//! the walk, and no indexing call ever returns an error.
//!
//! # Quick Start
//!
//! ```rust
//! use std::fs;
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::write(dir.path().join("a.txt"), "Hello world").unwrap();
//! fs::create_dir(dir.path().join("nested")).unwrap();
//! fs::write(dir.path().join("nested").join("b.txt"), "hello again").unwrap();
//!
//! let indexer = windex::Indexer::new(false).unwrap();
//! let report = indexer.index_directory(dir.path());
//!
//! assert_eq!(report.stats.files, 2);
//! assert_eq!(indexer.search_word("HELLO").len(), 2);
//! assert_eq!(indexer.search_word("again").len(), 1);
//! assert!(indexer.search_word(None).is_empty());
//! ```
//!
//! # Reporting failures
//!
//! Failures are swallowed. Turn on `verbose` to have each one logged through
//! the [`log`](https://docs.rs/log) facade, or `collect_errors` to get them
//! back in the [`IndexReport`]:
//!
//! ```rust
//! let indexer = windex::indexer()
//!     .collect_errors(true)
//!     .build()
//!     .unwrap();
//!
//! let report = indexer.index_file("/definitely/not/here.txt");
//! assert_eq!(report.failures.len(), 1);
//! assert!(indexer.search_word("anything").is_empty());
//! ```

#![forbid(unsafe_code)]

mod builder;
mod engine;
mod entry;
mod error;
mod index;
mod indexer;
mod reader;
mod results;
mod traverse;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::{IndexerBuilder, DEFAULT_THREADS};
pub use error::IndexError;
pub use index::FileRef;
pub use indexer::Indexer;
pub use results::{Failure, IndexReport, IndexStats, Operation};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`IndexerBuilder`] to configure an [`Indexer`].
///
/// # Example
///
/// ```rust
/// let indexer = windex::indexer().threads(8).build().unwrap();
///
/// assert!(indexer.search_word("nothing-indexed-yet").is_empty());
/// ```
pub fn indexer() -> IndexerBuilder {
    IndexerBuilder::default()
}
