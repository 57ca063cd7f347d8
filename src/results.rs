use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::IndexError;

/// The output of one completed `index_file` / `index_directory` call.
///
/// Nothing in here is fatal: by the time a report exists every task of the
/// call has finished and the index holds whatever could be read. Callers
/// that don't care about the details can simply drop it.
#[derive(Debug)]
pub struct IndexReport {
    /// Total number of tasks submitted by the call, including every task
    /// spawned by other tasks. For a tree this is directories + files.
    pub tasks: usize,

    /// Indexing statistics.
    pub stats: IndexStats,

    /// Failures that were swallowed during the call.
    /// Only populated if `.collect_errors(true)` was set on the builder.
    pub failures: Vec<Failure>,
}

impl IndexReport {
    /// `true` when no failure was collected.
    ///
    /// Always `true` unless the indexer was built with `.collect_errors(true)`.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Performance statistics for a completed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of index-file tasks run, successful or not.
    pub files: usize,

    /// Number of directory traversal tasks run, successful or not.
    pub dirs: usize,

    /// Tokens recorded from files that were read to the end.
    pub tokens: usize,

    /// Wall-clock time from submission of the first task to the last completion.
    pub duration: Duration,

    /// Files indexed per second, clamped to 0 on zero-duration runs.
    pub files_per_sec: usize,
}

impl IndexStats {
    /// Compute `files_per_sec` from raw counts and duration.
    pub(crate) fn compute(files: usize, dirs: usize, tokens: usize, duration: Duration) -> Self {
        let fps = if duration.as_secs_f64() > 0.0 {
            (files as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        Self {
            files,
            dirs,
            tokens,
            duration,
            files_per_sec: fps,
        }
    }
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

/// What a task was doing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    IndexFile,
    Traverse,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::IndexFile => "index file",
            Self::Traverse  => "traverse directory",
        })
    }
}

/// A swallowed error, tagged with the operation and path it hit.
#[derive(Debug)]
pub struct Failure {
    pub operation: Operation,
    pub path:      PathBuf,
    pub error:     IndexError,
}

impl Failure {
    /// `path` is the task's target; a more specific path carried by the
    /// error (a child that vanished mid-walk, say) takes precedence.
    pub(crate) fn new(operation: Operation, path: &Path, error: IndexError) -> Self {
        let path = error
            .path()
            .filter(|p| !p.as_os_str().is_empty())
            .cloned()
            .unwrap_or_else(|| path.to_path_buf());
        Self { operation, path, error }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to {} {}: {}", self.operation, self.path.display(), self.error)
    }
}
