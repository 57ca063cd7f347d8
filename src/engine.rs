use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::Sender;
use rayon::ThreadPool;

use crate::entry::EntryKind;
use crate::error::IndexError;
use crate::index::WordIndex;
use crate::reader;
use crate::results::{Failure, IndexReport, IndexStats, Operation};
use crate::traverse;

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the indexer to `run()`.
pub(crate) struct EngineOptions {
    pub verbose:        bool,
    pub collect_errors: bool,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// One unit of work for the pool.
pub(crate) enum Task {
    /// Read one file into the index.
    IndexFile(PathBuf),

    /// Enumerate one directory level, scheduling a task per child.
    Traverse(PathBuf),
}

impl Task {
    fn operation(&self) -> Operation {
        match self {
            Self::IndexFile(_) => Operation::IndexFile,
            Self::Traverse(_)  => Operation::Traverse,
        }
    }

    fn path(&self) -> &Path {
        match self {
            Self::IndexFile(p) | Self::Traverse(p) => p,
        }
    }
}

/// Posted exactly once by every task, whatever happened to it.
struct Completion {
    operation: Operation,
    tokens:    usize,
    failures:  Vec<Failure>,
}

impl Completion {
    fn failed(failure: Failure) -> Self {
        Self {
            operation: failure.operation,
            tokens:    0,
            failures:  vec![failure],
        }
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// State shared by every task of one top-level call.
///
/// Each call gets its own scope, so concurrent calls on the same indexer
/// share the pool and the index but never each other's join condition.
struct Scope {
    index:       Arc<WordIndex>,
    /// Tasks submitted so far. Only ever grows.
    outstanding: AtomicUsize,
    completions: Sender<Completion>,
}

impl Scope {
    /// Count `task` as outstanding and wrap it for the pool.
    ///
    /// The count is bumped here, before the job can be spawned, so a parent
    /// task's children are always counted before the parent's own completion
    /// is posted.
    fn job(self: &Arc<Self>, task: Task) -> impl FnOnce() + Send + 'static {
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        log::trace!("submit: {} {}", task.operation(), task.path().display());

        let scope = Arc::clone(self);
        move || {
            let completion = scope.execute(task);
            // The receiver outlives every task of the call.
            let _ = scope.completions.send(completion);
        }
    }

    /// Submit a task from inside a running task.
    ///
    /// Tasks only ever run on the indexer's pool, so `rayon::spawn` lands
    /// on that same pool.
    fn submit(self: &Arc<Self>, task: Task) {
        rayon::spawn(self.job(task));
    }

    fn execute(self: &Arc<Self>, task: Task) -> Completion {
        let operation = task.operation();
        let path = task.path().to_path_buf();

        match panic::catch_unwind(AssertUnwindSafe(|| self.run_task(task))) {
            Ok(completion) => completion,
            Err(payload) => {
                let error = IndexError::TaskPanicked {
                    path:    path.clone(),
                    message: panic_message(payload.as_ref()),
                };
                Completion::failed(Failure::new(operation, &path, error))
            }
        }
    }

    fn run_task(self: &Arc<Self>, task: Task) -> Completion {
        match task {
            Task::IndexFile(path) => match reader::index_file(&path, &self.index) {
                Ok(tokens) => Completion {
                    operation: Operation::IndexFile,
                    tokens,
                    failures:  Vec::new(),
                },
                Err(error) => Completion::failed(Failure::new(Operation::IndexFile, &path, error)),
            },

            Task::Traverse(dir) => {
                let mut failures = Vec::new();

                for child in traverse::children(&dir) {
                    match child {
                        Ok(entry) => match entry.kind {
                            EntryKind::Dir => self.submit(Task::Traverse(entry.path)),
                            EntryKind::File | EntryKind::Symlink => {
                                self.submit(Task::IndexFile(entry.path));
                            }
                            EntryKind::Other => {
                                log::debug!("skipping special file {}", entry.path.display());
                            }
                        },
                        Err(error) => failures.push(Failure::new(Operation::Traverse, &dir, error)),
                    }
                }

                Completion {
                    operation: Operation::Traverse,
                    tokens:    0,
                    failures,
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Run `root` and everything it fans out to on `pool`, blocking until the
/// whole task tree has completed.
///
/// This is the join barrier. The number of tasks is unknown up front: every
/// traversal task adds more while we wait. The drain loop therefore re-reads
/// the outstanding count on each pass instead of fixing a bound at the start.
/// The count never decreases and every task posts exactly one completion, so
/// `drained` catches up to it exactly when the last task has finished and no
/// task is left that could submit another.
///
/// There is no timeout: a task stuck in I/O blocks the call indefinitely.
pub(crate) fn run(
    pool:  &ThreadPool,
    index: &Arc<WordIndex>,
    opts:  &EngineOptions,
    root:  Task,
) -> IndexReport {
    let (tx, rx) = crossbeam_channel::unbounded::<Completion>();
    let scope = Arc::new(Scope {
        index:       Arc::clone(index),
        outstanding: AtomicUsize::new(0),
        completions: tx,
    });

    let operation = root.operation();
    let root_path = root.path().to_path_buf();
    log::debug!("{operation} {}: started", root_path.display());

    let start = Instant::now();
    pool.spawn(scope.job(root));

    let mut drained  = 0;
    let mut files    = 0;
    let mut dirs     = 0;
    let mut tokens   = 0;
    let mut failures = Vec::new();

    while drained < scope.outstanding.load(Ordering::Acquire) {
        // `scope` holds a sender, so this only returns once a task completes.
        let Ok(completion) = rx.recv() else {
            break;
        };
        drained += 1;

        match completion.operation {
            Operation::IndexFile => files += 1,
            Operation::Traverse  => dirs += 1,
        }
        tokens += completion.tokens;

        for failure in completion.failures {
            if opts.verbose {
                log::warn!("{failure}");
            }
            if opts.collect_errors {
                failures.push(failure);
            }
        }
    }

    let duration = start.elapsed();
    log::debug!(
        "{operation} {}: {} tasks ({} files, {} dirs) in {:.3}s",
        root_path.display(),
        drained,
        files,
        dirs,
        duration.as_secs_f64()
    );

    IndexReport {
        tasks: drained,
        stats: IndexStats::compute(files, dirs, tokens, duration),
        failures,
    }
}
