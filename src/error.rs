use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    // Traversal / reading
    #[error("permission denied")]
    PermissionDenied(PathBuf),

    #[error("path not found")]
    NotFound(PathBuf),

    #[error("symlink loop")]
    SymlinkLoop(PathBuf),

    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("walk error: {0}")]
    Walk(String),

    // Runtime
    #[error("task panicked: {message}")]
    TaskPanicked { path: PathBuf, message: String },

    // Config
    #[error("invalid thread count")]
    InvalidThreadCount(usize),

    #[error("thread pool failure: {0}")]
    ThreadPool(String),
}

impl IndexError {
    /// Classify an I/O error raised while touching `path`.
    pub(crate) fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            io::ErrorKind::NotFound         => Self::NotFound(path),
            _                               => Self::Io { path, source: err },
        }
    }

    /// The path this error occurred at. `None` for configuration errors and
    /// walk errors that carry no path.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::SymlinkLoop(p)
            | Self::Io { path: p, .. }
            | Self::TaskPanicked { path: p, .. } => Some(p),
            _ => None,
        }
    }
}
