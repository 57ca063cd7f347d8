use std::path::PathBuf;

/// One child discovered while enumerating a directory.
///
/// Only the immediate children of a directory are ever produced; deeper
/// levels are discovered by the traversal task scheduled for each child
/// directory.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    /// Full path to the entry. This is also the path recorded in the index.
    pub path: PathBuf,

    /// What kind of entry this is.
    pub kind: EntryKind,
}

/// The kind of a traversed entry, decided without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}
