use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};

use crate::entry::{Entry, EntryKind};
use crate::error::IndexError;

// ---------------------------------------------------------------------------
// children()
// ---------------------------------------------------------------------------

/// Enumerate the immediate children of `dir`.
///
/// Exactly one level is read: subdirectories come back as [`EntryKind::Dir`]
/// entries and are not descended into. Nothing is filtered (hidden files,
/// `.gitignore` rules and friends are all ignored) and symlinks are reported
/// as links rather than followed.
///
/// `dir` itself is skipped when it is a directory or a link to one. When it
/// is anything else it is yielded at depth 0 so the caller can index it as a
/// file.
pub(crate) fn children(dir: &Path) -> impl Iterator<Item = Result<Entry, IndexError>> {
    let mut builder = WalkBuilder::new(dir);
    builder
        .standard_filters(false)
        .ignore(false)
        .parents(false)
        .hidden(false)
        .follow_links(false)
        .same_file_system(false)
        .max_depth(Some(1));

    builder.build().filter_map(|res| match res {
        Ok(entry) => to_entry(entry).map(Ok),
        Err(e)    => Some(Err(map_ignore_error(e))),
    })
}

fn to_entry(entry: DirEntry) -> Option<Entry> {
    let ft = entry.file_type()?;

    let kind = if ft.is_dir() {
        EntryKind::Dir
    } else if ft.is_file() {
        EntryKind::File
    } else if ft.is_symlink() {
        EntryKind::Symlink
    } else {
        EntryKind::Other
    };

    // Skip the root whenever the walker descends into it. A root symlink is
    // followed, so its kind alone says nothing.
    if entry.depth() == 0 && entry.path().is_dir() {
        return None;
    }

    Some(Entry {
        path: entry.into_path(),
        kind,
    })
}

// ---------------------------------------------------------------------------
// Map ignore::Error to IndexError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> IndexError {
    map_with_path(e, None)
}

fn map_with_path(e: ignore::Error, path: Option<PathBuf>) -> IndexError {
    match e {
        ignore::Error::WithPath { path, err } => map_with_path(*err, Some(path)),
        ignore::Error::WithDepth { err, .. }  => map_with_path(*err, path),
        ignore::Error::Loop { child, .. }     => IndexError::SymlinkLoop(child),
        ignore::Error::Io(io_err)             => {
            IndexError::from_io(path.unwrap_or_default(), io_err)
        }
        other => IndexError::Walk(other.to_string()),
    }
}
