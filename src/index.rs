use std::collections::HashSet;
use std::path::{Path, PathBuf};

use dashmap::DashMap;

/// Identifies an indexed file. Two refs are equal iff their paths are equal.
pub type FileRef = PathBuf;

// ---------------------------------------------------------------------------
// WordIndex
// ---------------------------------------------------------------------------

/// Concurrent mapping from lower-cased word to the set of files containing it.
///
/// Append-only: associations are added by [`record`](WordIndex::record) and
/// never removed, so re-indexing a changed file keeps its stale words.
///
/// Each word's set lives behind the map's shard lock, which `record` holds
/// for the whole check-and-insert. Writers to unrelated words only contend
/// when they hash to the same shard.
#[derive(Debug, Default)]
pub(crate) struct WordIndex {
    words: DashMap<String, HashSet<FileRef>>,
}

impl WordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `word` occurs in `file`.
    pub fn record(&self, word: &str, file: &Path) {
        let word = word.to_lowercase();
        if word.is_empty() {
            return;
        }

        let mut files = self.words.entry(word).or_default();
        // Duplicates are common (same word many times per file); skip the
        // path allocation when the file is already there.
        if !files.contains(file) {
            files.insert(file.to_path_buf());
        }
    }

    /// Files containing `word`, case-insensitively. Absent, empty and
    /// never-seen words all yield an empty set.
    pub fn lookup(&self, word: Option<&str>) -> HashSet<FileRef> {
        let Some(word) = word else {
            return HashSet::new();
        };

        self.words
            .get(&word.to_lowercase())
            .map(|files| files.value().clone())
            .unwrap_or_default()
    }
}
