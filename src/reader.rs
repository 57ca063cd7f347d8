use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::IndexError;
use crate::index::WordIndex;

/// Read `path` line by line and record every whitespace-delimited token
/// against it. Returns the number of tokens recorded.
///
/// Lines are recorded as they are read, so a failure part-way through (an
/// unreadable block, invalid UTF-8) leaves the earlier lines in the index.
pub(crate) fn index_file(path: &Path, index: &WordIndex) -> Result<usize, IndexError> {
    let file = File::open(path).map_err(|e| IndexError::from_io(path, e))?;

    let mut tokens = 0;
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| IndexError::from_io(path, e))?;
        for word in words(&line) {
            index.record(word, path);
            tokens += 1;
        }
    }

    Ok(tokens)
}

/// Split on runs of ASCII whitespace, vertical tab included.
/// Unicode spaces (NBSP and friends) stay inside the word.
fn words(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_ascii_whitespace() || c == '\x0b')
        .filter(|w| !w.is_empty())
}
