use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use windex::{indexer, Indexer};

/// `count` files under `root`, each holding its own word `word_<i>` plus a
/// word shared by all of them.
fn unique_word_files(root: &std::path::Path, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let path = root.join(format!("file_{i}.txt"));
            fs::write(&path, format!("word_{i} everyone\nword_{i} again")).unwrap();
            path
        })
        .collect()
}

#[test]
fn concurrent_index_file_calls_lose_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let files = unique_word_files(dir.path(), 64);

    let idx = indexer().threads(4).build().unwrap();

    thread::scope(|s| {
        for chunk in files.chunks(8) {
            let idx = &idx;
            s.spawn(move || {
                for file in chunk {
                    idx.index_file(file);
                }
            });
        }
    });

    for (i, file) in files.iter().enumerate() {
        let found = idx.search_word(format!("WORD_{i}").as_str());
        assert_eq!(found.len(), 1, "word_{i} should be findable");
        assert!(found.contains(file));
    }
    assert_eq!(idx.search_word("everyone").len(), 64);
}

#[test]
fn concurrent_directory_calls_keep_separate_join_conditions() {
    let dirs: Vec<_> = (0..6).map(|_| tempfile::tempdir().unwrap()).collect();
    for (d, dir) in dirs.iter().enumerate() {
        let mut level = dir.path().to_path_buf();
        for depth in 0..(d + 1) * 3 {
            level = level.join(format!("level_{depth}"));
            fs::create_dir(&level).unwrap();
            fs::write(level.join("leaf.txt"), format!("tree_{d} leaf")).unwrap();
        }
    }

    let idx = Arc::new(Indexer::new(false).unwrap());

    let handles: Vec<_> = dirs
        .iter()
        .enumerate()
        .map(|(d, dir)| {
            let idx = Arc::clone(&idx);
            let root = dir.path().to_path_buf();
            thread::spawn(move || {
                let report = idx.index_directory(&root);
                // Each call must have waited for its own tree only, and all of it.
                let dirs = (d + 1) * 3;
                assert_eq!(report.stats.dirs, dirs + 1);
                assert_eq!(report.stats.files, dirs);
                assert_eq!(idx.search_word(format!("tree_{d}").as_str()).len(), dirs);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(idx.search_word("leaf").len(), (1..=6).map(|d| d * 3).sum::<usize>());
}

#[test]
fn mixed_calls_from_many_threads() {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path().join("tree");
    fs::create_dir(&tree).unwrap();
    let tree_files = unique_word_files(&tree, 30);

    let loose = dir.path().join("loose");
    fs::create_dir(&loose).unwrap();
    let loose_files: Vec<PathBuf> = (0..30)
        .map(|i| {
            let path = loose.join(format!("loose_{i}.txt"));
            fs::write(&path, format!("loose_{i}")).unwrap();
            path
        })
        .collect();

    let idx = indexer().threads(3).build().unwrap();

    thread::scope(|s| {
        let idx = &idx;
        let tree = &tree;
        s.spawn(move || idx.index_directory(tree));
        s.spawn(move || idx.index_directory(tree));
        for file in &loose_files {
            s.spawn(move || idx.index_file(file));
        }
    });

    assert_eq!(idx.search_word("everyone").len(), tree_files.len());
    for i in 0..30 {
        assert_eq!(idx.search_word(format!("loose_{i}").as_str()).len(), 1);
        assert_eq!(idx.search_word(format!("word_{i}").as_str()).len(), 1);
    }
}

#[test]
fn repeated_runs_agree() {
    let dir = tempfile::tempdir().unwrap();
    for sub in 0..5 {
        let path = dir.path().join(format!("sub_{sub}"));
        fs::create_dir(&path).unwrap();
        unique_word_files(&path, 10);
    }

    let first: Indexer = indexer().threads(8).build().unwrap();
    first.index_directory(dir.path());
    let baseline = first.search_word("everyone");
    assert_eq!(baseline.len(), 50);

    for _ in 0..5 {
        let idx = indexer().threads(8).build().unwrap();
        let report = idx.index_directory(dir.path());
        assert_eq!(report.tasks, 1 + 5 + 50);
        assert_eq!(idx.search_word("everyone"), baseline);
    }
}
