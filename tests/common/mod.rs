#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

pub fn setup_test_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Writes `(relative path, content)` pairs below `root`, creating parents
pub fn write_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (relative, content) in files {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// Every regular file below `root`, keyed by `/`-separated relative path
pub fn read_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(Result::unwrap)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let relative = e.path().strip_prefix(root).unwrap();
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            (key, fs::read(e.path()).unwrap())
        })
        .collect()
}

/// Every directory below `root`, as `/`-separated relative paths
pub fn read_dirs(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(Result::unwrap)
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.path().strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

/// Drops the timestamp lines of headers and placeholders
pub fn without_timestamps(content: &[u8]) -> String {
    String::from_utf8_lossy(content)
        .lines()
        .filter(|line| !line.starts_with("// Converted on:") && !line.starts_with("// Created on:"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Body of a converted file, after the provenance header
pub fn body(content: &[u8]) -> String {
    let text = String::from_utf8_lossy(content);
    match text.split_once("// ======================================\n\n") {
        Some((_, body)) => body.to_string(),
        None => text.into_owned(),
    }
}
