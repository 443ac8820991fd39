//! Language and size statistics for a source tree before conversion.

use crate::error::{ConversionError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use walkdir::WalkDir;

/// Number of languages reported by a scan
pub const MAX_LANGUAGES: usize = 10;

/// Files counted for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub name: String,
    pub count: usize,
}

/// Result of scanning a repository
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryScan {
    /// Most common languages, by descending file count
    pub languages: Vec<LanguageCount>,
    /// Regular files outside `.git`
    pub file_count: usize,
    /// Combined size of those files in bytes
    pub size_bytes: u64,
}

impl RepositoryScan {
    /// Language with the most files
    pub fn primary_language(&self) -> Option<&str> {
        self.languages.first().map(|lang| lang.name.as_str())
    }
}

/// Maps a file extension (without dot, case-sensitive) to a language name
pub fn extension_to_language(ext: &str) -> Option<&'static str> {
    let language = match ext {
        "py" => "Python",
        "js" => "JavaScript",
        "jsx" => "JavaScript (React)",
        "ts" => "TypeScript",
        "tsx" => "TypeScript (React)",
        "html" => "HTML",
        "css" => "CSS",
        "scss" => "SCSS",
        "sass" => "Sass",
        "java" => "Java",
        "kt" => "Kotlin",
        "c" => "C",
        "cpp" => "C++",
        "cs" => "C#",
        "php" => "PHP",
        "rb" => "Ruby",
        "go" => "Go",
        "rs" => "Rust",
        "swift" => "Swift",
        "m" => "Objective-C",
        "h" => "C/C++ Header",
        "sh" => "Shell",
        "json" => "JSON",
        "xml" => "XML",
        "yml" | "yaml" => "YAML",
        "md" => "Markdown",
        _ => return None,
    };
    Some(language)
}

/// Scans `repo_dir`, skipping `.git` directories
///
/// Unreadable entries are logged and left out of the totals.
pub fn scan_repository(repo_dir: &Path) -> Result<RepositoryScan> {
    if !repo_dir.is_dir() {
        return Err(ConversionError::Validation(format!(
            "Repository directory {} does not exist",
            repo_dir.display()
        )));
    }

    let mut scan = RepositoryScan::default();
    let mut counts: HashMap<&'static str, usize> = HashMap::new();

    let walker = WalkDir::new(repo_dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !(e.file_type().is_dir() && e.file_name() == ".git"));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping (error): {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        scan.file_count += 1;
        match entry.metadata() {
            Ok(metadata) => scan.size_bytes += metadata.len(),
            Err(e) => debug!("No size for {}: {}", entry.path().display(), e),
        }

        if let Some(language) = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(extension_to_language)
        {
            *counts.entry(language).or_insert(0) += 1;
        }
    }

    let mut languages: Vec<LanguageCount> = counts
        .into_iter()
        .map(|(name, count)| LanguageCount { name: name.to_string(), count })
        .collect();
    languages.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    languages.truncate(MAX_LANGUAGES);
    scan.languages = languages;

    Ok(scan)
}
