//! ZIP packaging of a converted tree.

use crate::error::{ConversionError, Result};
use log::{error, info};
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive file name used for a project
pub fn archive_file_name(archive_name: &str) -> String {
    format!("{}_converted.zip", archive_name)
}

/// Packages `output_directory` as `{archive_name}_converted.zip` beside it
pub fn package(output_directory: &Path, archive_name: &str) -> Result<PathBuf> {
    let trimmed = archive_name.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) || trimmed == ".." {
        return Err(ConversionError::Validation(format!("Invalid archive name: '{}'", archive_name)));
    }
    let parent = output_directory.parent().ok_or_else(|| {
        ConversionError::Validation(format!("{} has no parent directory", output_directory.display()))
    })?;

    package_to(output_directory, &parent.join(archive_file_name(trimmed)))
}

/// Packages `output_directory` into the archive at `archive_path`
///
/// Entries are relative to `output_directory`, so extracting the archive
/// reproduces the tree including empty directories.
pub fn package_to(output_directory: &Path, archive_path: &Path) -> Result<PathBuf> {
    if !output_directory.is_dir() {
        return Err(ConversionError::Validation(format!(
            "Output directory {} does not exist",
            output_directory.display()
        )));
    }
    if let Some(parent) = archive_path.parent() {
        if parent.starts_with(output_directory) {
            return Err(ConversionError::Validation(format!(
                "Archive {} must not be inside the packaged directory",
                archive_path.display()
            )));
        }
    }

    match write_archive(output_directory, archive_path) {
        Ok(entries) => {
            info!("Created conversion ZIP file: {} ({} entries)", archive_path.display(), entries);
            Ok(archive_path.to_path_buf())
        }
        Err(e) => {
            error!("Error creating ZIP file {}: {}", archive_path.display(), e);
            let _ = fs::remove_file(archive_path);
            Err(ConversionError::Packaging(format!("{}: {}", archive_path.display(), e)))
        }
    }
}

fn write_archive(output_directory: &Path, archive_path: &Path) -> Result<usize> {
    if let Some(parent) = archive_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut zip = ZipWriter::new(File::create(archive_path)?);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut entries = 0;

    for entry in WalkDir::new(output_directory).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(output_directory)
            .map_err(|e| ConversionError::Message(e.to_string()))?;
        let name = entry_name(relative);

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)?;
        } else {
            zip.start_file(name, options)?;
            let mut source = File::open(entry.path())?;
            io::copy(&mut source, &mut zip)?;
        }
        entries += 1;
    }

    zip.finish()?;
    Ok(entries)
}

/// Archive entry names always use `/`, whatever the host separator
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn sample_tree(root: &Path) {
        fs::create_dir_all(root.join("src/empty")).unwrap();
        fs::write(root.join("README.txt"), "readme").unwrap();
        fs::write(root.join("src/lib.txt"), "pub fn lib() {}").unwrap();
    }

    #[test]
    fn test_entries_are_relative() -> Result<()> {
        let dir = TempDir::new()?;
        let tree = dir.path().join("demo_converted");
        sample_tree(&tree);

        let archive = package(&tree, "demo")?;
        assert_eq!(archive, dir.path().join("demo_converted.zip"));

        let mut zip = ZipArchive::new(File::open(&archive)?)?;
        let mut names: Vec<String> = zip.file_names().map(str::to_owned).collect();
        names.sort();
        assert_eq!(names, ["README.txt", "src/", "src/empty/", "src/lib.txt"]);

        let mut content = String::new();
        zip.by_name("src/lib.txt")?.read_to_string(&mut content)?;
        assert_eq!(content, "pub fn lib() {}");
        assert_eq!(zip.by_name("README.txt")?.compression(), CompressionMethod::Deflated);
        Ok(())
    }

    #[test]
    fn test_invalid_archive_names() {
        let dir = TempDir::new().unwrap();
        sample_tree(dir.path());
        assert!(matches!(package(dir.path(), " "), Err(ConversionError::Validation(_))));
        assert!(matches!(package(dir.path(), "../x"), Err(ConversionError::Validation(_))));
    }

    #[test]
    fn test_archive_inside_tree_is_rejected() {
        let dir = TempDir::new().unwrap();
        sample_tree(dir.path());
        let result = package_to(dir.path(), &dir.path().join("self.zip"));
        assert!(matches!(result, Err(ConversionError::Validation(_))));
    }

    #[test]
    fn test_unwritable_destination_is_packaging_error() {
        let dir = TempDir::new().unwrap();
        let tree = dir.path().join("tree");
        sample_tree(&tree);
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = package_to(&tree, &blocker.join("out.zip"));
        assert!(matches!(result, Err(ConversionError::Packaging(_))));
        assert!(result.unwrap_err().is_terminal());
    }
}
