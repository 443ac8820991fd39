//! Codebase-to-text conversion engine
//!
//! Mirrors a source tree into `{source_name}_converted` under an output base,
//! replacing every file with a `.txt` rendition or a placeholder explaining why
//! it was not converted, and finishes with a `CONVERSION_SUMMARY.txt` report.
//! Failures below the output root are recorded in [`Statistics`] and never
//! abort the run.

use crate::error::{ConversionError, Result};
use crate::summary::write_summary_best_effort;
use log::{debug, error, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Binary content sniffing
pub mod detect;
/// Encoding fallback decoding
pub mod encoding;
/// Single-file conversion
pub mod file;
/// Static exclusion tables
pub mod filters;
/// Run statistics
pub mod stats;

pub use encoding::Encoding;
pub use file::{FileConverter, MAX_FILE_SIZE};
pub use stats::{FileReport, Outcome, Statistics};

/// Suffix appended to the source directory name to form the output directory
pub const OUTPUT_DIR_SUFFIX: &str = "_converted";

/// Converts one source tree into a mirrored tree of text files
#[derive(Debug, Clone)]
pub struct Converter {
    source_directory: PathBuf,
    output_base_directory: PathBuf,
}

impl Converter {
    /// Creates a converter after checking that the source is a readable directory
    pub fn new(source_directory: &Path, output_base_directory: &Path) -> Result<Self> {
        let source_directory = fs::canonicalize(source_directory).map_err(|e| {
            ConversionError::Validation(format!(
                "Source directory {} is not accessible: {}",
                source_directory.display(),
                e
            ))
        })?;
        if !source_directory.is_dir() {
            return Err(ConversionError::Validation(format!(
                "Source path {} is not a directory",
                source_directory.display()
            )));
        }

        Ok(Self {
            source_directory,
            output_base_directory: output_base_directory.to_path_buf(),
        })
    }

    /// Canonical path of the source tree
    pub fn source_directory(&self) -> &Path {
        &self.source_directory
    }

    /// Directory the converted tree is written to
    pub fn output_directory(&self) -> PathBuf {
        let project = self
            .source_directory
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string());
        self.output_base_directory.join(format!("{}{}", project, OUTPUT_DIR_SUFFIX))
    }

    /// Runs the conversion, returning the output directory and the run statistics
    ///
    /// Only a failure to prepare the output directory is returned as an error.
    pub fn convert(&self) -> Result<(PathBuf, Statistics)> {
        let started = Instant::now();
        let output_root = self.prepare_output_root()?;

        info!(
            "Starting conversion of {} to {}",
            self.source_directory.display(),
            output_root.display()
        );

        let mut stats = Statistics::default();
        let files = FileConverter::new(&self.source_directory, &output_root);
        self.process_directory(&files, &self.source_directory, &output_root, &output_root, &mut stats);

        stats.conversion_duration_seconds = started.elapsed().as_secs_f64();
        write_summary_best_effort(&self.source_directory, &output_root, &stats);

        info!(
            "Conversion completed in {:.2}s. Converted {} files, skipped {} files",
            stats.conversion_duration_seconds,
            stats.files_converted,
            stats.files_skipped()
        );

        Ok((output_root, stats))
    }

    /// Creates an empty output directory, removing output of a previous run
    fn prepare_output_root(&self) -> Result<PathBuf> {
        let output_root = self.output_directory();
        let output_error = |action: &str, e: io::Error| {
            ConversionError::OutputRoot(format!("Failed to {} {}: {}", action, output_root.display(), e))
        };

        if output_root.exists() {
            debug!("Removing previous output at {}", output_root.display());
            fs::remove_dir_all(&output_root).map_err(|e| output_error("remove", e))?;
        }
        fs::create_dir_all(&output_root).map_err(|e| output_error("create", e))?;
        fs::canonicalize(&output_root).map_err(|e| output_error("resolve", e))
    }

    /// Mirrors `source_dir` into `target_dir`, depth first in name order
    fn process_directory(
        &self,
        files: &FileConverter<'_>,
        source_dir: &Path,
        target_dir: &Path,
        output_root: &Path,
        stats: &mut Statistics,
    ) {
        let entries = match read_sorted(source_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                warn!("Permission denied accessing directory {}: {}", source_dir.display(), e);
                stats.record_error(format!("Permission denied: {}", source_dir.display()));
                return;
            }
            Err(e) => {
                error!("Error processing directory {}: {}", source_dir.display(), e);
                stats.record_error(format!("Directory error {}: {}", source_dir.display(), e));
                return;
            }
        };

        // Subdirectories are mirrored before any file of this directory is
        // converted, so a file can never claim the name of a sibling directory.
        let mut steps = Vec::with_capacity(entries.len());
        for entry in entries {
            let path = entry.path();
            let name = entry.file_name();

            let kind = match entry_kind(&entry) {
                Ok(kind) => kind,
                Err(e) => {
                    error!("Error inspecting {}: {}", path.display(), e);
                    stats.record_error(format!("File error {}: {}", path.display(), e));
                    continue;
                }
            };

            match kind {
                EntryKind::Dir => {
                    if filters::is_excluded_dir(&name) {
                        debug!("Skipping excluded directory: {}", path.display());
                        continue;
                    }
                    if path == output_root {
                        debug!("Skipping output directory nested in source: {}", path.display());
                        continue;
                    }

                    let new_target = target_dir.join(&name);
                    if let Err(e) = fs::create_dir_all(&new_target) {
                        error!("Error creating directory {}: {}", new_target.display(), e);
                        stats.record_error(format!("Directory error {}: {}", path.display(), e));
                        continue;
                    }
                    stats.directories_processed += 1;
                    steps.push(Step::Descend(path, new_target));
                }
                EntryKind::File => steps.push(Step::Convert(path)),
                EntryKind::Other => debug!("Skipping special file or symlinked directory: {}", path.display()),
            }
        }

        for step in steps {
            match step {
                Step::Descend(path, new_target) => {
                    self.process_directory(files, &path, &new_target, output_root, stats)
                }
                Step::Convert(path) => stats.record(files.convert(&path, target_dir)),
            }
        }
    }
}

/// Converts `source_directory` into `{name}_converted` under `output_base_directory`
pub fn convert(source_directory: &Path, output_base_directory: &Path) -> Result<(PathBuf, Statistics)> {
    Converter::new(source_directory, output_base_directory)?.convert()
}

enum EntryKind {
    Dir,
    File,
    Other,
}

/// Work left for one entry once its mirrored directory exists
enum Step {
    Descend(PathBuf, PathBuf),
    Convert(PathBuf),
}

/// Symlinks to files are converted; symlinked directories are not followed
///
/// A dangling symlink is handed to the file converter, which reports it.
fn entry_kind(entry: &fs::DirEntry) -> io::Result<EntryKind> {
    let file_type = entry.file_type()?;
    if file_type.is_dir() {
        return Ok(EntryKind::Dir);
    }
    if file_type.is_file() {
        return Ok(EntryKind::File);
    }
    if !file_type.is_symlink() {
        return Ok(EntryKind::Other);
    }

    match fs::metadata(entry.path()) {
        Ok(target) if target.is_file() => Ok(EntryKind::File),
        Ok(_) => Ok(EntryKind::Other),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(EntryKind::File),
        Err(e) => Err(e),
    }
}

fn read_sorted(dir: &Path) -> io::Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_directory_name() -> Result<()> {
        let dir = TempDir::new()?;
        let source = dir.path().join("my-app");
        fs::create_dir(&source)?;

        let converter = Converter::new(&source, &dir.path().join("out"))?;
        assert_eq!(converter.output_directory(), dir.path().join("out").join("my-app_converted"));
        Ok(())
    }

    #[test]
    fn test_missing_source_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = convert(&dir.path().join("nope"), dir.path());
        assert!(matches!(result, Err(ConversionError::Validation(_))));
    }

    #[test]
    fn test_file_source_is_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("single.rs");
        fs::write(&file, "fn main() {}").unwrap();
        assert!(matches!(convert(&file, dir.path()), Err(ConversionError::Validation(_))));
    }

    #[test]
    fn test_stale_output_is_replaced() -> Result<()> {
        let dir = TempDir::new()?;
        let source = dir.path().join("proj");
        fs::create_dir(&source)?;
        fs::write(source.join("a.rs"), "fn a() {}")?;
        let stale = dir.path().join("out").join("proj_converted").join("stale.txt");
        fs::create_dir_all(stale.parent().unwrap())?;
        fs::write(&stale, "old")?;

        let (output, stats) = convert(&source, &dir.path().join("out"))?;
        assert!(!stale.exists());
        assert!(output.join("a.txt").exists());
        assert_eq!(stats.files_converted, 1);
        Ok(())
    }

    #[test]
    fn test_output_nested_in_source_is_not_walked() -> Result<()> {
        let dir = TempDir::new()?;
        let source = dir.path().join("proj");
        fs::create_dir(&source)?;
        fs::write(source.join("a.rs"), "fn a() {}")?;

        let (output, stats) = convert(&source, &source)?;
        assert!(output.starts_with(fs::canonicalize(&source)?));
        assert_eq!(stats.total_files_processed, 1);
        assert_eq!(stats.directories_processed, 0);
        Ok(())
    }

    #[test]
    fn test_file_never_claims_sibling_directory_name() -> Result<()> {
        let dir = TempDir::new()?;
        let source = dir.path().join("proj");
        fs::create_dir_all(source.join("notes.txt"))?;
        fs::write(source.join("notes.md"), "# notes")?;
        fs::write(source.join("notes.txt").join("inner.rs"), "fn inner() {}")?;

        let (output, stats) = convert(&source, &dir.path().join("out"))?;
        assert!(stats.conversion_errors.is_empty(), "{:?}", stats.conversion_errors);
        assert_eq!(stats.total_files_processed, 2);
        assert_eq!(stats.files_converted, 2);
        assert!(output.join("notes.txt").join("inner.txt").is_file());
        assert!(fs::read_to_string(output.join("notes_1.txt"))?.ends_with("# notes"));
        Ok(())
    }

    #[test]
    fn test_output_root_failure_is_terminal() -> Result<()> {
        let dir = TempDir::new()?;
        let source = dir.path().join("proj");
        fs::create_dir(&source)?;
        // A regular file where the output base should be
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "")?;

        let result = convert(&source, &blocker);
        assert!(matches!(result, Err(ConversionError::OutputRoot(_))));
        Ok(())
    }
}
