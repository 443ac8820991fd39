use super::detect::sniff_file;
use super::encoding::{decode_with_fallback, Encoding};
use super::filters::{has_excluded_extension, is_known_text_extension, is_os_metadata_file};
use super::stats::{FileReport, Outcome};
use crate::summary::SUMMARY_FILE_NAME;
use chrono::Local;
use log::{debug, info, warn};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Files larger than this are skipped as binary without being opened
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

const BANNER: &str = "// ======================================";
const OUTPUT_EXTENSION: &str = ".txt";

/// Converts single files of one source tree into the mirrored output tree
pub struct FileConverter<'a> {
    source_root: &'a Path,
    output_root: &'a Path,
}

impl<'a> FileConverter<'a> {
    pub fn new(source_root: &'a Path, output_root: &'a Path) -> Self {
        Self { source_root, output_root }
    }

    /// Classifies `source_file` and writes exactly one `.txt` into `target_dir`
    ///
    /// Never fails: every problem is folded into the returned report.
    pub fn convert(&self, source_file: &Path, target_dir: &Path) -> FileReport {
        let target = self.unique_target(target_dir, source_file);

        let size = match fs::metadata(source_file) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                warn!("Could not stat {}: {}", source_file.display(), e);
                let report = FileReport::new(Outcome::Failed, 0)
                    .with_note(format!("File error {}: {}", source_file.display(), e));
                return self.placeholder(report, source_file, 0, &target, &format!("Unreadable file: {}", e));
            }
        };

        if is_os_metadata_file(source_file.file_name().unwrap_or_default()) {
            debug!("Skipping OS metadata file: {}", source_file.display());
            let report = FileReport::new(Outcome::Excluded, size);
            return self.placeholder(report, source_file, size, &target, "OS metadata file");
        }

        if size > MAX_FILE_SIZE {
            info!("Skipping large file (>10MB): {}", source_file.display());
            let report = FileReport::new(Outcome::SkippedBinary, size);
            return self.placeholder(report, source_file, size, &target, "File exceeds the 10 MiB size limit");
        }

        if has_excluded_extension(source_file) {
            debug!("Skipping binary file by extension: {}", source_file.display());
            let report = FileReport::new(Outcome::SkippedBinary, size);
            return self.placeholder(report, source_file, size, &target, "Binary file type");
        }

        match sniff_file(source_file) {
            Ok(false) => {}
            Ok(true) => {
                debug!("Skipping binary file by content: {}", source_file.display());
                let report = FileReport::new(Outcome::SkippedBinary, size);
                return self.placeholder(report, source_file, size, &target, "Binary file");
            }
            Err(e) => {
                warn!("Could not open {}: {}", source_file.display(), e);
                let report = FileReport::new(Outcome::SkippedBinary, size)
                    .with_note(format!("File error {}: {}", source_file.display(), e));
                return self.placeholder(report, source_file, size, &target, &format!("Unreadable file: {}", e));
            }
        }

        let bytes = match fs::read(source_file) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Could not read {}: {}", source_file.display(), e);
                let report = FileReport::new(Outcome::SkippedEncoding, size)
                    .with_note(format!("File error {}: {}", source_file.display(), e));
                return self.placeholder(report, source_file, size, &target, "Could not decode with any encoding");
            }
        };

        let Some((text, encoding)) = decode_with_fallback(&bytes) else {
            warn!("Could not decode file with any encoding: {}", source_file.display());
            let report = FileReport::new(Outcome::SkippedEncoding, size);
            return self.placeholder(report, source_file, size, &target, "Could not decode with any encoding");
        };

        let mut content = provenance_header(self.relative(source_file), size, encoding);
        content.push_str(&text);

        match fs::write(&target, content) {
            Ok(()) => {
                if !is_known_text_extension(source_file) {
                    debug!("Converted file with unlisted extension: {}", source_file.display());
                }
                debug!("Converted {} using {} encoding", source_file.display(), encoding);
                FileReport::new(Outcome::Converted(encoding), size)
            }
            Err(e) => FileReport::new(Outcome::Failed, size)
                .with_note(format!("File error {}: {}", source_file.display(), e)),
        }
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(self.source_root).unwrap_or(path)
    }

    /// Picks `stem.txt`, then `stem_1.txt`, `stem_2.txt`, ... in `target_dir`
    fn unique_target(&self, target_dir: &Path, source_file: &Path) -> PathBuf {
        let stem = source_file.file_stem().unwrap_or_else(|| OsStr::new("file"));
        let in_root = target_dir == self.output_root;
        let taken = |candidate: &Path| {
            candidate.exists()
                || (in_root && candidate.file_name() == Some(OsStr::new(SUMMARY_FILE_NAME)))
        };

        let mut name = OsString::from(stem);
        name.push(OUTPUT_EXTENSION);
        let mut target = target_dir.join(&name);

        let mut counter = 1u32;
        while taken(&target) {
            let mut name = OsString::from(stem);
            name.push(format!("_{}{}", counter, OUTPUT_EXTENSION));
            target = target_dir.join(name);
            counter += 1;
        }
        target
    }

    fn placeholder(
        &self,
        mut report: FileReport,
        source_file: &Path,
        size: u64,
        target: &Path,
        reason: &str,
    ) -> FileReport {
        let content = placeholder_content(self.relative(source_file), size, reason);
        if let Err(e) = fs::write(target, content) {
            warn!("Error creating placeholder file {}: {}", target.display(), e);
            if report.note.is_none() {
                report.note = Some(format!("Placeholder error {}: {}", target.display(), e));
            }
        }
        report
    }
}

/// Metadata block prepended to every converted file
pub fn provenance_header(relative_path: &Path, size: u64, encoding: Encoding) -> String {
    format!(
        "{BANNER}\n\
         // Original file: {}\n\
         // File size: {} bytes\n\
         // Encoding: {}\n\
         // Converted on: {}\n\
         {BANNER}\n\n",
        relative_path.display(),
        size,
        encoding,
        Local::now().to_rfc3339(),
    )
}

/// Stand-in content for a file that was not converted
pub fn placeholder_content(relative_path: &Path, size: u64, reason: &str) -> String {
    let name = relative_path.file_name().unwrap_or_default().to_string_lossy();
    format!(
        "{BANNER}\n\
         // PLACEHOLDER FILE\n\
         {BANNER}\n\
         // Original file: {path}\n\
         // File size: {size} bytes\n\
         // Encoding: n/a\n\
         // Reason: {reason}\n\
         // Created on: {created}\n\
         {BANNER}\n\n\
         This file could not be converted to text format.\n\
         Original file: {name}\n\
         Reason: {reason}\n\n\
         If this file is important for your codebase documentation,\n\
         you may need to handle it manually.\n",
        path = relative_path.display(),
        created = Local::now().to_rfc3339(),
    )
}
