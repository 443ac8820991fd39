use super::encoding::Encoding;
use serde::{Deserialize, Serialize};

/// Counters and error log accumulated over one conversion run
///
/// `files_converted + files_skipped_binary + files_skipped_encoding` never
/// exceeds `total_files_processed`; the gap is the number of files that failed
/// with an unexpected error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Files visited outside excluded directories
    pub total_files_processed: u64,
    /// Files written as converted text
    pub files_converted: u64,
    /// Files skipped as oversized, by extension, or by content sniffing
    pub files_skipped_binary: u64,
    /// Files that could not be read or decoded
    pub files_skipped_encoding: u64,
    /// OS metadata files, replaced by a placeholder
    pub files_skipped_excluded: u64,
    /// Directories mirrored into the output tree, the root excluded
    pub directories_processed: u64,
    /// Combined size of every processed file
    pub total_size_bytes: u64,
    /// Wall-clock duration of the run, set once at the end
    pub conversion_duration_seconds: f64,
    /// Descriptions of recovered per-file and per-directory failures
    pub conversion_errors: Vec<String>,
}

/// How a single file was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Written as text, decoded with the given encoding
    Converted(Encoding),
    /// Oversized, excluded by extension, or sniffed as binary; placeholder written
    SkippedBinary,
    /// Readable as binary-safe but not decodable; placeholder written
    SkippedEncoding,
    /// OS metadata file; placeholder written
    Excluded,
    /// An unexpected error stopped processing of the file
    Failed,
}

/// Result of handling one file, applied to [`Statistics`] by the walker
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub outcome: Outcome,
    /// Size in bytes, zero if it could not be determined
    pub size: u64,
    /// Error to record in `conversion_errors`
    pub note: Option<String>,
}

impl FileReport {
    pub fn new(outcome: Outcome, size: u64) -> Self {
        Self { outcome, size, note: None }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl Statistics {
    /// Folds one file's report into the counters
    pub fn record(&mut self, report: FileReport) {
        self.total_files_processed += 1;
        self.total_size_bytes += report.size;
        match report.outcome {
            Outcome::Converted(_) => self.files_converted += 1,
            Outcome::SkippedBinary => self.files_skipped_binary += 1,
            Outcome::SkippedEncoding => self.files_skipped_encoding += 1,
            Outcome::Excluded => self.files_skipped_excluded += 1,
            Outcome::Failed => {}
        }

        if let Some(note) = report.note {
            self.conversion_errors.push(note);
        }
    }

    /// Records a recovered error that is not tied to a file outcome
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.conversion_errors.push(message.into());
    }

    /// Files skipped for any reason other than exclusion
    pub fn files_skipped(&self) -> u64 {
        self.files_skipped_binary + self.files_skipped_encoding
    }

    /// Converted files as a percentage of processed files
    pub fn success_rate(&self) -> f64 {
        self.files_converted as f64 / self.total_files_processed.max(1) as f64 * 100.0
    }

    /// Adds the counters and errors of a partial accumulator
    ///
    /// Durations are not summed; the caller sets the overall duration.
    pub fn merge(&mut self, other: Statistics) {
        self.total_files_processed += other.total_files_processed;
        self.files_converted += other.files_converted;
        self.files_skipped_binary += other.files_skipped_binary;
        self.files_skipped_encoding += other.files_skipped_encoding;
        self.files_skipped_excluded += other.files_skipped_excluded;
        self.directories_processed += other.directories_processed;
        self.total_size_bytes += other.total_size_bytes;
        self.conversion_errors.extend(other.conversion_errors);
    }
}
