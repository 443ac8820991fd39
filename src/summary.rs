//! Plain-text report written at the root of every converted tree.

use crate::converter::filters::{sorted_listing, EXCLUDED_DIRS, EXCLUDED_EXTENSIONS};
use crate::converter::Statistics;
use crate::error::Result;
use chrono::Local;
use log::{error, info};
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the report inside the output directory
pub const SUMMARY_FILE_NAME: &str = "CONVERSION_SUMMARY.txt";

/// Errors listed individually before the rest are counted
pub const MAX_LISTED_ERRORS: usize = 10;

/// Renders the summary for a finished run
pub fn render_summary(source_dir: &Path, output_dir: &Path, stats: &Statistics) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = write!(
        out,
        "# Codebase Conversion Summary\n\n\
         ## Conversion Details\n\
         - Source Directory: {}\n\
         - Output Directory: {}\n\
         - Conversion Date: {}\n\
         - Conversion Duration: {:.2} seconds\n\n\
         ## Statistics\n\
         - Total Files Processed: {}\n\
         - Files Successfully Converted: {}\n\
         - Files Skipped (Binary): {}\n\
         - Files Skipped (Encoding Issues): {}\n\
         - Files Skipped (Excluded): {}\n\
         - Total Size Processed: {:.2} MB ({} bytes)\n\
         - Directories Processed: {}\n\n\
         ## Conversion Rate\n\
         - Success Rate: {:.1}%\n\n\
         ## Excluded Directories\n\
         {}\n\n\
         ## Excluded File Extensions\n\
         {}\n",
        source_dir.display(),
        output_dir.display(),
        Local::now().to_rfc3339(),
        stats.conversion_duration_seconds,
        stats.total_files_processed,
        stats.files_converted,
        stats.files_skipped_binary,
        stats.files_skipped_encoding,
        stats.files_skipped_excluded,
        stats.total_size_bytes as f64 / 1024.0 / 1024.0,
        stats.total_size_bytes,
        stats.directories_processed,
        stats.success_rate(),
        sorted_listing(EXCLUDED_DIRS),
        sorted_listing(EXCLUDED_EXTENSIONS),
    );

    if !stats.conversion_errors.is_empty() {
        out.push_str("\n## Conversion Errors\n");
        for err in stats.conversion_errors.iter().take(MAX_LISTED_ERRORS) {
            let _ = writeln!(out, "- {}", err);
        }
        let hidden = stats.conversion_errors.len().saturating_sub(MAX_LISTED_ERRORS);
        if hidden > 0 {
            let _ = writeln!(out, "... and {} more errors", hidden);
        }
    }

    out
}

/// Writes the summary into `output_dir`
pub fn write_summary(source_dir: &Path, output_dir: &Path, stats: &Statistics) -> Result<PathBuf> {
    let path = output_dir.join(SUMMARY_FILE_NAME);
    fs::write(&path, render_summary(source_dir, output_dir, stats))?;
    info!("Wrote conversion summary to {}", path.display());
    Ok(path)
}

/// Writes the summary, logging instead of failing
pub fn write_summary_best_effort(source_dir: &Path, output_dir: &Path, stats: &Statistics) -> Option<PathBuf> {
    match write_summary(source_dir, output_dir, stats) {
        Ok(path) => Some(path),
        Err(e) => {
            error!("Error creating conversion summary: {}", e);
            None
        }
    }
}
