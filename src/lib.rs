//! code2text - turns a source repository into a mirrored tree of `.txt` files
//!
//! The conversion engine walks an untrusted directory tree, classifies each
//! file as text or binary, transcodes text through an ordered list of
//! encodings and writes either a converted copy with a provenance header or a
//! placeholder. A summary report is written next to the output and the tree
//! can be packaged as a ZIP archive.
//!
//! ## Usage
//! ```rust,no_run
//! use std::path::Path;
//!
//! fn example() -> code2text::Result<()> {
//!     let (output_dir, stats) = code2text::convert(Path::new("/srv/repos/app"), Path::new("/srv/out"))?;
//!     let archive = code2text::package(&output_dir, "app")?;
//!     println!("{} files converted into {}", stats.files_converted, archive.display());
//!     Ok(())
//! }
//! ```

/// Configuration module for the application
pub mod config;
/// Conversion engine
pub mod converter;
/// Error handling types and utilities
pub mod error;
/// Logging configuration and utilities
pub mod logging;
/// ZIP packaging of converted trees
pub mod packager;
/// Conversion request orchestration
pub mod pipeline;
/// Repository language and size scan
pub mod scanner;
/// Conversion summary report
pub mod summary;
/// Terminal UI helpers
pub mod ui;
/// Utilities (path normalization)
pub mod utils;

// Re-export common types
pub use config::Config;
pub use converter::{convert, Converter, Outcome, Statistics};
pub use error::{ConversionError, Result};
pub use packager::{package, package_to};
pub use pipeline::{run_conversion, ConversionOutcome, ConversionRequest};
pub use scanner::{scan_repository, RepositoryScan};
