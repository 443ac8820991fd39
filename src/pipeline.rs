use crate::config::Config;
use crate::converter::{self, Statistics};
use crate::error::{ConversionError, Result};
use crate::packager;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One conversion request coming from the acquisition layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Name used for the archive file
    pub project_name: String,
    /// Fully materialised source tree
    pub source_directory: PathBuf,
}

/// Everything a caller needs to persist the result of a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub request_id: Uuid,
    pub zip_path: PathBuf,
    /// Converted tree, present only when the configuration keeps it
    pub output_directory: Option<PathBuf>,
    pub stats: Statistics,
}

impl ConversionRequest {
    pub fn new(project_name: impl Into<String>, source_directory: impl Into<PathBuf>) -> Self {
        Self {
            project_name: project_name.into(),
            source_directory: source_directory.into(),
        }
    }
}

/// Converts and packages one request on a blocking worker
///
/// Output and archive locations are namespaced by a fresh request id, so
/// concurrent requests never share files.
pub async fn run_conversion(request: ConversionRequest, config: &Config) -> Result<ConversionOutcome> {
    let request_id = Uuid::new_v4();
    let archive_dir = config.archive_dir.join(request_id.to_string());
    let keep_output = config.keep_output.then(|| config.output_dir.join(request_id.to_string()));

    info!("Conversion request {} for '{}'", request_id, request.project_name);
    config.ensure_directories_exist().await?;

    let outcome = tokio::task::spawn_blocking(move || {
        convert_and_package(&request, keep_output.as_deref(), &archive_dir)
    })
    .await
    .map_err(|e| ConversionError::Task(e.to_string()))?;

    match outcome {
        Ok((zip_path, output_directory, stats)) => Ok(ConversionOutcome {
            request_id,
            zip_path,
            output_directory,
            stats,
        }),
        Err(e) => {
            error!("Codebase conversion failed for request {}: {}", request_id, e);
            Err(e)
        }
    }
}

fn convert_and_package(
    request: &ConversionRequest,
    keep_output: Option<&Path>,
    archive_dir: &Path,
) -> Result<(PathBuf, Option<PathBuf>, Statistics)> {
    let archive_path = archive_dir.join(packager::archive_file_name(&request.project_name));

    match keep_output {
        Some(output_base) => {
            let (output_dir, stats) = converter::convert(&request.source_directory, output_base)?;
            let zip_path = packager::package_to(&output_dir, &archive_path)?;
            Ok((zip_path, Some(output_dir), stats))
        }
        None => {
            let scratch = tempfile::Builder::new()
                .prefix("conversion_")
                .tempdir()
                .map_err(|e| ConversionError::OutputRoot(e.to_string()))?;
            let (output_dir, stats) = converter::convert(&request.source_directory, scratch.path())?;
            let zip_path = packager::package_to(&output_dir, &archive_path)?;
            Ok((zip_path, None, stats))
        }
    }
}
