use code2text::{
    config::Config,
    converter,
    error::Result,
    logging, packager, scanner,
    ui::ProgressManager,
    utils::normalize_user_input_path,
    RepositoryScan, Statistics,
};
use clap::{Parser, Subcommand};
use colored::*;
use log::LevelFilter;
use serde_json::json;
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML); defaults to the user config directory
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, global = true, value_parser = logging::parse_log_level)]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a source tree into .txt files
    Convert {
        /// Source directory to convert
        source: String,

        /// Base directory for the converted tree
        #[arg(short, long)]
        output: Option<String>,

        /// Also package the converted tree as NAME_converted.zip
        #[arg(long, value_name = "NAME")]
        zip: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report languages, file count and size of a source tree
    Scan {
        /// Source directory to scan
        source: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(&normalize_user_input_path(path))?.with_env_overrides(),
        None => Config::load().unwrap_or_else(|e| {
            eprintln!("[WARNING] {}; using defaults", e);
            Config::default().with_env_overrides()
        }),
    };
    let log_level = match cli.log_level {
        Some(level) => level,
        None => logging::parse_log_level(&config.log_level)?,
    };
    if let Err(e) = logging::init(log_level) {
        eprintln!("[WARNING] {}", e);
    }

    match cli.command {
        Command::Convert { source, output, zip, json } => {
            let output_base = output
                .map(|o| normalize_user_input_path(&o))
                .unwrap_or_else(|| config.output_dir.clone());
            run_convert(&normalize_user_input_path(&source), &output_base, zip.as_deref(), json)
        }
        Command::Scan { source, json } => run_scan(&normalize_user_input_path(&source), json),
    }
}

fn run_convert(source: &Path, output_base: &Path, zip: Option<&str>, json: bool) -> Result<()> {
    let progress = ProgressManager::new(!json);
    let pb = progress.create_spinner(&format!("Converting {}", source.display()));

    let converted = converter::convert(source, output_base);
    let (output_dir, stats) = match converted {
        Ok(result) => result,
        Err(e) => {
            pb.abandon_with_message("Conversion failed");
            return Err(e);
        }
    };

    let archive = match zip {
        Some(name) => {
            pb.set_message("Packaging archive...");
            match packager::package(&output_dir, name) {
                Ok(path) => Some(path),
                Err(e) => {
                    pb.abandon_with_message("Packaging failed");
                    return Err(e);
                }
            }
        }
        None => None,
    };
    pb.finish_with_message("Conversion completed");

    if json {
        let report = json!({
            "output_directory": output_dir,
            "zip_path": archive,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_conversion(&output_dir, archive.as_deref(), &stats);
    }
    Ok(())
}

fn run_scan(source: &Path, json: bool) -> Result<()> {
    let scan = scanner::scan_repository(source)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&scan)?);
    } else {
        print_scan(source, &scan);
    }
    Ok(())
}

fn print_conversion(output_dir: &Path, archive: Option<&Path>, stats: &Statistics) {
    println!("\n{}", "Conversion Summary".bright_green().bold());
    println!("  {:<22} {}", "Output directory:".bright_white(), output_dir.display());
    if let Some(archive) = archive {
        println!("  {:<22} {}", "Archive:".bright_white(), archive.display());
    }
    println!("  {:<22} {}", "Files processed:".bright_white(), stats.total_files_processed);
    println!("  {:<22} {}", "Converted:".bright_white(), stats.files_converted.to_string().green());
    println!("  {:<22} {}", "Skipped (binary):".bright_white(), stats.files_skipped_binary);
    println!("  {:<22} {}", "Skipped (encoding):".bright_white(), stats.files_skipped_encoding);
    println!("  {:<22} {}", "Skipped (excluded):".bright_white(), stats.files_skipped_excluded);
    println!("  {:<22} {}", "Directories:".bright_white(), stats.directories_processed);
    println!("  {:<22} {:.1}%", "Success rate:".bright_white(), stats.success_rate());
    println!("  {:<22} {:.2}s", "Duration:".bright_white(), stats.conversion_duration_seconds);

    if !stats.conversion_errors.is_empty() {
        println!(
            "\n{} {} errors recorded, see CONVERSION_SUMMARY.txt",
            "[WARNING]".bright_yellow(),
            stats.conversion_errors.len()
        );
    }
}

fn print_scan(source: &Path, scan: &RepositoryScan) {
    println!("\n{} {}", "Repository Scan:".bright_green().bold(), source.display());
    println!("  {:<12} {}", "Files:".bright_white(), scan.file_count);
    println!("  {:<12} {} bytes", "Size:".bright_white(), scan.size_bytes);
    if scan.languages.is_empty() {
        println!("  {}", "No recognised languages".yellow());
    }
    for language in &scan.languages {
        println!("  - {:<20} {} files", language.name.bright_cyan(), language.count);
    }
}
