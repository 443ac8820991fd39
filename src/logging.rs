use crate::error::{ConversionError, Result};
use chrono::Local;
use env_logger::{Builder, Env};
use log::{Level, LevelFilter, Record};
use std::io::Write;
use yansi::Paint;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Installs the global logger at `level`
///
/// Directives in `RUST_LOG` are applied on top of `level`, so they win for the
/// modules they name.
pub fn init(level: LevelFilter) -> Result<()> {
    Builder::new()
        .filter_level(level)
        .parse_env(Env::default())
        .format(|buf, record| writeln!(buf, "{}", format_log(record)))
        .try_init()
        .map_err(|e| ConversionError::Config(format!("Logger already initialised: {}", e)))
}

/// Parses a level name such as `warn` or `DEBUG`
///
/// Unknown names are rejected rather than silently widened to `info`.
pub fn parse_log_level(level: &str) -> Result<LevelFilter> {
    level.trim().parse().map_err(|_| {
        ConversionError::Validation(format!(
            "Unknown log level '{}', expected one of off, error, warn, info, debug, trace",
            level
        ))
    })
}

/// Renders a record as `[timestamp] LEVEL [target] message`
pub fn format_log(record: &Record) -> String {
    let target = match record.target() {
        "" => record.module_path().unwrap_or("unknown"),
        target => target,
    };

    format!(
        "[{}] {} [{}] {}",
        Local::now().format(TIMESTAMP_FORMAT),
        level_label(record.level()),
        target,
        record.args()
    )
}

fn level_label(level: Level) -> Paint<&'static str> {
    match level {
        Level::Error => Paint::red("ERROR").bold(),
        Level::Warn => Paint::yellow("WARN ").bold(),
        Level::Info => Paint::green("INFO "),
        Level::Debug => Paint::blue("DEBUG"),
        Level::Trace => Paint::magenta("TRACE").dimmed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("error").unwrap(), LevelFilter::Error);
        assert_eq!(parse_log_level("WARN").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_log_level(" debug ").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_log_level("off").unwrap(), LevelFilter::Off);
    }

    #[test]
    fn test_parse_log_level_rejects_unknown() {
        let err = parse_log_level("loud").unwrap_err();
        assert!(matches!(err, ConversionError::Validation(_)));
        assert!(err.to_string().contains("'loud'"));
    }

    #[test]
    fn test_format_log_contains_target_and_message() {
        Paint::disable();
        let line = format_log(
            &Record::builder()
                .args(format_args!("converted 3 files"))
                .level(Level::Info)
                .target("code2text::converter")
                .build(),
        );
        assert!(line.contains(" INFO  [code2text::converter] "));
        assert!(line.ends_with("converted 3 files"));
    }
}
