use chrono::Local;
use colored::Colorize;
use fern::Dispatch;
use log::LevelFilter;
use std::fs::{OpenOptions, create_dir_all};
use std::path::Path;

/// Initialize the global logger.
///
/// Logs always go to stdout; when `log_file` is given, the same lines are
/// appended to that file (its parent directory is created if needed).
pub fn init_logger(log_level: &str, log_file: Option<&str>) {
    let level: LevelFilter = log_level.parse().unwrap_or(LevelFilter::Info);

    let mut dispatch = Dispatch::new()
        .format(|out, message, record| {
            let level_str = match record.level() {
                log::Level::Error => "ERROR".red(),
                log::Level::Warn => "WARN".yellow(),
                log::Level::Info => "INFO".green(),
                log::Level::Debug => "DEBUG".cyan(),
                log::Level::Trace => "TRACE".normal(),
            };

            out.finish(format_args!(
                "[{}][{}][{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                level_str,
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(path) = log_file {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                create_dir_all(parent).expect("Failed to create log directory");
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("Cannot open log file");

        dispatch = dispatch.chain(file);
    }

    dispatch.apply().expect("Failed to initialize logger");
}
