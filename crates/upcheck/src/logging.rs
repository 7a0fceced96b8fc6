#[cfg(debug_assertions)]
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use simplelog::{CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, WriteLogger};
use std::fs::OpenOptions;
use std::path::Path;

/// Halve the log file, keeping the newest lines, once it exceeds
/// `max_log_size` bytes.
fn trim_log_file_if_oversized(log_path: &Path, max_log_size: u64) {
    let Ok(metadata) = std::fs::metadata(log_path) else {
        return;
    };
    if metadata.len() <= max_log_size {
        return;
    }
    let Ok(contents) = std::fs::read(log_path) else {
        return;
    };

    let half = contents.len() / 2;
    let keep_from = contents[half..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(half, |pos| half + pos + 1);
    let _ = std::fs::write(log_path, &contents[keep_from..]);
}

fn level_for(debug_enabled: bool) -> LevelFilter {
    if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the process logger: the log file always, plus the terminal in
/// debug builds. Failing to open the log file is not fatal.
pub fn init_logging(log_path: Option<&Path>, debug_enabled: bool, max_log_size: u64) {
    let level = level_for(debug_enabled);
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("upcheck")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    #[cfg(debug_assertions)]
    loggers.push(TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));

    if let Some(log_path) = log_path {
        trim_log_file_if_oversized(log_path, max_log_size);
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(log_path) {
            loggers.push(WriteLogger::new(level, config, file));
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
    log::set_max_level(level);

    if let Some(log_path) = log_path {
        log::debug!("Logging to {}", log_path.display());
    }
}
