use std::fs::OpenOptions;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use crate::config::Settings;

/// Log target of the one-line-per-request history records.
pub const HISTORY_TARGET: &str = "pipesmith::history";

/// Longest request summary written to the history file, in characters.
const MAX_SUMMARY: usize = 200;

/// Parse a configured level name, falling back to `warn`.
pub fn level_filter(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Warn)
}

/// Install the terminal logger on stderr and, when configured, the history
/// file logger. Best-effort: a history file that cannot be opened is skipped
/// and a logger that is already installed is kept.
pub fn init(settings: &Settings, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        level_filter(&settings.log_level)
    };

    let term_config = ConfigBuilder::new()
        .add_filter_ignore_str(HISTORY_TARGET)
        .build();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        term_config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(file) = open_history(&settings.history_log) {
        let history_config = ConfigBuilder::new()
            .add_filter_allow_str(HISTORY_TARGET)
            .set_time_format_rfc3339()
            .build();
        loggers.push(WriteLogger::new(LevelFilter::Info, history_config, file));
    }

    let _ = CombinedLogger::init(loggers);
}

fn open_history(path: &str) -> Option<std::fs::File> {
    if path.trim().is_empty() {
        return None;
    }
    let path = shellexpand::tilde(path).into_owned();
    let path = Path::new(&path);
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Record one handled request in the history file.
pub fn log_request(action: &str, summary: &str, outcome: &str) {
    log::info!(
        target: HISTORY_TARGET,
        "{action}\t{summary}\t{outcome}",
        summary = one_line(summary),
        outcome = one_line(outcome),
    );
}

/// Compact single-line form: newlines become `; `, long text is cut.
fn one_line(text: &str) -> String {
    let flat = text.replace('\n', "; ");
    if flat.chars().count() > MAX_SUMMARY {
        let mut cut: String = flat.chars().take(MAX_SUMMARY).collect();
        cut.push_str("...");
        cut
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(level_filter("debug"), LevelFilter::Debug);
        assert_eq!(level_filter("OFF"), LevelFilter::Off);
        assert_eq!(level_filter(" info "), LevelFilter::Info);
        assert_eq!(level_filter("loud"), LevelFilter::Warn);
    }

    #[test]
    fn one_line_flattens() {
        assert_eq!(one_line("a\nb\nc"), "a; b; c");
    }

    #[test]
    fn one_line_truncates() {
        let long = "x".repeat(300);
        let out = one_line(&long);
        assert_eq!(out.chars().count(), MAX_SUMMARY + 3);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn empty_history_path_disables() {
        assert!(open_history("").is_none());
        assert!(open_history("   ").is_none());
    }
}
