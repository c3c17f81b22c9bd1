use crate::logger;

use googletest::assert_that;
use googletest::prelude::{contains_substring, starts_with};
use kb_config::LogLevel;
use log::LevelFilter;
use tempfile::TempDir;

// The global logger can only be installed once per test binary, so this is
// the only test that calls `initialize`.
#[test]
fn given_log_file_when_initialized_then_records_written_in_line_format() {
    // Given
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kb.log");

    // When
    logger::initialize(LogLevel(LevelFilter::Info), Some(path.clone()), true).unwrap();
    log::info!("board 4 loaded");
    log::debug!("filtered out");
    log::logger().flush();

    // Then
    let contents = std::fs::read_to_string(&path).unwrap();
    let line = contents
        .lines()
        .find(|line| line.contains("board 4 loaded"))
        .unwrap();
    assert_that!(line, starts_with("["));
    assert_that!(line, contains_substring(" - INFO] board 4 loaded ["));
    assert_that!(line, contains_substring("logger.rs:"));
    assert!(!contents.contains("filtered out"));
    assert!(!contents.contains('\u{1b}'));
}
