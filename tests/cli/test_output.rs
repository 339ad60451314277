//! Tests for CLI output formatting helpers
//!
//! Tests the output formatting utilities:
//! - Duration formatting (ms, s, m)
//! - Color helpers (respects NO_COLOR)
//! - Completion script generation

use clap_complete::Shell;
use stemdex::cli::commands::completions::write_completions;
use stemdex::cli::output::{colors, format_duration};

// =============================================================================
// format_duration tests
// =============================================================================

/// Test duration formatting with various times
#[test]
fn test_format_duration_various_times() {
    // Milliseconds (under 1 second)
    assert_eq!(format_duration(0.001), "1ms");
    assert_eq!(format_duration(0.1), "100ms");
    assert_eq!(format_duration(0.999), "999ms");

    // Seconds
    assert_eq!(format_duration(1.0), "1.00s");
    assert_eq!(format_duration(59.99), "59.99s");

    // Minutes
    assert_eq!(format_duration(60.0), "1m 0.0s");
    assert_eq!(format_duration(125.5), "2m 5.5s");
}

// =============================================================================
// color helper tests
// =============================================================================

/// Colored strings keep their text
#[test]
fn test_colors_preserve_text() {
    colored::control::set_override(false);

    assert_eq!(colors::label("Index:").to_string(), "Index:");
    assert_eq!(colors::number("42").to_string(), "42");
    assert_eq!(colors::file_path("/tmp/x").to_string(), "/tmp/x");

    colored::control::unset_override();
}

// =============================================================================
// completions tests
// =============================================================================

/// Every shell gets a script naming the run command
#[test]
fn test_completions_for_each_shell() {
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        let mut buffer = Vec::new();
        write_completions(shell, &mut buffer);

        let script = String::from_utf8(buffer).unwrap();
        assert!(script.contains("run"), "{shell:?} script lacks run");
    }
}
