//! Formatting utilities for sizes, durations, and the build summary.

use std::path::Path;
use std::time::Duration;

use console::Term;
use owo_colors::OwoColorize;

/// Format a byte count with the largest fitting unit.
///
/// ```
/// use sling_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;
    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{bytes} B")
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format a duration as `ms`, `s` or `m s`.
///
/// ```
/// use std::time::Duration;
/// use sling_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{total_ms}ms")
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print the summary of a finished build to stderr.
pub fn print_build_summary(output: &Path, modules: usize, bytes: u64, duration: Duration) {
    let width = Term::stderr().size().1 as usize;
    let rule = "─".repeat(width.clamp(20, 80));

    eprintln!("\n{}", "Build Summary".bold().underline());
    eprintln!("{rule}");
    eprintln!(
        "  {} {} {}",
        "▸".blue(),
        output.display().bright_white().bold(),
        format_size(bytes).dimmed()
    );
    eprintln!("{rule}");
    eprintln!(
        "  {} {} {} in {}",
        "Total:".bold(),
        modules.green(),
        if modules == 1 { "module" } else { "modules" },
        format_duration(duration).green()
    );
}
