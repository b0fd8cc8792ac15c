//! Output formatting utilities

use colored::Colorize;
use serde::Serialize;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a warning message
pub(crate) fn warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// Print an error message
pub(crate) fn error(msg: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), msg);
}

/// Pretty-print any serializable value as JSON
pub(crate) fn json<T: Serialize>(value: &T) -> crate::error::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Fixed-precision rendering of a feature vector
pub(crate) fn format_values(values: &[f32]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.1}")).collect();
    format!("[{}]", parts.join(", "))
}

/// Link text, or a placeholder when the title has no link
pub(crate) fn link_or_placeholder(link: Option<&str>) -> &str {
    link.unwrap_or("-")
}

/// Accuracy as a percentage
pub(crate) fn format_percent(fraction: f32) -> String {
    format!("{:.1}%", fraction * 100.0)
}
