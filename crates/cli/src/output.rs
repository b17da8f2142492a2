//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Format currency in USD
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Color a severity label
pub fn color_severity(severity: &str) -> String {
    match severity.to_lowercase().as_str() {
        "critical" => severity.red().to_string(),
        "warning" => severity.yellow().to_string(),
        "info" => severity.blue().to_string(),
        _ => severity.to_string(),
    }
}

/// Render an RFC3339 timestamp as a short local-free date-time
pub fn format_timestamp(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(36.0), "$36.00");
        assert_eq!(format_currency(0.125), "$0.12");
    }

    #[test]
    fn test_format_timestamp_falls_back_on_garbage() {
        assert_eq!(format_timestamp("not-a-date"), "not-a-date");
        assert_eq!(
            format_timestamp("2024-06-01T12:30:00Z"),
            "2024-06-01 12:30"
        );
    }
}
