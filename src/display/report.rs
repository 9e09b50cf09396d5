//! Shared formatting helpers for terminal output

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Money;

/// Format a money amount with the configured currency symbol
pub fn money(amount: Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct.abs() < 0.1 && pct != 0.0 {
        format!("{:.2}%", pct)
    } else if pct.abs() < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation, clamped to `width`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Title line followed by an underline of the same width
pub fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "═".repeat(title.chars().count()))
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Render rows as a rounded table
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// `label: value` lines with the values aligned
pub fn key_values(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("  {:<width$}  {}\n", format!("{}:", k), v, width = width + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.55), "5.5%");
        assert_eq!(format_percentage(78.6), "79%");
        assert_eq!(format_percentage(0.0), "0.0%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(5.0, 10.0, 4), "██░░");
        assert_eq!(format_bar(50.0, 10.0, 4), "████");
        assert_eq!(format_bar(1.0, 0.0, 3), "░░░");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("Alimentación", 20), "Alimentación");
        assert_eq!(truncate("Alimentación", 8), "Alime...");
        assert_eq!(truncate("abc", 2), "..");
    }

    #[test]
    fn test_key_values_align() {
        let out = key_values(&[("Income", "1".into()), ("Spent", "2".into())]);
        assert_eq!(out, "  Income:  1\n  Spent:   2\n");
    }
}
