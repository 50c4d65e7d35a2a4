//! Report formatting utilities for terminal output
//!
//! Shared helpers plus the chart-like renderings (share bars, waterfall)
//! that have no place in the plain report structs.

use crate::models::{Money, TransactionType};
use crate::reports::{CategoryBreakdown, Measure, WaterfallStep};
use crate::services::SourceOutcome;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
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

/// Share of each category within one transaction type, as bars
pub fn format_share_chart(breakdown: &CategoryBreakdown, kind: TransactionType) -> String {
    let rows: Vec<_> = breakdown.rows_of(kind).collect();
    if rows.is_empty() {
        return format!("No {} recorded.\n", kind.label().to_lowercase());
    }

    let max_share = rows.iter().map(|r| r.share).fold(0.0, f64::max);
    let mut output = String::new();
    output.push_str(&format!("{} by category\n", kind));
    output.push_str(&separator(60));
    output.push('\n');
    for row in rows {
        output.push_str(&format!(
            "{:<20} {} {:>6}\n",
            truncate(row.category.label(), 20),
            format_bar(row.share, max_share, 30),
            format_percentage(row.share)
        ));
    }
    output
}

/// Running-total view of the P&L waterfall
pub fn format_waterfall(steps: &[WaterfallStep], currency: &str) -> String {
    let mut output = String::new();
    output.push_str("P&L Waterfall\n");
    output.push_str(&separator(60));
    output.push('\n');

    let mut running = Money::zero();
    for step in steps {
        let marker = match step.measure {
            Measure::Absolute => {
                running = step.value;
                "="
            }
            Measure::Relative => {
                running += step.value;
                if step.value.is_negative() {
                    "-"
                } else {
                    "+"
                }
            }
            Measure::Total => "=",
        };
        output.push_str(&format!(
            "{} {:<22} {:>16}  running {:>16}\n",
            marker,
            step.label,
            step.value.abs().format_with_symbol(currency),
            running.format_with_symbol(currency)
        ));
    }
    output
}

/// One line per source, flagging failures
pub fn format_outcomes(outcomes: &[SourceOutcome]) -> String {
    let mut output = String::new();
    output.push_str("Sources\n");
    output.push_str(&separator(60));
    output.push('\n');
    for outcome in outcomes {
        let mark = if outcome.is_loaded() { "ok  " } else { "FAIL" };
        output.push_str(&format!("[{}] {}\n", mark, outcome));
    }
    output
}
