use colored::Colorize;

use crate::projection::ProjectionDay;

/// Two-decimal amount; negatives in red.
pub fn amount(value: f64) -> String {
    let text = format!("{value:.2}");
    if value < 0.0 {
        text.red().to_string()
    } else {
        text
    }
}

/// Signed day change; increases in green, decreases in red.
pub fn change(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.2}").green().to_string()
    } else if value < 0.0 {
        format!("{value:.2}").red().to_string()
    } else {
        String::from("0.00")
    }
}

pub fn section(title: &str) -> String {
    format!("=== {title} ===").bold().to_string()
}

pub fn label_value(label: &str, value: String) -> String {
    format!("  {label:<16}: {value}")
}

/// Event descriptions for one day, joined for a single cell.
pub fn day_events(day: &ProjectionDay) -> String {
    day.events
        .iter()
        .map(|event| event.description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
