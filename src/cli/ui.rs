use crate::core::catalog::Currency;
use crate::core::widget::{Notification, NotificationLevel};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Result,
    Error,
    Info,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Result => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Info => style(text).cyan(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// A right-aligned numeric cell.
pub fn value_cell(text: &str) -> Cell {
    Cell::new(text)
        .add_attribute(Attribute::Bold)
        .fg(Color::Green)
        .set_alignment(CellAlignment::Right)
}

/// Creates a cell for "N/A" values, with error-specific styling.
pub fn na_cell(has_error: bool) -> Cell {
    let color = if has_error {
        Color::Red
    } else {
        Color::DarkGrey
    };
    Cell::new("N/A").fg(color).set_alignment(CellAlignment::Right)
}

/// One dropdown entry, marking the active selection.
pub fn option_cell(currency: Option<&Currency>, selected: &Currency) -> Cell {
    match currency {
        Some(c) if c == selected => Cell::new(format!("> {c}"))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Some(c) => Cell::new(format!("  {c}")),
        None => Cell::new(""),
    }
}

/// Formats a transient notification line.
pub fn notification_line(notification: &Notification) -> String {
    match notification.level {
        NotificationLevel::Error => {
            style_text(&format!("! {}", notification.message), StyleType::Error)
        }
        NotificationLevel::Info => style_text(&notification.message, StyleType::Info),
    }
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64, with_message: bool) -> ProgressBar {
    let template = if with_message {
        "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}"
    } else {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}"
    };

    let pb = ProgressBar::new(len);
    if let Ok(progress_style) = ProgressStyle::default_bar().template(template) {
        pb.set_style(progress_style.progress_chars("#>-"));
    }
    pb
}

/// Creates a spinner shown while a single request is in flight.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// A separator line matching the terminal width.
pub fn separator() -> String {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    "─".repeat(term_width.min(80))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog;

    #[test]
    fn test_option_cell_marks_selection() {
        let eur = catalog::find("EUR").unwrap();
        let usd = catalog::find("USD").unwrap();

        let selected = option_cell(Some(eur), eur);
        assert_eq!(selected.content(), "> EUR - Euro (European Union)");
        let other = option_cell(Some(usd), eur);
        assert_eq!(other.content(), "  USD - Dollar (United States)");
        assert_eq!(option_cell(None, eur).content(), "");
    }

    #[test]
    fn test_notification_line_contains_message() {
        console::set_colors_enabled(false);
        let line = notification_line(&Notification {
            level: NotificationLevel::Error,
            message: "boom".to_string(),
        });
        assert_eq!(line, "! boom");
    }
}
