use crate::core::{ConversionState, Direction, ExchangeRate, LoadStatus};
use chrono::{Datelike, NaiveDate};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub const TITLE: &str = "TRM Colombia (Peso Colombiano - USD)";
pub const LOADING_TEXT: &str = "Cargando TRM...";
pub const NO_DATA_TEXT: &str = "No hay datos de TRM";
pub const SOURCE_NAME: &str = "Banco de la República de Colombia";
pub const SOURCE_URL: &str = "https://www.banrep.gov.co";

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Highlight,
    Active,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Highlight => style(text).green().bold(),
        StyleType::Active => style(text).cyan().bold().reverse(),
        StyleType::Error => style(text).red(),
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

/// Creates a styled label cell for a table.
pub fn label_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Creates a spinner shown while the rate is loading. Drawn on stderr and
/// hidden when stderr is not a terminal.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Short es-CO date: day/month/year without zero padding, e.g. `10/1/2024`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// `$4000.50 COP`
pub fn format_rate_value(rate: &ExchangeRate) -> String {
    format!("${} COP", rate.value())
}

pub fn render_status(status: &LoadStatus) -> String {
    match status {
        LoadStatus::Loading => style_text(LOADING_TEXT, StyleType::Subtle),
        LoadStatus::Error(message) => style_text(&format!("Error: {message}"), StyleType::Error),
        LoadStatus::Ready(rate) => render_rate(Some(rate)),
    }
}

/// The rate panel: value, validity window and attribution.
pub fn render_rate(rate: Option<&ExchangeRate>) -> String {
    let Some(rate) = rate else {
        return style_text(NO_DATA_TEXT, StyleType::Subtle);
    };

    let mut table = new_styled_table();
    table.add_row(vec![
        label_cell("Valor:"),
        Cell::new(format_rate_value(rate))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        label_cell("Vigente desde:"),
        Cell::new(format_date(rate.valid_from())),
    ]);
    table.add_row(vec![
        label_cell("Vigente hasta:"),
        Cell::new(format_date(rate.valid_to())),
    ]);

    format!(
        "{}\n\n{}\n{}",
        style_text(TITLE, StyleType::Title),
        table,
        render_attribution()
    )
}

pub fn render_attribution() -> String {
    style_text(
        &format!("Fuente: {SOURCE_NAME} ({SOURCE_URL})"),
        StyleType::Subtle,
    )
}

/// Both toggle buttons, the active one highlighted and bracketed.
pub fn render_toggle(active: Direction) -> String {
    Direction::all()
        .iter()
        .map(|direction| {
            let label = direction.to_string();
            if *direction == active {
                style_text(&format!("[{label}]"), StyleType::Active)
            } else {
                style_text(&format!(" {label} "), StyleType::Subtle)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The result line and the rate it was computed with, when the input
/// converts.
pub fn render_conversion(state: &ConversionState, rate: &ExchangeRate) -> Option<String> {
    state.result_line(rate).map(|line| {
        format!(
            "{}\n{}",
            style_text(&line, StyleType::Highlight),
            style_text(
                &format!("(Tasa: 1 USD = {} COP)", rate.value()),
                StyleType::Subtle
            )
        )
    })
}
