use comfy_table::{Cell, Color, ContentArrangement, Row, Table, presets::UTF8_FULL};
use console::style;
use toqan_color::Argb;

const STATUS_WIDTH: usize = 12;

pub fn status(label: &str, message: impl AsRef<str>) {
    eprintln!(
        "{:>width$} {}",
        style(label).green().bold(),
        message.as_ref(),
        width = STATUS_WIDTH
    );
}

pub fn warn(message: impl AsRef<str>) {
    eprintln!("{}: {}", style("warning").yellow().bold(), message.as_ref());
}

pub fn error(message: impl AsRef<str>) {
    eprintln!("{}: {}", style("error").red().bold(), message.as_ref());
}

pub fn note(message: impl AsRef<str>) {
    eprintln!("{}: {}", style("note").blue().bold(), message.as_ref());
}

pub fn step(message: impl AsRef<str>) {
    eprintln!("    {}", message.as_ref());
}

/// A table with cyan headers, sized to the terminal.
pub fn table<'a>(headers: impl IntoIterator<Item = &'a str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(Row::from(
            headers
                .into_iter()
                .map(|header| Cell::new(header).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        ));
    table
}

/// The hex code of `color`, drawn in that color.
pub fn swatch(color: Argb) -> Cell {
    Cell::new(format!("██ {color}")).fg(Color::Rgb {
        r: color.red(),
        g: color.green(),
        b: color.blue(),
    })
}
