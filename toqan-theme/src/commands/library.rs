use anyhow::{Context as _, Result};
use comfy_table::Cell;
use toqan_color::{library::ThemeManifestEntry, store::KeyValueStoreExt};

use super::{Context, SELECTED_THEME_KEY, ThemeArgs, resolve_theme};
use crate::output;

/// Saves the theme the flags describe under `name` and selects it.
pub fn save(ctx: &Context, name: &str, description: &str, args: &ThemeArgs) -> Result<()> {
    let (theme, typography) = resolve_theme(ctx, args)?;
    let entry = ThemeManifestEntry::new(name, description, &theme, Some(&typography))?;
    let mut library = ctx.open_library()?;
    let entry = library
        .add(entry, &theme)
        .with_context(|| format!("Failed to save `{name}`"))?
        .clone();

    ctx.state().set_quiet(SELECTED_THEME_KEY, &entry.id);
    output::status("Saved", format!("`{}` ({})", entry.name, entry.id));
    output::step(library.stylesheet_path(&entry).display().to_string());
    Ok(())
}

/// Prints every saved theme; the selected one is starred.
pub fn list(ctx: &Context) -> Result<()> {
    let library = ctx.open_library()?;
    if library.entries().is_empty() {
        output::note(format!("No saved themes in {}", library.dir().display()));
        return Ok(());
    }

    let selected = ctx.state().get_or_default::<Option<String>>(SELECTED_THEME_KEY);
    let mut table = output::table(["", "ID", "Name", "Source", "Color match", "File"]);
    for entry in library.entries() {
        let marker = if selected.as_deref() == Some(entry.id.as_str()) {
            "*"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(marker),
            Cell::new(&entry.id),
            Cell::new(&entry.name),
            output::swatch(entry.source_color),
            Cell::new(if entry.color_match.unwrap_or(false) { "yes" } else { "no" }),
            Cell::new(&entry.filename),
        ]);
    }
    println!("{table}");
    Ok(())
}
