use anyhow::Result;
use comfy_table::Cell;
use toqan_color::{PaletteKey, TonalPalette};

use super::{Context, ThemeArgs, resolve_theme};
use crate::output;

pub fn execute(ctx: &Context, args: &ThemeArgs) -> Result<()> {
    let (theme, _) = resolve_theme(ctx, args)?;

    let mut headers = vec!["Tone"];
    headers.extend(PaletteKey::ALL.iter().map(|key| key.name()));
    let mut table = output::table(headers);
    for tone in TonalPalette::STANDARD_TONES {
        let mut row = vec![Cell::new(tone)];
        row.extend(
            theme
                .palettes()
                .iter()
                .map(|(_, palette)| output::swatch(palette.tone(f64::from(tone)))),
        );
        table.add_row(row);
    }

    output::status("Palettes", format!("for source {}", theme.source()));
    println!("{table}");
    Ok(())
}
