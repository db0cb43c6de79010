use anyhow::{Context as _, Result};
use comfy_table::Cell;
use toqan_color::{Hct, ImageSource, extract_source_colors};

use super::Context;
use crate::output;

/// Picks source colors from an image and makes the best one current.
///
/// On failure nothing is remembered.
pub fn execute(ctx: &Context, image: &str, count: usize) -> Result<()> {
    let source = ImageSource::parse(image);
    let colors = extract_source_colors(&source, count.max(1))
        .with_context(|| format!("Failed to extract a source color from {image}"))?;

    let mut table = output::table(["Rank", "Color", "Hue", "Chroma", "Tone"]);
    for (rank, &color) in colors.iter().enumerate() {
        let hct = Hct::from_argb(color);
        table.add_row(vec![
            Cell::new(rank + 1),
            output::swatch(color),
            Cell::new(format!("{:.1}", hct.hue())),
            Cell::new(format!("{:.1}", hct.chroma())),
            Cell::new(format!("{:.1}", hct.tone())),
        ]);
    }
    println!("{table}");

    if let Some(&best) = colors.first() {
        ctx.remember_source(best);
        output::status("Extracted", format!("source color {best}"));
    }
    Ok(())
}
