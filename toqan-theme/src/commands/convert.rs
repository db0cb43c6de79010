use anyhow::{Context as _, Result, bail};
use comfy_table::Cell;
use toqan_color::{Argb, Hct, contrast};

use crate::output;

pub fn execute(color: Option<&str>, hct: Option<&[f64]>) -> Result<()> {
    let argb = match (hct, color) {
        (Some(values), _) if values.iter().any(|value| !value.is_finite()) => {
            bail!("--hct values must be finite numbers")
        }
        (Some([hue, chroma, tone]), _) => Hct::from(*hue, *chroma, *tone).to_argb(),
        (Some(values), _) => bail!("--hct takes 3 values, got {}", values.len()),
        (None, Some(input)) => {
            Argb::from_hex(input).with_context(|| format!("Cannot convert `{input}`"))?
        }
        (None, None) => bail!("Pass a hex color or --hct HUE CHROMA TONE"),
    };

    let measured = Hct::from_argb(argb);
    let hsl = argb.to_hsl();
    let (r, g, b) = argb.to_rgb();

    let mut table = output::table(["Space", "Value"]);
    table.add_row(vec![Cell::new("Hex"), output::swatch(argb)]);
    table.add_row(vec![Cell::new("RGB"), Cell::new(format!("{r}, {g}, {b}"))]);
    table.add_row(vec![
        Cell::new("HSL"),
        Cell::new(format!(
            "{:.1}°, {:.1}%, {:.1}%",
            hsl.h,
            hsl.s * 100.0,
            hsl.l * 100.0
        )),
    ]);
    table.add_row(vec![
        Cell::new("HCT"),
        Cell::new(format!(
            "{:.2}, {:.2}, {:.2}",
            measured.hue(),
            measured.chroma(),
            measured.tone()
        )),
    ]);
    table.add_row(vec![
        Cell::new("Luminance"),
        Cell::new(format!("{:.4}", contrast::relative_luminance(argb))),
    ]);
    table.add_row(vec![
        Cell::new("Contrast"),
        Cell::new(format!(
            "{:.2}:1 on white, {:.2}:1 on black",
            contrast::contrast_ratio(argb, Argb::WHITE),
            contrast::contrast_ratio(argb, Argb::BLACK)
        )),
    ]);
    println!("{table}");
    Ok(())
}
