use anyhow::Result;
use comfy_table::{Cell, Color};
use toqan_color::{ColorRole, Mode, contrast::contrast_ratio};

use super::{Context, ThemeArgs, resolve_theme};
use crate::output;

/// WCAG AA for body text.
const MIN_CONTRAST: f64 = 4.5;

/// Prints the contrast of every background role against its content role.
pub fn execute(ctx: &Context, args: &ThemeArgs) -> Result<()> {
    let (theme, _) = resolve_theme(ctx, args)?;

    let mut table = output::table(["Role", "Content", "Light", "Dark"]);
    let mut failures = 0;
    for &role in ColorRole::ALL {
        let Some(content) = role.content_role() else {
            continue;
        };
        let mut row = vec![Cell::new(role.name()), Cell::new(content.name())];
        for mode in Mode::ALL {
            let scheme = theme.scheme(mode);
            let ratio = contrast_ratio(scheme.get(role), scheme.get(content));
            let cell = Cell::new(format!("{ratio:.2}:1"));
            row.push(if ratio < MIN_CONTRAST {
                failures += 1;
                cell.fg(Color::Red)
            } else {
                cell
            });
        }
        table.add_row(row);
    }
    println!("{table}");

    if failures == 0 {
        output::status("Checked", "every pair meets 4.5:1");
    } else {
        output::warn(format!("{failures} pairs fall below 4.5:1"));
    }
    Ok(())
}
