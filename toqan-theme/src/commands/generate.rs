use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{Context, ExportFormat, ThemeArgs, render, resolve_theme, write_output};
use crate::output;

pub fn execute(
    ctx: &Context,
    args: &ThemeArgs,
    format: ExportFormat,
    output_path: Option<&Path>,
) -> Result<()> {
    let (theme, typography) = resolve_theme(ctx, args)?;
    let text = render(&theme, &typography, format)?;
    output::status("Generated", format!("theme from {}", theme.source()));
    write_output(&text, target_path(ctx, format, output_path).as_deref())
}

/// `--output` if given, else `theme.<ext>` in the configured output
/// directory, else stdout.
fn target_path(ctx: &Context, format: ExportFormat, output_path: Option<&Path>) -> Option<PathBuf> {
    output_path.map(Path::to_path_buf).or_else(|| {
        ctx.config
            .output_dir
            .as_ref()
            .map(|dir| dir.join(format!("theme.{}", format.extension())))
    })
}
