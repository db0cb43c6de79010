use std::{fs, path::Path};

use anyhow::{Context as _, Result};
use toqan_color::{export::ThemeDocument, global_theme};

use super::{Context, ExportFormat, render, write_output};
use crate::output;

/// Reads a JSON theme document and re-exports it.
///
/// A rejected document changes nothing, including the remembered source.
pub fn execute(
    ctx: &Context,
    file: &Path,
    format: ExportFormat,
    output_path: Option<&Path>,
) -> Result<()> {
    let text =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let document = ThemeDocument::from_json(&text)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    let theme = global_theme(&document.to_request());
    let typography = document
        .typography
        .clone()
        .unwrap_or_else(|| ctx.config.typography());
    let rendered = render(&theme, &typography, format)?;

    ctx.remember_source(theme.source());
    output::status("Imported", format!("theme from {}", file.display()));
    write_output(&rendered, output_path)
}

#[cfg(test)]
mod tests {
    use toqan_color::{Argb, Theme, store::MemoryStore};

    use super::*;
    use crate::config::Config;

    fn context() -> Context {
        let ctx = Context::new(Config::default(), Box::new(MemoryStore::new()));
        ctx.remember_source(Argb(0xff006a6a));
        ctx
    }

    #[test]
    fn imports_exported_document() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("theme.json");
        let theme = Theme::from_source(Argb(0xff9c27b0));
        fs::write(&input, ThemeDocument::new(&theme, None).to_json().unwrap()).unwrap();

        let ctx = context();
        let output_path = dir.path().join("theme.css");
        execute(&ctx, &input, ExportFormat::Css, Some(&output_path)).unwrap();

        let css = fs::read_to_string(output_path).unwrap();
        assert!(css.contains(&format!("--md-sys-color-primary: {};", theme.light().primary)));
        assert_eq!(ctx.last_source(), Some(Argb(0xff9c27b0)));
    }

    #[test]
    fn rejected_document_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.json");
        fs::write(&input, r##"{"seed": "#9c27b0"}"##).unwrap();

        let ctx = context();
        let output_path = dir.path().join("theme.css");
        assert!(execute(&ctx, &input, ExportFormat::Css, Some(&output_path)).is_err());
        assert!(!output_path.exists());
        assert_eq!(ctx.last_source(), Some(Argb(0xff006a6a)));
    }
}
