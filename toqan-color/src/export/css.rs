//! Material token stylesheet.

use crate::{
    TonalPalette,
    scheme::Mode,
    theme::Theme,
    typography::Typography,
};

use super::{CssWriter, alias, slugify};

/// Renders `theme` as CSS custom properties.
///
/// The light scheme, reference palettes, typefaces, type scale and app
/// aliases go in `:root`. The dark scheme is emitted twice: under
/// `prefers-color-scheme: dark` and under a `.dark` class for manual
/// switching.
pub fn to_css(theme: &Theme, typography: &Typography) -> String {
    let mut css = CssWriter::default();
    css.comment(&format!(
        "Material theme generated from source color {}",
        theme.source()
    ));
    css.open(":root");
    write_typefaces(&mut css, typography);
    write_palettes(&mut css, theme);
    write_scheme(&mut css, theme, Mode::Light);
    write_type_scale(&mut css, typography);
    alias::write_alias_references(&mut css);
    css.close();

    css.blank_line();
    css.open("@media (prefers-color-scheme: dark)");
    css.open(":root");
    write_scheme(&mut css, theme, Mode::Dark);
    css.close();
    css.close();

    css.blank_line();
    css.open(".dark");
    write_scheme(&mut css, theme, Mode::Dark);
    css.close();
    css.finish()
}

fn write_typefaces(css: &mut CssWriter, typography: &Typography) {
    css.declare("md-ref-typeface-brand", &font_value(&typography.display_font));
    css.declare("md-ref-typeface-plain", &font_value(&typography.body_font));
}

fn font_value(font: &str) -> String {
    format!("'{}', sans-serif", font.replace('\\', "").replace('\'', "\\'"))
}

fn write_palettes(css: &mut CssWriter, theme: &Theme) {
    for (key, palette) in theme.palettes().iter() {
        write_palette(css, key.css_name(), palette);
    }
}

fn write_palette(css: &mut CssWriter, name: &str, palette: &TonalPalette) {
    for (tone, color) in palette.standard_tones() {
        css.declare(&format!("md-ref-palette-{name}{tone}"), &color.to_hex());
    }
}

fn write_scheme(css: &mut CssWriter, theme: &Theme, mode: Mode) {
    for (role, color) in theme.scheme(mode).roles() {
        css.declare(&format!("md-sys-color-{}", role.css_name()), &color.to_hex());
    }
    for group in theme.extended_colors() {
        let name = slugify(&group.color.name);
        for (suffix, color) in group.group(mode).entries() {
            css.declare(&format!("md-extended-color-{name}-{suffix}"), &color.to_hex());
        }
    }
}

fn write_type_scale(css: &mut CssWriter, typography: &Typography) {
    for (token, style, display) in typography.scale.steps() {
        let typeface = if display { "brand" } else { "plain" };
        css.declare(
            &format!("md-sys-typescale-{token}-font"),
            &format!("var(--md-ref-typeface-{typeface})"),
        );
        css.declare(
            &format!("md-sys-typescale-{token}-size"),
            &format!("{}px", style.font_size),
        );
        css.declare(
            &format!("md-sys-typescale-{token}-line-height"),
            &format!("{}px", style.line_height),
        );
    }
}
