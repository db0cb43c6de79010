//! Toqan app variables mapped onto scheme roles.
//!
//! The app styles itself with its own `--toqan-*` names so components never
//! depend on Material role names directly.

use crate::{
    scheme::{ColorRole, Mode},
    theme::Theme,
};

use super::CssWriter;

/// `(variable, role)` pairs; variables are written without the leading `--`.
pub const APP_ALIASES: &[(&str, ColorRole)] = &[
    ("toqan-bg-app", ColorRole::Background),
    ("toqan-bg-surface", ColorRole::Surface),
    ("toqan-bg-surface-raised", ColorRole::SurfaceContainerLow),
    ("toqan-bg-sidebar", ColorRole::SurfaceContainer),
    ("toqan-bg-input", ColorRole::SurfaceContainerHigh),
    ("toqan-bg-hover", ColorRole::SurfaceContainerHighest),
    ("toqan-bg-inverse", ColorRole::InverseSurface),
    ("toqan-text-primary", ColorRole::OnSurface),
    ("toqan-text-secondary", ColorRole::OnSurfaceVariant),
    ("toqan-text-inverse", ColorRole::InverseOnSurface),
    ("toqan-text-on-accent", ColorRole::OnPrimary),
    ("toqan-accent", ColorRole::Primary),
    ("toqan-accent-soft", ColorRole::PrimaryContainer),
    ("toqan-accent-soft-text", ColorRole::OnPrimaryContainer),
    ("toqan-accent-secondary", ColorRole::Secondary),
    ("toqan-accent-tertiary", ColorRole::Tertiary),
    ("toqan-border", ColorRole::OutlineVariant),
    ("toqan-border-strong", ColorRole::Outline),
    ("toqan-danger", ColorRole::Error),
    ("toqan-danger-soft", ColorRole::ErrorContainer),
    ("toqan-focus-ring", ColorRole::Primary),
    ("toqan-scrim", ColorRole::Scrim),
    ("toqan-chat-bubble-user", ColorRole::PrimaryContainer),
    ("toqan-chat-bubble-user-text", ColorRole::OnPrimaryContainer),
    ("toqan-chat-bubble-assistant", ColorRole::SurfaceContainerHigh),
    ("toqan-chat-bubble-assistant-text", ColorRole::OnSurface),
];

/// Renders the app variables with literal colors: light values in `:root`,
/// dark values in `.dark`.
pub fn to_alias_css(theme: &Theme) -> String {
    let mut css = CssWriter::default();
    for (selector, mode) in [(":root", Mode::Light), (".dark", Mode::Dark)] {
        if mode.is_dark() {
            css.blank_line();
        }
        css.open(selector);
        let scheme = theme.scheme(mode);
        for &(name, role) in APP_ALIASES {
            css.declare(name, &scheme.get(role).to_hex());
        }
        css.close();
    }
    css.finish()
}

/// Declares every app variable as a `var()` reference to its Material token,
/// so the aliases follow whichever scheme is active.
pub(crate) fn write_alias_references(css: &mut CssWriter) {
    for &(name, role) in APP_ALIASES {
        css.declare(name, &format!("var(--md-sys-color-{})", role.css_name()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Argb;

    #[test]
    fn test_alias_names_are_unique() {
        let mut names: Vec<&str> = APP_ALIASES.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), APP_ALIASES.len());
        assert!(names.iter().all(|name| name.starts_with("toqan-")));
    }

    #[test]
    fn test_alias_stylesheet_uses_scheme_values() {
        let theme = Theme::from_source(Argb(0xff6750a4));
        let css = to_alias_css(&theme);
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --toqan-accent: #6750a4;\n"));
        assert!(css.contains(".dark {\n"));
        assert!(css.contains("  --toqan-accent: #cfbcff;\n"));
        assert!(css.contains(&format!(
            "  --toqan-bg-app: {};\n",
            theme.dark().background.to_hex()
        )));
    }

    #[test]
    fn test_alias_references_point_at_tokens() {
        let mut css = CssWriter::default();
        write_alias_references(&mut css);
        let out = css.finish();
        assert!(out.contains("--toqan-text-secondary: var(--md-sys-color-on-surface-variant);"));
        assert_eq!(out.lines().count(), APP_ALIASES.len());
    }
}
