//! Rendering themes to CSS and JSON, and reading JSON back.
//!
//! Exports are plain string building. Odd inputs (empty extended color names,
//! quotes in font names) produce odd but well-formed output rather than
//! errors.

pub mod alias;
pub mod css;
pub mod json;

pub use alias::{APP_ALIASES, to_alias_css};
pub use css::to_css;
pub use json::{ImportError, SchemeDocuments, ThemeDocument};

/// Lowercase ASCII words joined by `-`.
///
/// Used for CSS token names and library ids. Returns an empty string when
/// the input has no ASCII letters or digits.
pub fn slugify(input: &str) -> String {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Accumulates a stylesheet, one rule block at a time.
#[derive(Default)]
pub(crate) struct CssWriter {
    out: String,
    depth: usize,
}

impl CssWriter {
    pub(crate) fn comment(&mut self, text: &str) {
        self.indent();
        self.out.push_str("/* ");
        self.out.push_str(&text.replace("*/", "* /"));
        self.out.push_str(" */\n");
    }

    pub(crate) fn open(&mut self, selector: &str) {
        self.indent();
        self.out.push_str(selector);
        self.out.push_str(" {\n");
        self.depth += 1;
    }

    pub(crate) fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("}\n");
    }

    pub(crate) fn declare(&mut self, name: &str, value: &str) {
        self.indent();
        self.out.push_str("--");
        self.out.push_str(name);
        self.out.push_str(": ");
        self.out.push_str(value);
        self.out.push_str(";\n");
    }

    pub(crate) fn blank_line(&mut self) {
        self.out.push('\n');
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Ocean Breeze"), "ocean-breeze");
        assert_eq!(slugify("  Brand / Success!! 2 "), "brand-success-2");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn test_css_writer_nesting() {
        let mut css = CssWriter::default();
        css.open("@media (prefers-color-scheme: dark)");
        css.open(":root");
        css.declare("x", "1");
        css.close();
        css.close();
        assert_eq!(
            css.finish(),
            "@media (prefers-color-scheme: dark) {\n  :root {\n    --x: 1;\n  }\n}\n"
        );
    }
}
