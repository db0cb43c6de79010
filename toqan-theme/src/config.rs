use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use toqan_color::{CoreColors, ExtendedColor, Typography};
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "toqan-theme.toml";

/// Settings read from `toqan-theme.toml`. Command line flags win over
/// every field.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Hex source color.
    pub source: Option<String>,
    pub color_match: Option<bool>,
    pub display_font: Option<String>,
    pub body_font: Option<String>,
    pub core_colors: CoreColors,
    pub extended_colors: Vec<ExtendedColor>,
    /// Where `generate` writes when no `--output` is given.
    pub output_dir: Option<PathBuf>,
    pub library_dir: Option<PathBuf>,
}

impl Config {
    /// Reads `path`, or `./toqan-theme.toml` when `path` is `None`.
    ///
    /// A missing default file is an empty config; a missing explicit file is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(CONFIG_FILE_NAME);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        debug!("Loading config from {}", path.display());
        Self::parse(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Fonts from the config over the default type scale.
    pub fn typography(&self) -> Typography {
        let defaults = Typography::default();
        Typography::new(
            self.display_font.clone().unwrap_or(defaults.display_font),
            self.body_font.clone().unwrap_or(defaults.body_font),
        )
    }
}

#[cfg(test)]
mod tests {
    use toqan_color::Argb;

    use super::*;

    #[test]
    fn parses_full_config() {
        let config = Config::parse(
            r##"
source = "#6750a4"
color_match = true
display_font = "Fraunces"
output_dir = "dist/theme"

[core_colors]
tertiary = "#00c853"
neutral_variant = "#79747e"

[[extended_colors]]
name = "success"
color = "#2e7d32"
blend = true
"##,
        )
        .unwrap();

        assert_eq!(config.source.as_deref(), Some("#6750a4"));
        assert_eq!(config.color_match, Some(true));
        assert_eq!(config.core_colors.tertiary, Some(Argb(0xff00c853)));
        assert_eq!(config.core_colors.neutral_variant, Some(Argb(0xff79747e)));
        assert_eq!(config.extended_colors.len(), 1);
        assert!(config.extended_colors[0].blend);
        assert_eq!(config.output_dir, Some(PathBuf::from("dist/theme")));

        let typography = config.typography();
        assert_eq!(typography.display_font, "Fraunces");
        assert_eq!(typography.body_font, "Roboto");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.source.is_none());
        assert!(config.core_colors.is_empty());
    }

    #[test]
    fn rejects_unknown_keys_and_bad_colors() {
        assert!(Config::parse("sauce = \"#6750a4\"").is_err());
        assert!(Config::parse("[core_colors]\nprimary = \"purple\"").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());

        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "body_font = \"Inter\"").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.typography().body_font, "Inter");
    }
}
