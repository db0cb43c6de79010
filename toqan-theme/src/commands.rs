pub mod convert;
pub mod extract;
pub mod generate;
pub mod import;
pub mod inspect;
pub mod library;
pub mod palette;

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context as _, Result, anyhow, bail};
use clap::{Args, ValueEnum};
use toqan_color::{
    Argb, ExtendedColor, PaletteKey, Theme, ThemeRequest, Typography,
    export::{ThemeDocument, to_alias_css, to_css},
    global_theme,
    library::ThemeLibrary,
    store::{JsonFileStore, KeyValueStore, KeyValueStoreExt, MemoryStore, ScopedStore},
};
use tracing::debug;

use crate::{config::Config, output};

/// Store key of the most recently used source color.
pub const LAST_SOURCE_KEY: &str = "lastSource";
/// Store key of the library theme picked last.
pub const SELECTED_THEME_KEY: &str = "selectedTheme";
const STORE_SCOPE: &str = "cli";

/// State shared by every command.
pub struct Context {
    pub config: Config,
    store: Box<dyn KeyValueStore>,
}

impl Context {
    pub fn new(config: Config, store: Box<dyn KeyValueStore>) -> Self {
        Self { config, store }
    }

    /// Loads the config and opens the user's store.
    ///
    /// When the store cannot be opened the CLI still works; nothing is
    /// remembered between runs.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path)?;
        let store: Box<dyn KeyValueStore> = match JsonFileStore::default_path()
            .map(JsonFileStore::open)
        {
            Some(Ok(store)) => Box::new(store),
            Some(Err(err)) => {
                output::warn(format!("settings will not be remembered: {err}"));
                Box::new(MemoryStore::new())
            }
            None => Box::new(MemoryStore::new()),
        };
        Ok(Self::new(config, store))
    }

    /// The CLI's slice of the store.
    pub fn state(&self) -> ScopedStore<'_, dyn KeyValueStore> {
        ScopedStore::new(self.store.as_ref(), STORE_SCOPE)
    }

    /// The source color used last, if it is still readable.
    pub fn last_source(&self) -> Option<Argb> {
        self.state().get_or_default::<Option<Argb>>(LAST_SOURCE_KEY)
    }

    pub fn remember_source(&self, source: Argb) {
        self.state().set_quiet(LAST_SOURCE_KEY, &source);
    }

    pub fn library_dir(&self) -> Result<PathBuf> {
        self.config
            .library_dir
            .clone()
            .or_else(ThemeLibrary::default_dir)
            .ok_or_else(|| anyhow!("No library directory; set `library_dir` in the config"))
    }

    pub fn open_library(&self) -> Result<ThemeLibrary> {
        let dir = self.library_dir()?;
        ThemeLibrary::open(&dir)
            .with_context(|| format!("Failed to open theme library at {}", dir.display()))
    }
}

/// Flags that describe which theme to build.
#[derive(Args, Debug, Default, Clone)]
pub struct ThemeArgs {
    /// Source color as hex (falls back to the config file, then the last color used)
    #[arg(short, long)]
    pub source: Option<String>,
    /// Start from a theme saved in the library
    #[arg(long, value_name = "ID")]
    pub theme: Option<String>,
    /// Override the primary seed color
    #[arg(long, value_name = "HEX")]
    pub primary: Option<String>,
    /// Override the secondary seed color
    #[arg(long, value_name = "HEX")]
    pub secondary: Option<String>,
    /// Override the tertiary seed color
    #[arg(long, value_name = "HEX")]
    pub tertiary: Option<String>,
    /// Override the error seed color
    #[arg(long, value_name = "HEX")]
    pub error: Option<String>,
    /// Override the neutral seed color
    #[arg(long, value_name = "HEX")]
    pub neutral: Option<String>,
    /// Override the neutral variant seed color
    #[arg(long, value_name = "HEX")]
    pub neutral_variant: Option<String>,
    /// Use overrides exactly instead of harmonizing them with the source
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub color_match: Option<bool>,
    /// Extended color as NAME=HEX, or NAME=HEX:blend to harmonize it (repeatable)
    #[arg(long = "extended", value_name = "NAME=HEX")]
    pub extended: Vec<String>,
    /// Brand typeface for display, headline and title text
    #[arg(long)]
    pub display_font: Option<String>,
    /// Plain typeface for body and label text
    #[arg(long)]
    pub body_font: Option<String>,
}

impl ThemeArgs {
    fn overrides(&self) -> [(PaletteKey, Option<&String>); 6] {
        [
            (PaletteKey::Primary, self.primary.as_ref()),
            (PaletteKey::Secondary, self.secondary.as_ref()),
            (PaletteKey::Tertiary, self.tertiary.as_ref()),
            (PaletteKey::Error, self.error.as_ref()),
            (PaletteKey::Neutral, self.neutral.as_ref()),
            (PaletteKey::NeutralVariant, self.neutral_variant.as_ref()),
        ]
    }
}

/// Combines library entry, config file, remembered state and flags, in
/// increasing priority, into one request.
pub fn resolve_request(ctx: &Context, args: &ThemeArgs) -> Result<(ThemeRequest, Typography)> {
    let (mut request, mut typography) = match &args.theme {
        Some(id) => {
            let library = ctx.open_library()?;
            let entry = library
                .get(id)
                .ok_or_else(|| anyhow!("No saved theme with id `{id}`"))?;
            ctx.state().set_quiet(SELECTED_THEME_KEY, id);
            (entry.to_request(), entry.typography())
        }
        None => (config_request(ctx)?, ctx.config.typography()),
    };

    if let Some(input) = &args.source {
        request.source = Argb::parse_or(input, request.source);
    }
    for (key, value) in args.overrides() {
        if let Some(input) = value {
            let color = Argb::from_hex(input)
                .with_context(|| format!("Invalid --{} color", key.css_name()))?;
            request.core_colors.set(key, Some(color));
        }
    }
    if let Some(color_match) = args.color_match {
        request.color_match = color_match;
    }
    for arg in &args.extended {
        request.extended_colors.push(parse_extended(arg)?);
    }
    if let Some(font) = &args.display_font {
        typography.display_font = font.clone();
    }
    if let Some(font) = &args.body_font {
        typography.body_font = font.clone();
    }
    debug!(
        "Resolved theme request: source {}, {} overrides, {} extended colors",
        request.source,
        PaletteKey::ALL
            .iter()
            .filter(|key| request.core_colors.get(**key).is_some())
            .count(),
        request.extended_colors.len()
    );
    Ok((request, typography))
}

fn config_request(ctx: &Context) -> Result<ThemeRequest> {
    let config = &ctx.config;
    let source = match &config.source {
        Some(hex) => Argb::from_hex(hex).context("Invalid `source` in config")?,
        None => ctx.last_source().unwrap_or(Argb::BASELINE),
    };
    Ok(ThemeRequest {
        source,
        core_colors: config.core_colors,
        color_match: config.color_match.unwrap_or(false),
        extended_colors: config.extended_colors.clone(),
    })
}

/// Builds the theme the flags describe and remembers its source color.
pub fn resolve_theme(ctx: &Context, args: &ThemeArgs) -> Result<(Arc<Theme>, Typography)> {
    let (request, typography) = resolve_request(ctx, args)?;
    let theme = global_theme(&request);
    ctx.remember_source(theme.source());
    Ok((theme, typography))
}

/// Parses `NAME=HEX` or `NAME=HEX:blend`.
pub fn parse_extended(arg: &str) -> Result<ExtendedColor> {
    let (name, rest) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Extended color `{arg}` is not NAME=HEX"))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("Extended color `{arg}` has no name");
    }
    let (hex, blend) = match rest.split_once(':') {
        Some((hex, "blend")) => (hex, true),
        Some((_, flag)) => bail!("Unknown extended color flag `{flag}`; expected `blend`"),
        None => (rest, false),
    };
    let color = Argb::from_hex(hex).with_context(|| format!("Invalid color for `{name}`"))?;
    Ok(ExtendedColor::new(name, color).with_blend(blend))
}

/// Output formats shared by `generate` and `import`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Material tokens as CSS custom properties
    #[default]
    Css,
    /// JSON theme document
    Json,
    /// Toqan app variables only
    Aliases,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Css | ExportFormat::Aliases => "css",
            ExportFormat::Json => "json",
        }
    }
}

pub fn render(theme: &Theme, typography: &Typography, format: ExportFormat) -> Result<String> {
    Ok(match format {
        ExportFormat::Css => to_css(theme, typography),
        ExportFormat::Aliases => to_alias_css(theme),
        ExportFormat::Json => ThemeDocument::new(theme, Some(typography))
            .to_json()
            .context("Failed to serialize theme")?,
    })
}

/// Writes `text` to `path`, or to stdout when there is no path.
pub fn write_output(text: &str, path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        print!("{text}");
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    output::status("Wrote", path.display().to_string());
    Ok(())
}
