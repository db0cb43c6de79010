//! A directory of saved themes.
//!
//! The library is a `themes.json` manifest next to one stylesheet per theme.
//! Entries keep the generation inputs, so a saved theme can be rebuilt
//! exactly.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    Argb,
    core_colors::CoreColors,
    export::{slugify, to_css},
    theme::{ExtendedColor, Theme, ThemeRequest},
    typography::Typography,
};

/// Name of the manifest file inside a library directory.
pub const MANIFEST_FILE_NAME: &str = "themes.json";

/// Errors that can occur when reading or writing a theme library.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// A file in the library could not be read or written.
    #[error("theme library I/O failed for {path}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// The manifest is not valid JSON.
    #[error("theme manifest is malformed")]
    Json(#[from] serde_json::Error),
    /// An entry with this id already exists.
    #[error("a theme with id `{0}` already exists")]
    DuplicateId(String),
    /// The name has no characters usable in an id.
    #[error("theme name `{0}` does not produce a usable id")]
    InvalidName(String),
}

/// One saved theme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeManifestEntry {
    /// Slug of the name; unique within a library.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// The seed color.
    pub source_color: Argb,
    /// Stylesheet file name, relative to the library directory.
    pub filename: String,
    /// Brand typeface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_font: Option<String>,
    /// Plain typeface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_font: Option<String>,
    /// Contrast level the theme was designed for; stored, not applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast_level: Option<f64>,
    /// Whether overrides were used verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_match: Option<bool>,
    /// Per-role overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_colors: Option<CoreColors>,
    /// App-specific colors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_colors: Option<Vec<ExtendedColor>>,
}

impl ThemeManifestEntry {
    /// Describes `theme` under `name`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        theme: &Theme,
        typography: Option<&Typography>,
    ) -> Result<Self, LibraryError> {
        let name = name.into();
        let id = slugify(&name);
        if id.is_empty() {
            return Err(LibraryError::InvalidName(name));
        }
        let request = theme.request();
        Ok(Self {
            filename: format!("{id}.css"),
            id,
            name,
            description: description.into(),
            source_color: request.source,
            display_font: typography.map(|t| t.display_font.clone()),
            body_font: typography.map(|t| t.body_font.clone()),
            contrast_level: None,
            color_match: Some(request.color_match),
            core_colors: (!request.core_colors.is_empty()).then_some(request.core_colors),
            extended_colors: (!request.extended_colors.is_empty())
                .then(|| request.extended_colors.clone()),
        })
    }

    /// The inputs needed to regenerate the theme.
    pub fn to_request(&self) -> ThemeRequest {
        ThemeRequest {
            source: self.source_color,
            core_colors: self.core_colors.unwrap_or_default(),
            color_match: self.color_match.unwrap_or(false),
            extended_colors: self.extended_colors.clone().unwrap_or_default(),
        }
    }

    /// The saved fonts over the default type scale.
    pub fn typography(&self) -> Typography {
        let defaults = Typography::default();
        Typography::new(
            self.display_font.clone().unwrap_or(defaults.display_font),
            self.body_font.clone().unwrap_or(defaults.body_font),
        )
    }
}

/// Saved themes in one directory.
#[derive(Debug)]
pub struct ThemeLibrary {
    dir: PathBuf,
    entries: Vec<ThemeManifestEntry>,
}

impl ThemeLibrary {
    /// Where the CLI keeps its library, under the user's data directory.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("toqan-theme").join("themes"))
    }

    /// Reads the manifest in `dir`. A missing manifest is an empty library.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let dir = dir.into();
        let manifest = dir.join(MANIFEST_FILE_NAME);
        let entries = match fs::read_to_string(&manifest) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(LibraryError::Io {
                    path: manifest,
                    source,
                });
            }
        };
        debug!("Opened theme library {}", dir.display());
        Ok(Self { dir, entries })
    }

    /// The library directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> &[ThemeManifestEntry] {
        &self.entries
    }

    /// The entry with `id`.
    pub fn get(&self, id: &str) -> Option<&ThemeManifestEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Path of an entry's stylesheet.
    pub fn stylesheet_path(&self, entry: &ThemeManifestEntry) -> PathBuf {
        self.dir.join(&entry.filename)
    }

    /// Writes the stylesheet for `theme` and records `entry`.
    ///
    /// Nothing is written when the id is taken. If the manifest cannot be
    /// saved, the new stylesheet is deleted again and the library is
    /// unchanged.
    pub fn add(
        &mut self,
        entry: ThemeManifestEntry,
        theme: &Theme,
    ) -> Result<&ThemeManifestEntry, LibraryError> {
        if self.get(&entry.id).is_some() {
            return Err(LibraryError::DuplicateId(entry.id));
        }
        fs::create_dir_all(&self.dir).map_err(|source| LibraryError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let stylesheet = self.stylesheet_path(&entry);
        let css = to_css(theme, &entry.typography());
        fs::write(&stylesheet, css).map_err(|source| LibraryError::Io {
            path: stylesheet.clone(),
            source,
        })?;

        self.entries.push(entry);
        if let Err(err) = self.save_manifest() {
            self.entries.pop();
            if let Err(cleanup) = fs::remove_file(&stylesheet) {
                warn!(%cleanup, "could not delete {}", stylesheet.display());
            }
            return Err(err);
        }
        let entry = &self.entries[self.entries.len() - 1];
        info!("Saved theme `{}` to {}", entry.id, self.dir.display());
        Ok(entry)
    }

    /// Drops the entry with `id` and its stylesheet. Returns the entry.
    ///
    /// The entry stays in place if the manifest cannot be saved.
    pub fn remove(&mut self, id: &str) -> Result<Option<ThemeManifestEntry>, LibraryError> {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            return Ok(None);
        };
        let entry = self.entries.remove(index);
        if let Err(err) = self.save_manifest() {
            self.entries.insert(index, entry);
            return Err(err);
        }
        let stylesheet = self.stylesheet_path(&entry);
        match fs::remove_file(&stylesheet) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(LibraryError::Io {
                    path: stylesheet,
                    source,
                });
            }
        }
        Ok(Some(entry))
    }

    fn save_manifest(&self) -> Result<(), LibraryError> {
        let manifest = self.dir.join(MANIFEST_FILE_NAME);
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&manifest, text).map_err(|source| LibraryError::Io {
            path: manifest,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core_colors::PaletteKey, theme::ThemeBuilder};

    fn ocean() -> Theme {
        ThemeBuilder::new(Argb(0xff006a6a))
            .override_color(PaletteKey::Tertiary, Some(Argb(0xff4a6267)))
            .extended_color(ExtendedColor::new("success", Argb(0xff2e7d32)))
            .build()
    }

    #[test]
    fn test_entry_from_theme() {
        let typography = Typography::new("Fraunces", "Inter");
        let entry = ThemeManifestEntry::new("Ocean Breeze", "Calm", &ocean(), Some(&typography))
            .unwrap();
        assert_eq!(entry.id, "ocean-breeze");
        assert_eq!(entry.filename, "ocean-breeze.css");
        assert_eq!(entry.source_color, Argb(0xff006a6a));
        assert_eq!(entry.typography(), typography);
        assert_eq!(Theme::from_request(entry.to_request()), ocean());

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["sourceColor"], "#006a6a");
        assert_eq!(json["displayFont"], "Fraunces");
        assert!(json.get("contrastLevel").is_none());
    }

    #[test]
    fn test_unusable_names_are_rejected() {
        let err = ThemeManifestEntry::new("!!!", "", &ocean(), None).unwrap_err();
        assert!(matches!(err, LibraryError::InvalidName(_)));
    }

    #[test]
    fn test_missing_manifest_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let library = ThemeLibrary::open(dir.path().join("absent")).unwrap();
        assert!(library.entries().is_empty());
    }

    #[test]
    fn test_add_writes_stylesheet_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let theme = ocean();
        let mut library = ThemeLibrary::open(dir.path()).unwrap();
        let entry = ThemeManifestEntry::new("Ocean", "", &theme, None).unwrap();
        library.add(entry, &theme).unwrap();

        let css = fs::read_to_string(dir.path().join("ocean.css")).unwrap();
        assert!(css.contains("--md-sys-color-primary:"));
        assert!(css.contains("--md-ref-typeface-brand: 'Roboto', sans-serif;"));

        let reopened = ThemeLibrary::open(dir.path()).unwrap();
        assert_eq!(reopened.entries().len(), 1);
        let saved = reopened.get("ocean").unwrap();
        assert_eq!(Theme::from_request(saved.to_request()), theme);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let theme = ocean();
        let mut library = ThemeLibrary::open(dir.path()).unwrap();
        library
            .add(ThemeManifestEntry::new("Ocean", "", &theme, None).unwrap(), &theme)
            .unwrap();
        let err = library
            .add(ThemeManifestEntry::new("ocean!", "again", &theme, None).unwrap(), &theme)
            .unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateId(id) if id == "ocean"));
        assert_eq!(library.entries().len(), 1);
    }

    #[test]
    fn test_remove_deletes_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let theme = ocean();
        let mut library = ThemeLibrary::open(dir.path()).unwrap();
        library
            .add(ThemeManifestEntry::new("Ocean", "", &theme, None).unwrap(), &theme)
            .unwrap();
        let removed = library.remove("ocean").unwrap().unwrap();
        assert_eq!(removed.id, "ocean");
        assert!(!dir.path().join("ocean.css").exists());
        assert!(library.remove("ocean").unwrap().is_none());
        assert!(ThemeLibrary::open(dir.path()).unwrap().entries().is_empty());
    }

    /// Replaces the manifest with a directory so the next save fails.
    fn block_manifest(dir: &Path) {
        let manifest = dir.join(MANIFEST_FILE_NAME);
        if manifest.exists() {
            fs::remove_file(&manifest).unwrap();
        }
        fs::create_dir(manifest).unwrap();
    }

    #[test]
    fn test_failed_add_leaves_no_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let theme = ocean();
        let mut library = ThemeLibrary::open(dir.path()).unwrap();
        block_manifest(dir.path());

        let entry = ThemeManifestEntry::new("Ocean", "", &theme, None).unwrap();
        let err = library.add(entry, &theme).unwrap_err();
        assert!(matches!(err, LibraryError::Io { .. }));
        assert!(library.entries().is_empty());
        assert!(!dir.path().join("ocean.css").exists());
    }

    #[test]
    fn test_failed_remove_keeps_entry_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let theme = ocean();
        let mut library = ThemeLibrary::open(dir.path()).unwrap();
        for name in ["Ocean", "Reef", "Tide"] {
            library
                .add(ThemeManifestEntry::new(name, "", &theme, None).unwrap(), &theme)
                .unwrap();
        }
        block_manifest(dir.path());

        assert!(library.remove("reef").is_err());
        let ids: Vec<&str> = library.entries().iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, ["ocean", "reef", "tide"]);
        assert!(dir.path().join("reef.css").exists());
    }

    #[test]
    fn test_malformed_manifest_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE_NAME), "{").unwrap();
        assert!(matches!(
            ThemeLibrary::open(dir.path()),
            Err(LibraryError::Json(_))
        ));
    }
}
