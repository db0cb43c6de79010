//! Process-wide memo of generated themes.
//!
//! Front ends regenerate the same theme many times while a user drags a
//! picker back and forth. Themes are keyed by their full [`ThemeRequest`], so
//! a hit is always identical to a fresh generation. Only the most recent
//! [`MAX_CACHED_THEMES`] requests are kept.

use std::{
    collections::VecDeque,
    sync::{Arc, OnceLock},
};

use parking_lot::RwLock;
use tracing::debug;

use crate::theme::{Theme, ThemeRequest};

/// Most themes held at once; the oldest insertion is evicted first.
pub const MAX_CACHED_THEMES: usize = 16;

type CachedThemes = VecDeque<(ThemeRequest, Arc<Theme>)>;

static THEME_CACHE: OnceLock<RwLock<CachedThemes>> = OnceLock::new();

fn cache() -> &'static RwLock<CachedThemes> {
    THEME_CACHE.get_or_init(|| RwLock::new(VecDeque::with_capacity(MAX_CACHED_THEMES)))
}

fn lookup(themes: &CachedThemes, request: &ThemeRequest) -> Option<Arc<Theme>> {
    themes
        .iter()
        .find(|(key, _)| key == request)
        .map(|(_, theme)| Arc::clone(theme))
}

/// Returns the theme for `request`, generating it on first use.
pub fn global_theme(request: &ThemeRequest) -> Arc<Theme> {
    if let Some(theme) = lookup(&cache().read(), request) {
        return theme;
    }

    let theme = Arc::new(Theme::from_request(request.clone()));
    let mut themes = cache().write();
    // Another thread may have generated the same request meanwhile.
    if let Some(existing) = lookup(&themes, request) {
        return existing;
    }
    themes.push_front((request.clone(), Arc::clone(&theme)));
    themes.truncate(MAX_CACHED_THEMES);
    debug!("Theme cache holds {} entries", themes.len());
    theme
}

/// Drops every cached theme.
pub fn invalidate_theme_cache() {
    if let Some(cache) = THEME_CACHE.get() {
        cache.write().clear();
    }
}

/// Number of cached themes.
pub fn cached_theme_count() -> usize {
    THEME_CACHE.get().map_or(0, |cache| cache.read().len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Argb, core_colors::PaletteKey, theme::ThemeBuilder};

    // Serializes tests that touch the process-wide cache.
    static CACHE_LOCK: parking_lot::Mutex<()> = parking_lot::Mutex::new(());

    #[test]
    fn test_same_request_returns_same_theme() {
        let _guard = CACHE_LOCK.lock();
        let request = ThemeRequest::new(Argb(0xff3a5ba0));
        let first = global_theme(&request);
        let second = global_theme(&request);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, Theme::from_request(request));
    }

    #[test]
    fn test_different_inputs_are_cached_separately() {
        let _guard = CACHE_LOCK.lock();
        let base = ThemeBuilder::new(Argb(0xff8d4e2a));
        let plain = global_theme(base.request());
        let overridden = global_theme(
            base.clone()
                .override_color(PaletteKey::Secondary, Some(Argb(0xff00c853)))
                .request(),
        );
        assert!(!Arc::ptr_eq(&plain, &overridden));
        assert_ne!(plain.light().secondary, overridden.light().secondary);
        assert!(cached_theme_count() >= 2);
    }

    #[test]
    fn test_many_sources_stay_bounded() {
        let _guard = CACHE_LOCK.lock();
        invalidate_theme_cache();
        let first = ThemeRequest::new(Argb(0xff000100));
        let first_theme = global_theme(&first);
        for step in 1..500u32 {
            global_theme(&ThemeRequest::new(Argb(0xff000100 + step * 0x0101)));
            assert!(cached_theme_count() <= MAX_CACHED_THEMES);
        }
        assert_eq!(cached_theme_count(), MAX_CACHED_THEMES);

        // The oldest request was evicted and is generated again.
        let regenerated = global_theme(&first);
        assert!(!Arc::ptr_eq(&first_theme, &regenerated));
        assert_eq!(*first_theme, *regenerated);
    }

    #[test]
    fn test_recent_request_survives_churn() {
        let _guard = CACHE_LOCK.lock();
        invalidate_theme_cache();
        let request = ThemeRequest::new(Argb(0xff5d3fd3));
        let theme = global_theme(&request);
        for step in 0..(MAX_CACHED_THEMES as u32 - 1) {
            global_theme(&ThemeRequest::new(Argb(0xff102030 + step)));
        }
        assert!(Arc::ptr_eq(&theme, &global_theme(&request)));
    }

    #[test]
    fn test_invalidate_forces_regeneration() {
        let _guard = CACHE_LOCK.lock();
        let request = ThemeRequest::new(Argb(0xff1b6d24));
        let before = global_theme(&request);
        invalidate_theme_cache();
        let after = global_theme(&request);
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
    }
}
