//! Localized strings for `reefboard-ui`.
//!
//! Fluent files are embedded at compile time from `i18n/<lang>/reefboard-ui.ftl`;
//! `en-US` is the fallback and the reference for the completeness tests.
//!
//! ```ignore
//! use crate::t;
//! let notice = t!("chart-no-data");
//! let hint = t!("range-below", min = "1");
//! ```
//!
//! The browser build asks `navigator.languages` for the preferred locale; native
//! builds (tests) ask the OS.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// Translation lookup routed through [`LOADER`], with optional Fluent arguments.
/// Loads the bundles on first use.
#[macro_export]
macro_rules! t {
    ($key:literal) => {{
        $crate::i18n::init();
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    }};
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {{
        $crate::i18n::init();
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    }};
}

/// Fluent domain; the fallback file is `i18n/en-US/{DOMAIN}.ftl`.
const DOMAIN: &str = "reefboard-ui";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Load the bundles for the requested languages (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = select(&requested) {
            tracing::warn!(%err, "language selection failed; continuing with fallback");
        }
    });
}

/// Switch language at runtime. Tags that do not parse are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        tracing::debug!(%tag, "ignoring unparseable language tag");
        return Ok(());
    };
    select(&[lang])
}

/// Load bundles for `langs`. Every load builds fresh bundles, so the bidi
/// isolation setting is reapplied afterwards; isolation marks around
/// placeables would leak into `title` tooltips.
fn select(langs: &[LanguageIdentifier]) -> Result<(), i18n_embed::I18nEmbedError> {
    let selected = i18n_embed::select(&*LOADER, &Localizations, langs);
    LOADER.set_use_isolating(false);
    selected.map(|_| ())
}

/// Embedded language identifiers, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use i18n_embed::LanguageLoader;

    #[test]
    fn bundled_languages() {
        let langs = available_languages();
        assert!(langs.iter().any(|l| l == "en-US"));
        assert!(langs.iter().any(|l| l == "es-ES"));
    }

    #[test]
    fn placeables_are_not_isolated() {
        init();
        let text = fl!(&*LOADER, "range-below", min = "1");
        assert!(!text.contains('\u{2068}'), "{text:?}");
        assert!(text.contains('1'));
    }

    #[test]
    fn switching_language_keeps_placeables_plain() {
        init();
        // Reload the active language so the output other tests see is unchanged.
        let current = LOADER.current_language().to_string();
        set_language(&current).unwrap();
        let text = fl!(&*LOADER, "range-above", max = "12");
        assert!(!text.contains('\u{2068}') && !text.contains('\u{2069}'), "{text:?}");
    }

    #[test]
    fn invalid_language_tag_is_ignored() {
        init();
        let before = fl!(&*LOADER, "chart-no-data");
        assert!(set_language("not a tag!").is_ok());
        let after = fl!(&*LOADER, "chart-no-data");
        assert_eq!(before, after);
    }
}
