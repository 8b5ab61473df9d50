//! Mapping from project locale codes to translation API language codes.

/// Source language of every translation request.
pub const SOURCE_LANGUAGE: &str = "zh";

/// Project locale codes whose API code differs from the locale itself.
pub const LANG_MAP: &[(&str, &str)] = &[("en-US", "en"), ("en_US", "en"), ("zh-TW", "zh-tw")];

/// Returns the API language code for a project locale.
///
/// Locales without an entry are passed through unchanged.
pub fn api_language(locale: &str) -> &str {
    LANG_MAP
        .iter()
        .find(|(code, _)| *code == locale)
        .map_or(locale, |(_, api)| api)
}
