//! Translation data model.
//!
//! Dictionaries keep the key order of the server response, which is also the
//! order fields are shown in the editor.

use indexmap::IndexMap;

/// Translation key → translation text for one language
pub type LanguageDictionary = IndexMap<String, String>;

/// Language code → dictionary, in server response order
pub type TranslationSet = IndexMap<String, LanguageDictionary>;

/// Display metadata for languages the panel knows by name.
#[derive(Debug, Clone, Copy)]
pub struct KnownLanguage {
    /// Language code, also the file stem on the server (`ru` → `ru.json`)
    pub code: &'static str,

    /// Name shown in the language selector
    pub display_name: &'static str,
}

static KNOWN_LANGUAGES: [KnownLanguage; 2] = [
    KnownLanguage {
        code: "ru",
        display_name: "Русский",
    },
    KnownLanguage {
        code: "en",
        display_name: "English",
    },
];

/// Selector label for a language code, e.g. `Русский (ru.json)`.
///
/// Unknown codes fall back to the upper-cased code: `DE (de.json)`.
pub fn language_label(code: &str) -> String {
    match KNOWN_LANGUAGES.iter().find(|lang| lang.code == code) {
        Some(lang) => format!("{} ({}.json)", lang.display_name, code),
        None => format!("{} ({}.json)", code.to_uppercase(), code),
    }
}
