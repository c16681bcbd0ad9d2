//! Display languages.
//!
//! Two keys identify a language: the selector label used for class-name
//! translation, and the short code used for descriptions and tips. Both map
//! onto the same [`Language`] value.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Tamil,
    Hindi,
}

/// Selector order.
pub const LANGUAGES: [Language; 3] = [Language::English, Language::Tamil, Language::Hindi];

impl Language {
    /// Label shown in the language selector.
    pub const fn label(self) -> &'static str {
        match self {
            Self::English => "English (default)",
            Self::Tamil => "தமிழ்",
            Self::Hindi => "हिन्दी",
        }
    }

    /// Code used for description and tip lookup.
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Tamil => "ta",
            Self::Hindi => "hi",
        }
    }

    /// The unmarked default: class names are left untranslated.
    pub const fn is_default(self) -> bool {
        matches!(self, Self::English)
    }

    /// Resolve a selector label exactly.
    pub fn from_label(label: &str) -> Result<Self, ConfigurationError> {
        LANGUAGES
            .into_iter()
            .find(|lang| lang.label() == label)
            .ok_or_else(|| ConfigurationError::UnknownLanguage(label.to_string()))
    }

    /// Resolve a short code exactly.
    pub fn from_code(code: &str) -> Result<Self, ConfigurationError> {
        LANGUAGES
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| ConfigurationError::UnknownLanguage(code.to_string()))
    }

    /// Best effort match for a BCP-47 style locale such as `ta-IN`.
    pub fn from_locale(locale: &str) -> Option<Self> {
        let lang = locale
            .trim()
            .split(['-', '_', '.'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        Self::from_code(&lang).ok()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts a selector label, a code, or the English name of the language.
impl FromStr for Language {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(lang) = Self::from_label(trimmed) {
            return Ok(lang);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "ta" | "tamil" => Ok(Self::Tamil),
            "hi" | "hindi" => Ok(Self::Hindi),
            _ => Err(ConfigurationError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Either a fixed language or whatever the operating system reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LanguagePreference {
    #[default]
    System,
    Fixed(Language),
}

impl LanguagePreference {
    /// `locale` is the system locale, if one could be read.
    pub fn resolve(self, locale: Option<&str>) -> Language {
        match self {
            Self::Fixed(lang) => lang,
            Self::System => locale.and_then(Language::from_locale).unwrap_or_default(),
        }
    }
}

impl FromStr for LanguagePreference {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("system") {
            Ok(Self::System)
        } else {
            s.parse().map(Self::Fixed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("English (default)", Language::English)]
    #[case("தமிழ்", Language::Tamil)]
    #[case("हिन्दी", Language::Hindi)]
    fn labels_round_trip(#[case] label: &str, #[case] lang: Language) {
        assert_eq!(Language::from_label(label).unwrap(), lang);
        assert_eq!(lang.label(), label);
    }

    #[test]
    fn from_label_is_exact() {
        assert!(matches!(
            Language::from_label("english"),
            Err(ConfigurationError::UnknownLanguage(_))
        ));
    }

    #[rstest]
    #[case("ta", Language::Tamil)]
    #[case("Hindi", Language::Hindi)]
    #[case(" EN ", Language::English)]
    #[case("தமிழ்", Language::Tamil)]
    fn parses_loose_names(#[case] input: &str, #[case] lang: Language) {
        assert_eq!(input.parse::<Language>().unwrap(), lang);
    }

    #[test]
    fn rejects_unknown_language() {
        assert!("fr".parse::<Language>().is_err());
    }

    #[rstest]
    #[case(Some("ta-IN"), Language::Tamil)]
    #[case(Some("hi_IN.UTF-8"), Language::Hindi)]
    #[case(Some("nl-NL"), Language::English)]
    #[case(None, Language::English)]
    fn system_preference_follows_locale(#[case] locale: Option<&str>, #[case] lang: Language) {
        assert_eq!(LanguagePreference::System.resolve(locale), lang);
    }

    #[test]
    fn fixed_preference_ignores_locale() {
        let pref: LanguagePreference = "hindi".parse().unwrap();
        assert_eq!(pref.resolve(Some("ta-IN")), Language::Hindi);
        assert_eq!(
            "System".parse::<LanguagePreference>().unwrap(),
            LanguagePreference::System
        );
    }
}
