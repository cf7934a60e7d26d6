//! Locales and localized strings.
//!
//! Stores are locale-agnostic: they keep [`LocalizedText`] as-is and the
//! caller resolves it for the active [`Locale`] at display time.

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Error returned when a locale tag is not supported.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported locale: {0}")]
pub struct LocaleError(pub String);

/// Supported storefront locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
    It,
}

impl Locale {
    /// BCP 47 language tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
            Self::It => "it",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for Locale {
    type Err = LocaleError;

    /// Accepts a bare language (`fr`) or a region-qualified tag (`fr-CH`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Ok(Self::En),
            "fr" => Ok(Self::Fr),
            "it" => Ok(Self::It),
            _ => Err(LocaleError(s.to_owned())),
        }
    }
}

/// A string with per-locale translations.
///
/// Resolution falls back to English, then to any translation present, then to
/// the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<Locale, String>);

impl LocalizedText {
    /// Text with a single English translation.
    #[must_use]
    pub fn english(text: impl Into<String>) -> Self {
        Self::default().with(Locale::En, text)
    }

    /// Builder-style insertion of a translation.
    #[must_use]
    pub fn with(mut self, locale: Locale, text: impl Into<String>) -> Self {
        self.0.insert(locale, text.into());
        self
    }

    /// Resolve the text for a locale.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &str {
        self.0
            .get(&locale)
            .or_else(|| self.0.get(&Locale::En))
            .or_else(|| self.0.values().next())
            .map_or("", String::as_str)
    }

    /// Iterate over all translations.
    pub fn translations(&self) -> impl Iterator<Item = (Locale, &str)> {
        self.0.iter().map(|(locale, text)| (*locale, text.as_str()))
    }
}
