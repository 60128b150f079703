//! User profile domain model.
//!
//! # Responsibility
//! - Define the canonical profile record shared by shell and view services.
//! - Provide parse/encode helpers for the persisted `language` and
//!   `themeMode` values.
//!
//! # Invariants
//! - Storage codes are the closed sets `en|fa` and `light|dark`.
//! - Unknown stored codes fall back to defaults instead of failing reads;
//!   the store can only round-trip values this module produced.

use serde::{Deserialize, Serialize};

/// Display language for every rendered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// English, left-to-right.
    #[default]
    En,
    /// Farsi, right-to-left with native numeral glyphs.
    Fa,
}

/// Document-level text direction derived from the active language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Language {
    /// Returns the persisted storage code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fa => "fa",
        }
    }

    /// Parses a persisted storage code.
    ///
    /// Returns `None` for codes outside the supported set.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "fa" => Some(Self::Fa),
            _ => None,
        }
    }

    /// Returns the text direction the presentation layer must apply.
    pub fn text_direction(self) -> TextDirection {
        match self {
            Self::En => TextDirection::Ltr,
            Self::Fa => TextDirection::Rtl,
        }
    }

    /// Transliterates ASCII digits into this language's native glyphs.
    ///
    /// Non-digit characters pass through unchanged. For `En` the input is
    /// returned as-is.
    pub fn localize_digits(self, value: &str) -> String {
        match self {
            Self::En => value.to_string(),
            Self::Fa => value
                .chars()
                .map(|ch| match ch {
                    '0'..='9' => PERSIAN_DIGITS[ch as usize - '0' as usize],
                    other => other,
                })
                .collect(),
        }
    }
}

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Visual theme selection applied process-wide by the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Returns the persisted storage code for this theme.
    pub fn code(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a persisted storage code.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Canonical user profile record.
///
/// Created implicitly on first run when a name is submitted; afterwards it is
/// only overwritten through the profile save path, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub display_name: String,
    pub language: Language,
    pub theme_mode: ThemeMode,
}

impl UserProfile {
    /// Creates a profile with default language/theme for a first-run name.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            language: Language::default(),
            theme_mode: ThemeMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Language, TextDirection, ThemeMode};

    #[test]
    fn language_codes_roundtrip() {
        for language in [Language::En, Language::Fa] {
            assert_eq!(Language::parse(language.code()), Some(language));
        }
        assert_eq!(Language::parse("de"), None);
    }

    #[test]
    fn theme_codes_roundtrip() {
        for theme in [ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(ThemeMode::parse(theme.code()), Some(theme));
        }
        assert_eq!(ThemeMode::parse("solarized"), None);
    }

    #[test]
    fn farsi_is_rtl_english_is_ltr() {
        assert_eq!(Language::Fa.text_direction(), TextDirection::Rtl);
        assert_eq!(Language::En.text_direction(), TextDirection::Ltr);
    }

    #[test]
    fn localize_digits_translates_only_digits_for_farsi() {
        assert_eq!(Language::Fa.localize_digits("12:05:49"), "۱۲:۰۵:۴۹");
        assert_eq!(Language::En.localize_digits("12:05:49"), "12:05:49");
    }
}
