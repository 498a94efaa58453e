//! Colour theme selected in the UI store.

use serde::{Deserialize, Serialize};

/// Light or dark colour scheme.
///
/// # Examples
///
/// ```
/// # use appstate::domain::Theme;
/// assert_eq!(Theme::default(), Theme::Light);
/// assert_eq!(Theme::Light.toggled(), Theme::Dark);
/// assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background, dark text.
    #[default]
    Light,
    /// Dark background, light text.
    Dark,
}

impl Theme {
    /// Returns the persisted string representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The opposite theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {input}")]
pub struct ParseThemeError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::str::FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseThemeError {
                input: s.to_owned(),
            }),
        }
    }
}
