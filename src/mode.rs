//! Theme mode enumeration and display-mode resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// The user's persisted theme selection.
///
/// `Light` and `Dark` are explicit choices; `System` defers to the host
/// environment's own light/dark preference at resolution time. No other
/// value is constructible: untyped input (menu selections, config files)
/// goes through the fallible [`FromStr`] parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

/// The concrete display mode actually applied to the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Light,
    Dark,
}

impl ThemeMode {
    /// All modes in menu order.
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System];

    /// Short stable name, the same string used by the persisted record.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Localization lookup path for this mode's menu label.
    pub fn label_key(self) -> &'static str {
        match self {
            ThemeMode::Light => "navigation.header.theme.light",
            ThemeMode::Dark => "navigation.header.theme.dark",
            ThemeMode::System => "navigation.header.theme.system",
        }
    }

    /// Resolves to the concrete display mode.
    ///
    /// Explicit modes resolve to themselves regardless of the ambient
    /// preference. `System` follows the ambient preference; an environment
    /// that cannot report one resolves to light.
    pub fn resolve(self, ambient: Option<ColorMode>) -> ColorMode {
        match self {
            ThemeMode::Light => ColorMode::Light,
            ThemeMode::Dark => ColorMode::Dark,
            ThemeMode::System => ambient.unwrap_or(ColorMode::Light),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(ThemeError::InvalidMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_known_modes() {
        assert_eq!("light".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
        assert_eq!("dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!("system".parse::<ThemeMode>().unwrap(), ThemeMode::System);
    }

    #[test]
    fn test_parse_rejects_unknown_input() {
        let err = "solarized".parse::<ThemeMode>().unwrap_err();
        assert_eq!(err, ThemeError::InvalidMode("solarized".to_string()));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Light".parse::<ThemeMode>().is_err());
        assert!("DARK".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for mode in ThemeMode::ALL {
            assert_eq!(mode.to_string().parse::<ThemeMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_default_is_system() {
        assert_eq!(ThemeMode::default(), ThemeMode::System);
    }

    #[test]
    fn test_menu_order() {
        assert_eq!(
            ThemeMode::ALL,
            [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System]
        );
    }

    #[test]
    fn test_label_keys() {
        assert_eq!(
            ThemeMode::Light.label_key(),
            "navigation.header.theme.light"
        );
        assert_eq!(ThemeMode::Dark.label_key(), "navigation.header.theme.dark");
        assert_eq!(
            ThemeMode::System.label_key(),
            "navigation.header.theme.system"
        );
    }

    #[test]
    fn test_resolve_explicit_ignores_ambient() {
        for ambient in [None, Some(ColorMode::Light), Some(ColorMode::Dark)] {
            assert_eq!(ThemeMode::Light.resolve(ambient), ColorMode::Light);
            assert_eq!(ThemeMode::Dark.resolve(ambient), ColorMode::Dark);
        }
    }

    #[test]
    fn test_resolve_system_follows_ambient() {
        assert_eq!(
            ThemeMode::System.resolve(Some(ColorMode::Dark)),
            ColorMode::Dark
        );
        assert_eq!(
            ThemeMode::System.resolve(Some(ColorMode::Light)),
            ColorMode::Light
        );
    }

    #[test]
    fn test_resolve_system_defaults_to_light_when_unreported() {
        assert_eq!(ThemeMode::System.resolve(None), ColorMode::Light);
    }

    proptest! {
        #[test]
        fn test_parse_only_accepts_the_three_modes(input in "[a-zA-Z]{0,12}") {
            match input.parse::<ThemeMode>() {
                Ok(mode) => prop_assert_eq!(mode.as_str(), input.as_str()),
                Err(ThemeError::InvalidMode(reported)) => prop_assert_eq!(reported, input),
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }
}
