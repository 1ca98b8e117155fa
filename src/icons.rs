//! Icon lookup.
//!
//! Icons are named by string keys in the config. Every key resolves through
//! one static table at startup; an unknown key is an error, never a blank.

use thiserror::Error;

use crate::config::Config;

/// An icon the terminal can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    /// Home screen
    Home,
    /// Shop screen
    Shop,
    /// Paw print
    Paw,
    /// Dog treat
    Bone,
    /// Fish
    Fish,
    /// Bird
    Bird,
    /// Shopping cart
    Cart,
    /// Rating star
    Star,
}

/// Icon keys accepted in the config
const ICON_TABLE: &[(&str, Icon)] = &[
    ("home", Icon::Home),
    ("shop", Icon::Shop),
    ("paw", Icon::Paw),
    ("bone", Icon::Bone),
    ("fish", Icon::Fish),
    ("bird", Icon::Bird),
    ("cart", Icon::Cart),
    ("star", Icon::Star),
];

/// Icon resolution failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IconError {
    /// The key is not in the icon table
    #[error("unknown icon `{key}` (known icons: {known})")]
    Unknown {
        /// The offending key
        key: String,
        /// Comma-separated list of valid keys
        known: String,
    },
}

impl Icon {
    /// Resolve a config key
    pub fn from_key(key: &str) -> Result<Self, IconError> {
        let wanted = key.trim().to_ascii_lowercase();
        ICON_TABLE
            .iter()
            .find(|(k, _)| *k == wanted)
            .map(|(_, icon)| *icon)
            .ok_or_else(|| IconError::Unknown {
                key: key.to_string(),
                known: ICON_TABLE
                    .iter()
                    .map(|(k, _)| *k)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Glyph drawn for this icon
    pub const fn glyph(&self) -> &'static str {
        match self {
            Self::Home => "🏠",
            Self::Shop => "🛍",
            Self::Paw => "🐾",
            Self::Bone => "🦴",
            Self::Fish => "🐟",
            Self::Bird => "🐦",
            Self::Cart => "🛒",
            Self::Star => "★",
        }
    }
}

/// Icons for the navigation bar, resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavIcons {
    /// Home screen entry
    pub home: Icon,
    /// Shop screen entry
    pub shop: Icon,
}

impl Default for NavIcons {
    fn default() -> Self {
        Self {
            home: Icon::Home,
            shop: Icon::Paw,
        }
    }
}

impl NavIcons {
    /// Resolve the configured icon keys, failing on the first unknown one
    pub fn from_config(config: &Config) -> Result<Self, IconError> {
        Ok(Self {
            home: Icon::from_key(&config.home_icon)?,
            shop: Icon::from_key(&config.shop_icon)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_key_resolves() {
        for (key, icon) in ICON_TABLE {
            assert_eq!(Icon::from_key(key).unwrap(), *icon);
            assert!(!icon.glyph().is_empty());
        }
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        assert_eq!(Icon::from_key(" Paw ").unwrap(), Icon::Paw);
    }

    #[test]
    fn test_unknown_key_fails() {
        let err = Icon::from_key("unicorn").unwrap_err();
        let IconError::Unknown { key, known } = &err;
        assert_eq!(key, "unicorn");
        assert!(known.contains("paw"));
        assert!(err.to_string().contains("unicorn"));
    }

    #[test]
    fn test_nav_icons_from_config() {
        let config = Config::default();
        assert_eq!(NavIcons::from_config(&config).unwrap(), NavIcons::default());

        let config = Config {
            shop_icon: "hamster".to_string(),
            ..Config::default()
        };
        assert!(NavIcons::from_config(&config).is_err());
    }
}
