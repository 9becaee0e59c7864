use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

pub const THEME_KEY: &str = "weather_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors derived from a theme and applied to the chart and panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Rgb,
    pub accent_bg: Rgb,
    pub text: Rgb,
    pub grid: Rgb,
    pub success: Rgb,
    pub danger: Rgb,
}

impl Theme {
    /// Only the exact stored value `"light"` selects the light theme.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette {
                accent: Rgb(0x25, 0x63, 0xeb),
                accent_bg: Rgb(0xdb, 0xe6, 0xfd),
                text: Rgb(0x47, 0x55, 0x69),
                grid: Rgb(0xcb, 0xd5, 0xe1),
                success: Rgb(0x15, 0x80, 0x3d),
                danger: Rgb(0xdc, 0x26, 0x26),
            },
            Theme::Dark => Palette {
                accent: Rgb(0x38, 0xbd, 0xf8),
                accent_bg: Rgb(0x0c, 0x2a, 0x3d),
                text: Rgb(0x94, 0xa3, 0xb8),
                grid: Rgb(0x33, 0x41, 0x55),
                success: Rgb(0x4a, 0xde, 0x80),
                danger: Rgb(0xf8, 0x71, 0x71),
            },
        }
    }

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        Ok(Self::from_stored(store.get(THEME_KEY)?.as_deref()))
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<()> {
        store.set(THEME_KEY, self.as_str())
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn only_light_is_light() {
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("Light")), Theme::Dark);
        assert_eq!(Theme::from_stored(None), Theme::Dark);
    }

    #[test]
    fn toggle_flips_between_two_values() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn save_then_load_persists_choice() {
        let store = MemoryStore::new();
        assert_eq!(Theme::load(&store).unwrap(), Theme::Dark);

        Theme::Light.save(&store).unwrap();
        assert_eq!(Theme::load(&store).unwrap(), Theme::Light);
    }

    #[test]
    fn palettes_differ_between_themes() {
        assert_ne!(Theme::Light.palette(), Theme::Dark.palette());
    }
}
