//! Theme preferences and the store they are read from.
//!
//! The store is passed in explicitly; nothing here reaches for global state.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Same keys the website keeps in localStorage
pub const THEME_KEY: &str = "arAIse-theme";
pub const OPACITY_KEY: &str = "arAIse-background-opacity";

pub const DEFAULT_OPACITY: f32 = 0.7;
pub const OPACITY_STEP: f32 = 0.05;

/// Key/value capability for persisted preferences
pub trait PreferencesStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// In-memory store, one per session
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferencesStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
    System,
}

impl ThemeName {
    pub const ALL: [ThemeName; 3] = [ThemeName::Dark, ThemeName::Light, ThemeName::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
            ThemeName::System => "system",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeName::Dark => "Dark",
            ThemeName::Light => "Light",
            ThemeName::System => "System",
        }
    }

    /// Swatch color shown next to the label
    pub fn swatch(&self) -> &'static str {
        match self {
            ThemeName::Dark => "#222",
            ThemeName::Light => "#fff",
            ThemeName::System => "#ddd",
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0}")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemeName {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeName::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// Snap opacity to the slider's 0.05 steps inside `0.0..=1.0`
pub fn clamp_opacity(value: f32) -> f32 {
    if !value.is_finite() {
        return DEFAULT_OPACITY;
    }
    let stepped = (value / OPACITY_STEP).round() * OPACITY_STEP;
    stepped.clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preferences {
    pub theme: ThemeName,
    pub opacity: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: ThemeName::Dark,
            opacity: DEFAULT_OPACITY,
        }
    }
}

impl Preferences {
    /// Read preferences from `store`, falling back to `defaults` for missing
    /// or unparsable values
    pub fn load(store: &dyn PreferencesStore, defaults: Preferences) -> Self {
        let theme = match store.get(THEME_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!("ignoring stored theme: {err}");
                defaults.theme
            }),
            None => defaults.theme,
        };
        let opacity = store
            .get(OPACITY_KEY)
            .and_then(|raw| raw.parse::<f32>().ok())
            .map(clamp_opacity)
            .unwrap_or(defaults.opacity);
        Self { theme, opacity }
    }

    pub fn save(&self, store: &mut dyn PreferencesStore) {
        store.set(THEME_KEY, self.theme.as_str().to_string());
        store.set(OPACITY_KEY, format!("{:.2}", self.opacity));
    }

    /// Opacity as a whole percentage for display
    pub fn opacity_percent(&self) -> u32 {
        (self.opacity * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parse() {
        assert_eq!("Light".parse::<ThemeName>().unwrap(), ThemeName::Light);
        let err = "neon".parse::<ThemeName>().unwrap_err();
        assert_eq!(err.to_string(), "unknown theme: neon");
    }

    #[test]
    fn test_clamp_opacity() {
        assert_eq!(clamp_opacity(1.7), 1.0);
        assert_eq!(clamp_opacity(-0.2), 0.0);
        assert!((clamp_opacity(0.72) - 0.7).abs() < 1e-6);
        assert_eq!(clamp_opacity(f32::NAN), DEFAULT_OPACITY);
    }

    #[test]
    fn test_load_and_save_through_store() {
        let mut store = MemoryStore::new();
        assert_eq!(
            Preferences::load(&store, Preferences::default()),
            Preferences::default()
        );

        let prefs = Preferences {
            theme: ThemeName::System,
            opacity: 0.35,
        };
        prefs.save(&mut store);
        assert_eq!(store.get("arAIse-theme").as_deref(), Some("system"));
        assert_eq!(store.get("arAIse-background-opacity").as_deref(), Some("0.35"));

        let loaded = Preferences::load(&store, Preferences::default());
        assert_eq!(loaded.theme, ThemeName::System);
        assert_eq!(loaded.opacity_percent(), 35);
    }

    #[test]
    fn test_load_ignores_garbage() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "plaid".into());
        store.set(OPACITY_KEY, "very".into());
        assert_eq!(
            Preferences::load(&store, Preferences::default()),
            Preferences::default()
        );
    }
}
