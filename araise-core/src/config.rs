use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::content::{ContentError, ContentProvider};
use crate::platform::Os;
use crate::preferences::{Preferences, ThemeName, clamp_opacity};
use crate::render::DEFAULT_PROMPT;
use crate::session::{DEFAULT_DASHBOARD_ROUTE, SessionSettings};

pub const CONFIG_NAMES: [&str; 4] = ["araise.yml", "araise.yaml", ".araise.yml", ".araise.yaml"];

/// Environment variable naming a config file explicitly
pub const CONFIG_ENV: &str = "ARAISE_CONFIG";

/// Root configuration file structure
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct AraiseConfig {
    /// Config file version
    #[serde(default = "default_version")]
    pub version: String,

    /// Prompt shown before every command
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Directory holding projects.json, team.json, blog.json and contact.json.
    /// Relative paths resolve against the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_dir: Option<PathBuf>,

    /// Override for OS detection (windows, mac, linux)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,

    /// Theme used when no preference has been saved
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Background opacity used when no preference has been saved
    #[serde(default = "default_opacity")]
    pub opacity: f32,

    /// Run `help` when the terminal opens
    #[serde(default = "default_true")]
    pub help_on_start: bool,

    /// Route `dashboard` and `website` navigate to
    #[serde(default = "default_route")]
    pub dashboard_route: String,
}

fn default_version() -> String {
    "1".into()
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.into()
}

fn default_theme() -> String {
    ThemeName::Dark.as_str().into()
}

fn default_opacity() -> f32 {
    crate::preferences::DEFAULT_OPACITY
}

fn default_true() -> bool {
    true
}

fn default_route() -> String {
    DEFAULT_DASHBOARD_ROUTE.into()
}

impl Default for AraiseConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            prompt: default_prompt(),
            content_dir: None,
            os: None,
            theme: default_theme(),
            opacity: default_opacity(),
            help_on_start: true,
            dashboard_route: default_route(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("opacity must be between 0 and 1, got {0}")]
    InvalidOpacity(f32),
    #[error("unknown theme '{0}' (expected dark, light or system)")]
    UnknownTheme(String),
    #[error("unknown os '{0}' (expected windows, mac or linux)")]
    UnknownOs(String),
    #[error("dashboard route '{0}' must start with '/'")]
    InvalidRoute(String),
    #[error("no config file found, searched: {searched:?}")]
    NotFound { searched: Vec<PathBuf> },
}

impl AraiseConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Load configuration from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: AraiseConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Search the environment variable, then `start_dir` and its parents
    pub fn discover(start_dir: &Path) -> Result<(PathBuf, Self), ConfigError> {
        let mut searched = Vec::new();

        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(&env_path);
            if path.exists() {
                return Ok((path.clone(), Self::load(&path)?));
            }
            searched.push(path);
        }

        let mut dir = Some(start_dir);
        while let Some(current) = dir {
            if let Some(path) = Self::find_in(current) {
                let config = Self::load(&path)?;
                return Ok((path, config));
            }
            searched.extend(CONFIG_NAMES.iter().map(|name| current.join(name)));
            dir = current.parent();
        }

        Err(ConfigError::NotFound { searched })
    }

    /// First config file present directly inside `dir`
    pub fn find_in(dir: &Path) -> Option<PathBuf> {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.theme_name()?;
        self.os_override()?;
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::InvalidOpacity(self.opacity));
        }
        if !self.dashboard_route.starts_with('/') {
            return Err(ConfigError::InvalidRoute(self.dashboard_route.clone()));
        }
        Ok(())
    }

    pub fn theme_name(&self) -> Result<ThemeName, ConfigError> {
        self.theme
            .parse()
            .map_err(|_| ConfigError::UnknownTheme(self.theme.clone()))
    }

    pub fn os_override(&self) -> Result<Option<Os>, ConfigError> {
        self.os
            .as_deref()
            .map(|raw| raw.parse().map_err(|_| ConfigError::UnknownOs(raw.to_string())))
            .transpose()
    }

    /// Settings for a new session: the configured OS or the detected one,
    /// plus default preferences
    pub fn session_settings(&self) -> Result<SessionSettings, ConfigError> {
        let os = match self.os_override()? {
            Some(os) => os,
            None => Os::detect(),
        };
        Ok(SessionSettings {
            os,
            dashboard_route: self.dashboard_route.clone(),
            preferences: Preferences {
                theme: self.theme_name()?,
                opacity: clamp_opacity(self.opacity),
            },
        })
    }

    /// Content named by `content_dir`, or the bundled fixtures.
    /// `base` is the directory relative paths resolve against.
    pub fn load_content(&self, base: &Path) -> Result<ContentProvider, ContentError> {
        match &self.content_dir {
            Some(dir) if dir.is_absolute() => ContentProvider::load_dir(dir),
            Some(dir) => ContentProvider::load_dir(&base.join(dir)),
            None => ContentProvider::bundled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AraiseConfig::from_str("{}").unwrap();
        assert_eq!(config, AraiseConfig::default());
        assert_eq!(config.prompt, "guest@arAIse:~$");
        assert!(config.help_on_start);
        assert_eq!(config.dashboard_route, "/dashboard");
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
prompt: "me@box:~$"
content_dir: ./content
os: macos
theme: light
opacity: 0.42
help_on_start: false
dashboard_route: /home
"#;
        let config = AraiseConfig::from_str(yaml).unwrap();
        assert_eq!(config.content_dir, Some(PathBuf::from("./content")));
        assert!(!config.help_on_start);

        let settings = config.session_settings().unwrap();
        assert_eq!(settings.os, Os::Mac);
        assert_eq!(settings.dashboard_route, "/home");
        assert_eq!(settings.preferences.theme, ThemeName::Light);
        assert!((settings.preferences.opacity - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            AraiseConfig::from_str("theme: neon"),
            Err(ConfigError::UnknownTheme(t)) if t == "neon"
        ));
        assert!(matches!(
            AraiseConfig::from_str("os: beos"),
            Err(ConfigError::UnknownOs(_))
        ));
        assert!(matches!(
            AraiseConfig::from_str("opacity: 1.5"),
            Err(ConfigError::InvalidOpacity(_))
        ));
        assert!(matches!(
            AraiseConfig::from_str("dashboard_route: dashboard"),
            Err(ConfigError::InvalidRoute(_))
        ));
        assert!(matches!(
            AraiseConfig::from_str("opacity: [1]"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_find_in_and_load() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AraiseConfig::find_in(dir.path()).is_none());

        let path = dir.path().join(".araise.yml");
        std::fs::write(&path, "theme: system\n").unwrap();
        assert_eq!(AraiseConfig::find_in(dir.path()), Some(path.clone()));

        let config = AraiseConfig::load(&path).unwrap();
        assert_eq!(config.theme_name().unwrap(), ThemeName::System);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("araise.yml");
        let err = AraiseConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("araise.yml"));
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = AraiseConfig::default().to_yaml().unwrap();
        assert!(yaml.contains("prompt:"));
        assert!(!yaml.contains("content_dir"));
        assert_eq!(AraiseConfig::from_str(&yaml).unwrap(), AraiseConfig::default());
    }

    #[test]
    fn test_load_content_relative_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AraiseConfig {
            content_dir: Some(PathBuf::from("missing")),
            ..AraiseConfig::default()
        };
        let err = config.load_content(dir.path()).unwrap_err();
        assert!(err.to_string().contains("missing"));

        let bundled = AraiseConfig::default().load_content(dir.path()).unwrap();
        assert_eq!(bundled.list_projects().len(), 3);
    }
}
