use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::scene::Theme;

pub const ENV_THEME: &str = "WANDR_THEME";
pub const ENV_MINUTES: &str = "WANDR_MINUTES";

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub scene: SceneConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Session {
    #[serde(default = "default_minutes")]
    pub minutes: u64,
    #[serde(default)]
    pub autostart: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SceneConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_fps")]
    pub fps: u64,
    #[serde(default)]
    pub hide_hud: bool,
}

pub fn default_minutes() -> u64 {
    25
}

pub fn default_fps() -> u64 {
    30
}

impl Default for Session {
    fn default() -> Self {
        Self {
            minutes: default_minutes(),
            autostart: false,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            fps: default_fps(),
            hide_hud: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let mut config = Self::default();
            config.apply_env_overrides()?;
            return Ok(config);
        }

        let mut config = Self::load_from_path(&config_path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(ENV_THEME) {
            let theme = val
                .parse::<Theme>()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: ENV_THEME,
                    value: val.clone(),
                })?;
            self.scene.theme = theme;
        }

        if let Ok(val) = env::var(ENV_MINUTES) {
            let minutes = val
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: ENV_MINUTES,
                    value: val.clone(),
                })?;
            self.session.minutes = minutes;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.minutes == 0 || self.session.minutes > 600 {
            return Err(ConfigError::InvalidMinutes(self.session.minutes));
        }

        if self.scene.fps < 5 || self.scene.fps > 60 {
            return Err(ConfigError::InvalidFps(self.scene.fps));
        }

        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(ConfigError::ParseError)
    }

    pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else {
            dirs::config_dir()
                .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
                .ok_or(ConfigError::NoConfigDir)?
        };

        Ok(config_dir.join("wandr"))
    }

    pub fn get_config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.display().to_string(),
            source: e,
        })
    }

    pub fn session_secs(&self) -> u32 {
        (self.session.minutes * 60) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_config_deserialize_valid() {
        let toml_content = r#"
[session]
minutes = 45

[scene]
theme = "ocean"
"#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.session.minutes, 45);
        assert_eq!(config.scene.theme, Theme::Ocean);
        assert_eq!(config.scene.fps, default_fps());
    }

    #[test]
    fn test_config_defaults_from_empty_input() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.session.minutes, 25);
        assert!(!config.session.autostart);
        assert_eq!(config.scene.theme, Theme::Desert);
        assert_eq!(config.scene.fps, 30);
        assert!(!config.scene.hide_hud);
    }

    #[test]
    fn test_config_session_secs() {
        let config = Config::default();
        assert_eq!(config.session_secs(), 1500);
    }

    #[test]
    fn test_config_load_from_path_success() {
        let toml_content = r#"
[session]
minutes = 50
autostart = true

[scene]
theme = "snow"
fps = 24
hide_hud = true
"#;
        let temp_dir = std::env::temp_dir();
        let test_config_path = temp_dir.join("wandr_test_config.toml");
        fs::write(&test_config_path, toml_content).unwrap();

        let config = Config::load_from_path(&test_config_path).unwrap();
        assert_eq!(config.session.minutes, 50);
        assert!(config.session.autostart);
        assert_eq!(config.scene.theme, Theme::Snow);
        assert_eq!(config.scene.fps, 24);
        assert!(config.scene.hide_hud);

        fs::remove_file(test_config_path).ok();
    }

    #[test]
    fn test_config_load_from_path_file_not_found() {
        let nonexistent_path = PathBuf::from("/tmp/nonexistent_wandr_config_12345.toml");
        let result = Config::load_from_path(&nonexistent_path);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), "ReadError");
    }

    #[test]
    fn test_config_load_from_path_invalid_toml() {
        let toml_content = "this is not valid toml {{{{";
        let temp_dir = std::env::temp_dir();
        let test_config_path = temp_dir.join("wandr_test_invalid.toml");
        fs::write(&test_config_path, toml_content).unwrap();

        let result = Config::load_from_path(&test_config_path);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), "ParseError");

        fs::remove_file(test_config_path).ok();
    }

    #[test]
    fn test_config_unknown_theme_fails_parse() {
        let toml_content = r#"
[scene]
theme = "volcano"
"#;
        let result: Result<Config, _> = toml::from_str(toml_content);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_zero_minutes() {
        let mut config = Config::default();
        config.session.minutes = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), "InvalidMinutes");
    }

    #[test]
    fn test_validation_excessive_minutes() {
        let mut config = Config::default();
        config.session.minutes = 601;
        let result = config.validate();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), "InvalidMinutes");
    }

    #[test]
    fn test_validation_fps_bounds() {
        let mut config = Config::default();
        config.scene.fps = 4;
        assert_eq!(config.validate().unwrap_err().kind(), "InvalidFps");
        config.scene.fps = 61;
        assert_eq!(config.validate().unwrap_err().kind(), "InvalidFps");
        config.scene.fps = 5;
        assert!(config.validate().is_ok());
        config.scene.fps = 60;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_boundary_minutes() {
        let mut config = Config::default();
        config.session.minutes = 1;
        assert!(config.validate().is_ok());
        config.session.minutes = 600;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_theme_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::set_var(ENV_THEME, "snow");
            env::remove_var(ENV_MINUTES);
        }
        let mut config = Config::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.scene.theme, Theme::Snow);
        unsafe { env::remove_var(ENV_THEME) };
    }

    #[test]
    fn test_env_var_minutes_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::remove_var(ENV_THEME);
            env::set_var(ENV_MINUTES, "52");
        }
        let mut config = Config::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.session.minutes, 52);
        unsafe { env::remove_var(ENV_MINUTES) };
    }

    #[test]
    fn test_env_var_invalid_theme() {
        let _guard = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::set_var(ENV_THEME, "lagoon");
            env::remove_var(ENV_MINUTES);
        }
        let mut config = Config::default();
        let result = config.apply_env_overrides();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), "InvalidEnvVar");
        unsafe { env::remove_var(ENV_THEME) };
    }

    #[test]
    fn test_env_var_invalid_minutes() {
        let _guard = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::remove_var(ENV_THEME);
            env::set_var(ENV_MINUTES, "soon");
        }
        let mut config = Config::default();
        let result = config.apply_env_overrides();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), "InvalidEnvVar");
        unsafe { env::remove_var(ENV_MINUTES) };
    }

    #[test]
    fn test_env_var_overrides_config_file_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let toml_content = r#"
[session]
minutes = 25

[scene]
theme = "desert"
"#;
        unsafe {
            env::set_var(ENV_THEME, "ocean");
            env::set_var(ENV_MINUTES, "90");
        }
        let temp_dir = std::env::temp_dir();
        let path = temp_dir.join("wandr_test_env_override.toml");
        fs::write(&path, toml_content).unwrap();
        let mut config = Config::load_from_path(&path).unwrap();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.scene.theme, Theme::Ocean);
        assert_eq!(config.session.minutes, 90);
        fs::remove_file(path).ok();
        unsafe {
            env::remove_var(ENV_THEME);
            env::remove_var(ENV_MINUTES);
        }
    }

    #[test]
    fn test_config_save_round_trip() {
        let config = Config {
            session: Session {
                minutes: 15,
                autostart: true,
            },
            scene: SceneConfig {
                theme: Theme::Ocean,
                fps: 45,
                hide_hud: true,
            },
        };

        let temp_dir = std::env::temp_dir();
        let path = temp_dir.join("wandr_test_save_roundtrip.toml");

        config.save(&path).unwrap();
        let loaded = Config::load_from_path(&path).unwrap();

        assert_eq!(loaded.session.minutes, 15);
        assert!(loaded.session.autostart);
        assert_eq!(loaded.scene.theme, Theme::Ocean);
        assert_eq!(loaded.scene.fps, 45);
        assert!(loaded.scene.hide_hud);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_config_save_default_round_trip() {
        let config = Config::default();

        let temp_dir = std::env::temp_dir();
        let path = temp_dir.join("wandr_test_save_default.toml");

        config.save(&path).unwrap();
        let loaded = Config::load_from_path(&path).unwrap();

        assert_eq!(loaded.session.minutes, config.session.minutes);
        assert_eq!(loaded.scene.theme, config.scene.theme);
        assert_eq!(loaded.scene.fps, config.scene.fps);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_config_save_to_invalid_path() {
        let config = Config::default();
        let path = PathBuf::from("/nonexistent_dir_12345/config.toml");
        let result = config.save(&path);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), "WriteError");
    }
}
