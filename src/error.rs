use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("could not determine a config directory")]
    NoConfigDir,

    #[error("invalid value {value:?} for environment variable {name}")]
    InvalidEnvVar { name: &'static str, value: String },

    #[error("session length must be between 1 and 600 minutes, got {0}")]
    InvalidMinutes(u64),

    #[error("fps must be between 5 and 60, got {0}")]
    InvalidFps(u64),

    #[error("unknown theme {0:?} (expected desert, ocean, or snow)")]
    InvalidTheme(String),
}

impl ConfigError {
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigError::ReadError { .. } => "ReadError",
            ConfigError::WriteError { .. } => "WriteError",
            ConfigError::ParseError(_) => "ParseError",
            ConfigError::SerializeError(_) => "SerializeError",
            ConfigError::NoConfigDir => "NoConfigDir",
            ConfigError::InvalidEnvVar { .. } => "InvalidEnvVar",
            ConfigError::InvalidMinutes(_) => "InvalidMinutes",
            ConfigError::InvalidFps(_) => "InvalidFps",
            ConfigError::InvalidTheme(_) => "InvalidTheme",
        }
    }
}

#[derive(Error, Debug)]
pub enum OnboardError {
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl OnboardError {
    pub fn kind(&self) -> &'static str {
        match self {
            OnboardError::Prompt(_) => "Prompt",
            OnboardError::Config(_) => "Config",
        }
    }
}
