use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file at {path}: {source}")]
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

    #[error("invalid value for {name}: {value}")]
    InvalidEnvVar { name: &'static str, value: String },

    #[error("gap_coefficient must be in (0.0, 10.0], got {0}")]
    InvalidGapCoefficient(f64),

    #[error("max_obstacle_duplication must be at least 1, got {0}")]
    InvalidMaxDuplication(usize),

    #[error("fps_cap must be between 1 and 120, got {0}")]
    InvalidFpsCap(u64),
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
            ConfigError::InvalidGapCoefficient(_) => "InvalidGapCoefficient",
            ConfigError::InvalidMaxDuplication(_) => "InvalidMaxDuplication",
            ConfigError::InvalidFpsCap(_) => "InvalidFpsCap",
        }
    }
}
