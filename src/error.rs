use thiserror::Error;

/// Sharding errors
#[derive(Error, Debug)]
pub enum ShardingError {
    /// Setup-time failure. A strategy that hits this is never placed into service.
    #[error("{algorithm} initialization failed: {source}")]
    Configuration {
        algorithm: String,
        #[source]
        source: ConfigError,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Why a sharding configuration was rejected
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("property `{0}` cannot be null")]
    MissingProperty(&'static str),

    #[error("property `{key}` must be a positive integer, got `{value}`")]
    InvalidProperty { key: &'static str, value: String },

    #[error("unknown sharding algorithm type `{0}`")]
    UnknownAlgorithm(String),

    #[error("invalid sharding rule: {0}")]
    InvalidRule(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShardingError {
    pub fn configuration(algorithm: impl Into<String>, source: ConfigError) -> Self {
        Self::Configuration {
            algorithm: algorithm.into(),
            source,
        }
    }

    /// The property key a configuration error was raised for, if any.
    pub fn property_key(&self) -> Option<&'static str> {
        match self {
            Self::Configuration { source, .. } => match source {
                ConfigError::MissingProperty(key) => Some(*key),
                ConfigError::InvalidProperty { key, .. } => Some(*key),
                _ => None,
            },
            Self::InvalidArgument(_) => None,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, ShardingError>;
