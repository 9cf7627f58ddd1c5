pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown environment '{0}', use either 'local' or 'production'")]
    UnknownEnvironment(String),

    #[error("failed to extract the configuration: {0}")]
    Figment(#[from] Box<figment::Error>),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        ConfigError::Figment(Box::new(value))
    }
}
