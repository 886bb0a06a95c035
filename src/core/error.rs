use thiserror::Error;

#[derive(Error, Debug)]
pub enum HivewardError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Malformed home coordinates: {0:?}")]
    MalformedHome(String),
}

pub type Result<T> = std::result::Result<T, HivewardError>;
