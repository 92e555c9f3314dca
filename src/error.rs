use thiserror::Error;

/// Failure to obtain the club collection. The collection stays empty and the
/// user is alerted once; there is no retry.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to read data file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("data request to '{url}' returned status {status}")]
    Status { url: String, status: u16 },

    #[error("JSON deserialization failed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Data load failed: {0}")]
    DataLoad(#[from] DataLoadError),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid session: {0}")]
    Session(String),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
