use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    /// The handle produced no response for the request
    #[error("Dispatch error for {path}: {message}")]
    DispatchError { path: String, message: String },

    #[error("Invalid path '{0}': must be non-empty and start with '/'")]
    InvalidPath(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Failed to read suite {}: {source}", path.display())]
    SuiteRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Suite file error: {0}")]
    SuiteFormat(#[from] serde_yaml::Error),
}

impl CheckError {
    pub fn dispatch(path: impl Into<String>, message: impl std::fmt::Display) -> Self {
        CheckError::DispatchError {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
