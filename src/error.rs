use std::path::PathBuf;
use thiserror::Error;

use crate::types::UserId;

#[derive(Error, Debug)]
pub enum UserSyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Non-2xx response. `message` is the `error` field of the body, if any.
    #[error("API error (status {status}): {}", .message.as_deref().unwrap_or("<no error message>"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid API URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("{0}")]
    InvalidForm(String),

    /// An operation failed; carries the text of the error slot.
    #[error("{0}")]
    Failed(String),
}

impl UserSyncError {
    /// Message supplied by the server in a failure payload, if there was one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, UserSyncError>;
