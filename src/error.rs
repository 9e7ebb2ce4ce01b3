use std::path::PathBuf;
use thiserror::Error;

/// Flash text used when a failure carries no usable message.
pub const SERVER_ERROR: &str = "Server error!";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse form state {path}: {source}")]
    FormParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to save form state: {0}")]
    FormSave(#[from] toml::ser::Error),

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request failed: {0}")]
    Transport(#[from] ureq::Error),

    /// The server rejected the request and explained why.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The server rejected the request without a readable `message`.
    #[error("Server error! (HTTP {status})")]
    Server { status: u16 },

    #[error("Malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    /// A command failed; carries the flash text shown for it.
    #[error("{0}")]
    CommandFailed(String),
}

impl ClientError {
    /// Text shown in the flash area for this failure.
    pub fn flash_text(&self) -> &str {
        match self {
            ClientError::Api { message, .. } | ClientError::CommandFailed(message) => message,
            _ => SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
