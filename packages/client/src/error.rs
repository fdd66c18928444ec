use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Wfm(#[from] wfm_http::Error),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No configuration directory; pass --config-dir or set WFM_CONFIG_DIR")]
    NoConfigDir,

    #[error("Unknown server: {0}")]
    UnknownServer(String),

    #[error("A server named {0:?} already exists")]
    DuplicateServer(String),

    #[error("Invalid server name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid server URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{path} on {server} is not a file")]
    NotAFile { server: String, path: String },

    #[error("Could not open {}: {message}", path.display())]
    Open { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
