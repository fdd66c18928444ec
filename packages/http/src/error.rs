#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The request never produced a usable response (refused, DNS, timeout,
    /// or an error status without an API payload).
    #[error("Connection to {url} failed: {message}")]
    ConnectionFailed { url: String, message: String },

    /// The response did not contain the API marker region.
    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    /// The identity check answered with something other than the WFM token.
    #[error("{url} isn't a WFM server (identity check returned {token:?})")]
    NotWfmServer { url: String, token: String },

    #[error("Transfer of {url} failed: {message}")]
    TransferFailed { url: String, message: String },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A path that would leave the download directory.
    #[error("Refusing unsafe download path {path:?}")]
    UnsafePath { path: String },

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("Invalid server entry {line:?}: expected name///url")]
    InvalidServerEntry { line: String },
}

impl Error {
    pub(crate) fn connection(url: impl Into<String>, message: impl ToString) -> Self {
        Error::ConnectionFailed {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn transfer(url: impl Into<String>, message: impl ToString) -> Self {
        Error::TransferFailed {
            url: url.into(),
            message: message.to_string(),
        }
    }
}
