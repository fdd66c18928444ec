use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// HTTP response as seen by the decoder
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Status text (e.g., "OK", "Not Found")
    pub status_text: String,

    /// Full body decoded as text
    pub body_text: String,
}

impl HttpResponse {
    pub fn new(status: u16, body_text: impl Into<String>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();

        Self {
            status,
            status_text,
            body_text: body_text.into(),
        }
    }

    /// Check if the response status indicates success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Separator between the name and URL of a persisted server entry.
pub const ENTRY_SEPARATOR: &str = "///";

/// A configured server: display name and base URL.
///
/// Persisted as one `name///url` line. The name must not contain `///`;
/// parsing splits on the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEntry {
    pub name: String,
    pub url: String,
}

impl ServerEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// The persisted form, `name///url`.
    pub fn to_line(&self) -> String {
        format!("{}{}{}", self.name, ENTRY_SEPARATOR, self.url)
    }
}

impl FromStr for ServerEntry {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line.split_once(ENTRY_SEPARATOR) {
            Some((name, url)) if !name.is_empty() && !url.is_empty() => {
                Ok(ServerEntry::new(name, url))
            }
            _ => Err(Error::InvalidServerEntry {
                line: line.to_string(),
            }),
        }
    }
}

impl fmt::Display for ServerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}
