//! HTTP execution abstraction for testing.
//!
//! The connector talks to servers through [`HttpExecutor`], so its logic can
//! be exercised against canned responses without network calls.

use std::io::Write;
use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use crate::error::Error;
use crate::types::HttpResponse;

/// Default request timeout for [`ReqwestExecutor::with_default_timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for executing the two kinds of request the client makes.
pub trait HttpExecutor: Send + Sync {
    /// GET `url` and read the whole body as text.
    ///
    /// Error statuses are returned as responses; only transport failures
    /// are errors.
    fn get(&self, url: &Url) -> Result<HttpResponse, Error>;

    /// GET `url` and stream the body into `sink`, returning the byte count.
    ///
    /// A non-2xx status is a `TransferFailed` error.
    fn download(&self, url: &Url, sink: &mut dyn Write) -> Result<u64, Error>;
}

/// Production HTTP executor using reqwest.
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Create a new executor; `None` disables the request timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create with default timeout of 30 seconds.
    pub fn with_default_timeout() -> Result<Self, Error> {
        Self::new(Some(DEFAULT_TIMEOUT))
    }
}

impl HttpExecutor for ReqwestExecutor {
    fn get(&self, url: &Url) -> Result<HttpResponse, Error> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| Error::connection(url.as_str(), e))?;

        let status = response.status().as_u16();
        let body_text = response
            .text()
            .map_err(|e| Error::connection(url.as_str(), e))?;

        tracing::debug!(%url, status, bytes = body_text.len(), "response");
        Ok(HttpResponse::new(status, body_text))
    }

    fn download(&self, url: &Url, sink: &mut dyn Write) -> Result<u64, Error> {
        tracing::debug!(%url, "GET (download)");

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| Error::transfer(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::transfer(url.as_str(), format!("HTTP {}", status)));
        }

        response
            .copy_to(sink)
            .map_err(|e| Error::transfer(url.as_str(), e))
    }
}

/// Mock HTTP executor for testing.
///
/// Returns predefined responses keyed by the full request URL.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    enum Download {
        Complete(Vec<u8>),
        /// Writes the bytes, then fails.
        Broken(Vec<u8>),
    }

    /// A mock HTTP executor that returns predefined responses.
    #[derive(Clone, Default)]
    pub struct MockExecutor {
        responses: Arc<Mutex<HashMap<String, HttpResponse>>>,
        downloads: Arc<Mutex<HashMap<String, Download>>>,
        /// URLs that fail with a connection error.
        unreachable: Arc<Mutex<Vec<String>>>,
        recorded_urls: Arc<Mutex<Vec<String>>>,
    }

    impl MockExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        /// Respond to `url` with a 200 and `body`.
        pub fn with_body(self, url: impl Into<String>, body: impl Into<String>) -> Self {
            self.with_response(url, HttpResponse::new(200, body))
        }

        pub fn with_response(self, url: impl Into<String>, response: HttpResponse) -> Self {
            self.responses.lock().unwrap().insert(url.into(), response);
            self
        }

        /// Respond to `url` with an API page carrying `payload`.
        pub fn with_payload(self, url: impl Into<String>, payload: &str) -> Self {
            self.with_body(url, api_page(payload))
        }

        pub fn with_download(self, url: impl Into<String>, bytes: &[u8]) -> Self {
            self.downloads
                .lock()
                .unwrap()
                .insert(url.into(), Download::Complete(bytes.to_vec()));
            self
        }

        /// Write `partial` for `url`, then fail mid-transfer.
        pub fn with_broken_download(self, url: impl Into<String>, partial: &[u8]) -> Self {
            self.downloads
                .lock()
                .unwrap()
                .insert(url.into(), Download::Broken(partial.to_vec()));
            self
        }

        pub fn unreachable(self, url: impl Into<String>) -> Self {
            self.unreachable.lock().unwrap().push(url.into());
            self
        }

        /// Every URL requested so far, in order.
        pub fn recorded_urls(&self) -> Vec<String> {
            self.recorded_urls.lock().unwrap().clone()
        }

        fn record(&self, url: &Url) -> Result<(), Error> {
            self.recorded_urls.lock().unwrap().push(url.to_string());
            if self.unreachable.lock().unwrap().contains(&url.to_string()) {
                return Err(Error::connection(url.as_str(), "connection refused"));
            }
            Ok(())
        }
    }

    /// An HTML page with `payload` inside the API marker region.
    pub fn api_page(payload: &str) -> String {
        format!(
            "<html><body><h1>WFM</h1><div id=\"wfm-api\">{}</div></body></html>",
            payload
        )
    }

    impl HttpExecutor for MockExecutor {
        fn get(&self, url: &Url) -> Result<HttpResponse, Error> {
            self.record(url)?;

            let responses = self.responses.lock().unwrap();
            Ok(responses
                .get(url.as_str())
                .cloned()
                .unwrap_or_else(|| HttpResponse::new(404, "<h1>Not Found</h1>")))
        }

        fn download(&self, url: &Url, sink: &mut dyn Write) -> Result<u64, Error> {
            self.record(url)?;

            let download = self.downloads.lock().unwrap().get(url.as_str()).cloned();
            match download {
                Some(Download::Complete(bytes)) => {
                    sink.write_all(&bytes)
                        .map_err(|e| Error::transfer(url.as_str(), e))?;
                    Ok(bytes.len() as u64)
                }
                Some(Download::Broken(bytes)) => {
                    sink.write_all(&bytes)
                        .map_err(|e| Error::transfer(url.as_str(), e))?;
                    Err(Error::transfer(url.as_str(), "connection reset"))
                }
                None => Err(Error::transfer(url.as_str(), "HTTP 404 Not Found")),
            }
        }
    }
}
