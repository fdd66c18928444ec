//! Talking to WFM servers.
//!
//! ## Protocol
//!
//! Every query is a GET against the server's base URL; the answer is an HTML
//! page whose payload is extracted with [`decode_api_payload`]:
//!
//! - `?check-api` → `web-file-manager`
//! - `?api` → newline-separated relative paths
//! - `?api-type=<path>` → `file` for files, anything else for directories
//!
//! Files themselves are plain GETs of `<base>/<path>`.

use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use url::Url;
use wfm_tree::{combine, MatchMode, TreeBuilder, TreeNode, CONNECTED_SERVERS};

use crate::decode::{decode_api_payload, split_listing, OPEN_MARKER};
use crate::error::Error;
use crate::executor::{HttpExecutor, ReqwestExecutor};
use crate::state::ConnectionState;
use crate::types::ServerEntry;

/// Payload of `?check-api` on a WFM server.
pub const IDENTITY_TOKEN: &str = "web-file-manager";

/// Payload of `?api-type=<path>` when the path is a file.
pub const FILE_TOKEN: &str = "file";

pub const CHECK_QUERY: &str = "?check-api";
pub const LIST_QUERY: &str = "?api";
pub const TYPE_QUERY: &str = "?api-type=";

/// Client for one or more WFM servers.
///
/// Every call is a single blocking round-trip; nothing is cached between
/// calls.
pub struct WfmClient<E = ReqwestExecutor> {
    executor: E,
    builder: TreeBuilder,
}

impl WfmClient<ReqwestExecutor> {
    /// A client backed by reqwest with the default 30 second timeout.
    pub fn new() -> Result<Self, Error> {
        Ok(Self::with_executor(ReqwestExecutor::with_default_timeout()?))
    }

    /// A client backed by reqwest; `None` disables the timeout.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, Error> {
        Ok(Self::with_executor(ReqwestExecutor::new(timeout)?))
    }
}

impl<E: HttpExecutor> WfmClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self {
            executor,
            builder: TreeBuilder::default(),
        }
    }

    /// Choose how listings are nested; see [`MatchMode`].
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.builder = TreeBuilder::new(mode);
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// GET `url` and return the decoded API payload.
    ///
    /// The payload is used whatever the status code; an error status only
    /// matters when the body has no payload.
    pub fn fetch_api_content(&self, url: &str) -> Result<String, Error> {
        let parsed = parse_url(url)?;
        let response = self.executor.get(&parsed)?;

        match decode_api_payload(&response.body_text) {
            Some(payload) => {
                if !response.is_success() {
                    tracing::debug!(url, status = response.status, "API payload on error status");
                }
                Ok(payload)
            }
            None if response.is_success() => Err(Error::MalformedResponse {
                url: url.to_string(),
                message: format!("no {} region in response", OPEN_MARKER),
            }),
            None => Err(Error::ConnectionFailed {
                url: url.to_string(),
                message: format!("HTTP {} {}", response.status, response.status_text),
            }),
        }
    }

    /// True if `base_url` answers the identity check as a WFM server.
    pub fn verify_server(&self, base_url: &str) -> Result<bool, Error> {
        Ok(self.identity(base_url)? == IDENTITY_TOKEN)
    }

    /// Verify `base_url`, fetch its listing and build a tree labeled `title`.
    pub fn get_files_node(&self, base_url: &str, title: &str) -> Result<TreeNode, Error> {
        let mut progress = Progress::new(title);
        self.attempt(base_url, title, &mut progress)
    }

    /// Run one connection attempt and record where it ended.
    pub fn connect(&self, entry: &ServerEntry) -> ServerOutcome {
        let mut progress = Progress::new(&entry.name);
        let result = self.attempt(&entry.url, &entry.name, &mut progress);

        if let Err(e) = &result {
            tracing::debug!(server = %entry.name, state = ?progress.state, error = %e, "server skipped");
        }

        ServerOutcome {
            entry: entry.clone(),
            state: progress.state,
            result,
        }
    }

    /// Connect to every server in order.
    ///
    /// Each server gets its own outcome; a failure never stops the rest.
    pub fn refresh(&self, entries: &[ServerEntry]) -> Vec<ServerOutcome> {
        entries.iter().map(|entry| self.connect(entry)).collect()
    }

    /// True if `path` on the server is a file rather than a directory.
    pub fn is_file(&self, base_url: &str, path: &str) -> Result<bool, Error> {
        let url = format!("{}{}{}", base_url, TYPE_QUERY, encode_spaces(path));
        Ok(self.fetch_api_content(&url)? == FILE_TOKEN)
    }

    /// Stream `file_url` into `destination`.
    ///
    /// Parent directories and an empty destination file are created first.
    /// If the transfer fails the file is truncated to zero length, so a
    /// partial body is never left behind.
    pub fn download_file(&self, file_url: &str, destination: &Path) -> Result<u64, Error> {
        let url = parse_url(file_url)?;

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::transfer(file_url, e))?;
        }
        let mut file = File::create(destination).map_err(|e| Error::transfer(file_url, e))?;

        match self.executor.download(&url, &mut file) {
            Ok(written) => {
                tracing::info!(url = file_url, destination = %destination.display(), bytes = written, "downloaded");
                Ok(written)
            }
            Err(e) => {
                if let Err(truncate) = file.set_len(0) {
                    tracing::warn!(destination = %destination.display(), error = %truncate, "could not truncate partial download");
                }
                Err(e)
            }
        }
    }

    fn identity(&self, base_url: &str) -> Result<String, Error> {
        self.fetch_api_content(&format!("{}{}", base_url, CHECK_QUERY))
    }

    fn listing(&self, base_url: &str) -> Result<Vec<String>, Error> {
        let payload = self.fetch_api_content(&format!("{}{}", base_url, LIST_QUERY))?;
        Ok(split_listing(&payload))
    }

    fn attempt(
        &self,
        base_url: &str,
        title: &str,
        progress: &mut Progress<'_>,
    ) -> Result<TreeNode, Error> {
        progress.advance();

        let verified = self.identity(base_url).and_then(|token| {
            if token == IDENTITY_TOKEN {
                Ok(())
            } else {
                Err(Error::NotWfmServer {
                    url: base_url.to_string(),
                    token,
                })
            }
        });
        progress.step(verified)?;

        progress.advance();
        let paths = progress.step(self.listing(base_url))?;

        Ok(self.builder.build(title, &paths))
    }
}

/// Tracks and logs one attempt's [`ConnectionState`].
struct Progress<'a> {
    server: &'a str,
    state: ConnectionState,
}

impl<'a> Progress<'a> {
    fn new(server: &'a str) -> Self {
        Self {
            server,
            state: ConnectionState::Idle,
        }
    }

    fn set(&mut self, next: ConnectionState) {
        tracing::debug!(server = self.server, from = ?self.state, to = ?next, "connection state");
        self.state = next;
    }

    fn advance(&mut self) {
        self.set(self.state.advance());
    }

    fn step<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
        match &result {
            Ok(_) => self.advance(),
            Err(_) => self.set(self.state.fail()),
        }
        result
    }
}

/// Where one server's connection attempt ended.
#[derive(Debug, Clone)]
pub struct ServerOutcome {
    pub entry: ServerEntry,
    /// Always a terminal state.
    pub state: ConnectionState,
    pub result: Result<TreeNode, Error>,
}

impl ServerOutcome {
    pub fn tree(&self) -> Option<&TreeNode> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&Error> {
        self.result.as_ref().err()
    }
}

/// The `Connected servers` root holding every successful subtree, in
/// outcome order.
pub fn combined_tree(outcomes: &[ServerOutcome]) -> TreeNode {
    combine(
        CONNECTED_SERVERS,
        outcomes.iter().filter_map(|o| o.tree().cloned()),
    )
}

/// URL of `path` on the server at `base_url`.
///
/// Spaces become `%20`; nothing else is encoded.
pub fn file_url(base_url: &str, path: &str) -> String {
    let mut url = base_url.to_string();
    if !url.ends_with('/') {
        url.push('/');
    }
    url.push_str(path);
    encode_spaces(&url)
}

/// Local file for `path` of `server_name`: `download_dir/server_name/path`.
///
/// Refuses names and segments that would escape `download_dir`.
pub fn download_destination(
    download_dir: &Path,
    server_name: &str,
    path: &str,
) -> Result<PathBuf, Error> {
    let unsafe_path = || Error::UnsafePath {
        path: format!("{}/{}", server_name, path),
    };

    let mut destination = download_dir.to_path_buf();
    for segment in std::iter::once(server_name).chain(path.split('/')) {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => destination.push(segment),
            _ => return Err(unsafe_path()),
        }
    }

    Ok(destination)
}

fn encode_spaces(s: &str) -> String {
    s.replace(' ', "%20")
}

fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|source| Error::InvalidUrl {
        url: url.to_string(),
        source,
    })
}
