//! # wfm-http
//!
//! Client for web file manager (WFM) servers.
//!
//! A WFM server publishes its file list through query parameters on its
//! base URL, wrapped in an HTML page. This crate fetches and decodes those
//! pages, rebuilds each server's directory tree, and downloads files.
//!
//! ## Example
//!
//! ```ignore
//! use wfm_http::{combined_tree, ServerEntry, WfmClient};
//!
//! let client = WfmClient::new()?;
//!
//! // One server
//! let tree = client.get_files_node("http://192.168.1.5/wfm/", "home")?;
//!
//! // Several servers; failures are reported per server
//! let servers = vec![ServerEntry::new("home", "http://192.168.1.5/wfm/")];
//! let outcomes = client.refresh(&servers);
//! let root = combined_tree(&outcomes);
//! ```

pub mod connector;
pub mod decode;
pub mod error;
pub mod executor;
pub mod state;
pub mod types;

pub use connector::{
    combined_tree, download_destination, file_url, ServerOutcome, WfmClient, FILE_TOKEN,
    IDENTITY_TOKEN,
};
pub use error::Error;
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use state::ConnectionState;
pub use types::{HttpResponse, ServerEntry};

pub use wfm_tree::{MatchMode, TreeNode};
