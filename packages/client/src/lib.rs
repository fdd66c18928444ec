//! # wfm-client
//!
//! Command line client for web file manager (WFM) servers.
//!
//! Servers and the download directory are kept in a small configuration
//! directory; each invocation connects to the configured servers as needed.
//!
//! ## Usage
//!
//! ```bash
//! wfm add home http://192.168.1.5/wfm/
//! wfm tree
//! wfm download home docs/notes.txt --open
//! wfm download-dir ~/Downloads/wfm
//! ```

pub mod commands;
pub mod error;
pub mod open;
pub mod render;
pub mod servers;
pub mod settings;

pub use commands::{execute, Command, CommandOutput, Context};
pub use error::Error;
pub use servers::ServerList;
pub use settings::Settings;

use std::path::PathBuf;
use std::time::Duration;

use wfm_http::MatchMode;

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub config_dir: Option<PathBuf>,
    pub timeout: Option<Duration>,
    pub match_mode: MatchMode,
    pub color: bool,
}

/// Build a context from `options` and run `command`.
pub fn run(options: Options, command: Command) -> Result<CommandOutput, Error> {
    let ctx = Context::new(options.config_dir, options.timeout, options.match_mode)?
        .with_color(options.color);
    tracing::debug!(config = %ctx.settings.config_dir().display(), ?command, "running command");
    execute(command, &ctx)
}
